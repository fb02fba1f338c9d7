//! Fuzzy motion input matching
//!
//! A motion definition is an ordered list of alternative step sequences.
//! Matching walks each variant's steps from last to first, scanning the
//! history backwards within the motion's buffer window, so the most recent
//! required input resolves first and earlier steps are forced strictly
//! before it in time.
//!
//! Directional requirements are side-relative: left/right swap through the
//! history's [`InputSide`](rushdown_core::InputSide). Charge requirements
//! read the incremental charge counters instead of re-scanning held
//! durations.

use rushdown_core::{
    previous_index, INPUT_DOWN, INPUT_FACE_A, INPUT_FACE_B, INPUT_FACE_C, INPUT_FACE_D, INPUT_LEFT,
    INPUT_RIGHT, INPUT_UP,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{InputHistory, HISTORY_SIZE};

/// A directional requirement: neutral or one of the eight octants
///
/// Left/right are side-relative; `Left` means "back" for a right-facing
/// entity and "forward" for a left-facing one is `Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    /// No direction held
    #[default]
    Neutral,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

/// How a directional or button requirement is evaluated at a history index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CheckMode {
    /// Bit set now, clear in the previous entry, transition this tick
    Press,
    /// Bit set now
    #[default]
    Hold,
    /// Bit clear now, set in the previous entry, transition this tick
    Release,
    /// Bit clear now, set in the previous entry, any time since (lenient)
    WasPressed,
    /// Bit clear now
    NotPressed,
}

/// One required input in a motion sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MotionStep {
    /// Required direction, or `Neutral` for no directional requirement
    pub direction: Direction,
    /// How the direction is evaluated
    pub direction_mode: CheckMode,
    /// Required face button bits; zero means no button requirement
    pub buttons: u16,
    /// How the buttons are evaluated
    pub button_mode: CheckMode,
}

impl MotionStep {
    /// A step requiring a direction and buttons
    pub fn new(direction: Direction, direction_mode: CheckMode, buttons: u16, button_mode: CheckMode) -> Self {
        Self {
            direction,
            direction_mode,
            buttons,
            button_mode,
        }
    }

    /// A direction-only step
    pub fn direction(direction: Direction, mode: CheckMode) -> Self {
        Self {
            direction,
            direction_mode: mode,
            ..Self::default()
        }
    }

    /// A button-only step
    pub fn buttons(buttons: u16, mode: CheckMode) -> Self {
        Self {
            buttons,
            button_mode: mode,
            ..Self::default()
        }
    }
}

/// One alternative way to perform a motion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MotionVariant {
    /// Required inputs in performance order (earliest first)
    pub steps: Vec<MotionStep>,
}

/// A complete motion definition
///
/// Variants are tried in declaration order; the first one that fully
/// resolves wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MotionInput {
    /// Alternative step sequences
    pub variants: Vec<MotionVariant>,
    /// Maximum cumulative held-duration (ticks) the scan may walk backward
    /// through per step; zero means bounded only by the history size
    pub buffer_window: u16,
    /// Isolate cardinals from diagonals: a cardinal requirement fails while
    /// the opposite-axis pair has any bit held
    pub absolute_direction: bool,
    /// Minimum held-direction ticks for charge steps; zero disables charge
    /// matching entirely
    pub charge_threshold: i32,
}

impl InputHistory {
    /// Check whether a motion has been performed within its buffer window
    ///
    /// Stateless over the history; returns `false` for empty or malformed
    /// definitions rather than panicking.
    pub fn check_motion_inputs(&self, motion: &MotionInput) -> bool {
        for (variant_index, variant) in motion.variants.iter().enumerate() {
            if variant.steps.is_empty() {
                continue;
            }
            if self.check_variant(variant, motion) {
                debug!(variant = variant_index, "motion input matched");
                return true;
            }
        }
        false
    }

    /// Check whether the final step of a motion is no longer being held
    ///
    /// Evaluates only the first variant's last step under `Hold` semantics
    /// at the current tick. Used to gate re-triggering until release.
    pub fn check_input_end(&self, motion: &MotionInput) -> bool {
        let Some(variant) = motion.variants.first() else {
            return false;
        };
        let Some(step) = variant.steps.last() else {
            return false;
        };

        let index = self.current_index();
        let has_direction = step.direction != Direction::Neutral;
        let has_buttons = step.buttons != 0;
        let direction_active =
            self.check_direction(index, step.direction, CheckMode::Hold, motion.absolute_direction);
        let buttons_active = self.check_buttons(index, step.buttons, CheckMode::Hold);

        if has_direction && !has_buttons {
            !direction_active
        } else if !has_direction && has_buttons {
            !buttons_active
        } else {
            !direction_active && !buttons_active
        }
    }

    fn check_variant(&self, variant: &MotionVariant, motion: &MotionInput) -> bool {
        // The most recent required input is resolved first; each earlier
        // step must then resolve strictly before the one after it.
        let mut cursor = self.current_index();
        for step in variant.steps.iter().rev() {
            match self.find_step(cursor, step, motion) {
                Some(found) => cursor = previous_index(found, HISTORY_SIZE),
                None => return false,
            }
        }
        true
    }

    /// Scan backwards from `start` for an entry satisfying `step`
    ///
    /// The scan accumulates each visited entry's duration; it stops once the
    /// running total exceeds the buffer window or the whole ring has been
    /// visited.
    fn find_step(&self, start: usize, step: &MotionStep, motion: &MotionInput) -> Option<usize> {
        let window = if motion.buffer_window > 0 {
            u32::from(motion.buffer_window)
        } else {
            u32::MAX
        };

        let mut ticks_scanned: u32 = 0;
        let mut entries_visited = 0;
        let mut index = start;

        while entries_visited < HISTORY_SIZE && ticks_scanned <= window {
            if self.check_step(index, step, motion) {
                return Some(index);
            }
            ticks_scanned = ticks_scanned.saturating_add(u32::from(self.entry(index).duration));
            entries_visited += 1;
            index = previous_index(index, HISTORY_SIZE);
        }
        None
    }

    fn check_step(&self, index: usize, step: &MotionStep, motion: &MotionInput) -> bool {
        let has_direction = step.direction != Direction::Neutral;
        let has_buttons = step.buttons != 0;

        let direction_ok = self.check_direction(
            index,
            step.direction,
            step.direction_mode,
            motion.absolute_direction,
        );
        let buttons_ok = if has_buttons {
            self.check_buttons(index, step.buttons, step.button_mode)
        } else {
            true
        };
        let charge_ok = motion.charge_threshold > 0
            && has_direction
            && self.check_charge(index, step.direction, motion.charge_threshold);

        match (has_direction, has_buttons) {
            (true, false) => direction_ok || charge_ok,
            (false, true) => buttons_ok,
            (true, true) => (direction_ok || charge_ok) && buttons_ok,
            (false, false) => direction_ok && buttons_ok,
        }
    }

    /// Evaluate a directional requirement at a history index
    pub fn check_direction(
        &self,
        index: usize,
        direction: Direction,
        mode: CheckMode,
        absolute: bool,
    ) -> bool {
        let (left_mask, right_mask) = if self.side().is_mirrored() {
            (INPUT_RIGHT, INPUT_LEFT)
        } else {
            (INPUT_LEFT, INPUT_RIGHT)
        };

        let left = self.check_bit(index, left_mask, mode);
        let right = self.check_bit(index, right_mask, mode);
        let up = self.check_bit(index, INPUT_UP, mode);
        let down = self.check_bit(index, INPUT_DOWN, mode);

        let absolute_v = !absolute || (!up && !down);
        let absolute_h = !absolute || (!left && !right);

        // NOT_PRESSED inverts every bit probe, which bypasses the
        // absolute-direction guards and flips the neutral test below: under
        // that mode neutral matches only while all four directions are held.
        // Legacy behavior, kept deliberately.
        let inverted = mode == CheckMode::NotPressed;
        let can_abs_h = inverted || absolute_h;
        let can_abs_v = inverted || absolute_v;
        let neutral = !down && !up && !left && !right;

        match direction {
            Direction::Neutral => neutral,
            Direction::Up => up && can_abs_h,
            Direction::Down => down && can_abs_h,
            Direction::Left => left && can_abs_v,
            Direction::Right => right && can_abs_v,
            Direction::UpLeft => up && left,
            Direction::UpRight => up && right,
            Direction::DownLeft => down && left,
            Direction::DownRight => down && right,
        }
    }

    /// Evaluate a button requirement at a history index
    ///
    /// Each required flag must observe true under the mode; unrequired flags
    /// are unconstrained. A zero mask matches only the all-released state.
    pub fn check_buttons(&self, index: usize, buttons: u16, mode: CheckMode) -> bool {
        let a = self.check_bit(index, INPUT_FACE_A, mode);
        let b = self.check_bit(index, INPUT_FACE_B, mode);
        let c = self.check_bit(index, INPUT_FACE_C, mode);
        let d = self.check_bit(index, INPUT_FACE_D, mode);

        if buttons == 0 {
            return !a && !b && !c && !d;
        }

        let required = |mask: u16| buttons & mask != 0;
        (!required(INPUT_FACE_A) || a)
            && (!required(INPUT_FACE_B) || b)
            && (!required(INPUT_FACE_C) || c)
            && (!required(INPUT_FACE_D) || d)
    }

    /// Evaluate a charge requirement at a history index
    ///
    /// Only the back/down charge family is chargeable. Diagonals require the
    /// dominant (horizontal) charge magnitude to meet the threshold while
    /// the secondary axis is currently held in the matching direction.
    pub fn check_charge(&self, index: usize, direction: Direction, threshold: i32) -> bool {
        if threshold == 0 {
            return false;
        }

        let back_mask = if self.side().is_mirrored() {
            INPUT_RIGHT
        } else {
            INPUT_LEFT
        };
        let back = self.is_held(index, back_mask);
        let up = self.is_held(index, INPUT_UP);
        let down = self.is_held(index, INPUT_DOWN);

        let entry = self.entry(index);
        let h_magnitude = i32::from(entry.h_charge).abs();
        let v_magnitude = i32::from(entry.v_charge).abs();

        match direction {
            Direction::Left => back && h_magnitude >= threshold,
            Direction::Down => down && v_magnitude >= threshold,
            Direction::DownLeft => back && h_magnitude >= threshold && down,
            Direction::UpLeft => back && h_magnitude >= threshold && up,
            _ => false,
        }
    }

    fn check_bit(&self, index: usize, mask: u16, mode: CheckMode) -> bool {
        match mode {
            CheckMode::Press => self.is_pressed(index, mask),
            CheckMode::Hold => self.is_held(index, mask),
            CheckMode::Release => self.is_released(index, mask),
            CheckMode::WasPressed => self.was_held(index, mask),
            CheckMode::NotPressed => !self.is_held(index, mask),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rushdown_core::{InputSide, INPUT_FACE_A, INPUT_FACE_B};

    fn quarter_circle_forward() -> MotionInput {
        MotionInput {
            variants: vec![MotionVariant {
                steps: vec![
                    MotionStep::direction(Direction::Down, CheckMode::Press),
                    MotionStep::direction(Direction::DownRight, CheckMode::Hold),
                    MotionStep::new(
                        Direction::Right,
                        CheckMode::Hold,
                        INPUT_FACE_A,
                        CheckMode::Press,
                    ),
                ],
            }],
            buffer_window: 10,
            absolute_direction: false,
            charge_threshold: 0,
        }
    }

    fn back_charge_forward() -> MotionInput {
        // Hold back to charge, then down, then down-back plus a button.
        MotionInput {
            variants: vec![MotionVariant {
                steps: vec![
                    MotionStep::direction(Direction::Left, CheckMode::Press),
                    MotionStep::direction(Direction::Down, CheckMode::Press),
                    MotionStep::new(
                        Direction::DownLeft,
                        CheckMode::Hold,
                        INPUT_FACE_A,
                        CheckMode::Press,
                    ),
                ],
            }],
            buffer_window: 0,
            absolute_direction: false,
            charge_threshold: 20,
        }
    }

    #[test]
    fn test_quarter_circle_matches_within_window() {
        let mut history = InputHistory::new(InputSide::Right);
        history.tick(0);
        history.tick(INPUT_DOWN);
        history.tick(INPUT_DOWN | INPUT_RIGHT);
        history.tick(INPUT_RIGHT | INPUT_FACE_A);

        assert!(history.check_motion_inputs(&quarter_circle_forward()));
    }

    #[test]
    fn test_quarter_circle_fails_past_window() {
        let mut history = InputHistory::new(InputSide::Right);
        history.tick(INPUT_DOWN);
        // Idle gap longer than the 10-tick buffer window.
        for _ in 0..15 {
            history.tick(0);
        }
        history.tick(INPUT_DOWN | INPUT_RIGHT);
        history.tick(INPUT_RIGHT | INPUT_FACE_A);

        assert!(!history.check_motion_inputs(&quarter_circle_forward()));
    }

    #[test]
    fn test_quarter_circle_mirrored_side() {
        // A left-side entity performs the same motion with absolute LEFT.
        let mut history = InputHistory::new(InputSide::Left);
        history.tick(0);
        history.tick(INPUT_DOWN);
        history.tick(INPUT_DOWN | INPUT_LEFT);
        history.tick(INPUT_LEFT | INPUT_FACE_A);

        assert!(history.check_motion_inputs(&quarter_circle_forward()));
    }

    #[test]
    fn test_steps_must_be_temporally_ordered() {
        // Inputs performed in the wrong order never match.
        let mut history = InputHistory::new(InputSide::Right);
        history.tick(0);
        history.tick(INPUT_RIGHT | INPUT_FACE_A);
        history.tick(INPUT_DOWN | INPUT_RIGHT);
        history.tick(INPUT_DOWN);

        assert!(!history.check_motion_inputs(&quarter_circle_forward()));
    }

    #[test]
    fn test_charge_threshold_met() {
        let mut history = InputHistory::new(InputSide::Right);
        for _ in 0..30 {
            history.tick(INPUT_LEFT);
        }
        history.tick(INPUT_DOWN);
        history.tick(INPUT_DOWN | INPUT_LEFT | INPUT_FACE_A);

        assert!(history.check_motion_inputs(&back_charge_forward()));
    }

    #[test]
    fn test_charge_threshold_not_met() {
        let mut history = InputHistory::new(InputSide::Right);
        for _ in 0..30 {
            history.tick(INPUT_LEFT);
        }
        history.tick(INPUT_DOWN);
        history.tick(INPUT_DOWN | INPUT_LEFT | INPUT_FACE_A);

        let mut motion = back_charge_forward();
        motion.charge_threshold = 40;
        assert!(!history.check_motion_inputs(&motion));
    }

    #[test]
    fn test_variant_declaration_order() {
        // Second variant matches; first does not. Declaration order is only
        // a tie-break, so the match still succeeds.
        let motion = MotionInput {
            variants: vec![
                MotionVariant {
                    steps: vec![MotionStep::direction(Direction::Up, CheckMode::Hold)],
                },
                MotionVariant {
                    steps: vec![MotionStep::direction(Direction::Down, CheckMode::Hold)],
                },
            ],
            buffer_window: 4,
            absolute_direction: false,
            charge_threshold: 0,
        };

        let mut history = InputHistory::new(InputSide::Right);
        history.tick(INPUT_DOWN);
        assert!(history.check_motion_inputs(&motion));
    }

    #[test]
    fn test_absolute_direction_rejects_diagonal() {
        let motion = MotionInput {
            variants: vec![MotionVariant {
                steps: vec![MotionStep::direction(Direction::Up, CheckMode::Hold)],
            }],
            buffer_window: 1,
            absolute_direction: true,
            charge_threshold: 0,
        };

        let mut history = InputHistory::new(InputSide::Right);
        history.tick(INPUT_UP | INPUT_LEFT);
        assert!(!history.check_motion_inputs(&motion));

        let mut relaxed = motion.clone();
        relaxed.absolute_direction = false;
        assert!(history.check_motion_inputs(&relaxed));
    }

    #[test]
    fn test_diagonal_ignores_absolute_flag() {
        let motion = MotionInput {
            variants: vec![MotionVariant {
                steps: vec![MotionStep::direction(Direction::UpLeft, CheckMode::Hold)],
            }],
            buffer_window: 1,
            absolute_direction: true,
            charge_threshold: 0,
        };

        let mut history = InputHistory::new(InputSide::Right);
        history.tick(INPUT_UP | INPUT_LEFT);
        assert!(history.check_motion_inputs(&motion));
    }

    #[test]
    fn test_zero_button_mask_requires_full_release() {
        let mut history = InputHistory::new(InputSide::Right);
        history.tick(INPUT_FACE_B);

        assert!(!history.check_buttons(history.current_index(), 0, CheckMode::Hold));

        history.tick(0);
        assert!(history.check_buttons(history.current_index(), 0, CheckMode::Hold));
    }

    #[test]
    fn test_unrequired_buttons_are_unconstrained() {
        let mut history = InputHistory::new(InputSide::Right);
        history.tick(INPUT_FACE_A | INPUT_FACE_B);

        assert!(history.check_buttons(history.current_index(), INPUT_FACE_A, CheckMode::Hold));
    }

    #[test]
    fn test_not_pressed_neutral_is_inverted() {
        // Legacy behavior: Neutral under NotPressed matches when all four
        // directions are held, not when none are.
        let motion = MotionInput {
            variants: vec![MotionVariant {
                steps: vec![MotionStep::direction(Direction::Neutral, CheckMode::NotPressed)],
            }],
            buffer_window: 1,
            absolute_direction: false,
            charge_threshold: 0,
        };

        let mut idle = InputHistory::new(InputSide::Right);
        idle.tick(0);
        assert!(!idle.check_motion_inputs(&motion));

        let mut mashed = InputHistory::new(InputSide::Right);
        mashed.tick(INPUT_UP | INPUT_DOWN | INPUT_LEFT | INPUT_RIGHT);
        assert!(mashed.check_motion_inputs(&motion));
    }

    #[test]
    fn test_empty_definition_never_matches() {
        let history = InputHistory::new(InputSide::Right);

        assert!(!history.check_motion_inputs(&MotionInput::default()));
        assert!(!history.check_motion_inputs(&MotionInput {
            variants: vec![MotionVariant { steps: vec![] }],
            ..MotionInput::default()
        }));
        assert!(!history.check_input_end(&MotionInput::default()));
    }

    #[test]
    fn test_check_input_end() {
        let motion = MotionInput {
            variants: vec![MotionVariant {
                steps: vec![MotionStep::buttons(INPUT_FACE_A, CheckMode::Press)],
            }],
            buffer_window: 4,
            absolute_direction: false,
            charge_threshold: 0,
        };

        let mut history = InputHistory::new(InputSide::Right);
        history.tick(INPUT_FACE_A);
        assert!(!history.check_input_end(&motion));

        history.tick(0);
        assert!(history.check_input_end(&motion));
    }

    #[test]
    fn test_button_press_buffered_within_window() {
        // The press happened two ticks ago; the scan walks back to it.
        let mut history = InputHistory::new(InputSide::Right);
        history.tick(0);
        history.tick(INPUT_DOWN);
        history.tick(INPUT_DOWN | INPUT_RIGHT);
        history.tick(INPUT_RIGHT | INPUT_FACE_A);
        history.tick(INPUT_RIGHT);
        history.tick(INPUT_RIGHT);

        assert!(history.check_motion_inputs(&quarter_circle_forward()));
    }
}
