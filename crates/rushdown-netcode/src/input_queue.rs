//! Frame-delayed input queue with speculative prediction
//!
//! One queue per networked player. Confirmed inputs land `frame_delay`
//! frames ahead of when they were produced; reads for frames that have no
//! confirmed input yet are answered by carrying the previous slot forward
//! as a guess, and the guess is cached so the rollback driver can compare
//! it against the real input once that arrives.

use rushdown_core::{previous_index, wrap_index, Frame, NULL_FRAME};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::GameInput;

/// Number of slots in each ring
pub const QUEUE_SIZE: usize = 128;

/// Per-player confirmed/predicted input rings
///
/// Frame numbers passed to the queue must be non-negative; that is a caller
/// contract checked only in debug builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputQueue {
    frame_delay: u32,
    confirmed: Vec<GameInput>,
    last_predicted: Vec<GameInput>,
}

impl InputQueue {
    /// Create a queue of null records sized for one player's input bytes
    pub fn new(input_size: usize, player_count: usize, frame_delay: u32) -> Self {
        let null = GameInput::null(input_size, player_count);
        Self {
            frame_delay,
            confirmed: vec![null.clone(); QUEUE_SIZE],
            last_predicted: vec![null; QUEUE_SIZE],
        }
    }

    /// Ticks of intentional input latency added at write time
    pub fn frame_delay(&self) -> u32 {
        self.frame_delay
    }

    /// Store a confirmed input, offset by the frame delay
    ///
    /// The stored record is stamped with the delayed logical frame.
    pub fn add_input(&mut self, frame: Frame, input: &GameInput) {
        debug_assert!(frame >= 0, "frame numbers must be non-negative");

        let frame = frame + self.frame_delay as Frame;
        let slot = wrap_index(frame as isize, QUEUE_SIZE);
        self.confirmed[slot] = input.with_frame(frame);
    }

    /// Read the input for a frame, generating a prediction when missing
    ///
    /// A confirmed record whose stamp matches the requested frame is
    /// returned verbatim. Otherwise, when `predict` is set, the previous
    /// slot's record is carried forward: the confirmed slot is stamped
    /// [`NULL_FRAME`] (a not-yet-real guess) and a copy stamped with the
    /// requested frame is cached for later reconciliation.
    ///
    /// Repeated calls for the same unconfirmed frame re-derive from the
    /// current previous slot, so the prediction self-corrects once upstream
    /// data changes during a rollback resimulation.
    pub fn get_input(&mut self, frame: Frame, predict: bool) -> GameInput {
        debug_assert!(frame >= 0, "frame numbers must be non-negative");

        let slot = wrap_index(frame as isize, QUEUE_SIZE);
        if predict && (self.confirmed[slot].is_null() || self.confirmed[slot].frame != frame) {
            let carried = self.confirmed[previous_index(slot, QUEUE_SIZE)].with_frame(NULL_FRAME);
            trace!(frame, "predicting input from previous frame");
            self.last_predicted[slot] = carried.with_frame(frame);
            self.confirmed[slot] = carried;
        }
        self.confirmed[slot].clone()
    }

    /// The cached prediction snapshot for a frame
    ///
    /// Null-stamped when nothing was predicted for that frame, or when the
    /// prediction has already been reconciled.
    pub fn predicted_input(&self, frame: Frame) -> &GameInput {
        &self.last_predicted[wrap_index(frame as isize, QUEUE_SIZE)]
    }

    /// Drop the cached prediction for a frame
    ///
    /// Called once the frame's true input has been confirmed and compared;
    /// the slot is stamped [`NULL_FRAME`] so it no longer reads as a pending
    /// prediction.
    pub fn reset_prediction(&mut self, frame: Frame) {
        let slot = wrap_index(frame as isize, QUEUE_SIZE);
        self.last_predicted[slot].frame = NULL_FRAME;
    }
}
