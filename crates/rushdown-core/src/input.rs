//! Raw input bitmask layout and the facing side flag
//!
//! A per-tick input sample is a `u16` bitmask: four directional bits and
//! four face buttons. Samples are captured device-absolute; left/right are
//! mirrored at query time through [`InputSide`] so motion definitions can be
//! authored side-relative ("back", "forward") once.

use serde::{Deserialize, Serialize};

/// Up directional bit
pub const INPUT_UP: u16 = 1 << 0;
/// Down directional bit
pub const INPUT_DOWN: u16 = 1 << 1;
/// Left directional bit
pub const INPUT_LEFT: u16 = 1 << 2;
/// Right directional bit
pub const INPUT_RIGHT: u16 = 1 << 3;
/// Face button A
pub const INPUT_FACE_A: u16 = 1 << 4;
/// Face button B
pub const INPUT_FACE_B: u16 = 1 << 5;
/// Face button C
pub const INPUT_FACE_C: u16 = 1 << 6;
/// Face button D
pub const INPUT_FACE_D: u16 = 1 << 7;

/// All four directional bits
pub const INPUT_ANY_DIRECTION: u16 = INPUT_UP | INPUT_DOWN | INPUT_LEFT | INPUT_RIGHT;
/// All four face button bits
pub const INPUT_ANY_BUTTON: u16 = INPUT_FACE_A | INPUT_FACE_B | INPUT_FACE_C | INPUT_FACE_D;

/// Which side of the screen an entity is facing from
///
/// A left-side entity reads left/right swapped so that "back" and "forward"
/// in motion definitions keep their meaning after a side switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputSide {
    /// Facing right; left/right read as captured
    #[default]
    Right,
    /// Facing left; left/right are swapped at query time
    Left,
}

impl InputSide {
    /// Whether left/right queries are swapped for this side
    pub fn is_mirrored(self) -> bool {
        matches!(self, InputSide::Left)
    }

    /// Signed representation used in binary snapshots (negative means mirrored)
    pub fn to_i32(self) -> i32 {
        match self {
            InputSide::Right => 1,
            InputSide::Left => -1,
        }
    }

    /// Restore a side from its snapshot representation
    pub fn from_i32(value: i32) -> Self {
        if value < 0 {
            InputSide::Left
        } else {
            InputSide::Right
        }
    }
}
