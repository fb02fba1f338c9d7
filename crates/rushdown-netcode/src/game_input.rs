//! The confirmed-or-predicted input record exchanged with the session driver

use rushdown_core::{Frame, NULL_FRAME};
use serde::{Deserialize, Serialize};

/// One frame's worth of input bytes for every player
///
/// The frame stamp is [`NULL_FRAME`] while the record holds no confirmed or
/// valid data (freshly created slots, speculative guesses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInput {
    /// Logical frame this input belongs to, or [`NULL_FRAME`]
    pub frame: Frame,
    data: Vec<u8>,
}

impl GameInput {
    /// Create a zeroed null record sized `input_size * player_count` bytes
    pub fn null(input_size: usize, player_count: usize) -> Self {
        Self {
            frame: NULL_FRAME,
            data: vec![0; input_size * player_count],
        }
    }

    /// Create a record from raw input bytes
    pub fn new(frame: Frame, data: Vec<u8>) -> Self {
        Self { frame, data }
    }

    /// Whether this record carries no confirmed or valid data
    pub fn is_null(&self) -> bool {
        self.frame == NULL_FRAME
    }

    /// The raw input bytes, all players concatenated
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw input bytes
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// A copy of this record stamped with a different frame
    pub fn with_frame(&self, frame: Frame) -> Self {
        Self {
            frame,
            data: self.data.clone(),
        }
    }

    /// Compare two records, optionally ignoring the frame stamp
    ///
    /// The rollback driver compares a cached prediction against the later
    /// confirmed input with `bits_only = true`, since the prediction carries
    /// the predicted frame while the confirmed record carries the real one.
    pub fn equal(&self, other: &GameInput, bits_only: bool) -> bool {
        (bits_only || self.frame == other.frame) && self.data == other.data
    }
}
