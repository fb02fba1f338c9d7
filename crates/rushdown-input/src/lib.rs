//! Rushdown Input - Deterministic input history and motion recognition
//!
//! This crate provides the per-entity input recorder and the fuzzy motion
//! matcher that runs over it:
//!
//! - **Duration compression**: one history entry per distinct input state,
//!   with a tick counter instead of one entry per tick
//! - **Charge counters**: incremental held-direction and held-button counters
//!   carried on every entry, so charge moves resolve in O(1) per probe
//! - **Fuzzy matching**: multi-step directional/button sequences matched
//!   backwards through the history within a configurable buffer window
//! - **Rollback snapshots**: fixed-layout binary serialization so a rollback
//!   driver can save and restore the buffer byte-exactly
//!
//! # Example
//!
//! ```
//! use rushdown_core::{InputSide, INPUT_DOWN, INPUT_FACE_A, INPUT_RIGHT};
//! use rushdown_input::{CheckMode, Direction, InputHistory, MotionInput, MotionStep, MotionVariant};
//!
//! let mut history = InputHistory::new(InputSide::Right);
//! history.tick(0);
//! history.tick(INPUT_DOWN);
//! history.tick(INPUT_DOWN | INPUT_RIGHT);
//! history.tick(INPUT_RIGHT | INPUT_FACE_A);
//!
//! let fireball = MotionInput {
//!     variants: vec![MotionVariant {
//!         steps: vec![
//!             MotionStep::direction(Direction::Down, CheckMode::Press),
//!             MotionStep::direction(Direction::DownRight, CheckMode::Hold),
//!             MotionStep::new(Direction::Right, CheckMode::Hold, INPUT_FACE_A, CheckMode::Press),
//!         ],
//!     }],
//!     buffer_window: 10,
//!     absolute_direction: false,
//!     charge_threshold: 0,
//! };
//!
//! assert!(history.check_motion_inputs(&fireball));
//! ```

mod error;
mod history;
mod motion;

pub use error::{Error, Result};
pub use history::{HistoryEntry, InputHistory, HISTORY_SIZE};
pub use motion::{CheckMode, Direction, MotionInput, MotionStep, MotionVariant};

// Re-export the core side flag for convenience
pub use rushdown_core::InputSide;
