//! Logical time units for the deterministic simulation
//!
//! The simulation advances in discrete ticks. Rollback netcode additionally
//! numbers frames with a signed type so a sentinel below zero can mark
//! "no data" slots in input queues.

/// A discrete tick identifier (logical time unit)
pub type Tick = u64;

/// A rollback frame number
///
/// Frames are never negative in valid use; the negative range is reserved
/// for [`NULL_FRAME`].
pub type Frame = i32;

/// Sentinel frame marking a slot that holds no confirmed or valid data
pub const NULL_FRAME: Frame = -1;
