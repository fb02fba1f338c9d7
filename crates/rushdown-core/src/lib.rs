//! Rushdown Core - Shared primitives for the rushdown input engine
//!
//! This crate provides the basic types the input and netcode crates build on:
//! - Tick and frame identifiers for the deterministic simulation clock
//! - The raw per-tick input bitmask layout (4 directions + 4 face buttons)
//! - The `InputSide` facing flag used to mirror left/right semantics
//! - Wrap-around index helpers for fixed-size ring buffers
//!
//! Everything here is plain integer arithmetic: no wall-clock reads, no
//! randomness, no floating point. The same inputs produce the same outputs
//! on every platform, which is what rollback netcode requires.

mod input;
mod ring;
mod time;

pub use input::{
    InputSide, INPUT_ANY_BUTTON, INPUT_ANY_DIRECTION, INPUT_DOWN, INPUT_FACE_A, INPUT_FACE_B,
    INPUT_FACE_C, INPUT_FACE_D, INPUT_LEFT, INPUT_RIGHT, INPUT_UP,
};
pub use ring::{previous_index, wrap_index};
pub use time::{Frame, Tick, NULL_FRAME};
