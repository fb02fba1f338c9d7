//! Rushdown Netcode - Local input queues for a rollback session driver
//!
//! This crate provides the per-player data structures a rollback driver
//! needs between the network transport and the simulation:
//!
//! - **Frame delay**: confirmed inputs are stored a fixed number of frames
//!   ahead of when they were produced, absorbing network jitter
//! - **Prediction**: unconfirmed frames are guessed by carrying the previous
//!   frame's input forward, and the guess is cached for later comparison
//! - **Reconciliation hooks**: the driver compares cached predictions with
//!   confirmed inputs as they arrive and clears them once resolved
//!
//! Transport, packet framing, and consensus on input arrival are out of
//! scope; an external session driver owns frame numbering and feeds this
//! queue.

mod game_input;
mod input_queue;

pub use game_input::GameInput;
pub use input_queue::{InputQueue, QUEUE_SIZE};

// Re-export the frame types for convenience
pub use rushdown_core::{Frame, NULL_FRAME};
