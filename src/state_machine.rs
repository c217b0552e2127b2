//! Core chat state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use transition::{transition, ANSWER_FAILED_TEXT};
