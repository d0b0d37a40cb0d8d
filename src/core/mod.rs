//! Core state types shared by the wizard.
//!
//! This module contains the pure pieces the rest of the crate builds on:
//! - State definitions via the `State` trait
//! - The `step_enum!` macro for linear flows
//! - Immutable transition history
//!
//! Nothing here performs I/O or reads the clock except when a caller
//! builds a `StepTransition`.

mod history;
mod macros;
mod state;

pub use history::{History, StepTransition, TransitionCause};
pub use state::State;
