//! Lockstep: an onboarding wizard with a deadline-driven order lock
//!
//! A customer moves through a fixed sequence of steps, from signup through
//! child profiles and plan selection to plan customization, and the order is
//! finally locked. Forward moves are gated by validation of the step being
//! left. While the customer customizes their plan a decision window counts
//! down; when it runs out, or when the customer asks, the order is locked
//! exactly once.
//!
//! # Core Concepts
//!
//! - **Steps**: ordered state enums generated by [`step_enum!`]
//! - **Validation**: pure functions from step and record to field errors
//! - **Lock**: a guarded entry point shared by the manual and expiry triggers
//! - **Persistence**: draft, locked order and session checkpoint behind a
//!   key-value store
//!
//! # Example
//!
//! ```rust
//! use lockstep::model::ContactField;
//! use lockstep::persistence::MemoryStore;
//! use lockstep::telemetry::NullSink;
//! use lockstep::lock::SimulatedBackend;
//! use lockstep::{Wizard, WizardConfig, WizardStep};
//! use std::time::Duration;
//!
//! let mut wizard = Wizard::open(
//!     WizardConfig::default(),
//!     MemoryStore::new(),
//!     SimulatedBackend::new(Duration::from_millis(1500)),
//!     NullSink,
//! )
//! .unwrap();
//!
//! wizard.set_contact(ContactField::Name, "A").unwrap();
//! wizard.set_contact(ContactField::Email, "a@b.com").unwrap();
//! wizard.set_contact(ContactField::Phone, "1").unwrap();
//! wizard.set_contact(ContactField::Address, "X").unwrap();
//!
//! let outcome = wizard.advance(WizardStep::ChildProfiles).unwrap();
//! assert!(outcome.is_moved());
//! assert_eq!(wizard.current_step(), WizardStep::ChildProfiles);
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod lock;
pub mod machine;
pub mod model;
pub mod persistence;
pub mod telemetry;
pub mod timer;
pub mod validation;
pub mod wizard;

// Re-export commonly used types
pub use config::WizardConfig;
pub use core::{History, State, StepTransition, TransitionCause};
pub use lock::{LockError, LockTrigger};
pub use machine::{LockState, StepOutcome, WizardSession, WizardStep};
pub use model::{CustomerRecord, LockedOrder, Plan};
pub use wizard::{Wizard, WizardError};
