//! Errors surfaced by the wizard controller.

use crate::config::ConfigError;
use crate::machine::TransitionError;
use crate::model::ProfileError;
use crate::persistence::StoreError;
use thiserror::Error;

/// Errors from opening the wizard and from navigation and edit requests.
/// None of them are fatal. For edits, `Store` is reported after the
/// in-memory edit has been applied.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("Draft could not be saved: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
