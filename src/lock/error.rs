//! Order lock errors.

use crate::machine::TransitionError;
use crate::persistence::StoreError;
use thiserror::Error;

/// The lock backend refused or could not be reached. Recoverable: the
/// session reopens and the user may try again.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{reason}")]
pub struct LockFailure {
    pub reason: String,
}

impl LockFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LockError {
    #[error("Select a plan before locking the order")]
    MissingPlan,

    #[error("Order lock is already in progress")]
    InProgress,

    #[error("No order lock is in progress")]
    NotLocking,

    #[error("Order lock failed: {0}")]
    Failed(#[from] LockFailure),

    #[error("Locked order could not be saved: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}
