//! Rejected navigation requests.

use super::session::WizardStep;
use thiserror::Error;

/// A transition the machine refused to make. These are caller mistakes or
/// races with the lock, never validation failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("Order is locked; start a new order to make changes")]
    SessionLocked,

    #[error("Order lock is in progress")]
    LockInProgress,

    #[error("Cannot move from '{from}' to '{to}': steps are visited in order")]
    NotAdjacent { from: WizardStep, to: WizardStep },

    #[error("'order_confirmed' is only reached by locking the order")]
    TerminalByLockOnly,
}
