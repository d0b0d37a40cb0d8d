//! The wizard's own state: where the user is, how long is left, and whether
//! the order is locked.

use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

/// Six hours, the default decision window.
pub const DEFAULT_DECISION_WINDOW_SECS: u64 = 6 * 3600;

crate::step_enum! {
    /// Wizard steps in flow order. There are no branches and no skips.
    pub enum WizardStep {
        Signup => "signup",
        ChildProfiles => "child_profiles",
        PlanSelection => "plan_selection",
        PlanCustomization => "plan_customization",
        OrderConfirmed => "order_confirmed",
    }
    final: [OrderConfirmed]
}

crate::step_enum! {
    /// Lock phase. Only ever moves forward, except `Locking` falling back to
    /// `Open` when the lock call fails.
    pub enum LockState {
        Open => "open",
        Locking => "locking",
        Locked => "locked",
    }
    final: [Locked]
}

/// The step machine's own state, persisted inside session checkpoints.
///
/// `current_step` is `OrderConfirmed` exactly when `lock_state` is `Locked`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSession {
    /// Step the user is on
    pub current_step: WizardStep,
    /// Seconds left in the decision window
    pub remaining_seconds: u64,
    /// Lock phase; moves forward only, except a failed lock reopening
    pub lock_state: LockState,
    /// Errors for the active step from the last rejected `advance`.
    #[serde(default)]
    pub validation_errors: ValidationErrors,
}

impl WizardSession {
    /// A fresh session on the signup step with the full window left.
    pub fn new(decision_window_secs: u64) -> Self {
        Self {
            current_step: WizardStep::Signup,
            remaining_seconds: decision_window_secs,
            lock_state: LockState::Open,
            validation_errors: ValidationErrors::default(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock_state == LockState::Locked
    }

    /// Normalize a session loaded from storage.
    ///
    /// A persisted `Locking` phase means the previous process died mid-call;
    /// nothing was committed, so the session reopens.
    pub(crate) fn rehydrated(mut self) -> Self {
        if self.lock_state == LockState::Locking {
            self.lock_state = LockState::Open;
        }
        self
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(DEFAULT_DECISION_WINDOW_SECS)
    }
}
