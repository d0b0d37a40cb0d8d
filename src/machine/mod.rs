//! Step state machine.
//!
//! Owns the `WizardSession` and its transition history. Forward moves are
//! gated by the validation engine on the step being left; backward moves are
//! always allowed. Any navigation is refused once the lock phase has left
//! `open`, so a user request can never land after the system has begun or
//! finished locking the order.
//!
//! The terminal step is only reachable through the lock phase methods, which
//! are crate-private and driven by the order-lock operation.

mod error;
mod session;

pub use error::TransitionError;
pub use session::{LockState, WizardSession, WizardStep, DEFAULT_DECISION_WINDOW_SECS};

use crate::core::{History, StepTransition, TransitionCause};
use crate::model::CustomerRecord;
use crate::validation::{validate, ValidationErrors};
use chrono::Utc;
use tracing::debug;

/// Result of a navigation request that the machine accepted for evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// The step changed.
    Moved { from: WizardStep, to: WizardStep },
    /// Validation failed for the step being left; nothing changed.
    Blocked(ValidationErrors),
    /// Nothing to do, e.g. retreating from the first step.
    Unchanged,
}

impl StepOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

#[derive(Clone, Debug)]
pub struct StepMachine {
    session: WizardSession,
    history: History<WizardStep>,
}

impl StepMachine {
    pub fn new(decision_window_secs: u64) -> Self {
        Self {
            session: WizardSession::new(decision_window_secs),
            history: History::new(),
        }
    }

    /// Resume from a persisted session and history.
    pub fn restore(session: WizardSession, history: History<WizardStep>) -> Self {
        Self {
            session: session.rehydrated(),
            history,
        }
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut WizardSession {
        &mut self.session
    }

    pub fn current_step(&self) -> WizardStep {
        self.session.current_step
    }

    pub fn lock_state(&self) -> LockState {
        self.session.lock_state
    }

    pub fn history(&self) -> &History<WizardStep> {
        &self.history
    }

    /// Fails unless the lock phase still allows user changes.
    pub fn ensure_open(&self) -> Result<(), TransitionError> {
        match self.session.lock_state {
            LockState::Open => Ok(()),
            LockState::Locking => Err(TransitionError::LockInProgress),
            LockState::Locked => Err(TransitionError::SessionLocked),
        }
    }

    /// Move forward to `target`, which must be the step right after the
    /// current one. The current step's validation must pass.
    pub fn advance(
        &mut self,
        target: WizardStep,
        record: &CustomerRecord,
    ) -> Result<StepOutcome, TransitionError> {
        self.ensure_open()?;
        let from = self.session.current_step;
        if target == WizardStep::OrderConfirmed {
            return Err(TransitionError::TerminalByLockOnly);
        }
        if from.next() != Some(target) {
            return Err(TransitionError::NotAdjacent { from, to: target });
        }

        let errors = validate(from, record);
        if !errors.is_empty() {
            debug!(step = %from, errors = errors.len(), "advance blocked by validation");
            self.session.validation_errors = errors.clone();
            return Ok(StepOutcome::Blocked(errors));
        }

        self.move_to(target, TransitionCause::User);
        Ok(StepOutcome::Moved { from, to: target })
    }

    /// Move back one step. A no-op on the first step.
    pub fn retreat(&mut self) -> Result<StepOutcome, TransitionError> {
        self.ensure_open()?;
        let from = self.session.current_step;
        let Some(to) = from.previous() else {
            return Ok(StepOutcome::Unchanged);
        };
        self.move_to(to, TransitionCause::User);
        Ok(StepOutcome::Moved { from, to })
    }

    /// Guarded entry into the lock phase: `open` becomes `locking`, anything
    /// else is refused. Must run before any asynchronous lock work starts.
    pub(crate) fn begin_locking(&mut self) -> Result<(), TransitionError> {
        self.ensure_open()?;
        self.session.lock_state = LockState::Locking;
        Ok(())
    }

    /// Fall back to `open` after a failed lock. Only valid from `locking`.
    pub(crate) fn revert_locking(&mut self) {
        if self.session.lock_state == LockState::Locking {
            self.session.lock_state = LockState::Open;
        }
    }

    /// Mark the order locked and jump to the terminal step, bypassing the
    /// validation gate. Only the order-lock operation calls this.
    pub(crate) fn force_terminal(&mut self) {
        self.session.lock_state = LockState::Locked;
        if self.session.current_step != WizardStep::OrderConfirmed {
            self.move_to(WizardStep::OrderConfirmed, TransitionCause::System);
        }
    }

    fn move_to(&mut self, to: WizardStep, cause: TransitionCause) {
        let from = self.session.current_step;
        self.history = self.history.record(StepTransition {
            from,
            to,
            at: Utc::now(),
            cause,
        });
        self.session.current_step = to;
        self.session.validation_errors = ValidationErrors::default();
        debug!(%from, %to, ?cause, "step changed");
    }
}
