//! Order-lock operation.
//!
//! Locking is split in two so the guard is evaluated synchronously before any
//! asynchronous work starts:
//!
//! 1. [`OrderLock::begin`] checks and sets `open -> locking` and freezes the
//!    order into a [`PendingLock`].
//! 2. The caller awaits the [`LockBackend`] with the pending order.
//! 3. [`OrderLock::finish`] applies the backend's answer: on success the order
//!    is persisted and the machine is forced into its terminal step; on
//!    failure the session reopens with nothing committed.
//!
//! Once an order is committed, further lock requests return it unchanged.

mod backend;
mod error;

pub use backend::{LockBackend, SimulatedBackend};
pub use error::{LockError, LockFailure};

use crate::machine::{LockState, StepMachine, TransitionError};
use crate::model::{CustomerRecord, CustomizationOptions, LockedOrder, Plan};
use crate::persistence::{KeyValueStore, Persistence};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What asked for the lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockTrigger {
    /// The user pressed "lock now".
    Manual,
    /// The decision window ran out.
    Expired,
}

/// A frozen order waiting for the backend.
#[derive(Debug)]
#[must_use = "an unfinished lock leaves the session in `locking`"]
pub struct PendingLock {
    order: LockedOrder,
    trigger: LockTrigger,
}

impl PendingLock {
    pub fn order(&self) -> &LockedOrder {
        &self.order
    }

    pub fn trigger(&self) -> LockTrigger {
        self.trigger
    }
}

/// Result of the guarded entry point.
#[derive(Debug)]
pub enum LockStart {
    /// This call won the guard; the caller must submit and finish.
    Pending(PendingLock),
    /// The order was already locked earlier.
    AlreadyLocked(LockedOrder),
}

/// Holds the committed order once there is one.
#[derive(Clone, Debug, Default)]
pub struct OrderLock {
    committed: Option<LockedOrder>,
}

impl OrderLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// An order lock restored from storage.
    pub fn with_committed(order: LockedOrder) -> Self {
        Self {
            committed: Some(order),
        }
    }

    pub fn committed(&self) -> Option<&LockedOrder> {
        self.committed.as_ref()
    }

    /// Guarded entry point shared by manual and expiry triggers.
    pub fn begin(
        &self,
        machine: &mut StepMachine,
        customer: &CustomerRecord,
        plan: Option<&Plan>,
        customization: CustomizationOptions,
        trigger: LockTrigger,
    ) -> Result<LockStart, LockError> {
        if let Some(order) = &self.committed {
            return Ok(LockStart::AlreadyLocked(order.clone()));
        }
        let plan = plan.ok_or(LockError::MissingPlan)?;

        machine.begin_locking().map_err(|err| match err {
            TransitionError::LockInProgress => LockError::InProgress,
            other => LockError::Transition(other),
        })?;

        let order = LockedOrder::snapshot(customer, plan, customization);
        info!(order_id = %order.order_id, plan = %plan.id, ?trigger, "order lock started");
        Ok(LockStart::Pending(PendingLock { order, trigger }))
    }

    /// Apply the backend's answer to a pending lock.
    pub fn finish<St: KeyValueStore>(
        &mut self,
        machine: &mut StepMachine,
        persistence: &Persistence<St>,
        pending: PendingLock,
        outcome: Result<(), LockFailure>,
    ) -> Result<LockedOrder, LockError> {
        if machine.lock_state() != LockState::Locking {
            return Err(LockError::NotLocking);
        }

        if let Err(failure) = outcome {
            machine.revert_locking();
            warn!(order_id = %pending.order.order_id, reason = %failure, "order lock failed");
            return Err(LockError::Failed(failure));
        }

        if let Err(err) = persistence.save_locked_order(&pending.order) {
            machine.revert_locking();
            warn!(order_id = %pending.order.order_id, error = %err, "locked order not saved");
            return Err(LockError::Store(err));
        }

        machine.force_terminal();
        info!(order_id = %pending.order.order_id, trigger = ?pending.trigger, "order locked");
        self.committed = Some(pending.order.clone());
        Ok(pending.order)
    }
}
