//! The onboarding wizard controller.
//!
//! [`Wizard`] owns the session and wires the pieces together: edits go to the
//! customer record and are autosaved as a draft, navigation goes through the
//! step machine, ticks go through the lock timer, and both lock triggers go
//! through the one guarded entry point in [`OrderLock`].
//!
//! Everything runs on a single logical thread. Methods take `&mut self`, so
//! the only interleaving possible is the one the caller creates by splitting
//! a lock into [`Wizard::begin_lock`] and [`Wizard::finish_lock`].
//!
//! Checkpoint writes are best-effort and only logged on failure; draft and
//! locked-order writes are reported to the caller.

mod driver;
mod error;

pub use driver::{drive, Command};
pub use error::WizardError;

use crate::checkpoint::SessionCheckpoint;
use crate::config::WizardConfig;
use crate::core::History;
use crate::lock::{
    LockBackend, LockError, LockFailure, LockStart, LockTrigger, OrderLock, PendingLock,
};
use crate::machine::{LockState, StepMachine, StepOutcome, TransitionError, WizardSession, WizardStep};
use crate::model::{
    Addon, ChildId, ChildProfile, ContactField, CustomerRecord, CustomizationOptions, LockedOrder,
    Plan,
};
use crate::persistence::{KeyValueStore, Persistence, StoreError};
use crate::telemetry::{TelemetrySink, TracingSink, WizardEvent};
use crate::timer::{LockTimer, TimerSignal};
use crate::validation::{validate, ValidationErrors};
use tracing::{info, warn};

/// Controller for one onboarding session.
///
/// `St` stores the draft, locked order and checkpoint, `B` acknowledges
/// locks, and `T` receives telemetry.
pub struct Wizard<St, B, T = TracingSink> {
    config: WizardConfig,
    machine: StepMachine,
    timer: LockTimer,
    order_lock: OrderLock,
    customer: CustomerRecord,
    plan: Option<Plan>,
    customization: CustomizationOptions,
    persistence: Persistence<St>,
    backend: B,
    telemetry: T,
}

impl<St, B, T> Wizard<St, B, T>
where
    St: KeyValueStore,
    B: LockBackend,
    T: TelemetrySink,
{
    /// Start a session, rehydrating the draft, checkpoint and any locked
    /// order from `store`.
    ///
    /// Values that no longer decode are discarded with a warning, so a
    /// damaged store never keeps the wizard from opening. Only store I/O
    /// failures and an invalid `config` are errors.
    pub fn open(config: WizardConfig, store: St, backend: B, telemetry: T) -> Result<Self, WizardError> {
        config.validate()?;
        let persistence = Persistence::new(store, config.storage.clone());

        let customer = match persistence.load_draft() {
            Ok(draft) => draft.unwrap_or_default(),
            Err(err @ StoreError::Decode { .. }) => {
                warn!(error = %err, "discarding unreadable draft");
                CustomerRecord::default()
            }
            Err(err) => return Err(err.into()),
        };
        let locked = match persistence.load_locked_order() {
            Ok(order) => order,
            Err(err @ StoreError::Decode { .. }) => {
                warn!(error = %err, "ignoring unreadable locked order");
                None
            }
            Err(err) => return Err(err.into()),
        };
        let checkpoint = persistence.load_checkpoint()?;

        let mut wizard = Self {
            machine: StepMachine::new(config.decision_window_secs),
            timer: LockTimer::new(config.low_time_threshold_secs),
            order_lock: OrderLock::new(),
            customer,
            plan: None,
            customization: CustomizationOptions::default(),
            persistence,
            backend,
            telemetry,
            config,
        };

        // A stored order wins over whatever the checkpoint says: the process
        // may have stopped between committing the order and checkpointing.
        match (checkpoint, locked) {
            (checkpoint, Some(order)) => {
                let history = checkpoint.map_or_else(History::new, |c| c.history);
                wizard.resume_locked(order, history);
            }
            (Some(checkpoint), None) => wizard.resume(checkpoint),
            (None, None) => {}
        }
        Ok(wizard)
    }

    fn resume(&mut self, checkpoint: SessionCheckpoint) {
        let SessionCheckpoint {
            mut session,
            plan,
            customization,
            history,
            ..
        } = checkpoint;

        if session.is_locked() {
            warn!("checkpoint is locked but no locked order is stored; reopening");
            session.lock_state = LockState::Open;
            session.current_step = if plan.is_some() {
                WizardStep::PlanCustomization
            } else {
                WizardStep::PlanSelection
            };
        }

        info!(step = %session.current_step, remaining = session.remaining_seconds, "session resumed");
        self.machine = StepMachine::restore(session, history);
        self.plan = plan;
        self.customization = customization;
    }

    fn resume_locked(&mut self, order: LockedOrder, history: History<WizardStep>) {
        let session = WizardSession {
            current_step: WizardStep::OrderConfirmed,
            remaining_seconds: 0,
            lock_state: LockState::Locked,
            validation_errors: ValidationErrors::default(),
        };
        info!(order_id = %order.order_id, "locked order restored");
        self.machine = StepMachine::restore(session, history);
        self.customer = order.customer.clone();
        self.plan = Some(order.plan.clone());
        self.customization = order.customization;
        self.order_lock = OrderLock::with_committed(order);
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Step, remaining time, lock phase and last validation errors.
    pub fn session(&self) -> &WizardSession {
        self.machine.session()
    }

    pub fn current_step(&self) -> WizardStep {
        self.machine.current_step()
    }

    pub fn lock_state(&self) -> LockState {
        self.machine.lock_state()
    }

    /// Seconds left in the decision window.
    pub fn remaining_seconds(&self) -> u64 {
        self.machine.session().remaining_seconds
    }

    /// Every step change so far, restored across reloads.
    pub fn history(&self) -> &History<WizardStep> {
        self.machine.history()
    }

    pub fn customer(&self) -> &CustomerRecord {
        &self.customer
    }

    /// The chosen plan, if the user has picked one.
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn customization(&self) -> CustomizationOptions {
        self.customization
    }

    /// The committed order once the session is locked.
    pub fn locked_order(&self) -> Option<&LockedOrder> {
        self.order_lock.committed()
    }

    pub fn persistence(&self) -> &Persistence<St> {
        &self.persistence
    }

    /// Errors left by the last rejected `advance`.
    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.machine.session().validation_errors
    }

    /// Live errors for the current step, for inline feedback while typing.
    pub fn field_errors(&self) -> ValidationErrors {
        validate(self.current_step(), &self.customer)
    }

    /// True once less than the low-time threshold is left.
    pub fn is_low_time(&self) -> bool {
        self.timer.is_low_time(self.machine.session())
    }

    /// True while ticks still count down.
    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed(self.machine.session())
    }

    /// Set one contact field and autosave the draft.
    pub fn set_contact(&mut self, field: ContactField, value: impl Into<String>) -> Result<(), WizardError> {
        self.machine.ensure_open()?;
        self.customer.set_contact(field, value);
        self.autosave()
    }

    /// Append an empty child profile and return its id.
    pub fn add_child(&mut self) -> Result<ChildId, WizardError> {
        self.machine.ensure_open()?;
        let id = self.customer.add_child();
        self.autosave()?;
        Ok(id)
    }

    /// Remove a child. The last remaining child cannot be removed.
    pub fn remove_child(&mut self, id: ChildId) -> Result<(), WizardError> {
        self.machine.ensure_open()?;
        self.customer.remove_child(id)?;
        self.autosave()
    }

    /// Edit one child in place. The child's id cannot be changed.
    pub fn update_child<F>(&mut self, id: ChildId, edit: F) -> Result<(), WizardError>
    where
        F: FnOnce(&mut ChildProfile),
    {
        self.machine.ensure_open()?;
        let child = self.customer.child_mut(id)?;
        edit(child);
        child.id = id;
        self.autosave()
    }

    /// Move to the next step if the current one validates.
    ///
    /// Validation failure is not an error: the outcome is
    /// [`StepOutcome::Blocked`] and the errors stay on the session.
    pub fn advance(&mut self, target: WizardStep) -> Result<StepOutcome, WizardError> {
        let outcome = self.machine.advance(target, &self.customer)?;
        self.after_navigation(&outcome);
        Ok(outcome)
    }

    /// Move back one step without validation.
    pub fn retreat(&mut self) -> Result<StepOutcome, WizardError> {
        let outcome = self.machine.retreat()?;
        self.after_navigation(&outcome);
        Ok(outcome)
    }

    /// Choose a plan. From plan selection this moves straight on to
    /// customization; on the customization step it swaps the plan in place.
    pub fn select_plan(&mut self, plan: Plan) -> Result<StepOutcome, WizardError> {
        self.machine.ensure_open()?;
        let step = self.current_step();
        match step {
            WizardStep::PlanCustomization => {
                self.plan = Some(plan);
                self.save_checkpoint();
                Ok(StepOutcome::Unchanged)
            }
            WizardStep::PlanSelection => {
                self.plan = Some(plan);
                self.advance(WizardStep::PlanCustomization)
            }
            from => Err(TransitionError::NotAdjacent {
                from,
                to: WizardStep::PlanCustomization,
            }
            .into()),
        }
    }

    /// Toggle a customization addon. Refused once locking has begun.
    pub fn set_addon(&mut self, addon: Addon, enabled: bool) -> Result<(), WizardError> {
        self.machine.ensure_open()?;
        self.customization.set(addon, enabled);
        self.save_checkpoint();
        Ok(())
    }

    /// Account for one elapsed second of the decision window.
    ///
    /// Returns `Expired` exactly once; the caller then locks the order with
    /// [`LockTrigger::Expired`].
    pub fn tick(&mut self) -> TimerSignal {
        let signal = self.timer.tick(self.machine.session_mut());
        match signal {
            TimerSignal::LowTime { remaining } => {
                self.telemetry.emit(WizardEvent::LowTime {
                    remaining_seconds: remaining,
                });
                self.save_checkpoint();
            }
            TimerSignal::Expired => {
                info!("decision window expired");
                self.telemetry.emit(WizardEvent::DeadlineExpired);
                self.save_checkpoint();
            }
            TimerSignal::Ticked { remaining } => {
                let every = self.config.checkpoint_every_secs;
                if every > 0 && remaining % every == 0 {
                    self.save_checkpoint();
                }
            }
            TimerSignal::Paused | TimerSignal::Halted => {}
        }
        signal
    }

    /// Guarded entry point for both lock triggers.
    ///
    /// Synchronously moves `open` to `locking` and freezes the order. While
    /// the returned lock is pending, edits and navigation are refused and
    /// ticks do not count down.
    pub fn begin_lock(&mut self, trigger: LockTrigger) -> Result<LockStart, LockError> {
        let start = self.order_lock.begin(
            &mut self.machine,
            &self.customer,
            self.plan.as_ref(),
            self.customization,
            trigger,
        )?;
        if matches!(start, LockStart::Pending(_)) {
            self.telemetry.emit(WizardEvent::LockStarted { trigger });
        }
        Ok(start)
    }

    /// Apply the backend's answer to a pending lock.
    pub fn finish_lock(
        &mut self,
        pending: PendingLock,
        outcome: Result<(), LockFailure>,
    ) -> Result<LockedOrder, LockError> {
        let trigger = pending.trigger();
        let result = self
            .order_lock
            .finish(&mut self.machine, &self.persistence, pending, outcome);

        match &result {
            Ok(order) => self.telemetry.emit(WizardEvent::OrderLocked {
                order_id: order.order_id,
                plan_id: order.plan.id.clone(),
                trigger,
            }),
            Err(err @ (LockError::Failed(_) | LockError::Store(_))) => {
                self.telemetry.emit(WizardEvent::LockFailed {
                    reason: err.to_string(),
                    trigger,
                })
            }
            Err(_) => {}
        }
        self.save_checkpoint();
        result
    }

    /// Lock the order: guarded entry, backend round-trip, commit.
    ///
    /// Idempotent once locked: returns the committed order without contacting
    /// the backend again.
    pub async fn lock(&mut self, trigger: LockTrigger) -> Result<LockedOrder, LockError> {
        let pending = match self.begin_lock(trigger)? {
            LockStart::Pending(pending) => pending,
            LockStart::AlreadyLocked(order) => return Ok(order),
        };
        let outcome = self.backend.submit(pending.order()).await;
        self.finish_lock(pending, outcome)
    }

    /// Throw the session away and start over with an empty draft. The
    /// previous locked order is removed from storage.
    ///
    /// Storage is reset before memory. If a write fails the session stays as
    /// it was, and a reload restores the same session.
    pub fn start_new_order(&mut self) -> Result<(), WizardError> {
        if self.lock_state() == LockState::Locking {
            return Err(TransitionError::LockInProgress.into());
        }

        // Draft first: if the removal then fails, the stored order still
        // wins on reload and restores its own customer.
        self.persistence.save_draft(&CustomerRecord::default())?;
        self.persistence.clear_locked_order()?;

        self.machine = StepMachine::new(self.config.decision_window_secs);
        self.timer = LockTimer::new(self.config.low_time_threshold_secs);
        self.order_lock = OrderLock::new();
        self.customer = CustomerRecord::default();
        self.plan = None;
        self.customization = CustomizationOptions::default();

        info!("session reset for a new order");
        self.telemetry.emit(WizardEvent::SessionReset);
        self.save_checkpoint();
        Ok(())
    }

    fn after_navigation(&mut self, outcome: &StepOutcome) {
        if let StepOutcome::Moved { from, to } = *outcome {
            self.telemetry.emit(WizardEvent::StepChanged { from, to });
            self.save_checkpoint();
        }
    }

    fn autosave(&self) -> Result<(), WizardError> {
        self.persistence.save_draft(&self.customer)?;
        Ok(())
    }

    fn save_checkpoint(&self) {
        let checkpoint = SessionCheckpoint::capture(
            self.machine.session(),
            self.plan.as_ref(),
            self.customization,
            self.machine.history(),
        );
        if let Err(err) = self.persistence.save_checkpoint(&checkpoint) {
            warn!(error = %err, "checkpoint not saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::lock::SimulatedBackend;
    use crate::persistence::MemoryStore;
    use crate::telemetry::{ChannelSink, NullSink};
    use parking_lot::Mutex;
    use std::io;
    use std::sync::Arc;
    use std::time::Duration;

    /// Memory store whose writes to one chosen key fail.
    #[derive(Clone, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing_key: Arc<Mutex<Option<String>>>,
    }

    impl FlakyStore {
        fn fail_writes_to(&self, key: Option<&str>) {
            *self.failing_key.lock() = key.map(str::to_string);
        }

        fn check(&self, key: &str) -> Result<(), StoreError> {
            if self.failing_key.lock().as_deref() == Some(key) {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source: io::Error::new(io::ErrorKind::Other, "disk full"),
                });
            }
            Ok(())
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.check(key)?;
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.check(key)?;
            self.inner.remove(key)
        }
    }

    fn open_flaky(store: FlakyStore) -> Wizard<FlakyStore, SimulatedBackend, NullSink> {
        Wizard::open(
            config(),
            store,
            SimulatedBackend::new(Duration::from_millis(100)),
            NullSink,
        )
        .unwrap()
    }

    fn locked_flaky(store: &FlakyStore) -> Wizard<FlakyStore, SimulatedBackend, NullSink> {
        let mut wizard = open_flaky(store.clone());
        to_customization(&mut wizard);
        let LockStart::Pending(pending) = wizard.begin_lock(LockTrigger::Manual).unwrap() else {
            panic!("expected pending lock");
        };
        wizard.finish_lock(pending, Ok(())).unwrap();
        wizard
    }

    type TestWizard = Wizard<MemoryStore, SimulatedBackend, NullSink>;

    fn config() -> WizardConfig {
        WizardConfig {
            decision_window_secs: 10,
            low_time_threshold_secs: 5,
            ..WizardConfig::default()
        }
    }

    fn plan() -> Plan {
        Plan {
            id: "weekly-premium".into(),
            name: "Weekly Premium".into(),
            price_minor_units: 4999,
            duration_label: "per week".into(),
            features: Vec::new(),
            is_popular: true,
        }
    }

    fn open(store: MemoryStore) -> TestWizard {
        Wizard::open(
            config(),
            store,
            SimulatedBackend::new(Duration::from_millis(100)),
            NullSink,
        )
        .unwrap()
    }

    fn to_customization<St: KeyValueStore, T: TelemetrySink>(wizard: &mut Wizard<St, SimulatedBackend, T>) {
        wizard.set_contact(ContactField::Name, "A").unwrap();
        wizard.set_contact(ContactField::Email, "a@b.com").unwrap();
        wizard.set_contact(ContactField::Phone, "1").unwrap();
        wizard.set_contact(ContactField::Address, "X").unwrap();
        wizard.advance(WizardStep::ChildProfiles).unwrap();
        let id = wizard.add_child().unwrap();
        wizard
            .update_child(id, |c| {
                c.name = "Kid".into();
                c.age = 7;
            })
            .unwrap();
        wizard.advance(WizardStep::PlanSelection).unwrap();
        wizard.select_plan(plan()).unwrap();
    }

    #[test]
    fn edits_are_autosaved_as_draft() {
        let store = MemoryStore::new();
        let mut wizard = open(store.clone());
        wizard.set_contact(ContactField::Name, "A").unwrap();

        let reopened = open(store);
        assert_eq!(reopened.customer().name, "A");
    }

    #[test]
    fn update_child_keeps_id() {
        let mut wizard = open(MemoryStore::new());
        let id = wizard.add_child().unwrap();
        wizard
            .update_child(id, |c| {
                c.id = ChildId::new();
                c.name = "Kid".into();
            })
            .unwrap();

        assert_eq!(wizard.customer().child(id).map(|c| c.name.as_str()), Some("Kid"));
    }

    #[test]
    fn select_plan_moves_to_customization() {
        let mut wizard = open(MemoryStore::new());
        to_customization(&mut wizard);

        assert_eq!(wizard.current_step(), WizardStep::PlanCustomization);
        assert_eq!(wizard.plan().map(|p| p.id.as_str()), Some("weekly-premium"));
    }

    #[test]
    fn select_plan_before_plan_step_is_rejected() {
        let mut wizard = open(MemoryStore::new());
        let err = wizard.select_plan(plan()).unwrap_err();
        assert!(matches!(
            err,
            WizardError::Transition(TransitionError::NotAdjacent { .. })
        ));
        assert!(wizard.plan().is_none());
    }

    #[test]
    fn ticks_only_count_on_customization_step() {
        let mut wizard = open(MemoryStore::new());
        assert_eq!(wizard.tick(), TimerSignal::Paused);
        assert_eq!(wizard.remaining_seconds(), 10);

        to_customization(&mut wizard);
        assert_eq!(wizard.tick(), TimerSignal::Ticked { remaining: 9 });
    }

    #[test]
    fn low_time_signal_is_emitted_to_telemetry() {
        let (sink, mut events) = ChannelSink::new();
        let mut wizard = Wizard::open(
            config(),
            MemoryStore::new(),
            SimulatedBackend::new(Duration::from_millis(1)),
            sink,
        )
        .unwrap();
        to_customization(&mut wizard);

        for _ in 0..6 {
            wizard.tick();
        }

        let mut low_time = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let WizardEvent::LowTime { remaining_seconds } = event {
                low_time.push(remaining_seconds);
            }
        }
        assert_eq!(low_time, vec![4]);
        assert!(wizard.is_low_time());
    }

    #[test]
    fn edits_are_refused_while_lock_is_pending() {
        let mut wizard = open(MemoryStore::new());
        to_customization(&mut wizard);

        let LockStart::Pending(pending) = wizard.begin_lock(LockTrigger::Manual).unwrap() else {
            panic!("expected pending lock");
        };

        assert!(matches!(
            wizard.set_addon(Addon::ParentGuide, true),
            Err(WizardError::Transition(TransitionError::LockInProgress))
        ));
        assert!(matches!(
            wizard.start_new_order(),
            Err(WizardError::Transition(TransitionError::LockInProgress))
        ));
        assert_eq!(wizard.tick(), TimerSignal::Halted);
        assert_eq!(wizard.remaining_seconds(), 10);

        wizard.finish_lock(pending, Ok(())).unwrap();
        assert_eq!(wizard.current_step(), WizardStep::OrderConfirmed);
    }

    #[test]
    fn customization_is_frozen_into_the_order() {
        let mut wizard = open(MemoryStore::new());
        to_customization(&mut wizard);
        wizard.set_addon(Addon::ScienceMaterials, true).unwrap();

        let LockStart::Pending(pending) = wizard.begin_lock(LockTrigger::Manual).unwrap() else {
            panic!("expected pending lock");
        };
        let order = wizard.finish_lock(pending, Ok(())).unwrap();

        assert!(order.customization.is_enabled(Addon::ScienceMaterials));
        assert!(matches!(
            wizard.set_addon(Addon::ScienceMaterials, false),
            Err(WizardError::Transition(TransitionError::SessionLocked))
        ));
    }

    #[test]
    fn start_new_order_resets_everything() {
        let store = MemoryStore::new();
        let mut wizard = open(store.clone());
        to_customization(&mut wizard);
        let LockStart::Pending(pending) = wizard.begin_lock(LockTrigger::Manual).unwrap() else {
            panic!("expected pending lock");
        };
        wizard.finish_lock(pending, Ok(())).unwrap();

        wizard.start_new_order().unwrap();

        assert_eq!(wizard.current_step(), WizardStep::Signup);
        assert_eq!(wizard.lock_state(), LockState::Open);
        assert_eq!(wizard.remaining_seconds(), 10);
        assert!(wizard.locked_order().is_none());
        assert!(wizard.plan().is_none());
        assert_eq!(wizard.customer(), &CustomerRecord::default());

        let reopened = open(store);
        assert_eq!(reopened.current_step(), WizardStep::Signup);
        assert!(reopened.locked_order().is_none());
    }

    #[test]
    fn stored_order_wins_over_open_checkpoint() {
        let store = MemoryStore::new();
        let mut wizard = open(store.clone());
        to_customization(&mut wizard);
        let order = LockedOrder::snapshot(wizard.customer(), &plan(), wizard.customization());
        wizard.persistence().save_locked_order(&order).unwrap();

        let reopened = open(store);
        assert_eq!(reopened.lock_state(), LockState::Locked);
        assert_eq!(reopened.current_step(), WizardStep::OrderConfirmed);
        assert_eq!(reopened.locked_order(), Some(&order));
        assert_eq!(reopened.history().transitions().len(), 3);
    }

    #[test]
    fn failed_draft_write_keeps_locked_session() {
        let store = FlakyStore::default();
        let mut wizard = locked_flaky(&store);
        let draft_key = config().storage.draft_key;

        store.fail_writes_to(Some(&draft_key));
        assert!(matches!(wizard.start_new_order(), Err(WizardError::Store(_))));
        assert_eq!(wizard.lock_state(), LockState::Locked);
        assert_eq!(wizard.current_step(), WizardStep::OrderConfirmed);
        assert!(wizard.locked_order().is_some());

        let reopened = open_flaky(store.clone());
        assert_eq!(reopened.lock_state(), LockState::Locked);

        store.fail_writes_to(None);
        wizard.start_new_order().unwrap();
        let reopened = open_flaky(store);
        assert_eq!(reopened.current_step(), WizardStep::Signup);
        assert!(reopened.locked_order().is_none());
    }

    #[test]
    fn failed_order_removal_keeps_locked_session() {
        let store = FlakyStore::default();
        let mut wizard = locked_flaky(&store);
        let order = wizard.locked_order().cloned();

        store.fail_writes_to(Some(&config().storage.locked_order_key));
        assert!(matches!(wizard.start_new_order(), Err(WizardError::Store(_))));
        assert_eq!(wizard.lock_state(), LockState::Locked);
        assert_eq!(wizard.locked_order().cloned(), order);

        let reopened = open_flaky(store);
        assert_eq!(reopened.lock_state(), LockState::Locked);
        assert_eq!(reopened.locked_order().cloned(), order);
        assert_eq!(reopened.customer().name, "A");
    }

    #[test]
    fn unreadable_locked_order_falls_back_to_checkpoint() {
        let store = MemoryStore::new();
        let mut wizard = open(store.clone());
        to_customization(&mut wizard);
        store
            .set(&config().storage.locked_order_key, "{truncated")
            .unwrap();

        let reopened = open(store);
        assert_eq!(reopened.lock_state(), LockState::Open);
        assert_eq!(reopened.current_step(), WizardStep::PlanCustomization);
        assert!(reopened.locked_order().is_none());
    }

    #[test]
    fn open_rejects_invalid_config() {
        let config = WizardConfig {
            decision_window_secs: 0,
            ..config()
        };
        let result = Wizard::open(
            config,
            MemoryStore::new(),
            SimulatedBackend::new(Duration::ZERO),
            NullSink,
        );
        assert!(matches!(
            result,
            Err(WizardError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn field_errors_track_edits_without_navigation() {
        let mut wizard = open(MemoryStore::new());
        assert_eq!(wizard.field_errors().len(), 4);
        assert!(wizard.validation_errors().is_empty());

        wizard.set_contact(ContactField::Email, "a@b").unwrap();
        let errors = wizard.field_errors();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));

        wizard.set_contact(ContactField::Email, "a@b.com").unwrap();
        assert!(wizard.field_errors().get("email").is_none());
    }

    #[test]
    fn locked_checkpoint_without_order_reopens() {
        let store = MemoryStore::new();
        let keys = config().storage;
        let mut session = WizardSession::new(10);
        session.current_step = WizardStep::OrderConfirmed;
        session.lock_state = LockState::Locked;
        let checkpoint = SessionCheckpoint::capture(
            &session,
            Some(&plan()),
            CustomizationOptions::default(),
            &History::new(),
        );
        store
            .set(&keys.session_key, &checkpoint.to_json().unwrap())
            .unwrap();

        let wizard = open(store);
        assert_eq!(wizard.lock_state(), LockState::Open);
        assert_eq!(wizard.current_step(), WizardStep::PlanCustomization);
    }
}
