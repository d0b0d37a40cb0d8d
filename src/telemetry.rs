//! Fire-and-forget analytics events.
//!
//! The wizard emits events but never waits on, or fails because of, the
//! sink that receives them.

use crate::lock::LockTrigger;
use crate::machine::WizardStep;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WizardEvent {
    StepChanged {
        from: WizardStep,
        to: WizardStep,
    },
    LowTime {
        remaining_seconds: u64,
    },
    DeadlineExpired,
    LockStarted {
        trigger: LockTrigger,
    },
    OrderLocked {
        order_id: Uuid,
        plan_id: String,
        trigger: LockTrigger,
    },
    LockFailed {
        reason: String,
        trigger: LockTrigger,
    },
    SessionReset,
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StepChanged { .. } => "step_changed",
            Self::LowTime { .. } => "low_time",
            Self::DeadlineExpired => "deadline_expired",
            Self::LockStarted { .. } => "lock_started",
            Self::OrderLocked { .. } => "order_locked",
            Self::LockFailed { .. } => "lock_failed",
            Self::SessionReset => "session_reset",
        }
    }
}

/// Receiver of wizard events. `emit` must return promptly.
pub trait TelemetrySink: Send + Sync {
    fn emit(&self, event: WizardEvent);
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for Arc<T> {
    fn emit(&self, event: WizardEvent) {
        (**self).emit(event)
    }
}

/// Writes each event as a structured `tracing` record.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn emit(&self, event: WizardEvent) {
        let payload = serde_json::to_string(&event).unwrap_or_default();
        info!(target: "lockstep::telemetry", event = event.name(), %payload);
    }
}

/// Forwards events to an unbounded channel for an external collector.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<WizardEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WizardEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TelemetrySink for ChannelSink {
    fn emit(&self, event: WizardEvent) {
        // A collector that went away is not the wizard's problem.
        let _ = self.tx.send(event);
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn emit(&self, _event: WizardEvent) {}
}
