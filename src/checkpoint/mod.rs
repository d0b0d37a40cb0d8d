//! Session checkpoints for resuming the wizard after a reload.
//!
//! A checkpoint captures everything about the session that is not the
//! customer draft: the step, remaining time, lock phase, chosen plan,
//! customization toggles and transition history. The draft has its own key
//! so it can be saved on every keystroke without rewriting the rest.

use crate::core::History;
use crate::machine::{LockState, WizardSession, WizardStep};
use crate::model::{CustomizationOptions, Plan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Why a stored checkpoint cannot be used.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Checkpoint could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    /// Not JSON, or JSON missing session fields.
    #[error("Checkpoint is malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Written by a different checkpoint format.
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The step and lock phase contradict each other.
    #[error("Checkpoint is at step '{step}' with lock state '{lock_state}'")]
    Inconsistent { step: WizardStep, lock_state: LockState },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// When the checkpoint was written
    pub saved_at: DateTime<Utc>,

    pub session: WizardSession,

    pub plan: Option<Plan>,

    pub customization: CustomizationOptions,

    pub history: History<WizardStep>,
}

#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

impl SessionCheckpoint {
    pub fn capture(
        session: &WizardSession,
        plan: Option<&Plan>,
        customization: CustomizationOptions,
        history: &History<WizardStep>,
    ) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            saved_at: Utc::now(),
            session: session.clone(),
            plan: plan.cloned(),
            customization,
            history: history.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(CheckpointError::Encode)
    }

    /// Decode a checkpoint, checking the version before the body so that a
    /// format change reports as a version mismatch.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let header: VersionHeader = serde_json::from_str(json).map_err(CheckpointError::Malformed)?;
        if header.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: header.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let checkpoint: Self = serde_json::from_str(json).map_err(CheckpointError::Malformed)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// The terminal step and the locked phase must agree.
    fn validate(&self) -> Result<(), CheckpointError> {
        let terminal = self.session.current_step == WizardStep::OrderConfirmed;
        if terminal != self.session.is_locked() {
            return Err(CheckpointError::Inconsistent {
                step: self.session.current_step,
                lock_state: self.session.lock_state,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StepTransition, TransitionCause};
    use crate::model::Addon;

    fn sample() -> SessionCheckpoint {
        let mut session = WizardSession::default();
        session.current_step = WizardStep::PlanSelection;
        session.remaining_seconds = 1234;
        let history = History::new().record(StepTransition {
            from: WizardStep::ChildProfiles,
            to: WizardStep::PlanSelection,
            at: Utc::now(),
            cause: TransitionCause::User,
        });
        let mut customization = CustomizationOptions::default();
        customization.set(Addon::ParentGuide, true);
        SessionCheckpoint::capture(&session, None, customization, &history)
    }

    #[test]
    fn checkpoint_preserves_session_fields() {
        let json = sample().to_json().unwrap();
        let restored = SessionCheckpoint::from_json(&json).unwrap();

        assert_eq!(restored.version, CHECKPOINT_VERSION);
        assert_eq!(restored.session.current_step, WizardStep::PlanSelection);
        assert_eq!(restored.session.remaining_seconds, 1234);
        assert!(restored.customization.is_enabled(Addon::ParentGuide));
        assert_eq!(restored.history.transitions().len(), 1);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut checkpoint = sample();
        checkpoint.version = 99;
        let json = serde_json::to_string(&checkpoint).unwrap();

        match SessionCheckpoint::from_json(&json) {
            Err(CheckpointError::UnsupportedVersion { found, supported }) => {
                assert_eq!(found, 99);
                assert_eq!(supported, CHECKPOINT_VERSION);
            }
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            SessionCheckpoint::from_json("not json"),
            Err(CheckpointError::Malformed(_))
        ));
    }

    #[test]
    fn current_version_without_session_is_malformed() {
        let json = format!("{{\"version\": {CHECKPOINT_VERSION}}}");
        assert!(matches!(
            SessionCheckpoint::from_json(&json),
            Err(CheckpointError::Malformed(_))
        ));
    }

    #[test]
    fn locked_phase_off_terminal_step_is_rejected() {
        let mut checkpoint = sample();
        checkpoint.session.lock_state = LockState::Locked;
        let json = checkpoint.to_json().unwrap();

        match SessionCheckpoint::from_json(&json) {
            Err(err @ CheckpointError::Inconsistent { .. }) => {
                assert_eq!(
                    err.to_string(),
                    "Checkpoint is at step 'plan_selection' with lock state 'locked'"
                );
            }
            other => panic!("expected inconsistency, got {other:?}"),
        }
    }
}
