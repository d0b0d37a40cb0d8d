//! Step transition history.
//!
//! Records each move the wizard makes so a resumed session can show how it
//! got where it is. History values are immutable; `record` returns a new one.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What caused a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionCause {
    /// A navigation request from the user (advance, retreat, plan pick).
    User,
    /// A system-driven event, i.e. the order lock forcing the terminal step.
    System,
}

/// Record of a single transition.
///
/// # Example
///
/// ```rust
/// use lockstep::core::{StepTransition, TransitionCause};
/// use lockstep::machine::WizardStep;
/// use chrono::Utc;
///
/// let transition = StepTransition {
///     from: WizardStep::Signup,
///     to: WizardStep::ChildProfiles,
///     at: Utc::now(),
///     cause: TransitionCause::User,
/// };
/// assert!(transition.is_forward());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StepTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// When the transition happened
    pub at: DateTime<Utc>,
    /// Who asked for it
    pub cause: TransitionCause,
}

impl<S> StepTransition<S>
where
    S: State + Ord,
{
    /// True when the transition moved later in the flow.
    pub fn is_forward(&self) -> bool {
        self.to > self.from
    }
}

/// Ordered history of transitions.
///
/// # Example
///
/// ```rust
/// use lockstep::core::{History, StepTransition, TransitionCause};
/// use lockstep::machine::WizardStep;
/// use chrono::Utc;
///
/// let history = History::new().record(StepTransition {
///     from: WizardStep::Signup,
///     to: WizardStep::ChildProfiles,
///     at: Utc::now(),
///     cause: TransitionCause::User,
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&WizardStep::Signup, &WizardStep::ChildProfiles]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct History<S: State> {
    transitions: Vec<StepTransition<S>>,
}

impl<S: State> Default for History<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> History<S> {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The receiver is left untouched.
    pub fn record(&self, transition: StepTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States visited in order: the first origin, then each destination.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time elapsed between the first and last recorded transition.
    ///
    /// `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.at.signed_duration_since(first.at).to_std().ok()
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StepTransition<S>> {
        self.transitions.last()
    }

    /// All transitions, oldest first.
    pub fn transitions(&self) -> &[StepTransition<S>] {
        &self.transitions
    }

    /// Number of transitions whose cause matches.
    pub fn count_by(&self, cause: TransitionCause) -> usize {
        self.transitions.iter().filter(|t| t.cause == cause).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::WizardStep;

    fn user(from: WizardStep, to: WizardStep) -> StepTransition<WizardStep> {
        StepTransition {
            from,
            to,
            at: Utc::now(),
            cause: TransitionCause::User,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: History<WizardStep> = History::new();
        assert!(history.transitions().is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_leaves_original_unchanged() {
        let history = History::new();
        let next = history.record(user(WizardStep::Signup, WizardStep::ChildProfiles));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(next.transitions().len(), 1);
    }

    #[test]
    fn path_includes_backward_moves() {
        let history = History::new()
            .record(user(WizardStep::Signup, WizardStep::ChildProfiles))
            .record(user(WizardStep::ChildProfiles, WizardStep::Signup))
            .record(user(WizardStep::Signup, WizardStep::ChildProfiles));

        let path = history.get_path();
        assert_eq!(
            path,
            vec![
                &WizardStep::Signup,
                &WizardStep::ChildProfiles,
                &WizardStep::Signup,
                &WizardStep::ChildProfiles,
            ]
        );
        assert!(!history.transitions()[1].is_forward());
    }

    #[test]
    fn count_by_separates_system_transitions() {
        let history = History::new()
            .record(user(WizardStep::PlanSelection, WizardStep::PlanCustomization))
            .record(StepTransition {
                from: WizardStep::PlanCustomization,
                to: WizardStep::OrderConfirmed,
                at: Utc::now(),
                cause: TransitionCause::System,
            });

        assert_eq!(history.count_by(TransitionCause::User), 1);
        assert_eq!(history.count_by(TransitionCause::System), 1);
        assert_eq!(history.last().map(|t| t.to), Some(WizardStep::OrderConfirmed));
    }

    #[test]
    fn single_transition_has_zero_duration() {
        let history = History::new().record(user(WizardStep::Signup, WizardStep::ChildProfiles));
        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = History::new().record(user(WizardStep::Signup, WizardStep::ChildProfiles));

        let json = serde_json::to_string(&history).unwrap();
        assert!(json.contains("\"child_profiles\""));
        let restored: History<WizardStep> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.get_path(), history.get_path());
    }
}
