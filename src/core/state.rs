//! Core State trait for wizard steps and lock phases.
//!
//! Both the wizard's step enum and its lock phase implement this trait,
//! which exposes pure inspection methods without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for states tracked by the wizard.
///
/// All methods are pure. States are small immutable values describing
/// a position in a linear flow.
///
/// # Required Traits
///
/// - `Copy`: states are plain tags and are passed by value
/// - `PartialEq`: states must be comparable for transition logic
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are persisted in checkpoints
///
/// # Example
///
/// ```rust
/// use lockstep::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
/// enum Phase {
///     Draft,
///     Sealed,
/// }
///
/// impl State for Phase {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Draft => "draft",
///             Self::Sealed => "sealed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Sealed)
///     }
/// }
///
/// assert_eq!(Phase::Draft.name(), "draft");
/// assert!(Phase::Sealed.is_final());
/// ```
pub trait State:
    Copy + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Stable wire name, used in logs, telemetry and persisted snapshots.
    fn name(&self) -> &'static str;

    /// Check if this is a terminal state.
    ///
    /// Leaving a terminal state requires a full reset of whatever owns it.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Editing,
        Reviewing,
        Submitted,
    }

    impl State for TestState {
        fn name(&self) -> &'static str {
            match self {
                Self::Editing => "editing",
                Self::Reviewing => "reviewing",
                Self::Submitted => "submitted",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Submitted)
        }
    }

    #[test]
    fn state_name_returns_wire_name() {
        assert_eq!(TestState::Editing.name(), "editing");
        assert_eq!(TestState::Reviewing.name(), "reviewing");
        assert_eq!(TestState::Submitted.name(), "submitted");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Editing.is_final());
        assert!(!TestState::Reviewing.is_final());
        assert!(TestState::Submitted.is_final());
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Reviewing;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
