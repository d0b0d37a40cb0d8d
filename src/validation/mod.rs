//! Validation engine for wizard steps.
//!
//! `validate` maps a step and the current customer record to field-level
//! errors. Every rule runs, so the UI receives all problems for the step in a
//! single pass instead of one at a time. Validation is pure and cheap enough
//! to run on every keystroke.
//!
//! # Example
//!
//! ```rust
//! use lockstep::machine::WizardStep;
//! use lockstep::model::CustomerRecord;
//! use lockstep::validation::validate;
//!
//! let errors = validate(WizardStep::Signup, &CustomerRecord::default());
//! assert_eq!(errors.len(), 4);
//! assert!(errors.get("email").is_some());
//!
//! // Plan steps are never gated.
//! assert!(validate(WizardStep::PlanSelection, &CustomerRecord::default()).is_empty());
//! ```

pub mod rules;

use crate::machine::WizardStep;
use crate::model::CustomerRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use rules::{child_age_key, child_name_key, CHILD_PROFILES_KEY, MAX_CHILD_AGE, MIN_CHILD_AGE};

/// Field id to message. Empty means the step is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }
}

/// Errors that block leaving `step` with the given record.
pub fn validate(step: WizardStep, record: &CustomerRecord) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    match step {
        WizardStep::Signup => rules::signup(record, &mut errors),
        WizardStep::ChildProfiles => rules::child_profiles(record, &mut errors),
        WizardStep::PlanSelection | WizardStep::PlanCustomization | WizardStep::OrderConfirmed => {}
    }
    errors
}
