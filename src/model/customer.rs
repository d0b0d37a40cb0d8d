//! The in-progress customer record and its child profiles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Opaque unique token identifying a child profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildId(Uuid);

impl ChildId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChildId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// One child on the customer's account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProfile {
    pub id: ChildId,
    pub name: String,
    /// Whole years. Zero means the field has not been filled in yet.
    pub age: u32,
    #[serde(default)]
    pub interests: BTreeSet<String>,
    #[serde(default)]
    pub learning_level: LearningLevel,
}

impl ChildProfile {
    /// A blank profile as created by the "add child" action.
    pub fn new() -> Self {
        Self {
            id: ChildId::new(),
            name: String::new(),
            age: 0,
            interests: BTreeSet::new(),
            learning_level: LearningLevel::default(),
        }
    }

    pub fn named(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            ..Self::new()
        }
    }
}

impl Default for ChildProfile {
    fn default() -> Self {
        Self::new()
    }
}

/// Contact fields collected on the signup step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Address,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [Self::Name, Self::Email, Self::Phone, Self::Address];

    /// Field id used as the key in validation error maps.
    pub fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
        }
    }
}

/// Errors from child profile edits.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("At least one child profile is required")]
    LastChild,

    #[error("No child profile with id {0}")]
    UnknownChild(ChildId),
}

/// The customer data gathered across the signup and child-profile steps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub child_profiles: Vec<ChildProfile>,
}

impl CustomerRecord {
    pub fn contact(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Address => &self.address,
        }
    }

    pub fn set_contact(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Address => &mut self.address,
        };
        *slot = value.into();
    }

    /// Append a blank child profile and return its id.
    pub fn add_child(&mut self) -> ChildId {
        let child = ChildProfile::new();
        let id = child.id;
        self.child_profiles.push(child);
        id
    }

    /// Remove a child profile. The last remaining profile cannot be removed.
    pub fn remove_child(&mut self, id: ChildId) -> Result<ChildProfile, ProfileError> {
        let index = self
            .child_profiles
            .iter()
            .position(|c| c.id == id)
            .ok_or(ProfileError::UnknownChild(id))?;
        if self.child_profiles.len() == 1 {
            return Err(ProfileError::LastChild);
        }
        Ok(self.child_profiles.remove(index))
    }

    pub fn child(&self, id: ChildId) -> Option<&ChildProfile> {
        self.child_profiles.iter().find(|c| c.id == id)
    }

    pub fn child_mut(&mut self, id: ChildId) -> Result<&mut ChildProfile, ProfileError> {
        self.child_profiles
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ProfileError::UnknownChild(id))
    }
}
