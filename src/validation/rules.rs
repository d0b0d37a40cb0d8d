//! Field rules for the steps that gate forward navigation.

use super::ValidationErrors;
use crate::model::{ContactField, CustomerRecord};
use regex::Regex;
use std::sync::OnceLock;

pub const MIN_CHILD_AGE: u32 = 3;
pub const MAX_CHILD_AGE: u32 = 12;

/// Key used when the child list itself is empty.
pub const CHILD_PROFILES_KEY: &str = "childProfiles";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

pub fn child_name_key(index: usize) -> String {
    format!("child{index}Name")
}

pub fn child_age_key(index: usize) -> String {
    format!("child{index}Age")
}

/// Contact details: all four present after trimming, email shaped like `local@domain.tld`.
pub fn signup(record: &CustomerRecord, errors: &mut ValidationErrors) {
    for field in ContactField::ALL {
        let value = record.contact(field).trim();
        if value.is_empty() {
            errors.insert(field.id(), required_message(field));
        } else if field == ContactField::Email && !email_pattern().is_match(value) {
            errors.insert(field.id(), "Please enter a valid email address");
        }
    }
}

/// At least one child, each with a name and an age in range.
pub fn child_profiles(record: &CustomerRecord, errors: &mut ValidationErrors) {
    if record.child_profiles.is_empty() {
        errors.insert(CHILD_PROFILES_KEY, "Add at least one child");
        return;
    }

    for (index, child) in record.child_profiles.iter().enumerate() {
        if child.name.trim().is_empty() {
            errors.insert(child_name_key(index), "Child's name is required");
        }
        if !(MIN_CHILD_AGE..=MAX_CHILD_AGE).contains(&child.age) {
            errors.insert(
                child_age_key(index),
                format!("Age must be between {MIN_CHILD_AGE} and {MAX_CHILD_AGE}"),
            );
        }
    }
}

fn required_message(field: ContactField) -> &'static str {
    match field {
        ContactField::Name => "Name is required",
        ContactField::Email => "Email is required",
        ContactField::Phone => "Phone number is required",
        ContactField::Address => "Address is required",
    }
}
