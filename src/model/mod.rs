//! Domain data handled by the wizard.

mod customer;
mod order;
mod plan;

pub use customer::{ChildId, ChildProfile, ContactField, CustomerRecord, LearningLevel, ProfileError};
pub use order::LockedOrder;
pub use plan::{Addon, CustomizationOptions, Plan, PlanCatalog};
