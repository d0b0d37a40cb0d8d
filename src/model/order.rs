//! The immutable snapshot produced by locking an order.

use super::customer::CustomerRecord;
use super::plan::{CustomizationOptions, Plan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A finalized order. Created once by the lock operation and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedOrder {
    pub order_id: Uuid,
    pub customer: CustomerRecord,
    pub plan: Plan,
    pub customization: CustomizationOptions,
    pub locked_at: DateTime<Utc>,
}

impl LockedOrder {
    /// Freeze the given inputs under a fresh order id.
    pub fn snapshot(
        customer: &CustomerRecord,
        plan: &Plan,
        customization: CustomizationOptions,
    ) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            customer: customer.clone(),
            plan: plan.clone(),
            customization,
            locked_at: Utc::now(),
        }
    }
}
