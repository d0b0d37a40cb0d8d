//! Where a lock request is sent.

use super::error::LockFailure;
use crate::config::WizardConfig;
use crate::model::LockedOrder;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Remote acknowledgement point for a lock. A real implementation is an
/// HTTP call; the wizard only needs success or failure.
#[async_trait]
pub trait LockBackend: Send + Sync {
    async fn submit(&self, order: &LockedOrder) -> Result<(), LockFailure>;
}

#[async_trait]
impl<B: LockBackend + ?Sized> LockBackend for Arc<B> {
    async fn submit(&self, order: &LockedOrder) -> Result<(), LockFailure> {
        (**self).submit(order).await
    }
}

/// Stand-in backend that waits a fixed latency and then answers.
#[derive(Clone, Debug)]
pub struct SimulatedBackend {
    latency: Duration,
    fail: bool,
}

impl SimulatedBackend {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            fail: false,
        }
    }

    /// A succeeding backend with the configured latency.
    pub fn from_config(config: &WizardConfig) -> Self {
        Self::new(config.simulated_lock_latency())
    }

    /// A backend that always rejects after the latency.
    pub fn failing(latency: Duration) -> Self {
        Self {
            latency,
            fail: true,
        }
    }
}

#[async_trait]
impl LockBackend for SimulatedBackend {
    async fn submit(&self, _order: &LockedOrder) -> Result<(), LockFailure> {
        tokio::time::sleep(self.latency).await;
        if self.fail {
            Err(LockFailure::new("Failed to lock order. Please try again."))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerRecord, CustomizationOptions, Plan};
    use tokio::time::Instant;

    fn order() -> LockedOrder {
        let plan = Plan {
            id: "weekly-premium".into(),
            name: "Weekly Premium".into(),
            price_minor_units: 4999,
            duration_label: "per week".into(),
            features: Vec::new(),
            is_popular: true,
        };
        LockedOrder::snapshot(&CustomerRecord::default(), &plan, CustomizationOptions::default())
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_backend_waits_latency() {
        let backend = SimulatedBackend::new(Duration::from_millis(1500));
        let start = Instant::now();

        assert!(backend.submit(&order()).await.is_ok());
        assert_eq!(start.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn configured_backend_uses_configured_latency() {
        let config = WizardConfig {
            simulated_lock_latency_ms: 250,
            ..WizardConfig::default()
        };
        let backend = SimulatedBackend::from_config(&config);
        let start = Instant::now();

        assert!(backend.submit(&order()).await.is_ok());
        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_backend_reports_reason() {
        let backend = Arc::new(SimulatedBackend::failing(Duration::from_millis(10)));
        let err = backend.submit(&order()).await.unwrap_err();
        assert!(err.reason.contains("try again"));
    }
}
