//! Tick sources for the countdown.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Emits one tick per countdown second. Timing only; the countdown decides
/// what a tick means.
#[async_trait]
pub trait TickScheduler: Send {
    /// Wait for the next tick. Must be cancel-safe.
    async fn next_tick(&mut self);

    /// Restart the period from now, dropping any tick that built up while
    /// nobody was waiting.
    fn reset(&mut self);
}

/// Wall-clock scheduler backed by `tokio::time::interval`.
///
/// Must be created inside a Tokio runtime.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Interval,
}

impl IntervalScheduler {
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl TickScheduler for IntervalScheduler {
    async fn next_tick(&mut self) {
        self.interval.tick().await;
    }

    fn reset(&mut self) {
        self.interval.reset();
    }
}
