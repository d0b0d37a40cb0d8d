//! Countdown accounting for the decision window.

use crate::machine::{LockState, WizardSession, WizardStep};

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerSignal {
    /// One second elapsed.
    Ticked { remaining: u64 },
    /// One second elapsed and the window just dropped below the low-time
    /// threshold. Advisory only.
    LowTime { remaining: u64 },
    /// The window reached zero. Fires once per countdown.
    Expired,
    /// Not counting: the session is not on the customization step.
    Paused,
    /// Not counting: the lock phase has left `open`, or expiry already fired.
    Halted,
}

/// Decrements `remaining_seconds` once per tick while the order is open and
/// the user is customizing their plan.
#[derive(Clone, Debug)]
pub struct LockTimer {
    low_time_threshold_secs: u64,
    low_time_signalled: bool,
    expiry_fired: bool,
}

impl LockTimer {
    pub fn new(low_time_threshold_secs: u64) -> Self {
        Self {
            low_time_threshold_secs,
            low_time_signalled: false,
            expiry_fired: false,
        }
    }

    /// True while the next tick could change the session.
    pub fn is_armed(&self, session: &WizardSession) -> bool {
        !self.expiry_fired
            && session.lock_state == LockState::Open
            && session.current_step == WizardStep::PlanCustomization
    }

    pub fn has_expired(&self) -> bool {
        self.expiry_fired
    }

    pub fn is_low_time(&self, session: &WizardSession) -> bool {
        session.remaining_seconds < self.low_time_threshold_secs
    }

    /// Account for one elapsed second.
    pub fn tick(&mut self, session: &mut WizardSession) -> TimerSignal {
        if self.expiry_fired || session.lock_state != LockState::Open {
            return TimerSignal::Halted;
        }
        if session.current_step != WizardStep::PlanCustomization {
            return TimerSignal::Paused;
        }

        // A session restored after its deadline is already at zero.
        session.remaining_seconds = session.remaining_seconds.saturating_sub(1);
        let remaining = session.remaining_seconds;

        if remaining == 0 {
            self.expiry_fired = true;
            TimerSignal::Expired
        } else if remaining < self.low_time_threshold_secs && !self.low_time_signalled {
            self.low_time_signalled = true;
            TimerSignal::LowTime { remaining }
        } else {
            TimerSignal::Ticked { remaining }
        }
    }
}
