//! Lock timer: the decision-window countdown.
//!
//! Timing and business logic are kept apart. A [`TickScheduler`] only says
//! "a second passed"; [`LockTimer`] turns that into a [`TimerSignal`] against
//! the session. Acting on `Expired` (locking the order) is the wizard's job.

mod countdown;
mod scheduler;

pub use countdown::{LockTimer, TimerSignal};
pub use scheduler::{IntervalScheduler, TickScheduler};
