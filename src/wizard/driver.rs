//! Event loop tying user commands and countdown ticks to one wizard.

use super::Wizard;
use crate::lock::{LockBackend, LockTrigger};
use crate::machine::WizardStep;
use crate::model::{Addon, LockedOrder, Plan};
use crate::persistence::KeyValueStore;
use crate::telemetry::TelemetrySink;
use crate::timer::{TickScheduler, TimerSignal};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A user request delivered to the driver loop.
#[derive(Clone, Debug)]
pub enum Command {
    Advance(WizardStep),
    Retreat,
    SelectPlan(Plan),
    SetAddon(Addon, bool),
    LockNow,
}

enum Wake {
    Command(Option<Command>),
    Tick,
}

/// Run the wizard until its order is locked or the command channel closes.
///
/// Commands are served before ticks. The countdown only ticks while the
/// timer is armed; on expiry the order is locked through the same guarded
/// entry point as `LockNow`. Failures are logged and the loop carries on,
/// with the tick period restarted so the countdown resumes where it stopped.
pub async fn drive<St, B, T, Sch>(
    wizard: &mut Wizard<St, B, T>,
    scheduler: &mut Sch,
    commands: &mut mpsc::UnboundedReceiver<Command>,
) -> Option<LockedOrder>
where
    St: KeyValueStore,
    B: LockBackend,
    T: TelemetrySink,
    Sch: TickScheduler,
{
    loop {
        if let Some(order) = wizard.locked_order() {
            return Some(order.clone());
        }

        let armed = wizard.timer_armed();
        let wake = tokio::select! {
            biased;
            command = commands.recv() => Wake::Command(command),
            () = scheduler.next_tick(), if armed => Wake::Tick,
        };

        match wake {
            Wake::Command(None) => return None,
            Wake::Command(Some(command)) => {
                let locking = matches!(command, Command::LockNow);
                dispatch(wizard, command).await;
                if locking || (!armed && wizard.timer_armed()) {
                    scheduler.reset();
                }
            }
            Wake::Tick => {
                if wizard.tick() == TimerSignal::Expired {
                    if let Err(err) = wizard.lock(LockTrigger::Expired).await {
                        warn!(error = %err, "automatic lock failed");
                    }
                    scheduler.reset();
                }
            }
        }
    }
}

async fn dispatch<St, B, T>(wizard: &mut Wizard<St, B, T>, command: Command)
where
    St: KeyValueStore,
    B: LockBackend,
    T: TelemetrySink,
{
    debug!(?command, "command received");
    let result = match command {
        Command::Advance(step) => wizard.advance(step).map(drop),
        Command::Retreat => wizard.retreat().map(drop),
        Command::SelectPlan(plan) => wizard.select_plan(plan).map(drop),
        Command::SetAddon(addon, enabled) => wizard.set_addon(addon, enabled),
        Command::LockNow => {
            if let Err(err) = wizard.lock(LockTrigger::Manual).await {
                warn!(error = %err, "manual lock failed");
            }
            Ok(())
        }
    };
    if let Err(err) = result {
        warn!(error = %err, "command rejected");
    }
}
