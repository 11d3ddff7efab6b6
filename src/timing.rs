use chrono::Local;
use log::debug;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::client::StoreBackend;
use crate::console::{parse_command, Command, ConsoleAlert, HELP};
use crate::controller::{AddOutcome, AlarmController};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The clock's event loop: one tick per second, pending commands drained
/// between ticks. A firing alarm's prompt holds the loop until answered; the
/// interval keeps scheduling underneath and missed ticks are delayed rather
/// than burst, so a long prompt cannot replay the minute.
pub async fn run_clock<S: StoreBackend>(
    mut controller: AlarmController<S>,
    mut alert: ConsoleAlert,
) {
    println!("{HELP}");
    println!();
    println!("{}", controller.view());

    let mut ticker = interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        while let Some(line) = alert.try_line() {
            match parse_command(&line) {
                Ok(command) => {
                    if !dispatch(command, &mut controller).await {
                        return;
                    }
                }
                Err(reason) if reason.is_empty() => {}
                Err(reason) => println!("{reason}"),
            }
        }

        let now = Local::now().time();
        if controller.tick(now, &mut alert).await > 0 {
            println!("{}", controller.view());
        }
    }
}

/// Apply one command; every mutation is followed by a re-render. Returns
/// false when the user asked to quit.
async fn dispatch<S: StoreBackend>(command: Command, controller: &mut AlarmController<S>) -> bool {
    match command {
        Command::Add(draft) => match controller.add(draft).await {
            Ok(outcome) => {
                if outcome == AddOutcome::SavedLocally {
                    println!("warning: alarm store unreachable, alarm kept for this session only");
                }
                println!("{}", controller.view());
            }
            Err(e) => println!("{e}"),
        },
        Command::Remove(id) => {
            controller.remove(id).await;
            println!("{}", controller.view());
        }
        Command::Snooze(id) => {
            controller.snooze(id).await;
            println!("{}", controller.view());
        }
        Command::List => println!("{}", controller.view()),
        Command::Clock => println!("{}", Local::now().format("%H:%M:%S  %A, %B %-d, %Y")),
        Command::Help => println!("{HELP}"),
        Command::Quit => {
            debug!("quit requested");
            return false;
        }
    }
    true
}
