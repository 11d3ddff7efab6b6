// The terminal clock: loads the alarm list from the store service, ticks
// once a second, and fires alarms at the console.
use dotenv::dotenv;
use log::info;

use alarm_clock_service::client::HttpStore;
use alarm_clock_service::console::ConsoleAlert;
use alarm_clock_service::controller::AlarmController;
use alarm_clock_service::timing::run_clock;
use alarm_clock_service::util;

#[tokio::main]
async fn main() {
    dotenv().ok();
    util::init_logging();

    let base_url = util::server_url();
    info!("alarm clock starting against {base_url}");

    let mut controller = AlarmController::new(HttpStore::new(base_url));
    controller.load().await;

    let alert = ConsoleAlert::new(true);
    run_clock(controller, alert).await;
}
