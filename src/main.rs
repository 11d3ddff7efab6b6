// The alarm store service: CRUD for alarm records under /api/alarms, a JSON
// file behind it, and the static page at /.
use actix_web::{error, web::{self, Data}, App, HttpResponse, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use alarm_clock_service::routes::{
    create_alarm, delete_alarm, get_alarm, health, index, list_alarms, update_alarm,
};
use alarm_clock_service::store::AlarmStore;
use alarm_clock_service::types::SharedStore;
use alarm_clock_service::util;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    util::init_logging();

    let store = AlarmStore::load(PathBuf::from(util::DATA_FILE));
    let store_data: Data<SharedStore> = Data::new(Arc::new(RwLock::new(store)));

    let addr = util::server_bind_addr();
    info!("alarm store listening on http://{addr}");

    HttpServer::new(move || {
        let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
            error!("Json config error: {}", err);
            error::InternalError::from_response(err, HttpResponse::BadRequest().into()).into()
        });
        App::new()
            .app_data(Data::clone(&store_data))
            .app_data(json_cfg)
            .service(index)
            .service(health)
            .service(list_alarms)
            .service(create_alarm)
            .service(get_alarm)
            .service(update_alarm)
            .service(delete_alarm)
    })
    .bind(addr)?
    .run()
    .await
}
