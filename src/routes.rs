use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::{debug, info};

use crate::models::{Alarm, NewAlarm};
use crate::types::{AlarmId, SharedStore};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// The one static page.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[get("/health")]
pub async fn health() -> impl Responder {
    info!("Health check");
    HttpResponse::Ok()
}

#[get("/api/alarms")]
pub async fn list_alarms(store: web::Data<SharedStore>) -> impl Responder {
    HttpResponse::Ok().json(store.read().await.list())
}

#[post("/api/alarms")]
pub async fn create_alarm(
    payload: web::Json<NewAlarm>,
    store: web::Data<SharedStore>,
) -> impl Responder {
    let alarm = store.write().await.create(payload.into_inner());
    info!("created alarm {} at {}", alarm.id, alarm.time);
    HttpResponse::Ok().json(alarm)
}

#[get("/api/alarms/{id}")]
pub async fn get_alarm(id: web::Path<AlarmId>, store: web::Data<SharedStore>) -> impl Responder {
    match store.read().await.get(id.into_inner()) {
        Some(alarm) => HttpResponse::Ok().json(alarm),
        None => HttpResponse::NotFound().finish(),
    }
}

#[put("/api/alarms/{id}")]
pub async fn update_alarm(
    id: web::Path<AlarmId>,
    payload: web::Json<Alarm>,
    store: web::Data<SharedStore>,
) -> impl Responder {
    let id = id.into_inner();
    match store.write().await.update(id, payload.into_inner()) {
        Some(alarm) => {
            info!("updated alarm {id}, now at {}", alarm.time);
            HttpResponse::Ok().json(alarm)
        }
        None => HttpResponse::NotFound().finish(),
    }
}

#[delete("/api/alarms/{id}")]
pub async fn delete_alarm(id: web::Path<AlarmId>, store: web::Data<SharedStore>) -> impl Responder {
    let id = id.into_inner();
    let removed = store.write().await.delete(id);
    debug!("delete alarm {id}: removed={removed}");
    HttpResponse::Ok().finish()
}
