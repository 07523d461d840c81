use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

pub mod analytics;
pub mod analyze;
pub mod reports;
pub mod users;

#[get("/")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Blood Test Report Analyser API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy",
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(analyze::analyze)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::user_reports)
        .service(users::user_analyses)
        .service(users::user_statistics)
        .service(users::user_trends)
        .service(reports::get_report)
        .service(reports::report_analyses)
        .service(reports::search_reports)
        .service(reports::get_analysis)
        .service(reports::review_analysis)
        .service(analytics::common_abnormal_markers)
        .service(analytics::cleanup_sessions);
}
