use actix_web::{delete, get, web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::models::{BloodMarker, Session};
use crate::types::{DaysOldQuery, LimitQuery};
use crate::AppState;

#[get("/analytics/common-abnormal-markers")]
pub async fn common_abnormal_markers(
    state: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit.unwrap_or(10).clamp(1, 50);
    let markers = BloodMarker::common_abnormal(&state.pool, limit).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "common_abnormal_markers": markers,
    })))
}

#[delete("/cleanup/sessions")]
pub async fn cleanup_sessions(
    state: web::Data<AppState>,
    query: web::Query<DaysOldQuery>,
) -> Result<HttpResponse, ApiError> {
    let days_old = query.days_old.unwrap_or(30);
    if days_old < 1 {
        return Err(ApiError::validation("days_old must be at least 1"));
    }

    let deleted_count = Session::purge_older_than(&state.pool, days_old).await?;
    info!(deleted_count, days_old, "purged old sessions");

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": format!("Cleaned up {deleted_count} old sessions"),
        "deleted_count": deleted_count,
    })))
}
