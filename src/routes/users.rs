use actix_web::{get, post, put, web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::models::{Analysis, BloodMarker, Report, User};
use crate::types::{AnalysisSummary, LimitQuery, ReportSummary, UserPayload};
use crate::AppState;

async fn require_user(state: &AppState, user_uuid: &str) -> Result<User, ApiError> {
    User::get_by_uuid(&state.pool, user_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

#[post("/user/create")]
pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<UserPayload>,
) -> Result<HttpResponse, ApiError> {
    let user = User::create(&state.pool, &payload).await?;
    info!(user_uuid = %user.user_uuid, "user created");

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "User created successfully",
        "user_uuid": user.user_uuid,
    })))
}

#[put("/user/{user_uuid}")]
pub async fn update_user(
    state: web::Data<AppState>,
    user_uuid: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, &user_uuid).await?;
    let updated = User::update(&state.pool, user.id, &payload).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "User updated successfully",
        "user_uuid": updated.user_uuid,
    })))
}

#[get("/user/{user_uuid}/reports")]
pub async fn user_reports(
    state: web::Data<AppState>,
    user_uuid: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, &user_uuid).await?;
    let limit = query.limit.unwrap_or(10).clamp(1, 50);

    let reports = Report::for_user(&state.pool, user.id, limit).await?;
    let reports: Vec<ReportSummary> = reports.iter().map(ReportSummary::from).collect();

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "user_uuid": user.user_uuid,
        "reports": reports,
    })))
}

#[get("/user/{user_uuid}/analyses")]
pub async fn user_analyses(
    state: web::Data<AppState>,
    user_uuid: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, &user_uuid).await?;
    let limit = query.limit.unwrap_or(10).clamp(1, 50);

    let analyses = Analysis::for_user(&state.pool, user.id, limit).await?;
    let analyses: Vec<AnalysisSummary> = analyses.iter().map(AnalysisSummary::from).collect();

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "user_uuid": user.user_uuid,
        "analyses": analyses,
    })))
}

#[get("/user/{user_uuid}/statistics")]
pub async fn user_statistics(
    state: web::Data<AppState>,
    user_uuid: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, &user_uuid).await?;
    let statistics = User::statistics(&state.pool, user.id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "user_uuid": user.user_uuid,
        "statistics": statistics,
    })))
}

#[get("/user/{user_uuid}/trends/{marker_name}")]
pub async fn user_trends(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (user_uuid, marker_name) = path.into_inner();
    let user = require_user(&state, &user_uuid).await?;

    let trends = BloodMarker::trend_for_user(&state.pool, user.id, &marker_name).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "user_uuid": user.user_uuid,
        "marker_name": marker_name,
        "trends": trends,
    })))
}
