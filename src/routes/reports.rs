use actix_web::{get, put, web, HttpResponse};
use serde_json::json;

use crate::error::ApiError;
use crate::models::{Analysis, BloodMarker, Report, User};
use crate::types::{
    AnalysisDetail, AnalysisSummary, ReportDetail, ReportSearchQuery, ReportSummary, ReviewRequest,
};
use crate::AppState;

#[get("/report/{report_uuid}")]
pub async fn get_report(
    state: web::Data<AppState>,
    report_uuid: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let report = Report::get_by_uuid(&state.pool, &report_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Report not found"))?;

    let markers = BloodMarker::for_report(&state.pool, report.id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "report": ReportDetail::new(&report, &markers),
    })))
}

#[get("/report/{report_uuid}/analyses")]
pub async fn report_analyses(
    state: web::Data<AppState>,
    report_uuid: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let report = Report::get_by_uuid(&state.pool, &report_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Report not found"))?;

    let analyses = Analysis::for_report(&state.pool, report.id).await?;
    let analyses: Vec<AnalysisSummary> = analyses.iter().map(AnalysisSummary::from).collect();

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "report_uuid": report.report_uuid,
        "analyses": analyses,
    })))
}

#[get("/reports/search")]
pub async fn search_reports(
    state: web::Data<AppState>,
    query: web::Query<ReportSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_id = match &query.user_uuid {
        Some(user_uuid) => Some(
            User::get_by_uuid(&state.pool, user_uuid)
                .await?
                .ok_or_else(|| ApiError::not_found("User not found"))?
                .id,
        ),
        None => None,
    };

    let reports = Report::search(&state.pool, &query.query, user_id).await?;
    let reports: Vec<ReportSummary> = reports.iter().map(ReportSummary::from).collect();

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "reports": reports,
    })))
}

#[get("/analysis/{analysis_uuid}")]
pub async fn get_analysis(
    state: web::Data<AppState>,
    analysis_uuid: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let analysis = Analysis::get_by_uuid(&state.pool, &analysis_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Analysis not found"))?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "analysis": AnalysisDetail::from(&analysis),
    })))
}

#[put("/analysis/{analysis_uuid}/review")]
pub async fn review_analysis(
    state: web::Data<AppState>,
    analysis_uuid: web::Path<String>,
    body: web::Json<ReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    let analysis = Analysis::get_by_uuid(&state.pool, &analysis_uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Analysis not found"))?;

    let updated = Analysis::set_review(&state.pool, analysis.id, &body.reviewer_notes).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "analysis": AnalysisDetail::from(&updated),
    })))
}
