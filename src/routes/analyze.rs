use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{post, web, HttpResponse};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::crew::{self, AnalysisType, VALID_ANALYSIS_TYPES, VERIFICATION_QUERY};
use crate::error::ApiError;
use crate::extract;
use crate::markers;
use crate::models::{ActivityType, Analysis, BloodMarker, NewAnalysis, NewReport, Report, Session, User};
use crate::types::{AnalyzeResponse, VerificationRejectedResponse};
use crate::AppState;

const DEFAULT_QUERY: &str = "Provide a comprehensive analysis of my blood test report";

#[derive(Debug, MultipartForm)]
pub struct AnalyzeForm {
    #[multipart(limit = "20MB")]
    pub file: TempFile,
    pub query: Option<Text<String>>,
    pub analysis_type: Option<Text<String>>,
    pub user_uuid: Option<Text<String>>,
}

/// Removes the uploaded blob when the request is done with it, on every exit
/// path. The report row persists; the file does not.
struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    fn new(path: PathBuf) -> Self {
        TempUpload { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), "failed to remove uploaded file: {e}");
            }
        }
    }
}

#[post("/analyze")]
pub async fn analyze(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<AnalyzeForm>,
) -> Result<HttpResponse, ApiError> {
    let filename = form
        .file
        .file_name
        .clone()
        .unwrap_or_default();
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(ApiError::validation("Only PDF files are supported"));
    }

    let analysis_type_raw = form
        .analysis_type
        .as_deref()
        .map(String::as_str)
        .unwrap_or("comprehensive");
    let analysis_type = AnalysisType::parse(analysis_type_raw).ok_or_else(|| {
        ApiError::validation(format!(
            "Invalid analysis type. Must be one of: {}",
            VALID_ANALYSIS_TYPES.join(", ")
        ))
    })?;

    let query = match form.query.as_deref() {
        Some(q) if !q.trim().is_empty() => q.trim().to_string(),
        _ => DEFAULT_QUERY.to_string(),
    };

    let file_size = form.file.size as i64;

    // Stash the upload under a unique name for the duration of the request.
    fs::create_dir_all(&state.config.upload_dir)
        .map_err(|e| ApiError::Internal(e.into()))?;
    let dest = state
        .config
        .upload_dir
        .join(format!("blood_test_report_{}.pdf", Uuid::new_v4()));
    fs::copy(form.file.file.path(), &dest).map_err(|e| ApiError::Internal(e.into()))?;
    let upload = TempUpload::new(dest);

    info!(%filename, analysis_type = analysis_type.as_str(), "analyzing blood report");

    let user = match form.user_uuid.as_deref() {
        Some(uuid) => match User::get_by_uuid(&state.pool, uuid).await? {
            Some(user) => user,
            None => User::create_anonymous(&state.pool).await?,
        },
        None => User::create_anonymous(&state.pool).await?,
    };

    // Raw text is in hand before any marker extraction or analysis runs.
    let raw_content = extract::extract_text(upload.path())?;

    let file_path = upload.path().display().to_string();
    let report = Report::create(
        &state.pool,
        NewReport {
            user_id: Some(user.id),
            original_filename: &filename,
            file_path: &file_path,
            file_size,
            raw_content: &raw_content,
        },
    )
    .await?;

    // Best-effort enrichment: marker problems never fail the request.
    let extracted = markers::extract_markers(&raw_content);
    if !extracted.is_empty() {
        if let Err(e) = BloodMarker::insert_for_report(&state.pool, report.id, &extracted).await {
            warn!("Could not extract blood markers: {e}");
        }
    }

    Session::record(
        &state.pool,
        Some(user.id),
        ActivityType::Upload,
        &json!({
            "filename": filename,
            "file_size": file_size,
            "report_uuid": report.report_uuid,
        }),
    )
    .await?;

    let mut verification_passed = false;
    if analysis_type != AnalysisType::Verification {
        match state
            .pipeline
            .run(VERIFICATION_QUERY, upload.path(), AnalysisType::Verification)
            .await
        {
            Ok(verification_result) => {
                let verified = crew::is_verified(&verification_result);
                Report::update_verification(
                    &state.pool,
                    report.id,
                    verified,
                    Some(&verification_result),
                )
                .await?;

                if !verified {
                    return Ok(HttpResponse::Ok().json(VerificationRejectedResponse {
                        status: "error",
                        message: "Document verification failed",
                        verification_result,
                        user_uuid: user.user_uuid,
                        report_uuid: report.report_uuid,
                    }));
                }
                verification_passed = true;
            }
            // Advisory only when the gate itself breaks: proceed unverified.
            Err(e) => warn!("Verification failed: {e}"),
        }
    }

    let started = Instant::now();
    let analysis_output = state
        .pipeline
        .run(&query, upload.path(), analysis_type)
        .await
        .map_err(|e| ApiError::Pipeline(e.to_string()))?;
    let processing_time = started.elapsed().as_secs_f64();

    let analysis = Analysis::create(
        &state.pool,
        NewAnalysis::from_output(
            Some(user.id),
            report.id,
            &query,
            analysis_type,
            &analysis_output,
            processing_time,
        ),
    )
    .await?;

    Session::record(
        &state.pool,
        Some(user.id),
        ActivityType::Analysis,
        &json!({
            "analysis_type": analysis_type.as_str(),
            "query": query,
            "filename": filename,
        }),
    )
    .await?;

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        status: "success",
        message: "Blood test report analyzed successfully",
        query,
        analysis_type,
        analysis: analysis_output,
        file_processed: filename,
        processing_time_seconds: processing_time,
        user_uuid: user.user_uuid,
        report_uuid: report.report_uuid,
        analysis_uuid: analysis.analysis_uuid,
        verification_passed,
    }))
}
