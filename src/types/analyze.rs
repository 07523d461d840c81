use serde::Serialize;

use crate::crew::AnalysisType;

/// Body of a successful `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub query: String,
    pub analysis_type: AnalysisType,
    pub analysis: String,
    pub file_processed: String,
    pub processing_time_seconds: f64,
    pub user_uuid: String,
    pub report_uuid: String,
    pub analysis_uuid: String,
    pub verification_passed: bool,
}

/// Body returned when the verification gate explicitly rejects the document.
/// Delivered with HTTP 200: rejection is an outcome, not a transport error.
#[derive(Debug, Serialize)]
pub struct VerificationRejectedResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub verification_result: String,
    pub user_uuid: String,
    pub report_uuid: String,
}
