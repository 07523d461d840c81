use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crew::AnalysisType;
use crate::models::Analysis;

/// Listing view of an analysis, as returned by `/user/{uuid}/analyses`.
#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    pub uuid: String,
    pub query: String,
    pub analysis_type: AnalysisType,
    pub created_at: DateTime<Utc>,
    pub processing_time: Option<f64>,
    pub medical_summary: Option<String>,
    pub nutrition_analysis: Option<String>,
    pub exercise_recommendations: Option<String>,
}

impl From<&Analysis> for AnalysisSummary {
    fn from(analysis: &Analysis) -> Self {
        AnalysisSummary {
            uuid: analysis.analysis_uuid.clone(),
            query: analysis.query.clone(),
            analysis_type: analysis.analysis_type,
            created_at: analysis.created_at,
            processing_time: analysis.processing_time,
            medical_summary: analysis.medical_summary.clone(),
            nutrition_analysis: analysis.nutrition_analysis.clone(),
            exercise_recommendations: analysis.exercise_recommendations.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalysisDetail {
    pub uuid: String,
    pub query: String,
    pub analysis_type: AnalysisType,
    pub created_at: DateTime<Utc>,
    pub processing_time: Option<f64>,
    pub medical_summary: Option<String>,
    pub nutrition_analysis: Option<String>,
    pub exercise_recommendations: Option<String>,
    pub health_recommendations: Option<String>,
    pub supplement_suggestions: Option<String>,
    pub follow_up_tests: Option<String>,
    pub reviewed_by_human: bool,
    pub reviewer_notes: Option<String>,
}

impl From<&Analysis> for AnalysisDetail {
    fn from(analysis: &Analysis) -> Self {
        AnalysisDetail {
            uuid: analysis.analysis_uuid.clone(),
            query: analysis.query.clone(),
            analysis_type: analysis.analysis_type,
            created_at: analysis.created_at,
            processing_time: analysis.processing_time,
            medical_summary: analysis.medical_summary.clone(),
            nutrition_analysis: analysis.nutrition_analysis.clone(),
            exercise_recommendations: analysis.exercise_recommendations.clone(),
            health_recommendations: analysis.health_recommendations.clone(),
            supplement_suggestions: analysis.supplement_suggestions.clone(),
            follow_up_tests: analysis.follow_up_tests.clone(),
            reviewed_by_human: analysis.reviewed_by_human,
            reviewer_notes: analysis.reviewer_notes.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub reviewer_notes: String,
}
