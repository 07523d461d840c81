use chrono::{DateTime, Utc};
use sqlx::{query_as, FromRow, SqlitePool};
use uuid::Uuid;

use super::ids::{AnalysisKey, ReportKey, UserKey};
use crate::crew::AnalysisType;

#[derive(Debug, Clone, FromRow)]
pub struct Analysis {
    pub id: AnalysisKey,
    pub analysis_uuid: String,
    pub user_id: Option<UserKey>,
    pub report_id: ReportKey,
    pub query: String,
    pub analysis_type: AnalysisType,
    pub medical_summary: Option<String>,
    pub health_recommendations: Option<String>,
    pub nutrition_analysis: Option<String>,
    pub exercise_recommendations: Option<String>,
    pub supplement_suggestions: Option<String>,
    pub follow_up_tests: Option<String>,
    pub processing_time: Option<f64>,
    pub confidence_score: Option<f64>,
    pub reviewed_by_human: bool,
    pub reviewer_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewAnalysis<'a> {
    pub user_id: Option<UserKey>,
    pub report_id: ReportKey,
    pub query: &'a str,
    pub analysis_type: AnalysisType,
    pub medical_summary: Option<&'a str>,
    pub nutrition_analysis: Option<&'a str>,
    pub exercise_recommendations: Option<&'a str>,
    pub processing_time: Option<f64>,
}

impl<'a> NewAnalysis<'a> {
    /// Route the pipeline's free text into the result field the analysis type
    /// owns; the other fields stay empty.
    pub fn from_output(
        user_id: Option<UserKey>,
        report_id: ReportKey,
        query: &'a str,
        analysis_type: AnalysisType,
        output: &'a str,
        processing_time: f64,
    ) -> Self {
        let (medical_summary, nutrition_analysis, exercise_recommendations) = match analysis_type {
            AnalysisType::Nutrition => (None, Some(output), None),
            AnalysisType::Exercise => (None, None, Some(output)),
            AnalysisType::Comprehensive | AnalysisType::Medical | AnalysisType::Verification => {
                (Some(output), None, None)
            }
        };

        NewAnalysis {
            user_id,
            report_id,
            query,
            analysis_type,
            medical_summary,
            nutrition_analysis,
            exercise_recommendations,
            processing_time: Some(processing_time),
        }
    }
}

impl Analysis {
    pub async fn create(pool: &SqlitePool, new: NewAnalysis<'_>) -> Result<Self, sqlx::Error> {
        let now = Utc::now();
        let analysis_uuid = Uuid::new_v4().to_string();

        query_as::<_, Analysis>(
            r#"
            INSERT INTO analyses (
                analysis_uuid, user_id, report_id, query, analysis_type,
                medical_summary, nutrition_analysis, exercise_recommendations,
                processing_time, reviewed_by_human, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, FALSE, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&analysis_uuid)
        .bind(new.user_id)
        .bind(new.report_id)
        .bind(new.query)
        .bind(new.analysis_type)
        .bind(new.medical_summary)
        .bind(new.nutrition_analysis)
        .bind(new.exercise_recommendations)
        .bind(new.processing_time)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_uuid(
        pool: &SqlitePool,
        analysis_uuid: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        query_as::<_, Analysis>("SELECT * FROM analyses WHERE analysis_uuid = ?")
            .bind(analysis_uuid)
            .fetch_optional(pool)
            .await
    }

    pub async fn for_user(
        pool: &SqlitePool,
        user_id: UserKey,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        query_as::<_, Analysis>(
            "SELECT * FROM analyses WHERE user_id = ? ORDER BY created_at DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn for_report(
        pool: &SqlitePool,
        report_id: ReportKey,
    ) -> Result<Vec<Self>, sqlx::Error> {
        query_as::<_, Analysis>(
            "SELECT * FROM analyses WHERE report_id = ? ORDER BY created_at DESC",
        )
        .bind(report_id)
        .fetch_all(pool)
        .await
    }

    /// Human-review amendment: attach notes and mark the row reviewed.
    pub async fn set_review(
        pool: &SqlitePool,
        id: AnalysisKey,
        reviewer_notes: &str,
    ) -> Result<Self, sqlx::Error> {
        query_as::<_, Analysis>(
            r#"
            UPDATE analyses
            SET reviewed_by_human = TRUE, reviewer_notes = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(reviewer_notes)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(pool)
        .await
    }
}
