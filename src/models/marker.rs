use chrono::{DateTime, Utc};
use sqlx::{query, query_as, FromRow, SqlitePool};

use super::ids::{ReportKey, UserKey};
use crate::markers::ExtractedMarker;

#[derive(Debug, Clone, FromRow)]
pub struct BloodMarker {
    pub id: i64,
    pub report_id: ReportKey,
    pub marker_name: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub reference_range_min: Option<f64>,
    pub reference_range_max: Option<f64>,
    pub reference_range_text: Option<String>,
    pub is_normal: Option<bool>,
    pub flag: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One point of a marker's time-series across a user's reports.
#[derive(Debug, FromRow, serde::Serialize)]
pub struct TrendPoint {
    pub date: Option<DateTime<Utc>>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub is_normal: Option<bool>,
    pub reference_range_min: Option<f64>,
    pub reference_range_max: Option<f64>,
}

#[derive(Debug, FromRow, serde::Serialize)]
pub struct AbnormalMarkerCount {
    pub marker_name: String,
    pub abnormal_count: i64,
}

impl BloodMarker {
    /// Bulk insert of extracted markers. `is_normal` stays NULL: extraction
    /// consults no reference ranges.
    pub async fn insert_for_report(
        pool: &SqlitePool,
        report_id: ReportKey,
        markers: &[ExtractedMarker],
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now();
        for marker in markers {
            query(
                r#"
                INSERT INTO blood_markers (report_id, marker_name, value, unit, category, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(report_id)
            .bind(&marker.name)
            .bind(marker.value)
            .bind(&marker.unit)
            .bind(&marker.category)
            .bind(now)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    pub async fn for_report(
        pool: &SqlitePool,
        report_id: ReportKey,
    ) -> Result<Vec<Self>, sqlx::Error> {
        query_as::<_, BloodMarker>("SELECT * FROM blood_markers WHERE report_id = ?")
            .bind(report_id)
            .fetch_all(pool)
            .await
    }

    pub async fn abnormal_for_report(
        pool: &SqlitePool,
        report_id: ReportKey,
    ) -> Result<Vec<Self>, sqlx::Error> {
        query_as::<_, BloodMarker>(
            "SELECT * FROM blood_markers WHERE report_id = ? AND is_normal = 0",
        )
        .bind(report_id)
        .fetch_all(pool)
        .await
    }

    /// A named marker's values across all of a user's reports, ordered by
    /// report date. report_date is not populated by the upload flow, so the
    /// ordering is effectively undefined in practice; kept as-is rather than
    /// invented around.
    pub async fn trend_for_user(
        pool: &SqlitePool,
        user_id: UserKey,
        marker_name: &str,
    ) -> Result<Vec<TrendPoint>, sqlx::Error> {
        query_as::<_, TrendPoint>(
            r#"
            SELECT r.report_date AS date, m.value, m.unit, m.is_normal,
                   m.reference_range_min, m.reference_range_max
            FROM blood_markers m
            JOIN reports r ON m.report_id = r.id
            WHERE r.user_id = ? AND m.marker_name = ?
            ORDER BY r.report_date
            "#,
        )
        .bind(user_id)
        .bind(marker_name)
        .fetch_all(pool)
        .await
    }

    /// Most commonly abnormal markers across all users, descending.
    pub async fn common_abnormal(
        pool: &SqlitePool,
        limit: i64,
    ) -> Result<Vec<AbnormalMarkerCount>, sqlx::Error> {
        query_as::<_, AbnormalMarkerCount>(
            r#"
            SELECT marker_name, COUNT(id) AS abnormal_count
            FROM blood_markers
            WHERE is_normal = 0
            GROUP BY marker_name
            ORDER BY abnormal_count DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
