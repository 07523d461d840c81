use chrono::{DateTime, Utc};
use sqlx::{query, query_as, FromRow, SqlitePool};
use uuid::Uuid;

use super::ids::{ReportKey, UserKey};

#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: ReportKey,
    pub report_uuid: String,
    pub user_id: Option<UserKey>,
    pub original_filename: String,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    pub report_date: Option<DateTime<Utc>>,
    pub lab_name: Option<String>,
    pub doctor_name: Option<String>,
    pub test_type: Option<String>,
    pub raw_content: Option<String>,
    pub is_verified: bool,
    pub verification_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewReport<'a> {
    pub user_id: Option<UserKey>,
    pub original_filename: &'a str,
    pub file_path: &'a str,
    pub file_size: i64,
    pub raw_content: &'a str,
}

impl Report {
    pub async fn create(pool: &SqlitePool, new: NewReport<'_>) -> Result<Self, sqlx::Error> {
        let now = Utc::now();
        let report_uuid = Uuid::new_v4().to_string();

        query_as::<_, Report>(
            r#"
            INSERT INTO reports (
                report_uuid, user_id, original_filename, file_path, file_size,
                raw_content, is_verified, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, FALSE, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&report_uuid)
        .bind(new.user_id)
        .bind(new.original_filename)
        .bind(new.file_path)
        .bind(new.file_size)
        .bind(new.raw_content)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn get_by_uuid(
        pool: &SqlitePool,
        report_uuid: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        query_as::<_, Report>("SELECT * FROM reports WHERE report_uuid = ?")
            .bind(report_uuid)
            .fetch_optional(pool)
            .await
    }

    pub async fn for_user(
        pool: &SqlitePool,
        user_id: UserKey,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        query_as::<_, Report>(
            "SELECT * FROM reports WHERE user_id = ? ORDER BY created_at DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Record the verification gate's outcome, whichever way it went.
    pub async fn update_verification(
        pool: &SqlitePool,
        id: ReportKey,
        is_verified: bool,
        notes: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        query("UPDATE reports SET is_verified = ?, verification_notes = ?, updated_at = ? WHERE id = ?")
            .bind(is_verified)
            .bind(notes)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Substring search over lab/doctor/test-type metadata, optionally scoped
    /// to one user.
    pub async fn search(
        pool: &SqlitePool,
        term: &str,
        user_id: Option<UserKey>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let pattern = format!("%{}%", term);
        match user_id {
            Some(user_id) => {
                query_as::<_, Report>(
                    r#"
                    SELECT * FROM reports
                    WHERE user_id = ?
                      AND (lab_name LIKE ? OR doctor_name LIKE ? OR test_type LIKE ?)
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(user_id)
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(pool)
                .await
            }
            None => {
                query_as::<_, Report>(
                    r#"
                    SELECT * FROM reports
                    WHERE lab_name LIKE ? OR doctor_name LIKE ? OR test_type LIKE ?
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(pool)
                .await
            }
        }
    }
}
