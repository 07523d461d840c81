use chrono::{Duration, Utc};
use sqlx::{query, SqlitePool};
use uuid::Uuid;

use super::ids::UserKey;

/// What a session row records. Write-once; rows are only ever removed by the
/// age-based purge.
#[derive(Debug, Clone, Copy)]
pub enum ActivityType {
    Upload,
    Analysis,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Upload => "upload",
            ActivityType::Analysis => "analysis",
        }
    }
}

pub struct Session;

impl Session {
    pub async fn record(
        pool: &SqlitePool,
        user_id: Option<UserKey>,
        activity_type: ActivityType,
        activity_details: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        query(
            r#"
            INSERT INTO user_sessions (session_uuid, user_id, activity_type, activity_details, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(activity_type.as_str())
        .bind(activity_details.to_string())
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete session rows older than `days_old` days, returning how many
    /// went away.
    pub async fn purge_older_than(pool: &SqlitePool, days_old: i64) -> Result<u64, sqlx::Error> {
        let cutoff = Utc::now() - Duration::days(days_old);
        let result = query("DELETE FROM user_sessions WHERE created_at < ?")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
