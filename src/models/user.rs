use chrono::{DateTime, Utc};
use sqlx::{query_as, query_scalar, FromRow, SqlitePool};
use uuid::Uuid;

use super::ids::UserKey;
use crate::types::UserPayload;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserKey,
    pub user_uuid: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_conditions: Option<String>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-user summary counts. The abnormal-marker count looks only at the most
/// recent report.
#[derive(Debug, serde::Serialize)]
pub struct UserStatistics {
    pub total_reports: i64,
    pub total_analyses: i64,
    pub recent_report_date: Option<DateTime<Utc>>,
    pub abnormal_markers_in_recent_report: i64,
}

impl User {
    pub async fn create(pool: &SqlitePool, payload: &UserPayload) -> Result<Self, sqlx::Error> {
        let now = Utc::now();
        let user_uuid = Uuid::new_v4().to_string();

        query_as::<_, User>(
            r#"
            INSERT INTO users (
                user_uuid, email, full_name, age, gender, phone, emergency_contact,
                medical_conditions, medications, allergies, is_active, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&user_uuid)
        .bind(&payload.email)
        .bind(&payload.full_name)
        .bind(payload.age)
        .bind(&payload.gender)
        .bind(&payload.phone)
        .bind(&payload.emergency_contact)
        .bind(&payload.medical_conditions)
        .bind(&payload.medications)
        .bind(&payload.allergies)
        .bind(payload.is_active.unwrap_or(true))
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    /// Identity anchor for uploads that arrive without a user uuid.
    pub async fn create_anonymous(pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        let payload = UserPayload {
            full_name: Some("Anonymous User".to_string()),
            is_active: Some(true),
            ..UserPayload::default()
        };
        Self::create(pool, &payload).await
    }

    pub async fn get_by_uuid(
        pool: &SqlitePool,
        user_uuid: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE user_uuid = ?")
            .bind(user_uuid)
            .fetch_optional(pool)
            .await
    }

    /// Partial update: absent fields keep their stored values.
    pub async fn update(
        pool: &SqlitePool,
        id: UserKey,
        payload: &UserPayload,
    ) -> Result<Self, sqlx::Error> {
        query_as::<_, User>(
            r#"
            UPDATE users SET
                email = COALESCE(?, email),
                full_name = COALESCE(?, full_name),
                age = COALESCE(?, age),
                gender = COALESCE(?, gender),
                phone = COALESCE(?, phone),
                emergency_contact = COALESCE(?, emergency_contact),
                medical_conditions = COALESCE(?, medical_conditions),
                medications = COALESCE(?, medications),
                allergies = COALESCE(?, allergies),
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&payload.email)
        .bind(&payload.full_name)
        .bind(payload.age)
        .bind(&payload.gender)
        .bind(&payload.phone)
        .bind(&payload.emergency_contact)
        .bind(&payload.medical_conditions)
        .bind(&payload.medications)
        .bind(&payload.allergies)
        .bind(payload.is_active)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn statistics(pool: &SqlitePool, id: UserKey) -> Result<UserStatistics, sqlx::Error> {
        let total_reports: i64 =
            query_scalar("SELECT COUNT(*) FROM reports WHERE user_id = ?")
                .bind(id)
                .fetch_one(pool)
                .await?;

        let total_analyses: i64 =
            query_scalar("SELECT COUNT(*) FROM analyses WHERE user_id = ?")
                .bind(id)
                .fetch_one(pool)
                .await?;

        let recent: Option<(i64, DateTime<Utc>)> = query_as(
            "SELECT id, created_at FROM reports WHERE user_id = ? ORDER BY created_at DESC LIMIT 1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        let (recent_report_date, abnormal_markers_in_recent_report) = match recent {
            Some((report_id, created_at)) => {
                let abnormal: i64 = query_scalar(
                    "SELECT COUNT(*) FROM blood_markers WHERE report_id = ? AND is_normal = 0",
                )
                .bind(report_id)
                .fetch_one(pool)
                .await?;
                (Some(created_at), abnormal)
            }
            None => (None, 0),
        };

        Ok(UserStatistics {
            total_reports,
            total_analyses,
            recent_report_date,
            abnormal_markers_in_recent_report,
        })
    }
}
