use serde::Deserialize;

/// Create/update body for a user. Everything is optional; an empty object is
/// a valid (anonymous-ish) user.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserPayload {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_conditions: Option<String>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DaysOldQuery {
    pub days_old: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReportSearchQuery {
    pub query: String,
    pub user_uuid: Option<String>,
}
