//! Internal storage keys. These wrap the SQLite rowids and deliberately do
//! not implement `Serialize`: external clients only ever see the entity
//! UUIDs, never row numbers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct UserKey(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct ReportKey(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct AnalysisKey(pub i64);
