//! Query-layer tests against an in-memory SQLite database.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use bloodwork::markers::ExtractedMarker;
use bloodwork::models::{BloodMarker, NewReport, Report, User};
use bloodwork::MIGRATOR;

async fn test_pool() -> SqlitePool {
    let options = "sqlite::memory:"
        .parse::<SqliteConnectOptions>()
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");
    MIGRATOR.run(&pool).await.expect("failed to run migrations");
    pool
}

async fn seed_report(pool: &SqlitePool, user: &User, filename: &str) -> Report {
    Report::create(
        pool,
        NewReport {
            user_id: Some(user.id),
            original_filename: filename,
            file_path: "data/blood_test_report_test.pdf",
            file_size: 1024,
            raw_content: "Hemoglobin 13.5 g/dL",
        },
    )
    .await
    .expect("failed to create report")
}

fn marker(name: &str, value: f64, unit: &str) -> ExtractedMarker {
    ExtractedMarker {
        name: name.to_string(),
        value,
        unit: Some(unit.to_string()),
        category: "General".to_string(),
    }
}

#[actix_web::test]
async fn markers_insert_and_fetch_leaves_is_normal_unset() {
    let pool = test_pool().await;
    let user = User::create_anonymous(&pool).await.unwrap();
    let report = seed_report(&pool, &user, "report.pdf").await;

    BloodMarker::insert_for_report(
        &pool,
        report.id,
        &[marker("Hemoglobin", 13.5, "g/dL"), marker("Glucose", 90.0, "mg/dL")],
    )
    .await
    .unwrap();

    let stored = BloodMarker::for_report(&pool, report.id).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|m| m.is_normal.is_none()));
    assert!(stored.iter().all(|m| m.report_id == report.id));
}

#[actix_web::test]
async fn abnormal_filter_returns_only_flagged_markers() {
    let pool = test_pool().await;
    let user = User::create_anonymous(&pool).await.unwrap();
    let report = seed_report(&pool, &user, "report.pdf").await;

    BloodMarker::insert_for_report(
        &pool,
        report.id,
        &[
            marker("Hemoglobin", 9.1, "g/dL"),
            marker("Glucose", 90.0, "mg/dL"),
            marker("Cholesterol", 260.0, "mg/dL"),
        ],
    )
    .await
    .unwrap();

    // Extraction leaves is_normal unset; a later review marks two markers
    // abnormal and one normal.
    sqlx::query("UPDATE blood_markers SET is_normal = 0 WHERE marker_name IN ('Hemoglobin', 'Cholesterol')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE blood_markers SET is_normal = 1 WHERE marker_name = 'Glucose'")
        .execute(&pool)
        .await
        .unwrap();

    let abnormal = BloodMarker::abnormal_for_report(&pool, report.id).await.unwrap();
    let mut names: Vec<&str> = abnormal.iter().map(|m| m.marker_name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Cholesterol", "Hemoglobin"]);
}

#[actix_web::test]
async fn trend_spans_all_reports_for_one_user() {
    let pool = test_pool().await;
    let user = User::create_anonymous(&pool).await.unwrap();
    let other = User::create_anonymous(&pool).await.unwrap();

    let first = seed_report(&pool, &user, "jan.pdf").await;
    let second = seed_report(&pool, &user, "jun.pdf").await;
    let unrelated = seed_report(&pool, &other, "other.pdf").await;

    BloodMarker::insert_for_report(&pool, first.id, &[marker("Glucose", 88.0, "mg/dL")])
        .await
        .unwrap();
    BloodMarker::insert_for_report(&pool, second.id, &[marker("Glucose", 101.0, "mg/dL")])
        .await
        .unwrap();
    BloodMarker::insert_for_report(&pool, unrelated.id, &[marker("Glucose", 140.0, "mg/dL")])
        .await
        .unwrap();

    let trend = BloodMarker::trend_for_user(&pool, user.id, "Glucose").await.unwrap();
    assert_eq!(trend.len(), 2);
    let values: Vec<f64> = trend.iter().filter_map(|p| p.value).collect();
    assert!(values.contains(&88.0));
    assert!(values.contains(&101.0));
    assert!(!values.contains(&140.0));
}

#[actix_web::test]
async fn report_search_matches_metadata_and_respects_user_scope() {
    let pool = test_pool().await;
    let user = User::create_anonymous(&pool).await.unwrap();
    let other = User::create_anonymous(&pool).await.unwrap();

    let mine = seed_report(&pool, &user, "mine.pdf").await;
    let theirs = seed_report(&pool, &other, "theirs.pdf").await;

    sqlx::query("UPDATE reports SET lab_name = 'Acme Diagnostics' WHERE id = ?")
        .bind(mine.id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE reports SET doctor_name = 'Dr. Acme' WHERE id = ?")
        .bind(theirs.id)
        .execute(&pool)
        .await
        .unwrap();

    let all = Report::search(&pool, "acme", None).await.unwrap();
    assert_eq!(all.len(), 2);

    let scoped = Report::search(&pool, "acme", Some(user.id)).await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].report_uuid, mine.report_uuid);

    let none = Report::search(&pool, "nonexistent-lab", None).await.unwrap();
    assert!(none.is_empty());
}

#[actix_web::test]
async fn deleting_a_report_cascades_to_its_markers() {
    let pool = test_pool().await;
    let user = User::create_anonymous(&pool).await.unwrap();
    let report = seed_report(&pool, &user, "report.pdf").await;

    BloodMarker::insert_for_report(&pool, report.id, &[marker("ALT", 30.0, "U/L")])
        .await
        .unwrap();

    sqlx::query("DELETE FROM reports WHERE id = ?")
        .bind(report.id)
        .execute(&pool)
        .await
        .unwrap();

    let orphans = BloodMarker::for_report(&pool, report.id).await.unwrap();
    assert!(orphans.is_empty());
}

#[actix_web::test]
async fn verification_outcome_is_recorded_on_the_report() {
    let pool = test_pool().await;
    let user = User::create_anonymous(&pool).await.unwrap();
    let report = seed_report(&pool, &user, "report.pdf").await;
    assert!(!report.is_verified);

    Report::update_verification(&pool, report.id, true, Some("VERIFIED: standard panel"))
        .await
        .unwrap();

    let stored = Report::get_by_uuid(&pool, &report.report_uuid)
        .await
        .unwrap()
        .expect("report should exist");
    assert!(stored.is_verified);
    assert_eq!(
        stored.verification_notes.as_deref(),
        Some("VERIFIED: standard panel")
    );
}
