//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// Returns the test database URL from the `TEST_DATABASE_URL` environment variable.
/// Panics if the variable is not set.
pub fn test_db_url() -> String {
    std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set for integration tests")
}

/// Returns true if the test database URL is configured.
pub fn has_test_db() -> bool {
    std::env::var("TEST_DATABASE_URL").is_ok()
}

/// One-time schema initialization.
static SCHEMA_INIT: Once = Once::new();

/// Ensure the test database schema is set up (runs migrations once per test suite).
pub fn ensure_schema() {
    SCHEMA_INIT.call_once(|| {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let pool = sqlx::PgPool::connect(&test_db_url()).await.unwrap();
            run_migrations(&pool).await;
        });
    });
}

/// Connect to the test database (also ensures schema is set up).
pub async fn setup_test_db() -> edusite::db::Database {
    ensure_schema();
    let db = edusite::db::Database::connect(&test_db_url())
        .await
        .expect("Failed to connect to test database");
    truncate_all_tables(db.pool()).await;
    db
}

/// Build an Axum test app router connected to the test database.
pub async fn build_test_app() -> axum::Router {
    let db = setup_test_db().await;
    let config = edusite::config::Config::with_database_url(&test_db_url());
    let state = edusite::server::AppState::with_db(db, config);
    edusite::server::build_router(state, None)
}

/// An admin bearer token accepted by the development-mode JWT decode
/// (no `jwt_secret` configured, so the signature is not checked).
pub fn admin_token() -> String {
    let claims = serde_json::json!({
        "sub": "11111111-2222-4333-8444-555555555555",
        "aud": "authenticated",
        "role": "authenticated",
        "app_metadata": {"role": "admin"},
        "exp": 4_102_444_800i64,
    });
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"unchecked"),
    )
    .unwrap()
}

/// A non-admin bearer token, for authorization tests.
pub fn visitor_token() -> String {
    let claims = serde_json::json!({
        "sub": "99999999-2222-4333-8444-555555555555",
        "aud": "authenticated",
        "role": "authenticated",
        "app_metadata": {},
        "exp": 4_102_444_800i64,
    });
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"unchecked"),
    )
    .unwrap()
}

/// Truncate all content tables to ensure test isolation.
pub async fn truncate_all_tables(pool: &sqlx::PgPool) {
    sqlx::raw_sql(
        "TRUNCATE TABLE social_links, contact_info, history,
                       study_abroad_programs, courses, team_members
         RESTART IDENTITY CASCADE",
    )
    .execute(pool)
    .await
    .unwrap();
}

/// Run all migrations against the test database, skipping Supabase-specific commands.
async fn run_migrations(pool: &sqlx::PgPool) {
    let migration_files = [
        "supabase/migrations/001_create_content_tables.sql",
        "supabase/migrations/002_contact_info.sql",
    ];

    for file in &migration_files {
        let path = std::path::Path::new(file);
        if !path.exists() {
            panic!("Migration file not found: {}", file);
        }
        let sql = std::fs::read_to_string(path).unwrap();
        let cleaned = clean_migration_sql(&sql);
        if !cleaned.trim().is_empty() {
            sqlx::raw_sql(&cleaned).execute(pool).await.unwrap_or_else(|e| {
                panic!("Migration {} failed: {}", file, e);
            });
        }
    }
}

/// Remove Supabase-specific SQL (RLS and policies).
fn clean_migration_sql(sql: &str) -> String {
    sql.lines()
        .filter(|line| {
            let t = line.trim();
            !t.starts_with("ALTER PUBLICATION")
                && !t.contains("ENABLE ROW LEVEL SECURITY")
                && !t.starts_with("CREATE POLICY")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
