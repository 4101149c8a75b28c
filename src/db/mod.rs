//! # Database — Supabase PostgreSQL Storage Adapter
//!
//! Async row read/write per content table via `sqlx::PgPool` connecting to
//! Supabase PostgreSQL. The application holds no authoritative state of its
//! own: every operation is a single stateless round trip against these
//! tables, and the content transformers consume the row types returned here.
//!
//! ## Schema
//!
//! - `team_members`: name, role, image, bio
//! - `courses`: title, legacy description plus explicit duration/level columns
//! - `study_abroad_programs`: country, delimited description, image, link
//! - `history`: year, event
//! - `contact_info` / `social_links`: singleton contact record with
//!   per-platform-unique links
//!
//! ## Module Structure
//!
//! - [`team`] — staff row CRUD
//! - [`courses`] — course row CRUD
//! - [`programs`] — study-abroad row CRUD
//! - [`history`] — timeline rows, with the table-missing distinction
//! - [`contact`] — get-or-create singleton and social links
//!
//! ## Error Classification
//!
//! Callers distinguish store failure modes by Postgres error code:
//! [`is_constraint_violation`] for rejected writes (surfaced as 400 with the
//! store's message passed through) and [`is_undefined_table`] for the history
//! "needs setup" state.

mod contact;
mod courses;
mod history;
mod programs;
mod team;

pub use courses::CourseWrite;

use anyhow::Result;
use serde::Serialize;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

// ── Row types ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TeamMemberRow {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CourseRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub levelitem1: Option<String>,
    pub levelitem2: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub link: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ProgramRow {
    pub id: i64,
    pub program_name: Option<String>,
    pub country: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct HistoryRow {
    pub id: i64,
    pub year: i32,
    pub event: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ContactInfoRow {
    pub id: i64,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SocialLinkRow {
    pub id: i64,
    pub contact_info_id: i64,
    pub platform: String,
    pub url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// ── Error classification ────────────────────────────────────────

/// Postgres class 23 (integrity constraint) plus 22001 (value too long).
pub fn is_constraint_violation(err: &anyhow::Error) -> bool {
    db_error_code(err).is_some_and(|code| code.starts_with("23") || code == "22001")
}

/// Postgres 23505, a duplicate key on a unique index.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    db_error_code(err).is_some_and(|code| code == "23505")
}

/// Postgres 42P01, the queried table does not exist. Only the history
/// endpoints care: the admin UI turns this into a "needs setup" state.
pub fn is_undefined_table(err: &anyhow::Error) -> bool {
    db_error_code(err).is_some_and(|code| code == "42P01")
}

/// The store's own message for a rejected write, passed through verbatim.
pub fn store_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => db_err.message().to_string(),
        _ => err.to_string(),
    }
}

fn db_error_code(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

// ── Database struct and connection ──────────────────────────────

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL using the provided database URL.
    ///
    /// Manually parses the URL to preserve the full username — sqlx's built-in
    /// parser strips the ".project-ref" suffix that the Supabase pooler
    /// requires. Statement caching is disabled for the same reason: pooled
    /// connections are shared across clients.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let url = url::Url::parse(database_url)?;
        let username = urlencoding::decode(url.username())?.into_owned();
        let password = url
            .password()
            .map(|p| urlencoding::decode(p).map(|s| s.into_owned()))
            .transpose()?;
        let mut opts = PgConnectOptions::new()
            .host(url.host_str().unwrap_or("localhost"))
            .port(url.port().unwrap_or(5432))
            .database(url.path().trim_start_matches('/'))
            .username(&username)
            .statement_cache_capacity(0);
        if let Some(ref pw) = password {
            opts = opts.password(pw);
        }
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;
        Ok(Database { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Health check: execute `SELECT 1` to verify store connectivity.
    ///
    /// Backs the `/readyz` readiness probe.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
