//! Timeline row operations.
//!
//! The history table is the one entity that may legitimately not exist yet
//! (the admin UI offers setup instructions for a fresh Supabase project), so
//! callers of the admin listing distinguish `42P01` from an empty result via
//! `super::is_undefined_table`.

use anyhow::Result;

use super::{Database, HistoryRow};

impl Database {
    /// Timeline rows for the public page: year ascending, insertion tiebreak.
    pub async fn get_history_public(&self) -> Result<Vec<HistoryRow>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            "SELECT id, year, event, created_at
             FROM history ORDER BY year ASC, created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Timeline rows for the admin panel: newest year first.
    pub async fn get_history_admin(&self) -> Result<Vec<HistoryRow>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            "SELECT id, year, event, created_at
             FROM history ORDER BY year DESC, created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a timeline row and return it. Year and length bounds are
    /// enforced by the table's CHECK constraints.
    pub async fn create_history_item(&self, year: i32, event: &str) -> Result<HistoryRow> {
        let row = sqlx::query_as::<_, HistoryRow>(
            "INSERT INTO history (year, event) VALUES ($1, $2)
             RETURNING id, year, event, created_at",
        )
        .bind(year)
        .bind(event)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a timeline row. Returns false when no row has that id.
    pub async fn update_history_item(&self, id: i64, year: i32, event: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE history SET year = $2, event = $3 WHERE id = $1")
            .bind(id)
            .bind(year)
            .bind(event)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a timeline row.
    pub async fn delete_history_item(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM history WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
