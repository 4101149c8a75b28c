//! Staff row CRUD. Rows are returned in insertion order; the editorial
//! re-sort happens in the content pipeline, not here.

use anyhow::Result;

use super::{Database, TeamMemberRow};

impl Database {
    /// List all staff rows in insertion order.
    pub async fn get_team_members(&self) -> Result<Vec<TeamMemberRow>> {
        let rows = sqlx::query_as::<_, TeamMemberRow>(
            "SELECT id, name, role, image, bio, created_at
             FROM team_members ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a single staff row by id.
    pub async fn get_team_member(&self, id: i64) -> Result<Option<TeamMemberRow>> {
        let row = sqlx::query_as::<_, TeamMemberRow>(
            "SELECT id, name, role, image, bio, created_at
             FROM team_members WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a staff row and return it.
    pub async fn create_team_member(
        &self,
        name: &str,
        role: &str,
        image: Option<&str>,
        bio: Option<&str>,
    ) -> Result<TeamMemberRow> {
        let row = sqlx::query_as::<_, TeamMemberRow>(
            "INSERT INTO team_members (name, role, image, bio)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, role, image, bio, created_at",
        )
        .bind(name)
        .bind(role)
        .bind(image)
        .bind(bio)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a staff row. Returns false when no row has that id.
    pub async fn update_team_member(
        &self,
        id: i64,
        name: &str,
        role: &str,
        image: Option<&str>,
        bio: Option<&str>,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE team_members SET name = $2, role = $3, image = $4, bio = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(name)
        .bind(role)
        .bind(image)
        .bind(bio)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a staff row. Deletion is immediate and irreversible.
    pub async fn delete_team_member(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
