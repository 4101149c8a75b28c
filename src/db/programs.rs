//! Study-abroad program row CRUD.
//!
//! The `description` column stores the `"<main>|<universities>"` delimited
//! value; joining happens in the admin write path, splitting in the content
//! pipeline. This module stores the column as-is.

use anyhow::Result;

use super::{Database, ProgramRow};

const PROGRAM_COLUMNS: &str =
    "id, program_name, country, description, image, link, created_at";

impl Database {
    /// List all program rows in insertion order.
    pub async fn get_programs(&self) -> Result<Vec<ProgramRow>> {
        let rows = sqlx::query_as::<_, ProgramRow>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM study_abroad_programs
             ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a single program row by id.
    pub async fn get_program(&self, id: i64) -> Result<Option<ProgramRow>> {
        let row = sqlx::query_as::<_, ProgramRow>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM study_abroad_programs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a program row and return it.
    pub async fn create_program(
        &self,
        program_name: Option<&str>,
        country: &str,
        description: &str,
        image: Option<&str>,
        link: Option<&str>,
    ) -> Result<ProgramRow> {
        let row = sqlx::query_as::<_, ProgramRow>(&format!(
            "INSERT INTO study_abroad_programs (program_name, country, description, image, link)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PROGRAM_COLUMNS}"
        ))
        .bind(program_name)
        .bind(country)
        .bind(description)
        .bind(image)
        .bind(link)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a program row. Returns false when no row has that id.
    pub async fn update_program(
        &self,
        id: i64,
        program_name: Option<&str>,
        country: &str,
        description: &str,
        image: Option<&str>,
        link: Option<&str>,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE study_abroad_programs
             SET program_name = $2, country = $3, description = $4, image = $5, link = $6
             WHERE id = $1",
        )
        .bind(id)
        .bind(program_name)
        .bind(country)
        .bind(description)
        .bind(image)
        .bind(link)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a program row.
    pub async fn delete_program(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM study_abroad_programs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
