//! Course row CRUD.
//!
//! Writes persist both representations: the explicit duration/level columns
//! (authoritative) and the legacy encoded `description` (read-compatibility
//! for pre-migration consumers). The encoding itself lives in
//! `content::courses`; this module only stores what it is given.

use anyhow::Result;

use super::{CourseRow, Database};

const COURSE_COLUMNS: &str =
    "id, title, description, duration, levelitem1, levelitem2, image, category, link, created_at";

/// Column values for a course insert or update.
pub struct CourseWrite<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub duration: &'a str,
    pub levelitem1: &'a str,
    pub levelitem2: &'a str,
    pub image: Option<&'a str>,
    pub category: &'a str,
    pub link: &'a str,
}

impl Database {
    /// List all course rows in insertion order.
    pub async fn get_courses(&self) -> Result<Vec<CourseRow>> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a single course row by id.
    pub async fn get_course(&self, id: i64) -> Result<Option<CourseRow>> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert a course row and return it.
    pub async fn create_course(&self, write: &CourseWrite<'_>) -> Result<CourseRow> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            "INSERT INTO courses
                 (title, description, duration, levelitem1, levelitem2, image, category, link)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(write.title)
        .bind(write.description)
        .bind(write.duration)
        .bind(write.levelitem1)
        .bind(write.levelitem2)
        .bind(write.image)
        .bind(write.category)
        .bind(write.link)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a course row. Returns false when no row has that id.
    pub async fn update_course(&self, id: i64, write: &CourseWrite<'_>) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE courses
             SET title = $2, description = $3, duration = $4, levelitem1 = $5,
                 levelitem2 = $6, image = $7, category = $8, link = $9
             WHERE id = $1",
        )
        .bind(id)
        .bind(write.title)
        .bind(write.description)
        .bind(write.duration)
        .bind(write.levelitem1)
        .bind(write.levelitem2)
        .bind(write.image)
        .bind(write.category)
        .bind(write.link)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a course row.
    pub async fn delete_course(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
