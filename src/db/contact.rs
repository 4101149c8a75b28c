//! Contact singleton and social links.
//!
//! Exactly one `contact_info` row should exist; reads go through
//! `get_or_create_contact_info` rather than a hard uniqueness constraint.
//! Social links are unique per platform under that row — a duplicate insert
//! surfaces the store's 23505 to the caller instead of overwriting.

use anyhow::Result;

use super::{ContactInfoRow, Database, SocialLinkRow};

const CONTACT_COLUMNS: &str = "id, phone, email, address, created_at, updated_at";

impl Database {
    /// Fetch the contact record, inserting an empty one on first access.
    pub async fn get_or_create_contact_info(&self) -> Result<ContactInfoRow> {
        let existing = sqlx::query_as::<_, ContactInfoRow>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_info ORDER BY id ASC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;
        if let Some(row) = existing {
            return Ok(row);
        }
        let row = sqlx::query_as::<_, ContactInfoRow>(&format!(
            "INSERT INTO contact_info (phone, email, address) VALUES ('', '', '')
             RETURNING {CONTACT_COLUMNS}"
        ))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update the singleton contact record and return the stored row.
    pub async fn update_contact_info(
        &self,
        phone: &str,
        email: &str,
        address: &str,
    ) -> Result<ContactInfoRow> {
        let current = self.get_or_create_contact_info().await?;
        let row = sqlx::query_as::<_, ContactInfoRow>(&format!(
            "UPDATE contact_info SET phone = $2, email = $3, address = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(current.id)
        .bind(phone)
        .bind(email)
        .bind(address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// List social links for the contact record, in insertion order.
    pub async fn get_social_links(&self, contact_info_id: i64) -> Result<Vec<SocialLinkRow>> {
        let rows = sqlx::query_as::<_, SocialLinkRow>(
            "SELECT id, contact_info_id, platform, url, created_at
             FROM social_links WHERE contact_info_id = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(contact_info_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a social link. A duplicate platform for the same contact record
    /// violates the unique index and propagates as an error.
    pub async fn add_social_link(
        &self,
        contact_info_id: i64,
        platform: &str,
        url: &str,
    ) -> Result<SocialLinkRow> {
        let row = sqlx::query_as::<_, SocialLinkRow>(
            "INSERT INTO social_links (contact_info_id, platform, url)
             VALUES ($1, $2, $3)
             RETURNING id, contact_info_id, platform, url, created_at",
        )
        .bind(contact_info_id)
        .bind(platform)
        .bind(url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a social link. Returns false when no row has that id.
    pub async fn update_social_link(&self, id: i64, platform: &str, url: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE social_links SET platform = $2, url = $3 WHERE id = $1")
            .bind(id)
            .bind(platform)
            .bind(url)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a social link.
    pub async fn delete_social_link(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM social_links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
