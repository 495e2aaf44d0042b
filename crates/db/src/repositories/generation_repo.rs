//! Repository for the `generations` table.

use sqlx::PgPool;

use crate::models::generation::{CreateGeneration, Generation};

/// Column list for generations queries.
const COLUMNS: &str = "id, user_id, original_image_url, images, status, created_at";

/// CRUD operations for generation records (immutable once written).
pub struct GenerationRepo;

impl GenerationRepo {
    /// Insert a new generation record, returning the created row with
    /// its server-assigned `created_at`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneration,
    ) -> Result<Generation, sqlx::Error> {
        let query = format!(
            "INSERT INTO generations
                (id, user_id, original_image_url, images, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Generation>(&query)
            .bind(&input.id)
            .bind(&input.user_id)
            .bind(&input.original_image_url)
            .bind(&input.images)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a record by id, scoped to its owner.
    ///
    /// Returns `None` both when the id is unknown and when the record
    /// belongs to a different caller, so ownership is never leaked.
    pub async fn find_by_id_for_user(
        pool: &PgPool,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Generation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generations WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Generation>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a caller's generation records, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<Generation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generations
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Generation>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
