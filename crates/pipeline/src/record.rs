//! Postgres-backed record store.

use async_trait::async_trait;
use sceneshot_db::models::generation::CreateGeneration;
use sceneshot_db::repositories::GenerationRepo;
use sceneshot_db::DbPool;

use crate::collaborators::{RecordError, RecordStore};

/// [`RecordStore`] writing to the `generations` table.
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, record: CreateGeneration) -> Result<(), RecordError> {
        let created = GenerationRepo::create(&self.pool, &record)
            .await
            .map_err(|e| RecordError(e.to_string()))?;

        tracing::info!(
            generation_id = %created.id,
            user_id = %created.user_id,
            "Generation record persisted"
        );
        Ok(())
    }
}
