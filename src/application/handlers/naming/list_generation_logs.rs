//! ListGenerationLogsHandler - Query handler for past name generations.

use std::sync::Arc;

use crate::application::cache_keys::{generation_logs_key, CachedValue, SharedCache};
use crate::domain::failure::AppError;
use crate::domain::foundation::UserId;
use crate::domain::naming::{page_size, GenerationLogEntry};
use crate::ports::GenerationLogReader;

#[derive(Debug, Clone)]
pub struct ListGenerationLogsQuery {
    pub user_id: UserId,
    pub limit: Option<u32>,
}

/// Read-through cached listing of the user's generation history.
pub struct ListGenerationLogsHandler {
    reader: Arc<dyn GenerationLogReader>,
    cache: SharedCache,
}

impl ListGenerationLogsHandler {
    pub fn new(reader: Arc<dyn GenerationLogReader>, cache: SharedCache) -> Self {
        Self { reader, cache }
    }

    pub async fn handle(
        &self,
        query: ListGenerationLogsQuery,
    ) -> Result<Vec<GenerationLogEntry>, AppError> {
        let limit = page_size(query.limit);
        let key = generation_logs_key(&query.user_id, limit);

        if let Some(CachedValue::GenerationLogs(entries)) = self.cache.get(&key) {
            return Ok(entries);
        }

        let entries = self.reader.list_for_user(&query.user_id, limit).await?;
        self.cache
            .set(&key, CachedValue::GenerationLogs(entries.clone()), None);
        Ok(entries)
    }
}
