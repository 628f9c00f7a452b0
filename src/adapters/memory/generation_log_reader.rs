//! In-memory generation log reader.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::naming::GenerationLogEntry;
use crate::ports::GenerationLogReader;

/// Holds generation log rows in memory. Counts reads so tests can observe
/// cache hits.
#[derive(Debug, Default)]
pub struct InMemoryGenerationLogReader {
    entries: RwLock<Vec<GenerationLogEntry>>,
    reads: std::sync::atomic::AtomicUsize,
}

impl InMemoryGenerationLogReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, entry: GenerationLogEntry) {
        self.entries.write().await.push(entry);
    }

    /// Number of `list_for_user` calls served.
    pub fn read_count(&self) -> usize {
        self.reads.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationLogReader for InMemoryGenerationLogReader {
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<GenerationLogEntry>, DomainError> {
        self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let entries = self.entries.read().await;
        let mut rows: Vec<_> = entries
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use serde_json::json;

    fn entry(user: &str, id: &str, days_ago: i64) -> GenerationLogEntry {
        GenerationLogEntry {
            id: id.to_string(),
            user_id: UserId::new(user).unwrap(),
            input: json!({}),
            result: json!([]),
            created_at: Timestamp::now().add_days(-days_ago),
        }
    }

    #[tokio::test]
    async fn lists_only_own_entries_newest_first() {
        let reader = InMemoryGenerationLogReader::new();
        reader.push(entry("u1", "old", 3)).await;
        reader.push(entry("u2", "other", 0)).await;
        reader.push(entry("u1", "new", 1)).await;

        let rows = reader
            .list_for_user(&UserId::new("u1").unwrap(), 10)
            .await
            .unwrap();

        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(reader.read_count(), 1);
    }

    #[tokio::test]
    async fn respects_limit() {
        let reader = InMemoryGenerationLogReader::new();
        for i in 0..5 {
            reader.push(entry("u1", &i.to_string(), i)).await;
        }
        let rows = reader
            .list_for_user(&UserId::new("u1").unwrap(), 2)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }
}
