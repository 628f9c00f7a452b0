//! PostgreSQL implementation of GenerationLogReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::naming::GenerationLogEntry;
use crate::ports::GenerationLogReader;

#[derive(Clone)]
pub struct PostgresGenerationLogReader {
    pool: PgPool,
}

impl PostgresGenerationLogReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LogRow {
    id: Uuid,
    user_id: String,
    input: Value,
    result: Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<LogRow> for GenerationLogEntry {
    type Error = DomainError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        Ok(GenerationLogEntry {
            id: row.id.to_string(),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            input: row.input,
            result: row.result,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl GenerationLogReader for PostgresGenerationLogReader {
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<GenerationLogEntry>, DomainError> {
        let rows: Vec<LogRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, input, result, created_at
            FROM name_generation_logs
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to read generation logs: {}", e),
            )
        })?;

        rows.into_iter().map(GenerationLogEntry::try_from).collect()
    }
}
