//! Generation log reader port (CQRS read side).
//!
//! `name_generation_logs` is written by the generation pipeline. This
//! service only lists a user's own rows.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::naming::GenerationLogEntry;

#[async_trait]
pub trait GenerationLogReader: Send + Sync {
    /// The user's most recent generations, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<GenerationLogEntry>, DomainError>;
}
