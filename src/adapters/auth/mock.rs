//! In-memory `SessionValidator` for tests and the local dev fallback.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Accepts a fixed set of tokens. Anything else is `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    users: HashMap<String, AuthenticatedUser>,
    failure: Option<AuthError>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.users.insert(token.into(), user);
        self
    }

    /// Registers `user_id` with a derived `<id>@test.example.com` email.
    /// A blank id registers nothing.
    pub fn with_test_user(self, token: impl Into<String>, user_id: &str) -> Self {
        match UserId::new(user_id) {
            Ok(id) => {
                let email = format!("{}@test.example.com", user_id);
                self.with_user(token, AuthenticatedUser::new(id, email, None))
            }
            Err(_) => self,
        }
    }

    /// Every validation fails with `error`, known tokens included.
    pub fn failing_with(mut self, error: AuthError) -> Self {
        self.failure = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.users.get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_gets_derived_email() {
        let validator = MockSessionValidator::new().with_test_user("dev-token", "dev-user");
        let user = validator.validate("dev-token").await.unwrap();
        assert_eq!(user.id.as_str(), "dev-user");
        assert_eq!(user.email, "dev-user@test.example.com");
    }

    #[tokio::test]
    async fn blank_id_registers_nothing() {
        let validator = MockSessionValidator::new().with_test_user("dev-token", "  ");
        assert_eq!(
            validator.validate("dev-token").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn failure_overrides_known_tokens() {
        let validator = MockSessionValidator::new()
            .with_test_user("dev-token", "dev-user")
            .failing_with(AuthError::TokenExpired);
        assert_eq!(
            validator.validate("dev-token").await.unwrap_err(),
            AuthError::TokenExpired
        );
    }
}
