//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `supabase` - HS256 access tokens signed with the project JWT secret
//! - `mock` - Test implementation that doesn't require external services

mod mock;
mod supabase;

pub use mock::MockSessionValidator;
pub use supabase::{SupabaseAuthConfig, SupabaseJwtValidator, AUTHENTICATED_AUDIENCE};
