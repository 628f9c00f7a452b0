//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Supabase access-token validation
//! - `postgres` - Credit ledger and generation history
//! - `document` - Headless Chromium PDF rendering
//! - `creem` - Hosted checkout sessions
//! - `analytics` - Analytics sinks
//! - `cache` - Process-local TTL cache
//! - `memory` - In-memory ports for tests and development
//! - `http` - axum REST API

pub mod analytics;
pub mod auth;
pub mod cache;
pub mod creem;
pub mod document;
pub mod http;
pub mod memory;
pub mod postgres;
