//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, auth types, errors)
//! - `credits` - Balances, append-only history and the charge protocol
//! - `billing` - Product catalog and checkout resolution
//! - `failure` - Error taxonomy and the failure classifier
//! - `naming` - Certificate content and generation history
//! - `analytics` - Client analytics batches

pub mod analytics;
pub mod billing;
pub mod credits;
pub mod failure;
pub mod foundation;
pub mod naming;
