//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers orchestrate domain operations over ports. Paid operations go
//! through `EntitlementGate`; reads may be memoized in the shared cache.

pub mod cache_keys;
pub mod entitlement;
pub mod handlers;

pub use cache_keys::{CachedValue, SharedCache};
pub use entitlement::{
    AccountingOutcome, ChargeSpec, EntitlementGate, GateError, GateOutcome, RequestPhase,
    SideEffectError,
};
pub use handlers::*;
