//! EntitlementGate - orchestrates one paid request.
//!
//! ```text
//! Authenticated -> Entitled -> SideEffectInProgress -> Completed
//!                                                   -> SideEffectFailed
//!                                                   -> AccountingFailed
//! ```
//!
//! The balance is checked before the side effect and charged after it, so a
//! failed side effect never costs credits. The charge itself is the ledger's
//! atomic conditional decrement. When that decrement finds the balance
//! already spent by a concurrent request, the artifact is withheld and the
//! caller gets `InsufficientCredits`. Only a storage failure during the
//! charge still returns the artifact, logged for reconciliation.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::credits::{Charge, ChargeReceipt, LedgerError};
use crate::domain::failure::{AppError, ErrorKind};
use crate::domain::foundation::UserId;
use crate::ports::{CreditLedger, RenderError};

/// Default limit for one side effect.
pub const DEFAULT_SIDE_EFFECT_TIMEOUT: Duration = Duration::from_secs(60);

/// Where a gated request currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPhase {
    Unauthenticated,
    Authenticated,
    Entitled,
    SideEffectInProgress,
    Completed,
    SideEffectFailed,
    AccountingFailed,
}

impl RequestPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPhase::Unauthenticated => "unauthenticated",
            RequestPhase::Authenticated => "authenticated",
            RequestPhase::Entitled => "entitled",
            RequestPhase::SideEffectInProgress => "side_effect_in_progress",
            RequestPhase::Completed => "completed",
            RequestPhase::SideEffectFailed => "side_effect_failed",
            RequestPhase::AccountingFailed => "accounting_failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestPhase::Completed | RequestPhase::SideEffectFailed | RequestPhase::AccountingFailed
        )
    }
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a paid operation costs and how it is described in history.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSpec {
    pub amount: u32,
    pub description: String,
    pub metadata: Value,
}

impl ChargeSpec {
    pub fn new(amount: u32, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
            metadata: Value::Object(Map::new()),
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Failure of the external call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SideEffectError {
    /// The collaborator cannot run at all.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Operation failed: {0}")]
    Failed(String),

    #[error("Operation timed out: {0}")]
    TimedOut(String),
}

impl From<RenderError> for SideEffectError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Unavailable(reason) => SideEffectError::Unavailable(reason),
            RenderError::Failed(reason) => SideEffectError::Failed(reason),
            RenderError::Timeout(_) => SideEffectError::TimedOut(err.to_string()),
        }
    }
}

/// Why a gated request did not produce an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// Balance lookup failed or no customer exists.
    #[error(transparent)]
    Ledger(LedgerError),

    #[error("Insufficient credits: required {required}, current {current}")]
    InsufficientCredits { required: u32, current: u32 },

    #[error(transparent)]
    SideEffect(SideEffectError),
}

impl GateError {
    /// Phase the request ended in.
    pub fn phase(&self) -> RequestPhase {
        match self {
            GateError::Ledger(_) | GateError::InsufficientCredits { .. } => {
                RequestPhase::Authenticated
            }
            GateError::SideEffect(_) => RequestPhase::SideEffectFailed,
        }
    }
}

impl From<GateError> for AppError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Ledger(e) => AppError::from(e),
            GateError::InsufficientCredits { required, current } => {
                AppError::insufficient_credits(required, current)
            }
            GateError::SideEffect(SideEffectError::Unavailable(ref reason)) => {
                AppError::new(ErrorKind::ExternalService, err.to_string())
                    .with_status(503)
                    .with_code("SERVICE_UNAVAILABLE")
                    .with_user_message("This feature is temporarily unavailable. Please try again later.")
                    .with_details(serde_json::json!({ "reason": reason }))
            }
            GateError::SideEffect(SideEffectError::Failed(_)) => {
                AppError::new(ErrorKind::ExternalService, err.to_string()).with_retryable(true)
            }
            GateError::SideEffect(SideEffectError::TimedOut(_)) => {
                AppError::new(ErrorKind::Network, err.to_string())
                    .with_code("TIMEOUT")
                    .with_retryable(true)
            }
        }
    }
}

/// What happened to the bill after the side effect succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountingOutcome {
    Charged(ChargeReceipt),
    /// The artifact was produced but the charge did not go through.
    Failed { reason: String },
}

impl AccountingOutcome {
    pub fn is_charged(&self) -> bool {
        matches!(self, AccountingOutcome::Charged(_))
    }

    /// Balance after the charge, when one was recorded.
    pub fn remaining_credits(&self) -> Option<u32> {
        match self {
            AccountingOutcome::Charged(receipt) => Some(receipt.balance_after),
            AccountingOutcome::Failed { .. } => None,
        }
    }

    pub fn phase(&self) -> RequestPhase {
        match self {
            AccountingOutcome::Charged(_) => RequestPhase::Completed,
            AccountingOutcome::Failed { .. } => RequestPhase::AccountingFailed,
        }
    }
}

/// A produced artifact and its accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome<T> {
    pub artifact: T,
    pub accounting: AccountingOutcome,
}

/// Runs check, side effect and charge for one paid operation.
#[derive(Clone)]
pub struct EntitlementGate {
    ledger: Arc<dyn CreditLedger>,
    side_effect_timeout: Duration,
}

impl EntitlementGate {
    pub fn new(ledger: Arc<dyn CreditLedger>) -> Self {
        Self {
            ledger,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_side_effect_timeout(mut self, timeout: Duration) -> Self {
        self.side_effect_timeout = timeout;
        self
    }

    /// Checks the balance, runs `side_effect` once, then charges.
    ///
    /// The side effect runs only when the balance covers `spec.amount`, and
    /// nothing is charged unless it succeeds.
    pub async fn run<T, F, Fut>(
        &self,
        user_id: &UserId,
        spec: ChargeSpec,
        side_effect: F,
    ) -> Result<GateOutcome<T>, GateError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, SideEffectError>>,
    {
        log_phase(user_id, RequestPhase::Authenticated, &spec);

        let balance = self
            .ledger
            .balance(user_id)
            .await
            .map_err(GateError::Ledger)?
            .ok_or_else(|| GateError::Ledger(LedgerError::CustomerNotFound(user_id.clone())))?;

        if !balance.covers(spec.amount) {
            tracing::info!(
                user_id = %user_id.as_str(),
                required = spec.amount,
                current = balance.credits,
                "Entitlement denied"
            );
            return Err(GateError::InsufficientCredits {
                required: spec.amount,
                current: balance.credits,
            });
        }
        log_phase(user_id, RequestPhase::Entitled, &spec);

        log_phase(user_id, RequestPhase::SideEffectInProgress, &spec);
        let artifact = match tokio::time::timeout(self.side_effect_timeout, side_effect()).await {
            Ok(Ok(artifact)) => artifact,
            Ok(Err(e)) => {
                tracing::warn!(
                    user_id = %user_id.as_str(),
                    phase = %RequestPhase::SideEffectFailed,
                    error = %e,
                    "Side effect failed, nothing charged"
                );
                return Err(GateError::SideEffect(e));
            }
            Err(_) => {
                let e = SideEffectError::TimedOut(format!(
                    "no result after {} seconds",
                    self.side_effect_timeout.as_secs()
                ));
                tracing::warn!(
                    user_id = %user_id.as_str(),
                    phase = %RequestPhase::SideEffectFailed,
                    error = %e,
                    "Side effect timed out, nothing charged"
                );
                return Err(GateError::SideEffect(e));
            }
        };

        let accounting = self.charge(user_id, &spec, balance.credits).await?;
        log_phase(user_id, accounting.phase(), &spec);

        Ok(GateOutcome {
            artifact,
            accounting,
        })
    }

    /// A lost race on the decrement withholds the artifact; any other
    /// ledger failure is recorded as `AccountingOutcome::Failed`.
    async fn charge(
        &self,
        user_id: &UserId,
        spec: &ChargeSpec,
        observed: u32,
    ) -> Result<AccountingOutcome, GateError> {
        let charge = match Charge::new(user_id.clone(), spec.amount, spec.description.clone()) {
            Ok(charge) => charge.with_metadata(spec.metadata.clone()),
            Err(e) => return Ok(accounting_failed(user_id, spec, observed, e)),
        };

        match self.ledger.charge(charge).await {
            Ok(receipt) => Ok(AccountingOutcome::Charged(receipt)),
            Err(LedgerError::InsufficientCredits { required, current }) => {
                tracing::warn!(
                    user_id = %user_id.as_str(),
                    required,
                    current,
                    observed_balance = observed,
                    operation = %spec.description,
                    "Balance spent concurrently, artifact withheld"
                );
                Err(GateError::InsufficientCredits { required, current })
            }
            Err(e) => Ok(accounting_failed(user_id, spec, observed, e)),
        }
    }
}

fn log_phase(user_id: &UserId, phase: RequestPhase, spec: &ChargeSpec) {
    tracing::debug!(
        user_id = %user_id.as_str(),
        phase = %phase,
        operation = %spec.description,
        amount = spec.amount,
        "Entitlement phase"
    );
}

fn accounting_failed(
    user_id: &UserId,
    spec: &ChargeSpec,
    observed: u32,
    error: LedgerError,
) -> AccountingOutcome {
    tracing::error!(
        user_id = %user_id.as_str(),
        phase = %RequestPhase::AccountingFailed,
        operation = %spec.description,
        amount = spec.amount,
        observed_balance = observed,
        metadata = %spec.metadata,
        error = %error,
        "Charge failed after side effect succeeded; reconcile manually"
    );
    AccountingOutcome::Failed {
        reason: error.to_string(),
    }
}
