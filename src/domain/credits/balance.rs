//! Customer credit balance.

use serde::Serialize;

use crate::domain::foundation::{CustomerId, Timestamp, UserId};

/// Current spendable credits of one customer.
///
/// Customers are provisioned outside this service; a missing balance means
/// the user has never been set up for billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditBalance {
    pub customer_id: CustomerId,
    pub user_id: UserId,
    pub credits: u32,
    pub updated_at: Timestamp,
}

impl CreditBalance {
    pub fn new(customer_id: CustomerId, user_id: UserId, credits: u32) -> Self {
        Self {
            customer_id,
            user_id,
            credits,
            updated_at: Timestamp::now(),
        }
    }

    /// Returns true if the balance can pay for `required` credits.
    pub fn covers(&self, required: u32) -> bool {
        self.credits >= required
    }
}
