//! Resolution of a checkout request to a concrete catalog product.

use serde::Serialize;

use super::{ProductCatalog, ProductTier, ProductType};
use crate::domain::foundation::{DomainError, ErrorCode};

/// What the pricing page asked to buy. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutSelection {
    pub product_id: Option<String>,
    pub tier_id: Option<String>,
    /// Free-form product family sent by older clients (e.g. `chinese-name-credits`).
    pub product_type: Option<String>,
    pub credits_amount: Option<u32>,
    pub discount_code: Option<String>,
}

impl CheckoutSelection {
    fn non_blank(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn tier_id(&self) -> Option<&str> {
        Self::non_blank(&self.tier_id)
    }

    fn product_id(&self) -> Option<&str> {
        Self::non_blank(&self.product_id)
    }

    fn has_any_identifier(&self) -> bool {
        self.tier_id().is_some()
            || self.product_id().is_some()
            || Self::non_blank(&self.product_type).is_some()
    }
}

/// How a selection was matched. Logged for diagnosing pricing-page drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedBy {
    TierId,
    ProductId,
    DefaultCreditsTier,
}

/// Concrete product to send to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProduct {
    pub tier_id: String,
    pub product_id: String,
    pub checkout_type: ProductType,
    pub credits_amount: Option<u32>,
    pub matched_by: MatchedBy,
}

impl ResolvedProduct {
    fn from_tier(tier: &ProductTier, requested_credits: Option<u32>, matched_by: MatchedBy) -> Self {
        Self {
            tier_id: tier.id.clone(),
            product_id: tier.product_id.clone(),
            checkout_type: tier.product_type,
            credits_amount: tier.credit_amount.or(requested_credits),
            matched_by,
        }
    }
}

/// Resolves a selection against the catalog.
///
/// Identifiers are tried as tier ids first (`tierId`, then `productId`),
/// then as provider product ids. Any other non-empty request falls back to
/// the default credits tier. An empty request is a validation error; an
/// empty catalog is an internal error.
pub fn resolve_product(
    catalog: &ProductCatalog,
    selection: &CheckoutSelection,
) -> Result<ResolvedProduct, DomainError> {
    if !selection.has_any_identifier() {
        return Err(DomainError::validation(
            "productId",
            "A productId or tierId is required",
        ));
    }
    if catalog.is_empty() {
        return Err(DomainError::new(
            ErrorCode::InternalError,
            "Product catalog is empty",
        ));
    }

    let requested = selection.credits_amount;
    let identifiers = [selection.tier_id(), selection.product_id()];

    for id in identifiers.iter().flatten() {
        if let Some(tier) = catalog.by_tier_id(id) {
            return Ok(ResolvedProduct::from_tier(tier, requested, MatchedBy::TierId));
        }
    }
    for id in identifiers.iter().flatten() {
        if let Some(tier) = catalog.by_product_id(id) {
            return Ok(ResolvedProduct::from_tier(tier, requested, MatchedBy::ProductId));
        }
    }

    catalog
        .default_credits_tier()
        .map(|tier| ResolvedProduct::from_tier(tier, requested, MatchedBy::DefaultCreditsTier))
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::ProductNotFound,
                "No product matches the request and the catalog has no credits tier",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ProductCatalog {
        ProductCatalog::builtin().unwrap()
    }

    fn select(tier_id: Option<&str>, product_id: Option<&str>, product_type: Option<&str>) -> CheckoutSelection {
        CheckoutSelection {
            tier_id: tier_id.map(String::from),
            product_id: product_id.map(String::from),
            product_type: product_type.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn tier_hobby_resolves_to_starter_subscription() {
        let resolved = resolve_product(&catalog(), &select(Some("tier-hobby"), None, None)).unwrap();
        assert_eq!(resolved.product_id, "prod_starter_monthly");
        assert_eq!(resolved.checkout_type, ProductType::Subscription);
        assert_eq!(resolved.matched_by, MatchedBy::TierId);
    }

    #[test]
    fn product_id_holding_a_tier_id_matches_tier() {
        let resolved = resolve_product(&catalog(), &select(None, Some("tier-pro"), None)).unwrap();
        assert_eq!(resolved.product_id, "prod_pro_monthly");
    }

    #[test]
    fn tier_id_takes_precedence_over_product_id() {
        let resolved = resolve_product(
            &catalog(),
            &select(Some("credits-10"), Some("tier-hobby"), None),
        )
        .unwrap();
        assert_eq!(resolved.tier_id, "credits-10");
    }

    #[test]
    fn provider_product_id_matches_after_tier_ids() {
        let resolved =
            resolve_product(&catalog(), &select(None, Some("prod_credits_100"), None)).unwrap();
        assert_eq!(resolved.tier_id, "credits-100");
        assert_eq!(resolved.credits_amount, Some(100));
        assert_eq!(resolved.matched_by, MatchedBy::ProductId);
    }

    #[test]
    fn unknown_product_type_falls_back_to_default_credits_tier() {
        let resolved =
            resolve_product(&catalog(), &select(None, None, Some("chinese-name-credits"))).unwrap();
        let default = catalog().default_credits_tier().cloned().unwrap();
        assert_eq!(resolved.product_id, default.product_id);
        assert_eq!(resolved.credits_amount, default.credit_amount);
        assert_eq!(resolved.checkout_type, ProductType::Credits);
        assert_eq!(resolved.matched_by, MatchedBy::DefaultCreditsTier);
    }

    #[test]
    fn unknown_product_id_falls_back_to_default_credits_tier() {
        let resolved = resolve_product(&catalog(), &select(None, Some("prod_gone"), None)).unwrap();
        assert_eq!(resolved.tier_id, "credits-50");
    }

    #[test]
    fn empty_selection_is_validation_error() {
        let err = resolve_product(&catalog(), &select(None, Some("  "), None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn empty_catalog_is_internal_error() {
        let err = resolve_product(&ProductCatalog::default(), &select(Some("tier-hobby"), None, None))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn catalog_without_credits_tier_reports_product_not_found() {
        let catalog = ProductCatalog::from_yaml(
            "tiers:\n  - { id: s, name: S, product_id: p, product_type: subscription }\n",
        )
        .unwrap();
        let err = resolve_product(&catalog, &select(None, None, Some("anything"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }
}
