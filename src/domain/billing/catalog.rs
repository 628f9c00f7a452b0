//! Product catalog loaded from YAML.

use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

use super::ProductTier;

const BUILTIN_CATALOG: &str = include_str!("../../../config/products.yaml");

/// Errors raised while loading a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Failed to parse product catalog: {0}")]
    Parse(String),

    #[error("Invalid product catalog: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tiers: Vec<ProductTier>,
}

/// Ordered list of purchasable tiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductCatalog {
    tiers: Vec<ProductTier>,
}

impl ProductCatalog {
    /// Builds a catalog, rejecting duplicate tier ids and credit packs
    /// without an amount.
    pub fn new(tiers: Vec<ProductTier>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for tier in &tiers {
            if !seen.insert(tier.id.as_str()) {
                return Err(CatalogError::Invalid(format!("duplicate tier id '{}'", tier.id)));
            }
            if tier.product_id.trim().is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "tier '{}' has no product_id",
                    tier.id
                )));
            }
            if tier.is_credits() && tier.credit_amount.unwrap_or(0) == 0 {
                return Err(CatalogError::Invalid(format!(
                    "credits tier '{}' needs a positive credit_amount",
                    tier.id
                )));
            }
        }
        Ok(Self { tiers })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(file.tiers)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    pub fn tiers(&self) -> &[ProductTier] {
        &self.tiers
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn by_tier_id(&self, id: &str) -> Option<&ProductTier> {
        self.tiers.iter().find(|t| t.id == id)
    }

    pub fn by_product_id(&self, product_id: &str) -> Option<&ProductTier> {
        self.tiers.iter().find(|t| t.product_id == product_id)
    }

    /// Fallback credits tier: the featured one, else the first listed.
    pub fn default_credits_tier(&self) -> Option<&ProductTier> {
        self.tiers
            .iter()
            .find(|t| t.is_credits() && t.featured)
            .or_else(|| self.tiers.iter().find(|t| t.is_credits()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::ProductType;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = ProductCatalog::builtin().unwrap();
        let hobby = catalog.by_tier_id("tier-hobby").unwrap();
        assert_eq!(hobby.name, "Starter");
        assert_eq!(hobby.product_type, ProductType::Subscription);
    }

    #[test]
    fn builtin_default_credits_tier_is_featured() {
        let catalog = ProductCatalog::builtin().unwrap();
        let tier = catalog.default_credits_tier().unwrap();
        assert!(tier.featured);
        assert!(tier.is_credits());
    }

    #[test]
    fn default_credits_tier_falls_back_to_first_credits_tier() {
        let catalog = ProductCatalog::from_yaml(
            r#"
tiers:
  - { id: sub, name: Sub, product_id: prod_sub, product_type: subscription }
  - { id: c5, name: Five, product_id: prod_c5, product_type: credits, credit_amount: 5 }
  - { id: c9, name: Nine, product_id: prod_c9, product_type: credits, credit_amount: 9 }
"#,
        )
        .unwrap();
        assert_eq!(catalog.default_credits_tier().unwrap().id, "c5");
    }

    #[test]
    fn rejects_duplicate_tier_ids() {
        let result = ProductCatalog::from_yaml(
            r#"
tiers:
  - { id: a, name: A, product_id: p1, product_type: subscription }
  - { id: a, name: B, product_id: p2, product_type: subscription }
"#,
        );
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn rejects_credits_tier_without_amount() {
        let result = ProductCatalog::from_yaml(
            "tiers:\n  - { id: c, name: C, product_id: p, product_type: credits }\n",
        );
        assert!(matches!(result, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            ProductCatalog::from_yaml("tiers: [ {"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn empty_document_yields_empty_catalog() {
        assert!(ProductCatalog::from_yaml("tiers: []").unwrap().is_empty());
    }
}
