use crate::domain::types::{BillingType, ItemId};
use crate::error::{PricingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only catalog tree: sections, then categories, then items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub sections: Vec<CatalogSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSection {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub categories: Vec<CatalogCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    pub billing_type: BillingType,
}

impl CatalogItem {
    pub fn new(id: ItemId, billing_type: BillingType) -> Self {
        Self {
            id,
            name: String::new(),
            billing_type,
        }
    }
}

impl Catalog {
    pub fn new(sections: Vec<CatalogSection>) -> Self {
        Self { sections }
    }

    /// Every item in traversal order
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.sections
            .iter()
            .flat_map(|section| section.categories.iter())
            .flat_map(|category| category.items.iter())
    }
}

/// Finds the billing type of `item_id` with a single pass over the catalog.
pub fn classify(item_id: &ItemId, catalog: &Catalog) -> Result<BillingType> {
    catalog
        .items()
        .find(|item| &item.id == item_id)
        .map(|item| item.billing_type)
        .ok_or_else(|| PricingError::ClassificationNotFound {
            item_id: item_id.to_string(),
        })
}

/// Item id to billing type lookup built once per pricing call.
///
/// On duplicate ids the first item in traversal order wins, so lookups agree
/// with [`classify`].
#[derive(Debug, Clone, Default)]
pub struct BillingIndex {
    types: HashMap<ItemId, BillingType>,
}

impl BillingIndex {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut types = HashMap::new();
        for item in catalog.items() {
            types.entry(item.id.clone()).or_insert(item.billing_type);
        }
        Self { types }
    }

    pub fn classify(&self, item_id: &ItemId) -> Result<BillingType> {
        self.types
            .get(item_id)
            .copied()
            .ok_or_else(|| PricingError::ClassificationNotFound {
                item_id: item_id.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
