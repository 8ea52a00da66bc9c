pub mod catalog;
pub mod engine;
pub mod hours;
pub mod line_items;
pub mod margin;
pub mod rounding;
pub mod types;

pub use catalog::{classify, BillingIndex, Catalog, CatalogCategory, CatalogItem, CatalogSection};
pub use engine::PackagePriceEngine;
pub use hours::{normalize_hours, HoursMatch, HoursMatchResolver};
pub use line_items::{sum_line_totals, PackageLineItemPricer};
pub use margin::{MarginPriceCalculator, StandardMarginCalculator};
pub use rounding::{PriceRounder, RoundingStrategy};
pub use types::{
    BillingType, ItemId, LineTotal, Package, PackageId, PackageLineItem, PriceConfig, PriceResult,
    PriceSource, UtilityType,
};
