//! Product details rows.
//!
//! Decides which detail rows a product page shows. The allowed field set
//! depends on the product's brand and comes from configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Custom field holding the product's brand.
const BRAND_FIELD: &str = "Brands";
/// Custom field whose values are merged into a single row.
const INSTRUMENT_FIELD: &str = "Instrument";

/// A field that may be allowed for a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DetailField {
    #[serde(rename = "SKU")]
    Sku,
    #[serde(rename = "UPC")]
    Upc,
    #[serde(rename = "minPurchaseQuantity")]
    MinPurchaseQuantity,
    #[serde(rename = "maxPurchaseQuantity")]
    MaxPurchaseQuantity,
    #[serde(rename = "availabilityV2")]
    Availability,
    Condition,
    Weight,
    Brands,
    ProdType,
    Instrument,
    SubBrand,
    Style,
}

impl DetailField {
    /// Match a custom field name against the known fields.
    pub fn from_name(name: &str) -> Option<Self> {
        let field = match name {
            "SKU" => DetailField::Sku,
            "UPC" => DetailField::Upc,
            "minPurchaseQuantity" => DetailField::MinPurchaseQuantity,
            "maxPurchaseQuantity" => DetailField::MaxPurchaseQuantity,
            "availabilityV2" => DetailField::Availability,
            "Condition" => DetailField::Condition,
            "Weight" => DetailField::Weight,
            "Brands" => DetailField::Brands,
            "ProdType" => DetailField::ProdType,
            "Instrument" => DetailField::Instrument,
            "SubBrand" => DetailField::SubBrand,
            "Style" => DetailField::Style,
            _ => return None,
        };
        Some(field)
    }
}

/// Allowed fields for one brand, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BrandFieldSet {
    pub brand: String,
    pub fields: Vec<DetailField>,
}

/// Brand name to allowed fields lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandFields {
    by_brand: HashMap<String, Vec<DetailField>>,
}

impl BrandFields {
    pub fn new(sets: &[BrandFieldSet]) -> Self {
        let by_brand = sets
            .iter()
            .map(|set| (set.brand.clone(), set.fields.clone()))
            .collect();
        Self { by_brand }
    }

    /// Fields allowed for a brand; empty for an unknown brand.
    pub fn for_brand(&self, brand: &str) -> &[DetailField] {
        self.by_brand.get(brand).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub entity_id: u64,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Weight {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Availability {
    pub description: String,
}

/// The product attributes the details section draws from.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDetails {
    pub sku: Option<String>,
    pub upc: Option<String>,
    pub min_purchase_quantity: Option<u32>,
    pub max_purchase_quantity: Option<u32>,
    #[serde(rename = "availabilityV2")]
    pub availability: Option<Availability>,
    pub condition: Option<String>,
    pub weight: Option<Weight>,
    pub custom_fields: Vec<CustomField>,
}

/// One labelled row of the details section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    /// Stable key for the row.
    pub key: String,
    pub label: String,
    pub value: String,
}

impl DetailRow {
    fn new(key: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: value.into(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn non_zero(value: Option<u32>) -> Option<String> {
    value.filter(|v| *v != 0).map(|v| v.to_string())
}

fn custom_field_label(name: &str) -> &str {
    match name {
        "ProdType" => "Product Type",
        "SubBrand" => "Sub Brand",
        other => other,
    }
}

impl ProductDetails {
    /// The brand named by the first `Brands` custom field.
    pub fn brand(&self) -> Option<&str> {
        self.custom_fields
            .iter()
            .find(|cf| cf.name == BRAND_FIELD)
            .map(|cf| cf.value.as_str())
    }

    /// Build the rows to show for this product.
    pub fn rows(&self, brand_fields: &BrandFields) -> Vec<DetailRow> {
        let allowed = self
            .brand()
            .map(|brand| brand_fields.for_brand(brand))
            .unwrap_or(&[]);
        let allows = |field: DetailField| allowed.contains(&field);

        let mut rows = Vec::new();

        if allows(DetailField::Sku) {
            if let Some(sku) = non_empty(&self.sku) {
                rows.push(DetailRow::new("sku", "SKU", sku));
            }
        }
        if allows(DetailField::Upc) {
            if let Some(upc) = non_empty(&self.upc) {
                rows.push(DetailRow::new("upc", "UPC", upc));
            }
        }
        if allows(DetailField::MinPurchaseQuantity) {
            if let Some(min) = non_zero(self.min_purchase_quantity) {
                rows.push(DetailRow::new("min-purchase", "Minimum purchase", min));
            }
        }
        if allows(DetailField::MaxPurchaseQuantity) {
            if let Some(max) = non_zero(self.max_purchase_quantity) {
                rows.push(DetailRow::new("max-purchase", "Maximum purchase", max));
            }
        }
        if allows(DetailField::Availability) {
            if let Some(availability) = self
                .availability
                .as_ref()
                .map(|a| a.description.as_str())
                .filter(|d| !d.is_empty())
            {
                rows.push(DetailRow::new("availability", "Availability", availability));
            }
        }
        if allows(DetailField::Condition) {
            if let Some(condition) = non_empty(&self.condition) {
                rows.push(DetailRow::new("condition", "Condition", condition));
            }
        }
        if allows(DetailField::Weight) {
            if let Some(weight) = &self.weight {
                rows.push(DetailRow::new(
                    "weight",
                    "Weight",
                    format!("{} {}", weight.value, weight.unit),
                ));
            }
        }

        // Instrument values are merged regardless of the allowed set.
        let instruments: Vec<&str> = self
            .custom_fields
            .iter()
            .filter(|cf| cf.name == INSTRUMENT_FIELD)
            .map(|cf| cf.value.as_str())
            .collect();
        if !instruments.is_empty() {
            rows.push(DetailRow::new(
                "instrument",
                INSTRUMENT_FIELD,
                instruments.join(", "),
            ));
        }

        rows.extend(
            self.custom_fields
                .iter()
                .filter(|cf| cf.name != INSTRUMENT_FIELD)
                .filter(|cf| DetailField::from_name(&cf.name).is_some_and(allows))
                .map(|cf| {
                    DetailRow::new(
                        cf.entity_id.to_string(),
                        custom_field_label(&cf.name),
                        cf.value.as_str(),
                    )
                }),
        );

        tracing::trace!("Built {} detail rows", rows.len());
        rows
    }
}
