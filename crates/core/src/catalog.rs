//! Immutable product catalog snapshot.
//!
//! The catalog is built once from a list of product descriptors and only read
//! afterwards. Lookups go through the normalized (trimmed, lowercased) name.
//! When two descriptors normalize to the same name the later one replaces the
//! earlier record but keeps its position in iteration order.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::product::{normalize_name, ProductRecord};
use crate::errors::CatalogLoadError;

/// Input shape for one catalog entry, as handed over by the inventory source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDescriptor {
    pub code: Option<String>,
    pub name: String,
    pub price: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<ProductRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_descriptors(descriptors: impl IntoIterator<Item = ProductDescriptor>) -> Self {
        let mut catalog = Self::default();

        for descriptor in descriptors {
            let key = normalize_name(&descriptor.name);
            if key.is_empty() {
                warn!(event_name = "catalog.descriptor.skipped", reason = "empty name");
                continue;
            }

            let code = descriptor.code.unwrap_or_else(|| key.clone());
            let record = ProductRecord::new(code, descriptor.name, descriptor.price);

            match catalog.index.get(&key) {
                Some(&position) => {
                    debug!(
                        event_name = "catalog.descriptor.shadowed",
                        product = %key,
                        "later catalog entry replaces an earlier one with the same name"
                    );
                    catalog.products[position] = record;
                }
                None => {
                    catalog.index.insert(key, catalog.products.len());
                    catalog.products.push(record);
                }
            }
        }

        catalog
    }

    /// Parses a JSON array of `{ "name", "price", "sku"|"code" }` objects.
    /// Individual malformed entries are skipped; a document that is not an
    /// array is an error.
    pub fn load_json(raw: &str) -> Result<Self, CatalogLoadError> {
        let document: Value = serde_json::from_str(raw)?;
        let Value::Array(entries) = document else {
            return Err(CatalogLoadError::NotASequence);
        };

        let descriptors = entries.iter().enumerate().filter_map(|(position, entry)| {
            let descriptor = descriptor_from_value(entry);
            if descriptor.is_none() {
                warn!(
                    event_name = "catalog.descriptor.skipped",
                    position,
                    reason = "missing or invalid name/price"
                );
            }
            descriptor
        });

        Ok(Self::from_descriptors(descriptors.collect::<Vec<_>>()))
    }

    pub fn load_path(path: &Path) -> Result<Self, CatalogLoadError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogLoadError::Read { path: path.to_path_buf(), source })?;
        Self::load_json(&raw)
    }

    /// Loads the catalog, degrading to an empty one when the source is
    /// missing or malformed. Every request then resolves as unmatched.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load_path(path) {
            Ok(catalog) => catalog,
            Err(error) => {
                warn!(
                    event_name = "catalog.load.failed",
                    correlation_id = "bootstrap",
                    path = %path.display(),
                    error = %error,
                    "catalog could not be loaded; continuing with an empty catalog"
                );
                Self::empty()
            }
        }
    }

    pub fn get(&self, normalized_name: &str) -> Option<&ProductRecord> {
        self.index.get(normalized_name).map(|&position| &self.products[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
        self.products.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|product| product.normalized_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn descriptor_from_value(entry: &Value) -> Option<ProductDescriptor> {
    let name = entry.get("name")?.as_str()?.to_string();
    let price = decimal_from_value(entry.get("price")?)?;
    if price.is_sign_negative() {
        return None;
    }

    let code = ["sku", "code"]
        .iter()
        .filter_map(|key| entry.get(*key))
        .find_map(|value| match value {
            Value::String(code) if !code.trim().is_empty() => Some(code.trim().to_string()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        });

    Some(ProductDescriptor { code, name, price })
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };

    Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)).ok()
}
