use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(pub String);

/// A catalog entry. `normalized_name` is the lookup key and is unique within
/// one catalog snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    #[serde(rename = "sku")]
    pub code: ProductCode,
    pub name: String,
    #[serde(skip)]
    pub normalized_name: String,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl ProductRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>, unit_price: Decimal) -> Self {
        let name = name.into();
        Self {
            code: ProductCode(code.into()),
            normalized_name: normalize_name(&name),
            name,
            unit_price,
        }
    }
}

/// Lookup key form of a product name: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
