use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::ProductCode;

/// One lookup against the catalog, produced while parsing a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestedItem {
    pub normalized_name: String,
    pub quantity: i64,
}

impl RequestedItem {
    pub fn new(normalized_name: impl Into<String>, quantity: i64) -> Self {
        Self { normalized_name: normalized_name.into(), quantity }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLine {
    #[serde(rename = "sku")]
    pub code: ProductCode,
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "precio_unitario", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedItem {
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "detalle")]
    pub lines: Vec<QuoteLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(rename = "faltantes_en_inventario")]
    pub unmatched: Vec<UnmatchedItem>,
    #[serde(rename = "mensaje_origen")]
    pub source_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::domain::product::ProductCode;

    use super::{Quote, QuoteLine, UnmatchedItem};

    #[test]
    fn response_uses_wire_field_names() {
        let quote = Quote {
            lines: vec![QuoteLine {
                code: ProductCode("CEM-01".to_string()),
                name: "Cement".to_string(),
                quantity: 5,
                unit_price: Decimal::new(10, 0),
                subtotal: Decimal::new(50, 0),
            }],
            total: Decimal::new(50, 0),
            unmatched: vec![UnmatchedItem { name: "paint".to_string(), quantity: 2 }],
            source_message: None,
        };

        let value = serde_json::to_value(&quote).expect("quote serializes");
        assert_eq!(
            value,
            json!({
                "detalle": [{
                    "sku": "CEM-01",
                    "name": "Cement",
                    "cantidad": 5,
                    "precio_unitario": 10.0,
                    "subtotal": 50.0
                }],
                "total": 50.0,
                "faltantes_en_inventario": [{ "name": "paint", "cantidad": 2 }],
                "mensaje_origen": null
            })
        );
    }
}
