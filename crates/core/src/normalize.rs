use serde::Deserialize;
use serde_json::Value;

use crate::domain::product::normalize_name;
use crate::domain::quote::RequestedItem;

/// One entry of a structured request's `items` list, kept loosely typed so
/// that odd payloads degrade instead of failing the whole request.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ItemDescriptor {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub cantidad: Option<Value>,
    #[serde(default)]
    pub qty: Option<Value>,
}

impl ItemDescriptor {
    pub fn new(name: impl Into<String>, quantity: Option<i64>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            cantidad: quantity.map(Value::from),
            qty: None,
        }
    }

    /// Lenient conversion used for list entries: anything that is not an
    /// object becomes a nameless descriptor and is dropped later.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    fn quantity(&self) -> i64 {
        self.cantidad.as_ref().or(self.qty.as_ref()).and_then(coerce_quantity).unwrap_or(1)
    }
}

/// Turns descriptors into requested items. Blank or missing names are
/// dropped silently; repeated names are kept as separate items.
pub fn normalize_items(descriptors: &[ItemDescriptor]) -> Vec<RequestedItem> {
    descriptors
        .iter()
        .filter_map(|descriptor| {
            let name = normalize_name(descriptor.name.as_ref()?.as_str()?);
            (!name.is_empty()).then(|| RequestedItem::new(name, descriptor.quantity()))
        })
        .collect()
}

fn coerce_quantity(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => {
            number.as_i64().or_else(|| number.as_f64().map(|float| float.trunc() as i64))
        }
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|float| float.is_finite())
                    .map(|float| float.trunc() as i64)
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{normalize_items, ItemDescriptor};
    use crate::domain::quote::RequestedItem;

    fn descriptors(value: serde_json::Value) -> Vec<ItemDescriptor> {
        value.as_array().expect("array fixture").iter().map(ItemDescriptor::from_value).collect()
    }

    #[test]
    fn names_are_trimmed_and_lowercased() {
        let items = normalize_items(&[ItemDescriptor::new("  Cement ", Some(3))]);
        assert_eq!(items, vec![RequestedItem::new("cement", 3)]);
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let items = normalize_items(&descriptors(json!([{ "name": "rebar" }])));
        assert_eq!(items, vec![RequestedItem::new("rebar", 1)]);
    }

    #[test]
    fn cantidad_wins_over_qty_and_qty_is_accepted_alone() {
        let items = normalize_items(&descriptors(json!([
            { "name": "cement", "cantidad": 4, "qty": 9 },
            { "name": "rebar", "qty": 6 }
        ])));
        assert_eq!(items, vec![RequestedItem::new("cement", 4), RequestedItem::new("rebar", 6)]);
    }

    #[test]
    fn numeric_equivalents_are_coerced_and_others_default_to_one() {
        let items = normalize_items(&descriptors(json!([
            { "name": "a", "cantidad": "7" },
            { "name": "b", "cantidad": 2.9 },
            { "name": "c", "cantidad": " 3.5 " },
            { "name": "d", "cantidad": "lots" },
            { "name": "e", "cantidad": true },
            { "name": "f", "cantidad": null }
        ])));

        let quantities: Vec<i64> = items.iter().map(|item| item.quantity).collect();
        assert_eq!(quantities, vec![7, 2, 3, 1, 1, 1]);
    }

    #[test]
    fn zero_and_negative_quantities_pass_through() {
        let items = normalize_items(&descriptors(json!([
            { "name": "cement", "cantidad": 0 },
            { "name": "rebar", "cantidad": -2 }
        ])));
        assert_eq!(items, vec![RequestedItem::new("cement", 0), RequestedItem::new("rebar", -2)]);
    }

    #[test]
    fn blank_or_missing_names_are_dropped() {
        let items = normalize_items(&descriptors(json!([
            { "name": "   ", "cantidad": 2 },
            { "cantidad": 2 },
            { "name": 42 },
            "cement",
            { "name": "rebar" }
        ])));
        assert_eq!(items, vec![RequestedItem::new("rebar", 1)]);
    }

    #[test]
    fn duplicates_are_not_merged() {
        let items = normalize_items(&descriptors(json!([{ "name": "cement" }, { "name": "Cement" }])));
        assert_eq!(items, vec![RequestedItem::new("cement", 1), RequestedItem::new("cement", 1)]);
    }
}
