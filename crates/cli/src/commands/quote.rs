use std::path::PathBuf;
use std::sync::Arc;

use cotiza_core::{ItemDescriptor, QuoteRequest, QuoteResolver, RequestError};

use crate::commands::{load_catalog, CommandResult};

pub fn run(mensaje: Option<&str>, items: &[String], catalog_path: Option<PathBuf>) -> CommandResult {
    let request = match build_request(mensaje, items) {
        Some(request) => request,
        None => return empty_request(),
    };

    let catalog = match load_catalog("quote", catalog_path) {
        Ok(catalog) => catalog,
        Err(failure) => return failure,
    };

    match QuoteResolver::new(Arc::new(catalog)).quote(&request) {
        Ok(quote) => CommandResult::json("quote", &quote),
        Err(error) => CommandResult::failure("quote", error.class(), error.to_string(), 2),
    }
}

/// `NAME:QTY` when the part after the last colon is an integer, otherwise the
/// whole argument is the name and the quantity is left unset.
pub fn parse_item(raw: &str) -> ItemDescriptor {
    match raw.rsplit_once(':') {
        Some((name, quantity)) => match quantity.trim().parse::<i64>() {
            Ok(quantity) => ItemDescriptor::new(name, Some(quantity)),
            Err(_) => ItemDescriptor::new(raw, None),
        },
        None => ItemDescriptor::new(raw, None),
    }
}

fn build_request(mensaje: Option<&str>, items: &[String]) -> Option<QuoteRequest> {
    if !items.is_empty() {
        return Some(QuoteRequest::Structured(items.iter().map(|item| parse_item(item)).collect()));
    }

    mensaje
        .filter(|message| !message.trim().is_empty())
        .map(|message| QuoteRequest::FreeText(message.to_string()))
}

fn empty_request() -> CommandResult {
    let error = RequestError::Empty;
    CommandResult::failure("quote", error.class(), error.to_string(), 2)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::parse_item;

    #[test]
    fn item_argument_with_quantity_suffix() {
        let item = parse_item("cemento gris:12");
        assert_eq!(item.name, Some(Value::from("cemento gris")));
        assert_eq!(item.cantidad, Some(Value::from(12)));
    }

    #[test]
    fn item_argument_without_numeric_suffix_keeps_full_name() {
        let item = parse_item("tubo 1:2 pulgadas");
        assert_eq!(item.name, Some(Value::from("tubo 1:2 pulgadas")));
        assert_eq!(item.cantidad, None);

        let item = parse_item("varilla");
        assert_eq!(item.name, Some(Value::from("varilla")));
        assert_eq!(item.cantidad, None);
    }
}
