use serde_json::Value;

use crate::errors::RequestError;
use crate::normalize::ItemDescriptor;

/// A quote request after boundary validation. The resolver never sees raw
/// payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum QuoteRequest {
    Structured(Vec<ItemDescriptor>),
    FreeText(String),
}

impl QuoteRequest {
    /// Classifies a raw payload. A non-empty `items` list takes precedence
    /// and any `mensaje` next to it is ignored.
    pub fn from_value(payload: &Value) -> Result<Self, RequestError> {
        let Value::Object(fields) = payload else {
            return Err(RequestError::Empty);
        };

        if let Some(Value::Array(items)) = fields.get("items") {
            if !items.is_empty() {
                return Ok(Self::Structured(items.iter().map(ItemDescriptor::from_value).collect()));
            }
        }

        match fields.get("mensaje") {
            Some(Value::String(message)) if !message.trim().is_empty() => {
                Ok(Self::FreeText(message.clone()))
            }
            _ => Err(RequestError::Empty),
        }
    }

    pub fn source_message(&self) -> Option<&str> {
        match self {
            Self::FreeText(message) => Some(message),
            Self::Structured(_) => None,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Structured(_) => "structured",
            Self::FreeText(_) => "free_text",
        }
    }
}
