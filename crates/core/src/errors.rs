use std::path::PathBuf;

use thiserror::Error;

/// Rejections of a single quote request. None of them is fatal to the process.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error(
        "no items to quote: send a non-empty `items` list or a `mensaje` naming products in the catalog"
    )]
    Empty,
    #[error("quote amount for `{product}` (quantity {quantity}) exceeds the supported range")]
    AmountOverflow { product: String, quantity: i64 },
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("could not read catalog file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog data must be a JSON array of products")]
    NotASequence,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn bad_request(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into(), correlation_id: correlation_id.into() }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. } => message,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. } => correlation_id,
        }
    }
}

impl RequestError {
    /// Stable machine-readable class for CLI output and logs.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Empty => "request_empty",
            Self::AmountOverflow { .. } => "amount_overflow",
        }
    }

    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        InterfaceError::bad_request(self.to_string(), correlation_id)
    }
}
