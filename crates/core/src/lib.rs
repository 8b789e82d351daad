pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod normalize;
pub mod request;
pub mod resolver;

pub use catalog::{Catalog, ProductDescriptor};
pub use domain::product::{ProductCode, ProductRecord};
pub use domain::quote::{Quote, QuoteLine, RequestedItem, UnmatchedItem};
pub use errors::{CatalogLoadError, InterfaceError, RequestError};
pub use extract::ItemExtractor;
pub use normalize::{normalize_items, ItemDescriptor};
pub use request::QuoteRequest;
pub use resolver::QuoteResolver;
