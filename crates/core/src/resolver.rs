use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::quote::{Quote, QuoteLine, RequestedItem, UnmatchedItem};
use crate::errors::RequestError;
use crate::extract::ItemExtractor;
use crate::normalize::normalize_items;
use crate::request::QuoteRequest;

/// Resolves requests against one immutable catalog snapshot. Cheap to share
/// behind an `Arc`; holds no mutable state.
#[derive(Clone, Debug)]
pub struct QuoteResolver {
    catalog: Arc<Catalog>,
    extractor: ItemExtractor,
}

impl QuoteResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let extractor = ItemExtractor::new(catalog.keys());
        Self { catalog, extractor }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn requested_items(&self, request: &QuoteRequest) -> Vec<RequestedItem> {
        match request {
            QuoteRequest::Structured(descriptors) => normalize_items(descriptors),
            QuoteRequest::FreeText(message) => self.extractor.extract(message),
        }
    }

    /// Prices each item that the catalog knows and lists the rest as
    /// unmatched. Input order is preserved in both lists. Fails instead of
    /// panicking when a subtotal or the total leaves the `Decimal` range.
    pub fn resolve(
        &self,
        items: &[RequestedItem],
        source_message: Option<&str>,
    ) -> Result<Quote, RequestError> {
        let mut lines = Vec::new();
        let mut unmatched = Vec::new();
        let mut total = Decimal::ZERO;

        for item in items {
            match self.catalog.get(&item.normalized_name) {
                Some(product) => {
                    let overflow = || RequestError::AmountOverflow {
                        product: item.normalized_name.clone(),
                        quantity: item.quantity,
                    };
                    let subtotal = product
                        .unit_price
                        .checked_mul(Decimal::from(item.quantity))
                        .ok_or_else(overflow)?;
                    total = total.checked_add(subtotal).ok_or_else(overflow)?;
                    lines.push(QuoteLine {
                        code: product.code.clone(),
                        name: product.name.clone(),
                        quantity: item.quantity,
                        unit_price: product.unit_price,
                        subtotal,
                    });
                }
                None => unmatched.push(UnmatchedItem {
                    name: item.normalized_name.clone(),
                    quantity: item.quantity,
                }),
            }
        }

        Ok(Quote { lines, total, unmatched, source_message: source_message.map(str::to_string) })
    }

    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote, RequestError> {
        let items = self.requested_items(request);
        if items.is_empty() {
            return Err(RequestError::Empty);
        }

        let quote = self.resolve(&items, request.source_message())?;
        debug!(
            event_name = "quote.resolved",
            mode = request.mode(),
            requested = items.len(),
            lines = quote.lines.len(),
            unmatched = quote.unmatched.len(),
            "quote resolved against catalog"
        );
        Ok(quote)
    }
}
