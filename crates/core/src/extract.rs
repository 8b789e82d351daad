//! Free-text item extraction.
//!
//! Every catalog product is probed independently against the lowercased
//! message with three tiers, first hit wins:
//!
//! 1. a number before the name, optionally separated by unit or packaging
//!    words (`"5 bolsas de cemento"`, `"3 units cement"`);
//! 2. a number right after the name (`"cemento 4"`);
//! 3. a bare mention of the name, which counts as quantity 1.
//!
//! Matching is substring based, so a product name that is contained in a
//! longer word also matches there (`"cement"` inside `"cemented"`). That is
//! accepted behavior and pinned by tests.

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::quote::RequestedItem;

/// Words allowed between a quantity and the product name. Longer forms come
/// first so the alternation prefers them.
pub const UNIT_TOKENS: &[&str] = &[
    "unidades", "unidad", "units", "unit", "piezas", "pieza", "pieces", "piece", "pcs", "kilos",
    "kilo", "kg", "bolsas", "bolsa", "bags", "bag", "sacos", "saco", "cajas", "caja", "boxes",
    "box", "de", "of",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatchTier {
    QuantityBefore,
    QuantityAfter,
    BareMention,
}

#[derive(Clone, Debug)]
struct ProductMatcher {
    name: String,
    quantity_before: Option<Regex>,
    quantity_after: Option<Regex>,
}

impl ProductMatcher {
    fn new(name: &str) -> Self {
        let escaped = regex::escape(name);
        let units = UNIT_TOKENS.join("|");

        Self {
            name: name.to_string(),
            quantity_before: compile(name, &format!(r"([0-9]+)\s*(?:(?:{units})\s*)*{escaped}")),
            quantity_after: compile(name, &format!(r"{escaped}\s*([0-9]+)")),
        }
    }

    fn probe(&self, text: &str) -> Option<(MatchTier, i64)> {
        if let Some(quantity) = self.quantity_before.as_ref().and_then(|re| first_quantity(re, text))
        {
            return Some((MatchTier::QuantityBefore, quantity));
        }
        if let Some(quantity) = self.quantity_after.as_ref().and_then(|re| first_quantity(re, text))
        {
            return Some((MatchTier::QuantityAfter, quantity));
        }
        text.contains(self.name.as_str()).then_some((MatchTier::BareMention, 1))
    }
}

/// Precompiled matchers for one catalog snapshot.
#[derive(Clone, Debug, Default)]
pub struct ItemExtractor {
    matchers: Vec<ProductMatcher>,
}

impl ItemExtractor {
    /// Builds matchers for the given normalized product names, in the order
    /// they are supplied. Output order of [`ItemExtractor::extract`] follows it.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self { matchers: names.into_iter().map(ProductMatcher::new).collect() }
    }

    /// Returns at most one item per product. The caller's text is not modified.
    pub fn extract(&self, text: &str) -> Vec<RequestedItem> {
        let lowered = text.to_lowercase();

        self.matchers
            .iter()
            .filter_map(|matcher| {
                let (tier, quantity) = matcher.probe(&lowered)?;
                debug!(
                    event_name = "quote.extract.match",
                    product = %matcher.name,
                    tier = ?tier,
                    quantity,
                    "product mention found in message"
                );
                Some(RequestedItem::new(matcher.name.clone(), quantity))
            })
            .collect()
    }
}

fn compile(name: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(error) => {
            warn!(
                event_name = "quote.extract.pattern_failed",
                product = %name,
                error = %error,
                "quantity pattern could not be compiled; only bare mentions will match"
            );
            None
        }
    }
}

// A digit run too large for i64 does not count as a quantity; later matches
// of the same tier are still considered.
fn first_quantity(regex: &Regex, text: &str) -> Option<i64> {
    regex
        .captures_iter(text)
        .find_map(|captures| captures.get(1).and_then(|digits| digits.as_str().parse().ok()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::ItemExtractor;
    use crate::domain::quote::RequestedItem;

    fn extractor(names: &[&str]) -> ItemExtractor {
        ItemExtractor::new(names.iter().copied())
    }

    #[test]
    fn quantity_before_name_is_extracted() {
        let items = extractor(&["cement", "rebar"]).extract("I need 5 cement and 2 rebar");
        assert_eq!(items, vec![RequestedItem::new("cement", 5), RequestedItem::new("rebar", 2)]);
    }

    #[test]
    fn unit_words_may_separate_quantity_and_name() {
        let extractor = extractor(&["cemento", "varilla", "arena"]);
        let items =
            extractor.extract("Quiero 10 bolsas de cemento, 4 piezas varilla y 3 kg arena por favor");

        assert_eq!(
            items,
            vec![
                RequestedItem::new("cemento", 10),
                RequestedItem::new("varilla", 4),
                RequestedItem::new("arena", 3),
            ]
        );
    }

    #[test]
    fn quantity_after_name_is_used_when_nothing_precedes() {
        let items = extractor(&["cement"]).extract("cement 7 please");
        assert_eq!(items, vec![RequestedItem::new("cement", 7)]);

        let items = extractor(&["cement"]).extract("cement12");
        assert_eq!(items, vec![RequestedItem::new("cement", 12)]);
    }

    #[test]
    fn quantity_before_name_wins_over_quantity_after() {
        let items = extractor(&["cement"]).extract("cement 9 or maybe 5 cement");
        assert_eq!(items, vec![RequestedItem::new("cement", 5)]);
    }

    #[test]
    fn bare_mention_defaults_to_one() {
        let items = extractor(&["cement"]).extract("do you sell cement?");
        assert_eq!(items, vec![RequestedItem::new("cement", 1)]);
    }

    #[test]
    fn unmentioned_products_are_left_out() {
        let items = extractor(&["cement", "rebar"]).extract("give me some paint");
        assert!(items.is_empty());
    }

    #[test]
    fn scanning_is_case_insensitive_and_leaves_input_untouched() {
        let message = String::from("Need 3 CEMENT");
        let items = extractor(&["cement"]).extract(&message);

        assert_eq!(items, vec![RequestedItem::new("cement", 3)]);
        assert_eq!(message, "Need 3 CEMENT");
    }

    #[test]
    fn each_product_is_reported_once() {
        let items = extractor(&["cement", "rebar"])
            .extract("2 cement, 3 cement, rebar, cement 4, rebar 8 and more cement");

        let names: HashSet<_> = items.iter().map(|item| item.normalized_name.as_str()).collect();
        assert_eq!(names.len(), items.len());
        assert_eq!(items, vec![RequestedItem::new("cement", 2), RequestedItem::new("rebar", 8)]);
    }

    #[test]
    fn products_are_matched_independently() {
        // "rebar" falls back to its own tiers regardless of how "cement" matched.
        let items = extractor(&["cement", "rebar"]).extract("5 cement plus some rebar");
        assert_eq!(items, vec![RequestedItem::new("cement", 5), RequestedItem::new("rebar", 1)]);
    }

    #[test]
    fn output_follows_catalog_order_not_message_order() {
        let items = extractor(&["rebar", "cement"]).extract("5 cement and 2 rebar");
        assert_eq!(items, vec![RequestedItem::new("rebar", 2), RequestedItem::new("cement", 5)]);
    }

    #[test]
    fn substring_collisions_match_inside_longer_words() {
        let items = extractor(&["cement"]).extract("the wall is already cemented");
        assert_eq!(items, vec![RequestedItem::new("cement", 1)]);

        let items = extractor(&["tub", "tubo"]).extract("2 tubo");
        assert_eq!(items, vec![RequestedItem::new("tub", 2), RequestedItem::new("tubo", 2)]);
    }

    #[test]
    fn regex_metacharacters_in_names_are_literal() {
        let items = extractor(&["pvc 1/2\" (elbow)", "a.b"]).extract("4 pvc 1/2\" (elbow) and axb");
        assert_eq!(items, vec![RequestedItem::new("pvc 1/2\" (elbow)", 4)]);
    }

    #[test]
    fn oversized_numbers_fall_through_to_next_tier() {
        let items = extractor(&["cement"]).extract("99999999999999999999999 cement 6");
        assert_eq!(items, vec![RequestedItem::new("cement", 6)]);
    }

    #[test]
    fn empty_catalog_extracts_nothing() {
        assert!(ItemExtractor::default().extract("5 cement").is_empty());
    }
}
