//! Promotional offer records produced by the offers page extractor.
//!
//! Field names follow Rust conventions; the serialized keys keep the names
//! downstream consumers of `scraped_data_*.json` already read (`time`,
//! `og_price`, `needCard`, `limitedTo`).

use serde::{Deserialize, Serialize};

/// One promotional item card.
///
/// Prices are kept as `"<integer>,<fraction>"` text rather than numbers so the
/// site's locale formatting survives untouched. Every field defaults to empty
/// (or `false`) when the card lacks the element it is read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub name: String,

    /// Quantity/unit text split off the heading's last comma (e.g. `"1 kg"`).
    pub amount: String,

    /// Free-text validity label, e.g. `"iki 10-20"`.
    #[serde(rename = "time")]
    pub valid_until: String,

    pub discount: String,

    pub price: String,

    #[serde(rename = "og_price")]
    pub original_price: String,

    /// `true` when the card carries the loyalty-program badge; in that case
    /// both prices come from the second pair of price elements on the card.
    #[serde(rename = "needCard")]
    pub requires_loyalty_card: bool,

    /// Restriction label taken from the restriction icon's `alt` text.
    #[serde(rename = "limitedTo")]
    pub limited_to: String,
}

/// A titled group of offer cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferSection {
    pub section_id: String,
    pub title: String,
    pub items: Vec<OfferRecord>,
}
