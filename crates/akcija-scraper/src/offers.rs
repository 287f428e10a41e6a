//! Offer extraction from the retailer's promotions listing page.
//!
//! The page is partitioned into sections (elements whose `id` starts with
//! `offer_list`), each holding `card-body` cards. Every card maps to one
//! [`OfferRecord`] through a fixed set of lookups; a missing element leaves
//! its field empty and is never an error.

use std::path::{Path, PathBuf};

use akcija_core::naming::offers_file_name;
use akcija_core::{OfferRecord, OfferSection};
use scraper::Html;

use crate::client::PageClient;
use crate::error::ScraperError;
use crate::node::{NodeQuery, Query};
use crate::store::write_json;

const SECTION: Query = Query::any().with_id_prefix("offer_list");
const SECTION_TITLE: Query = Query::tag("h2");
const CARD: Query = Query::any().with_class("card-body");

const HEADING: Query = Query::tag("h4");
const DATE_WRAPPER: Query = Query::tag("p").with_class("offer-dateTo-wrapper");
const DATE_TEXT: Query = Query::tag("span");
const RESTRICTION_ICON: Query = Query::tag("img").with_class("x-icon");
const DISCOUNT: Query = Query::tag("div").with_class("discount");
const LOYALTY_BADGE: Query = Query::tag("img").with_attr("title", "AČIŪ");

const PRICE_INTEGER: Query = Query::tag("div").with_class("price-eur");
const PRICE_FRACTION: Query = Query::tag("span").with_class("price-cents");
const PRICE_OLD: Query = Query::tag("div").with_class("price-old");

/// Splits a card heading on its last comma into `(name, amount)`.
///
/// `"Pienas, 2,5 %, 1 l"` becomes `("Pienas, 2,5 %", "1 l")`. Without a comma
/// the whole heading is the name and the amount is empty.
#[must_use]
pub fn split_name_and_amount(heading: &str) -> (String, String) {
    match heading.rsplit_once(',') {
        Some((name, amount)) => (name.trim().to_owned(), amount.trim().to_owned()),
        None => (heading.trim().to_owned(), String::new()),
    }
}

/// Maps one card to an [`OfferRecord`].
pub fn extract_card<N: NodeQuery>(card: &N) -> OfferRecord {
    let (name, amount) = card
        .find_first(&HEADING)
        .map(|h| split_name_and_amount(&h.stripped_text()))
        .unwrap_or_default();

    let valid_until = card
        .find_first(&DATE_WRAPPER)
        .and_then(|wrapper| wrapper.find_first(&DATE_TEXT))
        .map(|span| span.stripped_text())
        .unwrap_or_default();

    let limited_to = card
        .find_first(&RESTRICTION_ICON)
        .and_then(|icon| icon.attr("alt").map(str::to_owned))
        .unwrap_or_default();

    let discount = card
        .find_first(&DISCOUNT)
        .map(|d| d.stripped_text())
        .unwrap_or_default();

    let requires_loyalty_card = card.find_first(&LOYALTY_BADGE).is_some();

    let (price, original_price) = if requires_loyalty_card {
        loyalty_prices(card)
    } else {
        regular_prices(card)
    };

    OfferRecord {
        name,
        amount,
        valid_until,
        discount,
        price,
        original_price,
        requires_loyalty_card,
        limited_to,
    }
}

fn format_price<N: NodeQuery>(integer: &N, fraction: &N) -> String {
    format!("{},{}", integer.stripped_text(), fraction.stripped_text())
}

/// `(price, original_price)` for a card without the loyalty badge.
fn regular_prices<N: NodeQuery>(card: &N) -> (String, String) {
    let price = match (card.find_first(&PRICE_INTEGER), card.find_first(&PRICE_FRACTION)) {
        (Some(integer), Some(fraction)) => format_price(&integer, &fraction),
        _ => String::new(),
    };
    let original_price = card
        .find_first(&PRICE_OLD)
        .map(|old| old.stripped_text())
        .unwrap_or_default();
    (price, original_price)
}

/// `(price, original_price)` for a loyalty card.
///
/// The first integer/fraction pair in document order becomes the original
/// price and the second becomes the price. Pairing is positional only; fewer
/// than two of either part leaves both prices empty.
fn loyalty_prices<N: NodeQuery>(card: &N) -> (String, String) {
    let integers = card.find_all(&PRICE_INTEGER);
    let fractions = card.find_all(&PRICE_FRACTION);
    if integers.len() < 2 || fractions.len() < 2 {
        return (String::new(), String::new());
    }
    let original_price = format_price(&integers[0], &fractions[0]);
    let price = format_price(&integers[1], &fractions[1]);
    (price, original_price)
}

/// Collects every offer section under `root`, in document order.
///
/// A section with neither a title element nor any card is dropped; one with
/// a title but no cards is kept with an empty item list.
pub fn extract_sections<N: NodeQuery>(root: &N) -> Vec<OfferSection> {
    root.find_all(&SECTION)
        .into_iter()
        .filter_map(|section| {
            let title = section.find_first(&SECTION_TITLE);
            let items: Vec<OfferRecord> = section
                .find_all(&CARD)
                .iter()
                .map(extract_card)
                .collect();

            if title.is_none() && items.is_empty() {
                return None;
            }

            Some(OfferSection {
                section_id: section.attr("id").unwrap_or_default().to_owned(),
                title: title.map(|t| t.full_text()).unwrap_or_default(),
                items,
            })
        })
        .collect()
}

/// Parses an offers page and extracts its sections.
#[must_use]
pub fn parse_offer_page(html: &str) -> Vec<OfferSection> {
    let document = Html::parse_document(html);
    extract_sections(&document.root_element())
}

/// Fetches `url` and extracts its offer sections.
///
/// Transport failures and non-2xx responses are logged and yield an empty
/// list; they are never propagated.
pub async fn scrape_offers(client: &PageClient, url: &str) -> Vec<OfferSection> {
    let body = match client.fetch_html(url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "failed to fetch offers page");
            return Vec::new();
        }
    };

    let sections = parse_offer_page(&body);
    let item_count: usize = sections.iter().map(|s| s.items.len()).sum();
    tracing::info!(
        url = %url,
        sections = sections.len(),
        items = item_count,
        "extracted offers"
    );
    sections
}

/// Writes `sections` to `{dir}/scraped_data_{timestamp}.json`.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] or [`ScraperError::Json`] if the file cannot
/// be written.
pub fn save_offers(
    dir: &Path,
    sections: &[OfferSection],
    timestamp: &str,
) -> Result<PathBuf, ScraperError> {
    let path = dir.join(offers_file_name(timestamp));
    write_json(&path, sections, "offer sections")?;
    Ok(path)
}

#[cfg(test)]
#[path = "offers_test.rs"]
mod tests;
