pub mod client;
pub mod error;
pub mod fetcher;
pub mod images;
pub mod node;
pub mod offers;
pub mod queue;
pub mod store;

pub use client::PageClient;
pub use error::ScraperError;
pub use fetcher::{fetch_manifest, fetch_pending, FetchReport};
pub use images::{save_image_manifest, scrape_image_urls};
pub use node::{NodeQuery, Query};
pub use offers::{parse_offer_page, save_offers, scrape_offers};
pub use queue::{ClaimedManifest, PendingQueue};
