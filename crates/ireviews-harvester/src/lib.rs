pub mod client;
pub mod error;
pub mod feed;
pub mod harvester;
pub mod normalize;
pub mod pagination;
pub mod rate_limit;
pub mod types;

pub use client::{FeedClient, PageOutcome};
pub use error::HarvestError;
pub use feed::{parse_page, FeedLink, FeedPage, RawEntry};
pub use harvester::{HarvestEvent, HarvestStream, Harvester};
