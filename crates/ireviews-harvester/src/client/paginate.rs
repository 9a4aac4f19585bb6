//! Per-country pagination loop for `FeedClient`.

use ireviews_core::{CountryResult, FeedFormat};

use crate::error::HarvestError;
use crate::feed::{parse_page, FeedPage};
use crate::harvester::Emitter;
use crate::normalize::normalize_entry;
use crate::pagination::first_page_url;
use crate::rate_limit::RequestPacer;

use super::{FeedClient, PageOutcome};

impl FeedClient {
    /// Harvests every page of reviews for one country.
    ///
    /// Starts at page 1 and follows the feed's next-page links. The loop ends
    /// without error when the feed answers 403, a page normalizes to zero
    /// reviews, or the page advertises no (or an empty) next link. Reviews
    /// from earlier pages are always kept.
    ///
    /// Each review is handed to `emitter` as soon as it is normalized, before
    /// the next entry is processed.
    ///
    /// # Errors
    ///
    /// Any fetch, parse, or normalization failure is returned immediately and
    /// aborts the whole harvest, as does [`HarvestError::StreamClosed`] once a
    /// streaming consumer is gone. Returns [`HarvestError::PaginationLimit`] if
    /// the country needs more than the configured page budget.
    pub(crate) async fn harvest_country(
        &self,
        store_id: &str,
        country_code: &str,
        format: FeedFormat,
        pacer: &mut RequestPacer,
        emitter: &Emitter<'_>,
    ) -> Result<CountryResult, HarvestError> {
        let mut result = CountryResult::new(country_code);
        let mut url = first_page_url(&self.base_url, country_code, store_id, format);
        let mut page = 0usize;

        loop {
            page += 1;
            if page > self.max_pages {
                return Err(HarvestError::PaginationLimit {
                    country_code: country_code.to_owned(),
                    max_pages: self.max_pages,
                });
            }

            emitter.ensure_open()?;
            pacer.wait().await;
            tracing::debug!(country_code, page, url = %url, "fetching review page");

            let body = match self.fetch_page(&url).await? {
                PageOutcome::Success(body) => body,
                PageOutcome::SoftStop => {
                    tracing::debug!(country_code, page, "soft stop, no more pages");
                    break;
                }
            };

            let FeedPage { next_link, entries } = parse_page(format, &body, &url)?;

            let page_count = entries.len();
            for entry in entries {
                let review = normalize_entry(entry, country_code)?;
                emitter.emit(&review).await?;
                result.push(review);
            }
            tracing::debug!(country_code, page, reviews = page_count, "page normalized");

            if page_count == 0 {
                break;
            }

            match next_link {
                Some(next) if !next.is_empty() => url = next,
                _ => break,
            }
        }

        tracing::info!(
            country_code,
            pages = page,
            count = result.count(),
            "country harvest finished"
        );
        Ok(result)
    }
}
