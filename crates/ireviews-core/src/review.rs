//! Canonical review records shared by both feed formats.

use serde::{Deserialize, Serialize};

/// One customer review, identical in shape regardless of the wire format it
/// was harvested from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub title: String,
    pub author: String,
    pub content: String,
    pub rating: i64,
    pub helpful_vote_count: i64,
    pub total_vote_count: i64,
    pub application_version: String,
    /// Unix epoch seconds. Only the XML feed carries a timestamp per entry;
    /// always `None` for reviews harvested from the JSON feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    /// Two-letter code of the storefront this review was harvested under.
    pub country_code: String,
}

/// All reviews harvested for a single country, in discovery order.
///
/// `count` always equals `items.len()`: the fields are private and the only
/// way to add a review is [`CountryResult::push`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryResult {
    country_code: String,
    count: usize,
    items: Vec<Review>,
}

impl CountryResult {
    #[must_use]
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            count: 0,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, review: Review) {
        self.items.push(review);
        self.count = self.items.len();
    }

    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn items(&self) -> &[Review] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Review> {
        self.items
    }
}

/// One [`CountryResult`] per requested country, in the order the caller
/// supplied the country codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HarvestResult {
    countries: Vec<CountryResult>,
}

impl HarvestResult {
    pub fn push(&mut self, country: CountryResult) {
        self.countries.push(country);
    }

    #[must_use]
    pub fn countries(&self) -> &[CountryResult] {
        &self.countries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Total number of reviews across all countries.
    #[must_use]
    pub fn total_reviews(&self) -> usize {
        self.countries.iter().map(CountryResult::count).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountryResult> {
        self.countries.iter()
    }
}

impl<'a> IntoIterator for &'a HarvestResult {
    type Item = &'a CountryResult;
    type IntoIter = std::slice::Iter<'a, CountryResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.countries.iter()
    }
}

impl IntoIterator for HarvestResult {
    type Item = CountryResult;
    type IntoIter = std::vec::IntoIter<CountryResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.countries.into_iter()
    }
}
