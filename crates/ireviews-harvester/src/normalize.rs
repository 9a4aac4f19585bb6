//! Normalization from raw feed entries to [`ireviews_core::Review`].

use chrono::DateTime;
use ireviews_core::Review;

use crate::error::HarvestError;
use crate::feed::RawEntry;
use crate::types::{MarkupEntry, ObjectEntry};

/// Normalizes one raw entry of either format, tagging it with `country_code`.
///
/// # Errors
///
/// Propagates the error of the format-specific normalizer.
pub fn normalize_entry(entry: RawEntry, country_code: &str) -> Result<Review, HarvestError> {
    match entry {
        RawEntry::Markup(entry) => normalize_markup_entry(entry, country_code),
        RawEntry::Object(value) => normalize_object_entry(value, country_code),
    }
}

/// Normalizes an XML entry. The `updated` timestamp becomes epoch seconds.
///
/// # Errors
///
/// Returns [`HarvestError::Normalization`] when a vote count or the rating is
/// not an integer, or `updated` is not an RFC 3339 timestamp.
pub fn normalize_markup_entry(
    entry: MarkupEntry,
    country_code: &str,
) -> Result<Review, HarvestError> {
    let rating = parse_count(&entry.id, "rating", &entry.rating)?;
    let helpful_vote_count = parse_count(&entry.id, "voteSum", &entry.vote_sum)?;
    let total_vote_count = parse_count(&entry.id, "voteCount", &entry.vote_count)?;
    let updated = parse_timestamp(&entry.id, &entry.updated)?;

    Ok(Review {
        id: entry.id,
        title: entry.title,
        author: entry.author,
        content: entry.content,
        rating,
        helpful_vote_count,
        total_vote_count,
        application_version: entry.version,
        updated: Some(updated),
        country_code: country_code.to_owned(),
    })
}

/// Normalizes a JSON entry. JSON reviews carry no timestamp, so `updated`
/// is always `None`.
///
/// # Errors
///
/// Returns [`HarvestError::Deserialize`] when the entry lacks a review field
/// and [`HarvestError::Normalization`] when a numeric label is not an integer.
pub fn normalize_object_entry(
    value: serde_json::Value,
    country_code: &str,
) -> Result<Review, HarvestError> {
    let entry: ObjectEntry =
        serde_json::from_value(value).map_err(|e| HarvestError::Deserialize {
            context: format!("review entry for {country_code}"),
            source: e,
        })?;

    let id = entry.id.label;
    let rating = parse_count(&id, "im:rating", &entry.rating.label)?;
    let helpful_vote_count = parse_count(&id, "im:voteSum", &entry.vote_sum.label)?;
    let total_vote_count = parse_count(&id, "im:voteCount", &entry.vote_count.label)?;

    Ok(Review {
        id,
        title: entry.title.label,
        author: entry.author.name.label,
        content: entry.content.label,
        rating,
        helpful_vote_count,
        total_vote_count,
        application_version: entry.version.label,
        updated: None,
        country_code: country_code.to_owned(),
    })
}

/// Parses an integer field, tolerating surrounding whitespace.
fn parse_count(review_id: &str, field: &str, raw: &str) -> Result<i64, HarvestError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| HarvestError::Normalization {
            review_id: review_id.to_owned(),
            reason: format!("{field} \"{raw}\" is not an integer: {e}"),
        })
}

fn parse_timestamp(review_id: &str, raw: &str) -> Result<i64, HarvestError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|ts| ts.timestamp())
        .map_err(|e| HarvestError::Normalization {
            review_id: review_id.to_owned(),
            reason: format!("updated \"{raw}\" is not an RFC 3339 timestamp: {e}"),
        })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
