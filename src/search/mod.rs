//! Type-ahead suggestion pipeline: candidate projection, weighted ranking,
//! response shaping, and graceful degradation on store failure.

pub mod ranker;

use bson::oid::ObjectId;
use serde::Serialize;

use crate::db::destinations::DestinationRepository;
use crate::db::holiday_types::HolidayTypeRepository;
use crate::db::packages::PackageRepository;
use crate::images;
use self::ranker::{
    rank, RankProfile, ScoreField, HOLIDAY_TYPE_SUGGEST, PACKAGE_SUGGEST, TRAVEL_SUGGEST,
};

/// Queries shorter than this (after trimming) short-circuit to an empty
/// suggestion list without touching the store.
pub const MIN_QUERY_LEN: usize = 2;

/// Projection of an entity row used for matching and ranking.
///
/// Everything except the primary title is optional; the candidate filter
/// already guarantees the title is present and non-empty. Created
/// transiently per request, never persisted.
#[derive(Debug, Clone, Default)]
pub struct SuggestCandidate {
    pub id: ObjectId,
    pub title: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub destination: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
}

impl SuggestCandidate {
    pub(crate) fn field(&self, field: ScoreField) -> Option<&str> {
        match field {
            ScoreField::Title => Some(self.title.as_str()),
            ScoreField::Description => self.description.as_deref(),
            ScoreField::ShortDescription => self.short_description.as_deref(),
            ScoreField::Destination => self.destination.as_deref(),
            ScoreField::Country => self.country.as_deref(),
            ScoreField::State => self.state.as_deref(),
        }
    }
}

/// One suggestion row as sent to the dropdown UI.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionItem {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub price: f64,
    pub duration: String,
    pub category: String,
    pub slug: String,
    pub image: Option<String>,
}

impl SuggestionItem {
    fn from_candidate(c: SuggestCandidate, base_url: Option<&str>) -> Self {
        Self {
            id: c.id.to_hex(),
            title: c.title,
            destination: c.destination.unwrap_or_else(|| "Unknown Destination".to_string()),
            price: c.price.unwrap_or(0.0),
            duration: c.duration.unwrap_or_else(|| "N/A".to_string()),
            category: c.category.unwrap_or_default(),
            slug: c.slug.unwrap_or_default(),
            image: c.image.map(|img| images::absolutize(&img, base_url)),
        }
    }
}

/// Suggestion endpoint payload. Always served with HTTP 200; a store
/// failure degrades to an empty list plus a diagnostic string.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<SuggestionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SuggestResponse {
    pub fn empty() -> Self {
        Self { suggestions: Vec::new(), error: None }
    }

    fn unavailable() -> Self {
        Self {
            suggestions: Vec::new(),
            error: Some("Search temporarily unavailable".to_string()),
        }
    }
}

/// Holiday type search keeps its historical response shape.
#[derive(Debug, Serialize)]
pub struct HolidayTypeSuggestResponse {
    #[serde(rename = "holidayTypes")]
    pub holiday_types: Vec<HolidayTypeSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayTypeSuggestion {
    pub id: String,
    pub title: String,
    pub short_description: Option<String>,
    pub slug: String,
    pub image: Option<String>,
}

fn trimmed_query(raw: &str) -> Option<&str> {
    let query = raw.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        None
    } else {
        Some(query)
    }
}

/// Package suggest dropdown: top 5 ranked matches.
pub async fn suggest_packages(
    repo: &dyn PackageRepository,
    raw_query: &str,
    base_url: Option<&str>,
) -> SuggestResponse {
    let Some(query) = trimmed_query(raw_query) else {
        return SuggestResponse::empty();
    };

    match repo.suggest_candidates(query, PACKAGE_SUGGEST.fetch_limit).await {
        Ok(candidates) => SuggestResponse {
            suggestions: to_items(candidates, query, &PACKAGE_SUGGEST, base_url),
            error: None,
        },
        Err(e) => {
            tracing::warn!("package suggest lookup failed: {e}");
            SuggestResponse::unavailable()
        }
    }
}

/// Holiday type search box: top 5 ranked matches.
pub async fn suggest_holiday_types(
    repo: &dyn HolidayTypeRepository,
    raw_query: &str,
    base_url: Option<&str>,
) -> HolidayTypeSuggestResponse {
    let Some(query) = trimmed_query(raw_query) else {
        return HolidayTypeSuggestResponse { holiday_types: Vec::new(), error: None };
    };

    match repo.suggest_candidates(query, HOLIDAY_TYPE_SUGGEST.fetch_limit).await {
        Ok(candidates) => {
            let ranked = rank(candidates, query, &HOLIDAY_TYPE_SUGGEST);
            HolidayTypeSuggestResponse {
                holiday_types: ranked
                    .into_iter()
                    .map(|(c, _)| HolidayTypeSuggestion {
                        id: c.id.to_hex(),
                        title: c.title,
                        short_description: c.short_description,
                        slug: c.slug.unwrap_or_default(),
                        image: c.image.map(|img| images::absolutize(&img, base_url)),
                    })
                    .collect(),
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("holiday type suggest lookup failed: {e}");
            HolidayTypeSuggestResponse {
                holiday_types: Vec::new(),
                error: Some("Search temporarily unavailable".to_string()),
            }
        }
    }
}

/// Combined travel search bar: destination matches are prepended before
/// package matches, and the merged list is capped at the travel profile's
/// result cap (12).
///
/// A failure in one source degrades to the other's results; only a total
/// failure produces the diagnostic error string.
pub async fn suggest_travel(
    destinations: &dyn DestinationRepository,
    packages: &dyn PackageRepository,
    raw_query: &str,
    base_url: Option<&str>,
) -> SuggestResponse {
    let Some(query) = trimmed_query(raw_query) else {
        return SuggestResponse::empty();
    };

    let dest_result = destinations
        .suggest_candidates(query, TRAVEL_SUGGEST.fetch_limit)
        .await;
    let pkg_result = packages
        .suggest_candidates(query, TRAVEL_SUGGEST.fetch_limit)
        .await;

    if dest_result.is_err() && pkg_result.is_err() {
        tracing::warn!("travel suggest: both lookups failed");
        return SuggestResponse::unavailable();
    }

    let mut suggestions = Vec::new();
    match dest_result {
        Ok(candidates) => {
            suggestions.extend(to_items(candidates, query, &TRAVEL_SUGGEST, base_url));
        }
        Err(e) => tracing::warn!("travel suggest destination lookup failed: {e}"),
    }
    match pkg_result {
        Ok(candidates) => {
            suggestions.extend(to_items(candidates, query, &TRAVEL_SUGGEST, base_url));
        }
        Err(e) => tracing::warn!("travel suggest package lookup failed: {e}"),
    }
    suggestions.truncate(TRAVEL_SUGGEST.result_cap);

    SuggestResponse { suggestions, error: None }
}

fn to_items(
    candidates: Vec<SuggestCandidate>,
    query: &str,
    profile: &RankProfile,
    base_url: Option<&str>,
) -> Vec<SuggestionItem> {
    rank(candidates, query, profile)
        .into_iter()
        .map(|(c, _)| SuggestionItem::from_candidate(c, base_url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bson::oid::ObjectId;

    use crate::db::packages::{PackageFilter, PackageRepository};
    use crate::db::Page;
    use crate::error::AppError;
    use crate::models::package::TourPackage;
    use crate::slug::SlugLookup;

    /// Every store call fails; suggest must degrade, and queries below the
    /// length floor must never reach the store at all (a store hit would
    /// surface as the degraded error response).
    struct BrokenRepo;

    fn boom<T>() -> Result<T, AppError> {
        Err(AppError::Database("connection reset".to_string()))
    }

    #[async_trait]
    impl SlugLookup for BrokenRepo {
        async fn slug_exists(&self, _: &str, _: Option<ObjectId>) -> Result<bool, AppError> {
            boom()
        }
    }

    #[async_trait]
    impl PackageRepository for BrokenRepo {
        async fn list(&self, _: &PackageFilter, _: Page) -> Result<Vec<TourPackage>, AppError> {
            boom()
        }

        async fn count(&self, _: &PackageFilter) -> Result<u64, AppError> {
            boom()
        }

        async fn find_by_id(&self, _: ObjectId) -> Result<Option<TourPackage>, AppError> {
            boom()
        }

        async fn find_by_slug(&self, _: &str) -> Result<Option<TourPackage>, AppError> {
            boom()
        }

        async fn insert(&self, _: &TourPackage) -> Result<(), AppError> {
            boom()
        }

        async fn replace(&self, _: &TourPackage) -> Result<bool, AppError> {
            boom()
        }

        async fn delete(&self, _: ObjectId) -> Result<bool, AppError> {
            boom()
        }

        async fn distinct_field(&self, _: &str) -> Result<Vec<String>, AppError> {
            boom()
        }

        async fn suggest_candidates(
            &self,
            _: &str,
            _: i64,
        ) -> Result<Vec<SuggestCandidate>, AppError> {
            boom()
        }
    }

    #[tokio::test]
    async fn store_failure_degrades_to_empty_with_diagnostic() {
        let response = suggest_packages(&BrokenRepo, "goa", None).await;
        assert!(response.suggestions.is_empty());
        assert_eq!(response.error.as_deref(), Some("Search temporarily unavailable"));
    }

    #[tokio::test]
    async fn short_queries_never_touch_the_store() {
        for query in ["", "a", "  g  "] {
            let response = suggest_packages(&BrokenRepo, query, None).await;
            assert!(response.suggestions.is_empty());
            assert!(response.error.is_none(), "store was consulted for {query:?}");
        }
    }
}
