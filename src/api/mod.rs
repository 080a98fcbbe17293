//! HTTP layer: one handler module per resource, nested under `/api`.

pub mod blogs;
pub mod content;
pub mod destinations;
pub mod errors;
pub mod faqs;
pub mod fixed_departures;
pub mod holiday_types;
pub mod locations;
pub mod packages;
pub mod search;
pub mod seo;
pub mod testimonials;

use axum::Router;
use bson::oid::ObjectId;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: i64,
    /// Total number of pages, not items.
    pub total: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total_items: u64) -> Self {
        let limit = limit.max(1);
        let total_items = total_items as i64;
        Self {
            current: page,
            total: (total_items + limit - 1) / limit,
            has_next: page * limit < total_items,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest("Invalid id".to_string()))
}

/// Presence check for required create-payload fields; whitespace-only
/// values count as missing.
pub(crate) fn require<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{name} is required")))
}

/// Builds the full API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/packages", packages::routes())
        .nest("/api/destinations", destinations::routes())
        .nest("/api/fixed-departures", fixed_departures::routes())
        .nest("/api/holiday-types", holiday_types::routes())
        .nest("/api/blogs", blogs::routes())
        .nest("/api/testimonials", testimonials::routes())
        .nest("/api/content", content::routes())
        .nest("/api/seo", seo::routes())
        .nest("/api/faqs", faqs::routes())
        .nest("/api/locations", locations::routes())
        .nest("/api/search", search::routes())
        .with_state(state)
}
