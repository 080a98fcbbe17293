use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::category::Category;
use crate::models::common::{default_true, ItineraryDay};
use crate::search::SuggestCandidate;

/// A curated holiday theme ("Honeymoon", "Trekking", ...) stored in the
/// `holidayTypes` collection and referenced by packages and destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayType {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub image: String,
    pub duration: String,
    /// Display string like "2-12 travellers".
    pub travelers: String,
    pub badge: String,
    /// Display price; free text ("from ₹25,000").
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    /// Position in the homepage carousel.
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl HolidayType {
    pub fn suggest_candidate(&self) -> SuggestCandidate {
        SuggestCandidate {
            id: self.id,
            title: self.title.clone(),
            description: Some(self.description.clone()),
            short_description: Some(self.short_description.clone()),
            destination: None,
            country: self.country.clone(),
            state: self.state.clone(),
            price: None,
            duration: Some(self.duration.clone()),
            category: self.category.map(|c| c.as_str().to_string()),
            slug: Some(self.slug.clone()),
            image: Some(self.image.clone()),
        }
    }
}
