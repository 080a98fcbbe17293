use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::category::{Category, TourType};
use crate::models::common::{default_true, ItineraryDay};
use crate::search::SuggestCandidate;

/// A destination page stored in the `destinations` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub image: String,
    /// Free-text place line shown under the name ("North Goa, India").
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_type: Option<ObjectId>,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub tour_type: TourType,
    pub category: Category,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_trending: bool,
    /// Bumped on every single-entity read; feeds the trending sort.
    #[serde(default)]
    pub visit_count: i64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Destination {
    /// Search projection for the combined travel suggest; the destination's
    /// `location` line plays the role a package's destination field plays.
    pub fn suggest_candidate(&self) -> SuggestCandidate {
        SuggestCandidate {
            id: self.id,
            title: self.name.clone(),
            description: Some(self.description.clone()),
            short_description: Some(self.short_description.clone()),
            destination: Some(self.location.clone()),
            country: Some(self.country.clone()),
            state: self.state.clone(),
            price: self.price,
            duration: self.duration.clone(),
            category: Some(self.category.as_str().to_string()),
            slug: Some(self.slug.clone()),
            image: Some(self.image.clone()),
        }
    }
}
