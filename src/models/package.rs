use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::category::{Category, TourType};
use crate::models::common::{default_true, ItineraryDay, SeoMeta};
use crate::search::SuggestCandidate;

/// A bookable tour package stored in the `packages` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPackage {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    /// URL-safe identifier, unique within the collection.
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Percentage discount, 0–100.
    #[serde(default)]
    pub discount: f64,
    pub duration: String,
    pub destination: String,
    pub category: Category,
    /// Optional reference into the holiday types collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_type: Option<ObjectId>,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub tour_type: TourType,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(flatten)]
    pub seo: SeoMeta,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl TourPackage {
    /// Effective price after applying the percentage discount.
    pub fn discounted_price(&self) -> f64 {
        if self.discount > 0.0 {
            self.price - (self.price * self.discount / 100.0)
        } else {
            self.price
        }
    }

    /// Search projection used by the suggest endpoints.
    pub fn suggest_candidate(&self) -> SuggestCandidate {
        SuggestCandidate {
            id: self.id,
            title: self.title.clone(),
            description: Some(self.description.clone()),
            short_description: Some(self.short_description.clone()),
            destination: Some(self.destination.clone()),
            country: Some(self.country.clone()),
            state: self.state.clone(),
            price: Some(self.price),
            duration: Some(self.duration.clone()),
            category: Some(self.category.as_str().to_string()),
            slug: Some(self.slug.clone()),
            image: self.images.first().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TourPackage {
        TourPackage {
            id: ObjectId::new(),
            title: "Manali Adventure".to_string(),
            slug: "manali-adventure".to_string(),
            description: "Six days across the Kullu valley.".to_string(),
            short_description: "Kullu valley circuit".to_string(),
            price: 20000.0,
            original_price: None,
            discount: 10.0,
            duration: "6D/5N".to_string(),
            destination: "Manali".to_string(),
            category: Category::AdventureTours,
            holiday_type: None,
            country: "India".to_string(),
            state: Some("Himachal Pradesh".to_string()),
            tour_type: TourType::India,
            images: vec!["manali.jpg".to_string()],
            highlights: vec![],
            itinerary: vec![],
            inclusions: vec![],
            exclusions: vec![],
            terms: vec![],
            rating: 4.5,
            is_active: true,
            is_featured: false,
            seo: SeoMeta::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn discounted_price_applies_percentage() {
        let pkg = sample();
        assert_eq!(pkg.discounted_price(), 18000.0);
    }

    #[test]
    fn zero_discount_returns_list_price() {
        let mut pkg = sample();
        pkg.discount = 0.0;
        assert_eq!(pkg.discounted_price(), 20000.0);
    }

    #[test]
    fn candidate_carries_first_image() {
        let candidate = sample().suggest_candidate();
        assert_eq!(candidate.image.as_deref(), Some("manali.jpg"));
        assert_eq!(candidate.category.as_deref(), Some("Adventure Tours"));
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("shortDescription").is_some());
        assert!(value.get("isActive").is_some());
        assert!(value.get("tourType").is_some());
        assert!(value.get("short_description").is_none());
    }
}
