//! Centralized category and tour-type vocabularies shared by packages,
//! destinations, and holiday types. Keeping them in one place prevents the
//! per-controller drift these lists are prone to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog category. Stored as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Beach Holidays")]
    BeachHolidays,
    #[serde(rename = "Adventure Tours")]
    AdventureTours,
    #[serde(rename = "Trending Destinations")]
    TrendingDestinations,
    #[serde(rename = "Premium Packages")]
    PremiumPackages,
    #[serde(rename = "Popular Packages")]
    PopularPackages,
    #[serde(rename = "Fixed Departure")]
    FixedDeparture,
    #[serde(rename = "Mountain Treks")]
    MountainTreks,
    #[serde(rename = "Wildlife Safaris")]
    WildlifeSafaris,
    #[serde(rename = "Pilgrimage Tours")]
    PilgrimageTours,
    #[serde(rename = "Honeymoon Packages")]
    HoneymoonPackages,
    #[serde(rename = "Family Tours")]
    FamilyTours,
    #[serde(rename = "Luxury Tours")]
    LuxuryTours,
    #[serde(rename = "Budget Tours")]
    BudgetTours,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::BeachHolidays,
        Category::AdventureTours,
        Category::TrendingDestinations,
        Category::PremiumPackages,
        Category::PopularPackages,
        Category::FixedDeparture,
        Category::MountainTreks,
        Category::WildlifeSafaris,
        Category::PilgrimageTours,
        Category::HoneymoonPackages,
        Category::FamilyTours,
        Category::LuxuryTours,
        Category::BudgetTours,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BeachHolidays => "Beach Holidays",
            Category::AdventureTours => "Adventure Tours",
            Category::TrendingDestinations => "Trending Destinations",
            Category::PremiumPackages => "Premium Packages",
            Category::PopularPackages => "Popular Packages",
            Category::FixedDeparture => "Fixed Departure",
            Category::MountainTreks => "Mountain Treks",
            Category::WildlifeSafaris => "Wildlife Safaris",
            Category::PilgrimageTours => "Pilgrimage Tours",
            Category::HoneymoonPackages => "Honeymoon Packages",
            Category::FamilyTours => "Family Tours",
            Category::LuxuryTours => "Luxury Tours",
            Category::BudgetTours => "Budget Tours",
        }
    }

    pub fn parse(value: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    /// Human-readable list for validation error messages.
    pub fn expected_values() -> String {
        Category::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// International vs. domestic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourType {
    International,
    India,
}

impl TourType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TourType::International => "international",
            TourType::India => "india",
        }
    }

    pub fn parse(value: &str) -> Option<TourType> {
        match value {
            "international" => Some(TourType::International),
            "india" => Some(TourType::India),
            _ => None,
        }
    }
}

impl fmt::Display for TourType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
