use std::fmt;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::{default_true, ItineraryDay};

/// Lifecycle status of a fixed departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartureStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl DepartureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepartureStatus::Upcoming => "upcoming",
            DepartureStatus::Ongoing => "ongoing",
            DepartureStatus::Completed => "completed",
            DepartureStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<DepartureStatus> {
        match value {
            "upcoming" => Some(DepartureStatus::Upcoming),
            "ongoing" => Some(DepartureStatus::Ongoing),
            "completed" => Some(DepartureStatus::Completed),
            "cancelled" => Some(DepartureStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for DepartureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group tour with a fixed calendar slot and limited seats, stored in
/// the `fixedDepartures` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedDeparture {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub discount: f64,
    pub duration: String,
    pub destination: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub departure_date: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub return_date: DateTime<Utc>,
    pub available_seats: i32,
    pub total_seats: i32,
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
    pub status: DepartureStatus,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl FixedDeparture {
    /// Share of seats already booked, 0–100.
    pub fn booking_percentage(&self) -> f64 {
        if self.total_seats <= 0 {
            return 0.0;
        }
        f64::from(self.total_seats - self.available_seats) / f64::from(self.total_seats) * 100.0
    }
}
