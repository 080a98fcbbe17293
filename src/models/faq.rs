use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::default_true;

fn default_order() -> i32 {
    1
}

/// A frequently asked question attached to a location page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub question: String,
    pub answer: String,
    /// Lowercase location key the FAQ belongs to.
    pub location: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_order")]
    pub order: i32,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}
