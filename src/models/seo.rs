use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_canonical() -> String {
    "/".to_string()
}

fn default_robots() -> String {
    "index,follow".to_string()
}

/// Per-page SEO settings, keyed by the lowercase page identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSettings {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Page key, unique and lowercase ("homepage", "packages", ...).
    pub page: String,
    /// ≤ 60 characters.
    pub title: String,
    /// ≤ 160 characters.
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default = "default_canonical")]
    pub canonical: String,
    #[serde(default = "default_robots")]
    pub robots: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub last_updated: DateTime<Utc>,
}

impl SeoSettings {
    /// Built-in defaults for the homepage, served when nothing is stored.
    pub fn homepage_default() -> Self {
        Self {
            id: ObjectId::new(),
            page: "homepage".to_string(),
            title: "Voyage Travel - Your Trusted Travel Partner".to_string(),
            description: "Customized international and domestic tour packages, \
                          trekking adventures, and unforgettable travel experiences."
                .to_string(),
            keywords: vec![
                "travel agency".to_string(),
                "international tours".to_string(),
                "India tour packages".to_string(),
                "trekking adventures".to_string(),
                "vacation packages".to_string(),
            ],
            og_image: Some("/uploads/hero.jpg".to_string()),
            canonical: "/".to_string(),
            robots: "index,follow".to_string(),
            last_updated: Utc::now(),
        }
    }
}
