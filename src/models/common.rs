//! Embedded document types shared across catalog entities.

use serde::{Deserialize, Serialize};

pub(crate) fn default_true() -> bool {
    true
}

/// One day of a tour itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Per-entity SEO metadata, flattened into the owning document so the
/// stored field names stay `seoTitle`, `seoOgImage`, etc.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seo_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_twitter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_twitter_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_twitter_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_canonical_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_robots_index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_robots_follow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_publisher: Option<String>,
}

impl SeoMeta {
    /// Overlays the fields present in `patch` onto `self`; absent fields
    /// keep their stored values.
    pub fn apply_patch(&mut self, patch: &SeoMeta) {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(if patch.$field.is_some() {
                    self.$field = patch.$field.clone();
                })*
            };
        }
        overlay!(
            seo_title,
            seo_description,
            seo_og_title,
            seo_og_description,
            seo_og_image,
            seo_twitter_title,
            seo_twitter_description,
            seo_twitter_image,
            seo_canonical_url,
            seo_robots_index,
            seo_robots_follow,
            seo_author,
            seo_publisher,
        );
        if !patch.seo_keywords.is_empty() {
            self.seo_keywords = patch.seo_keywords.clone();
        }
    }
}
