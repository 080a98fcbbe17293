//! Site content blocks: hero banner, header, footer, and the call-to-action
//! strip. Each lives in its own collection and at most one document per
//! collection is active at a time; creating or activating one deactivates
//! the rest.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::default_true;

/// Homepage hero banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub background_image: String,
    #[serde(default)]
    pub trust_badge_text: String,
    #[serde(default)]
    pub popular_destinations: Vec<String>,
    #[serde(default)]
    pub cta_button_text: String,
    #[serde(default)]
    pub secondary_button_text: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl HeroContent {
    /// Served when the collection holds no active document yet.
    pub fn default_content() -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            title: "Your Next Adventure Awaits".to_string(),
            subtitle: "Unforgettable journeys, handpicked for you".to_string(),
            description: "Explore, dream, and discover with us.".to_string(),
            background_image: "/uploads/hero.jpg".to_string(),
            trust_badge_text: "Trusted by 5000+ travelers".to_string(),
            popular_destinations: vec![
                "Himachal Pradesh".to_string(),
                "Uttarakhand".to_string(),
                "Bali".to_string(),
                "Europe".to_string(),
                "Goa".to_string(),
            ],
            cta_button_text: "Explore Packages".to_string(),
            secondary_button_text: "Watch Video".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Call-to-action strip shown above the footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaContent {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub background_image: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub button_link: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl CtaContent {
    pub fn default_content() -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            title: "Ready to Start Your Journey?".to_string(),
            description: "Join thousands of happy travelers who have discovered \
                          amazing destinations with us. Your next adventure is \
                          just a click away!"
                .to_string(),
            background_image: "/uploads/cta.jpg".to_string(),
            button_text: "Start Your Journey".to_string(),
            button_link: "/packages".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustIndicator {
    pub icon: String,
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub name: String,
    #[serde(default)]
    pub submenu: Vec<NavLink>,
}

/// Site header: contact strip, trust badges, navigation tree, logo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderContent {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub trust_indicators: Vec<TrustIndicator>,
    #[serde(default)]
    pub navigation: Vec<NavItem>,
    pub logo: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub whatsapp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLinks {
    #[serde(default)]
    pub international: Vec<NavLink>,
    #[serde(default)]
    pub india: Vec<NavLink>,
    #[serde(default)]
    pub trekking: Vec<NavLink>,
    #[serde(default)]
    pub quick_links: Vec<NavLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaLink {
    pub platform: String,
    pub url: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Site footer: company block, link columns, social icons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterContent {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub company_info: CompanyInfo,
    #[serde(default)]
    pub links: FooterLinks,
    #[serde(default)]
    pub social_media: Vec<SocialMediaLink>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl FooterContent {
    /// Seeded on first read when the collection is empty.
    pub fn default_content() -> Self {
        let link = |name: &str| NavLink { name: name.to_string(), href: "#".to_string() };
        let social = |platform: &str| SocialMediaLink {
            platform: platform.to_string(),
            url: "#".to_string(),
            is_active: true,
        };
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            company_info: CompanyInfo {
                name: "Voyage Travel".to_string(),
                description: "Your trusted partner for unforgettable travel \
                              experiences, from adventure to luxury."
                    .to_string(),
                address: "48, Rajpur Road, Dehradun, Uttarakhand 248001".to_string(),
                phone: "+91 0000000000".to_string(),
                email: "info@example.com".to_string(),
                whatsapp: "+91 0000000000".to_string(),
            },
            links: FooterLinks {
                international: ["Singapore", "Thailand", "Europe", "Dubai", "Maldives"]
                    .map(link)
                    .to_vec(),
                india: ["Rajasthan", "Kerala", "Himachal", "Uttarakhand", "Goa"]
                    .map(link)
                    .to_vec(),
                trekking: ["Kedarnath", "Valley of Flowers", "Roopkund"].map(link).to_vec(),
                quick_links: ["Home", "About Us", "Contact", "Blog"].map(link).to_vec(),
            },
            social_media: ["facebook", "instagram", "youtube"].map(social).to_vec(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
