//! Handlers for the single-active site content blocks (hero, CTA, header,
//! footer).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use bson::oid::ObjectId;
use chrono::Utc;
use serde::Deserialize;

use crate::api::{parse_object_id, require, MessageResponse};
use crate::error::AppError;
use crate::images;
use crate::models::content::{
    CompanyInfo, ContactInfo, CtaContent, FooterContent, FooterLinks, HeaderContent, HeroContent,
    NavItem, SocialMediaLink, TrustIndicator,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hero", get(get_hero).post(create_hero))
        .route("/hero/{id}", axum::routing::put(update_hero).delete(delete_hero))
        .route("/cta", get(get_cta).post(create_cta))
        .route("/cta/{id}", axum::routing::put(update_cta).delete(delete_cta))
        .route("/header", get(get_header).post(create_header))
        .route("/header/all", get(all_headers))
        .route(
            "/header/{id}",
            axum::routing::put(update_header).delete(delete_header),
        )
        .route("/footer", get(get_footer).post(create_footer))
        .route("/footer/all", get(all_footers))
        .route("/footer/{id}/toggle-status", patch(toggle_footer_status))
        .route(
            "/footer/{id}",
            axum::routing::put(update_footer).delete(delete_footer),
        )
}

// ---- hero ----

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroPayload {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub background_image: Option<String>,
    pub trust_badge_text: Option<String>,
    pub popular_destinations: Option<Vec<String>>,
    pub cta_button_text: Option<String>,
    pub secondary_button_text: Option<String>,
}

fn transform_hero(mut hero: HeroContent, base_url: Option<&str>) -> HeroContent {
    hero.background_image = images::absolutize(&hero.background_image, base_url);
    hero
}

async fn get_hero(State(state): State<AppState>) -> Result<Json<HeroContent>, AppError> {
    let hero = state
        .hero
        .find_active()
        .await?
        .unwrap_or_else(HeroContent::default_content);
    Ok(Json(transform_hero(hero, state.base_url())))
}

async fn create_hero(
    State(state): State<AppState>,
    Json(payload): Json<HeroPayload>,
) -> Result<(StatusCode, Json<HeroContent>), AppError> {
    let now = Utc::now();
    let hero = HeroContent {
        id: ObjectId::new(),
        title: require(&payload.title, "title")?.to_string(),
        subtitle: require(&payload.subtitle, "subtitle")?.to_string(),
        description: require(&payload.description, "description")?.to_string(),
        background_image: require(&payload.background_image, "backgroundImage")?.to_string(),
        trust_badge_text: payload.trust_badge_text.clone().unwrap_or_default(),
        popular_destinations: payload.popular_destinations.clone().unwrap_or_default(),
        cta_button_text: payload
            .cta_button_text
            .clone()
            .unwrap_or_else(|| "Explore Packages".to_string()),
        secondary_button_text: payload
            .secondary_button_text
            .clone()
            .unwrap_or_else(|| "Watch Video".to_string()),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    state.hero.insert_as_active(&hero).await?;
    Ok((StatusCode::CREATED, Json(transform_hero(hero, state.base_url()))))
}

async fn update_hero(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<HeroPayload>,
) -> Result<Json<HeroContent>, AppError> {
    let id = parse_object_id(&id)?;
    let mut hero = state
        .hero
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Hero content not found".to_string()))?;

    if let Some(ref title) = payload.title {
        hero.title = title.clone();
    }
    if let Some(ref subtitle) = payload.subtitle {
        hero.subtitle = subtitle.clone();
    }
    if let Some(ref description) = payload.description {
        hero.description = description.clone();
    }
    if let Some(ref background_image) = payload.background_image {
        hero.background_image = background_image.clone();
    }
    if let Some(ref trust_badge_text) = payload.trust_badge_text {
        hero.trust_badge_text = trust_badge_text.clone();
    }
    if let Some(ref popular_destinations) = payload.popular_destinations {
        hero.popular_destinations = popular_destinations.clone();
    }
    if let Some(ref cta_button_text) = payload.cta_button_text {
        hero.cta_button_text = cta_button_text.clone();
    }
    if let Some(ref secondary_button_text) = payload.secondary_button_text {
        hero.secondary_button_text = secondary_button_text.clone();
    }
    hero.updated_at = Utc::now();

    if !state.hero.replace(&hero).await? {
        return Err(AppError::NotFound("Hero content not found".to_string()));
    }
    Ok(Json(transform_hero(hero, state.base_url())))
}

async fn delete_hero(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.hero.delete(id).await? {
        return Err(AppError::NotFound("Hero content not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Hero content deleted successfully")))
}

// ---- CTA ----

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtaPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub background_image: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
}

fn transform_cta(mut cta: CtaContent, base_url: Option<&str>) -> CtaContent {
    cta.background_image = images::absolutize(&cta.background_image, base_url);
    cta
}

async fn get_cta(State(state): State<AppState>) -> Result<Json<CtaContent>, AppError> {
    let cta = state
        .cta
        .find_active()
        .await?
        .unwrap_or_else(CtaContent::default_content);
    Ok(Json(transform_cta(cta, state.base_url())))
}

async fn create_cta(
    State(state): State<AppState>,
    Json(payload): Json<CtaPayload>,
) -> Result<(StatusCode, Json<CtaContent>), AppError> {
    let now = Utc::now();
    let cta = CtaContent {
        id: ObjectId::new(),
        title: require(&payload.title, "title")?.to_string(),
        description: require(&payload.description, "description")?.to_string(),
        background_image: require(&payload.background_image, "backgroundImage")?.to_string(),
        button_text: payload
            .button_text
            .clone()
            .unwrap_or_else(|| "Start Your Journey".to_string()),
        button_link: payload
            .button_link
            .clone()
            .unwrap_or_else(|| "/packages".to_string()),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    state.cta.insert_as_active(&cta).await?;
    Ok((StatusCode::CREATED, Json(transform_cta(cta, state.base_url()))))
}

async fn update_cta(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CtaPayload>,
) -> Result<Json<CtaContent>, AppError> {
    let id = parse_object_id(&id)?;
    let mut cta = state
        .cta
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("CTA content not found".to_string()))?;

    if let Some(ref title) = payload.title {
        cta.title = title.clone();
    }
    if let Some(ref description) = payload.description {
        cta.description = description.clone();
    }
    if let Some(ref background_image) = payload.background_image {
        cta.background_image = background_image.clone();
    }
    if let Some(ref button_text) = payload.button_text {
        cta.button_text = button_text.clone();
    }
    if let Some(ref button_link) = payload.button_link {
        cta.button_link = button_link.clone();
    }
    cta.updated_at = Utc::now();

    if !state.cta.replace(&cta).await? {
        return Err(AppError::NotFound("CTA content not found".to_string()));
    }
    Ok(Json(transform_cta(cta, state.base_url())))
}

async fn delete_cta(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.cta.delete(id).await? {
        return Err(AppError::NotFound("CTA content not found".to_string()));
    }
    Ok(Json(MessageResponse::new("CTA content deleted successfully")))
}

// ---- header ----

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderPayload {
    pub contact_info: Option<ContactInfo>,
    pub trust_indicators: Option<Vec<TrustIndicator>>,
    pub navigation: Option<Vec<NavItem>>,
    pub logo: Option<String>,
}

fn transform_header(mut header: HeaderContent, base_url: Option<&str>) -> HeaderContent {
    header.logo = images::absolutize(&header.logo, base_url);
    header
}

async fn get_header(State(state): State<AppState>) -> Result<Json<HeaderContent>, AppError> {
    let header = state
        .header
        .find_active()
        .await?
        .ok_or_else(|| AppError::NotFound("No header content found".to_string()))?;
    Ok(Json(transform_header(header, state.base_url())))
}

async fn all_headers(State(state): State<AppState>) -> Result<Json<Vec<HeaderContent>>, AppError> {
    Ok(Json(state.header.list_all().await?))
}

async fn create_header(
    State(state): State<AppState>,
    Json(payload): Json<HeaderPayload>,
) -> Result<(StatusCode, Json<HeaderContent>), AppError> {
    let contact_info = payload
        .contact_info
        .clone()
        .ok_or_else(|| AppError::BadRequest("contactInfo is required".to_string()))?;
    let logo = require(&payload.logo, "logo")?.to_string();

    let now = Utc::now();
    let header = HeaderContent {
        id: ObjectId::new(),
        contact_info,
        trust_indicators: payload.trust_indicators.clone().unwrap_or_default(),
        navigation: payload.navigation.clone().unwrap_or_default(),
        logo,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    state.header.insert_as_active(&header).await?;
    Ok((StatusCode::CREATED, Json(transform_header(header, state.base_url()))))
}

async fn update_header(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<HeaderPayload>,
) -> Result<Json<HeaderContent>, AppError> {
    let id = parse_object_id(&id)?;
    let mut header = state
        .header
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Header content not found".to_string()))?;

    if let Some(ref contact_info) = payload.contact_info {
        header.contact_info = contact_info.clone();
    }
    if let Some(ref trust_indicators) = payload.trust_indicators {
        header.trust_indicators = trust_indicators.clone();
    }
    if let Some(ref navigation) = payload.navigation {
        header.navigation = navigation.clone();
    }
    if let Some(ref logo) = payload.logo {
        header.logo = logo.clone();
    }
    header.updated_at = Utc::now();

    if !state.header.replace(&header).await? {
        return Err(AppError::NotFound("Header content not found".to_string()));
    }
    Ok(Json(transform_header(header, state.base_url())))
}

async fn delete_header(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.header.delete(id).await? {
        return Err(AppError::NotFound("Header content not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Header content deleted successfully")))
}

// ---- footer ----

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterPayload {
    pub company_info: Option<CompanyInfo>,
    pub links: Option<FooterLinks>,
    pub social_media: Option<Vec<SocialMediaLink>>,
    pub is_active: Option<bool>,
}

/// Older admin tooling left duplicate footer rows behind; reads prune them
/// down to the single active document, seeding a default when the
/// collection is empty.
async fn get_footer(State(state): State<AppState>) -> Result<Json<FooterContent>, AppError> {
    let all = state.footer.list_all().await?;
    if all.len() > 1 {
        if let Some(active) = all.iter().find(|f| f.is_active) {
            state.footer.delete_except(active.id).await?;
        } else {
            let mut newest = all[0].clone();
            state.footer.delete_except(newest.id).await?;
            newest.is_active = true;
            state.footer.replace(&newest).await?;
        }
    }

    let footer = match state.footer.find_active().await? {
        Some(footer) => footer,
        None => {
            let default = FooterContent::default_content();
            state.footer.insert_as_active(&default).await?;
            default
        }
    };
    Ok(Json(footer))
}

async fn all_footers(State(state): State<AppState>) -> Result<Json<Vec<FooterContent>>, AppError> {
    Ok(Json(state.footer.list_all().await?))
}

async fn create_footer(
    State(state): State<AppState>,
    Json(payload): Json<FooterPayload>,
) -> Result<(StatusCode, Json<FooterContent>), AppError> {
    let company_info = payload
        .company_info
        .clone()
        .ok_or_else(|| AppError::BadRequest("companyInfo is required".to_string()))?;

    let now = Utc::now();
    let footer = FooterContent {
        id: ObjectId::new(),
        company_info,
        links: payload.links.clone().unwrap_or_default(),
        social_media: payload.social_media.clone().unwrap_or_default(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    state.footer.insert_as_active(&footer).await?;
    Ok((StatusCode::CREATED, Json(footer)))
}

/// Footer updates always re-activate the edited document and remove the
/// rest.
async fn update_footer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FooterPayload>,
) -> Result<Json<FooterContent>, AppError> {
    let id = parse_object_id(&id)?;
    let mut footer = state
        .footer
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Footer content not found.".to_string()))?;

    if let Some(ref company_info) = payload.company_info {
        footer.company_info = company_info.clone();
    }
    if let Some(ref links) = payload.links {
        footer.links = links.clone();
    }
    if let Some(ref social_media) = payload.social_media {
        footer.social_media = social_media.clone();
    }
    footer.is_active = true;
    footer.updated_at = Utc::now();

    if !state.footer.replace(&footer).await? {
        return Err(AppError::NotFound("Footer content not found.".to_string()));
    }
    state.footer.delete_except(id).await?;

    Ok(Json(footer))
}

async fn delete_footer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.footer.delete(id).await? {
        return Err(AppError::NotFound("Footer content not found.".to_string()));
    }
    Ok(Json(MessageResponse::new("Footer content deleted successfully.")))
}

async fn toggle_footer_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FooterContent>, AppError> {
    let id = parse_object_id(&id)?;
    let mut footer = state
        .footer
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Footer content not found.".to_string()))?;

    if !footer.is_active {
        state.footer.deactivate_others(id).await?;
    }
    footer.is_active = !footer.is_active;
    footer.updated_at = Utc::now();
    state.footer.replace(&footer).await?;

    Ok(Json(footer))
}
