use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use bson::oid::ObjectId;
use chrono::Utc;
use serde::Deserialize;

use crate::api::{parse_object_id, require, MessageResponse};
use crate::error::AppError;
use crate::images;
use crate::models::category::Category;
use crate::models::common::ItineraryDay;
use crate::models::holiday_type::HolidayType;
use crate::search::{self, HolidayTypeSuggestResponse};
use crate::slug::{require_free_slug, slugify, unique_slug};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_holiday_types).post(create_holiday_type))
        .route("/admin", get(list_holiday_types_admin))
        .route("/search", get(search_holiday_types))
        .route("/slug/{slug}", get(holiday_type_by_slug))
        .route("/{id}/toggle-status", patch(toggle_status))
        .route("/{id}/toggle-featured", patch(toggle_featured))
        .route("/{id}/order", patch(update_order))
        .route(
            "/{id}",
            get(holiday_type_by_id)
                .put(update_holiday_type)
                .delete(delete_holiday_type),
        )
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderPayload {
    pub order: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HolidayTypePayload {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub image: Option<String>,
    pub duration: Option<String>,
    pub travelers: Option<String>,
    pub badge: Option<String>,
    pub price: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub tour_type: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub order: Option<i32>,
    pub highlights: Option<Vec<String>>,
    pub inclusions: Option<Vec<String>>,
    pub exclusions: Option<Vec<String>>,
    pub itinerary: Option<Vec<ItineraryDay>>,
}

fn parse_category(value: &str) -> Result<Category, AppError> {
    Category::parse(value).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid category. Must be one of: {}",
            Category::expected_values()
        ))
    })
}

fn transform(mut holiday_type: HolidayType, base_url: Option<&str>) -> HolidayType {
    holiday_type.image = images::absolutize(&holiday_type.image, base_url);
    holiday_type
}

async fn list_holiday_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<HolidayType>>, AppError> {
    let holiday_types = state.holiday_types.list_active().await?;
    Ok(Json(
        holiday_types
            .into_iter()
            .map(|ht| transform(ht, state.base_url()))
            .collect(),
    ))
}

async fn list_holiday_types_admin(
    State(state): State<AppState>,
) -> Result<Json<Vec<HolidayType>>, AppError> {
    let holiday_types = state.holiday_types.list_all().await?;
    Ok(Json(
        holiday_types
            .into_iter()
            .map(|ht| transform(ht, state.base_url()))
            .collect(),
    ))
}

async fn search_holiday_types(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<HolidayTypeSuggestResponse> {
    let q = query.q.unwrap_or_default();
    Json(search::suggest_holiday_types(state.holiday_types.as_ref(), &q, state.base_url()).await)
}

async fn holiday_type_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<HolidayType>, AppError> {
    let holiday_type = state
        .holiday_types
        .find_by_slug(&slug)
        .await?
        .filter(|ht| ht.is_active)
        .ok_or_else(|| AppError::NotFound("Holiday type not found".to_string()))?;
    Ok(Json(transform(holiday_type, state.base_url())))
}

async fn holiday_type_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HolidayType>, AppError> {
    let id = parse_object_id(&id)?;
    let holiday_type = state
        .holiday_types
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Holiday type not found".to_string()))?;
    Ok(Json(transform(holiday_type, state.base_url())))
}

async fn create_holiday_type(
    State(state): State<AppState>,
    Json(payload): Json<HolidayTypePayload>,
) -> Result<(StatusCode, Json<HolidayType>), AppError> {
    let title = require(&payload.title, "title")?.to_string();
    let description = require(&payload.description, "description")?.to_string();
    let short_description = require(&payload.short_description, "shortDescription")?.to_string();
    let image = require(&payload.image, "image")?.to_string();
    let duration = require(&payload.duration, "duration")?.to_string();
    let travelers = require(&payload.travelers, "travelers")?.to_string();
    let badge = require(&payload.badge, "badge")?.to_string();
    let price = require(&payload.price, "price")?.to_string();

    let category = payload
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(parse_category)
        .transpose()?;

    let id = ObjectId::new();
    let slug = match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            require_free_slug(state.holiday_types.as_ref(), explicit, None).await?;
            explicit.to_string()
        }
        None => {
            unique_slug(state.holiday_types.as_ref(), &slugify(&title), &id.to_hex(), None).await?
        }
    };

    let now = Utc::now();
    let holiday_type = HolidayType {
        id,
        title,
        slug,
        description,
        short_description,
        image,
        duration,
        travelers,
        badge,
        price,
        country: payload.country.clone().filter(|s| !s.is_empty()),
        state: payload.state.clone().filter(|s| !s.is_empty()),
        tour_type: payload.tour_type.clone().filter(|s| !s.is_empty()),
        category,
        is_active: payload.is_active.unwrap_or(true),
        is_featured: payload.is_featured.unwrap_or(false),
        order: payload.order.unwrap_or(0),
        highlights: payload.highlights.clone().unwrap_or_default(),
        inclusions: payload.inclusions.clone().unwrap_or_default(),
        exclusions: payload.exclusions.clone().unwrap_or_default(),
        itinerary: payload.itinerary.clone().unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    state.holiday_types.insert(&holiday_type).await?;

    Ok((StatusCode::CREATED, Json(transform(holiday_type, state.base_url()))))
}

async fn update_holiday_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<HolidayTypePayload>,
) -> Result<Json<HolidayType>, AppError> {
    let id = parse_object_id(&id)?;
    let mut holiday_type = state
        .holiday_types
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Holiday type not found".to_string()))?;

    if let Some(ref category) = payload.category {
        holiday_type.category = if category.is_empty() {
            None
        } else {
            Some(parse_category(category)?)
        };
    }

    let title_changed = matches!(
        payload.title.as_deref(),
        Some(new_title) if new_title != holiday_type.title
    );
    if let Some(ref title) = payload.title {
        if !title.trim().is_empty() {
            holiday_type.title = title.clone();
        }
    }

    match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            require_free_slug(state.holiday_types.as_ref(), explicit, Some(id)).await?;
            holiday_type.slug = explicit.to_string();
        }
        None if title_changed => {
            holiday_type.slug = unique_slug(
                state.holiday_types.as_ref(),
                &slugify(&holiday_type.title),
                &id.to_hex(),
                Some(id),
            )
            .await?;
        }
        None => {}
    }

    if let Some(ref description) = payload.description {
        holiday_type.description = description.clone();
    }
    if let Some(ref short_description) = payload.short_description {
        holiday_type.short_description = short_description.clone();
    }
    if let Some(ref image) = payload.image {
        holiday_type.image = image.clone();
    }
    if let Some(ref duration) = payload.duration {
        holiday_type.duration = duration.clone();
    }
    if let Some(ref travelers) = payload.travelers {
        holiday_type.travelers = travelers.clone();
    }
    if let Some(ref badge) = payload.badge {
        holiday_type.badge = badge.clone();
    }
    if let Some(ref price) = payload.price {
        holiday_type.price = price.clone();
    }
    if let Some(ref country) = payload.country {
        holiday_type.country = Some(country.clone()).filter(|s| !s.is_empty());
    }
    if let Some(ref state_name) = payload.state {
        holiday_type.state = Some(state_name.clone()).filter(|s| !s.is_empty());
    }
    if let Some(ref tour_type) = payload.tour_type {
        holiday_type.tour_type = Some(tour_type.clone()).filter(|s| !s.is_empty());
    }
    if let Some(is_active) = payload.is_active {
        holiday_type.is_active = is_active;
    }
    if let Some(is_featured) = payload.is_featured {
        holiday_type.is_featured = is_featured;
    }
    if let Some(order) = payload.order {
        holiday_type.order = order;
    }
    if let Some(ref highlights) = payload.highlights {
        holiday_type.highlights = highlights.clone();
    }
    if let Some(ref inclusions) = payload.inclusions {
        holiday_type.inclusions = inclusions.clone();
    }
    if let Some(ref exclusions) = payload.exclusions {
        holiday_type.exclusions = exclusions.clone();
    }
    if let Some(ref itinerary) = payload.itinerary {
        holiday_type.itinerary = itinerary.clone();
    }
    holiday_type.updated_at = Utc::now();

    if !state.holiday_types.replace(&holiday_type).await? {
        return Err(AppError::NotFound("Holiday type not found".to_string()));
    }

    Ok(Json(transform(holiday_type, state.base_url())))
}

async fn delete_holiday_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.holiday_types.delete(id).await? {
        return Err(AppError::NotFound("Holiday type not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Holiday type deleted successfully")))
}

async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HolidayType>, AppError> {
    toggle(&state, &id, |ht| ht.is_active = !ht.is_active).await
}

async fn toggle_featured(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HolidayType>, AppError> {
    toggle(&state, &id, |ht| ht.is_featured = !ht.is_featured).await
}

async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPayload>,
) -> Result<Json<HolidayType>, AppError> {
    toggle(&state, &id, move |ht| ht.order = payload.order).await
}

async fn toggle(
    state: &AppState,
    id: &str,
    mutate: impl FnOnce(&mut HolidayType),
) -> Result<Json<HolidayType>, AppError> {
    let id = parse_object_id(id)?;
    let mut holiday_type = state
        .holiday_types
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Holiday type not found".to_string()))?;

    mutate(&mut holiday_type);
    holiday_type.updated_at = Utc::now();
    state.holiday_types.replace(&holiday_type).await?;

    Ok(Json(transform(holiday_type, state.base_url())))
}
