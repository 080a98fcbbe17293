use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{parse_object_id, require, MessageResponse};
use crate::db::fixed_departures::FixedDepartureFilter;
use crate::db::Page;
use crate::error::AppError;
use crate::images;
use crate::models::common::ItineraryDay;
use crate::models::fixed_departure::{DepartureStatus, FixedDeparture};
use crate::slug::{require_free_slug, slugify, unique_slug};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fixed_departures).post(create_fixed_departure))
        .route("/featured", get(featured_fixed_departures))
        .route("/search", get(search_fixed_departures))
        .route("/slug/{slug}", get(fixed_departure_by_slug))
        .route("/{id}/toggle-featured", patch(toggle_featured))
        .route("/{id}/toggle-status", patch(toggle_status))
        .route(
            "/{id}",
            get(fixed_departure_by_id)
                .put(update_fixed_departure)
                .delete(delete_fixed_departure),
        )
}

fn default_limit() -> i64 {
    10
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub status: Option<String>,
    pub featured: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub q: Option<String>,
    pub destination: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedDeparturePayload {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub discount: Option<f64>,
    pub duration: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub available_seats: Option<i32>,
    pub total_seats: Option<i32>,
    pub images: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub itinerary: Option<Vec<ItineraryDay>>,
    pub inclusions: Option<Vec<String>>,
    pub exclusions: Option<Vec<String>>,
    pub terms: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub status: Option<String>,
}

/// Historical response shape for the departures listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedDepartureListResponse {
    pub fixed_departures: Vec<FixedDeparture>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: u64,
}

fn parse_status(value: &str) -> Result<DepartureStatus, AppError> {
    DepartureStatus::parse(value).ok_or_else(|| {
        AppError::BadRequest(
            "Invalid status. Must be one of: upcoming, ongoing, completed, cancelled".to_string(),
        )
    })
}

fn transform(mut departure: FixedDeparture, base_url: Option<&str>) -> FixedDeparture {
    images::absolutize_all(&mut departure.images, base_url);
    departure
}

async fn list_fixed_departures(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<FixedDepartureListResponse>, AppError> {
    let filter = FixedDepartureFilter {
        active_only: true,
        status: query.status.as_deref().and_then(DepartureStatus::parse),
        featured: (query.featured.as_deref() == Some("true")).then_some(true),
        ..Default::default()
    };

    let paging = Page::new(query.limit, query.page);
    let departures = state.fixed_departures.list(&filter, paging).await?;
    let total = state.fixed_departures.count(&filter).await?;

    Ok(Json(FixedDepartureListResponse {
        fixed_departures: departures
            .into_iter()
            .map(|d| transform(d, state.base_url()))
            .collect(),
        total_pages: (total as i64 + paging.limit - 1) / paging.limit,
        current_page: paging.page,
        total,
    }))
}

async fn featured_fixed_departures(
    State(state): State<AppState>,
) -> Result<Json<Vec<FixedDeparture>>, AppError> {
    let filter = FixedDepartureFilter {
        active_only: true,
        featured: Some(true),
        ..Default::default()
    };
    let departures = state.fixed_departures.search(&filter, 6).await?;
    Ok(Json(
        departures
            .into_iter()
            .map(|d| transform(d, state.base_url()))
            .collect(),
    ))
}

async fn search_fixed_departures(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<FixedDeparture>>, AppError> {
    let filter = FixedDepartureFilter {
        active_only: true,
        text: query.q.clone().filter(|q| !q.trim().is_empty()),
        destination: query.destination.clone(),
        status: query.status.as_deref().and_then(DepartureStatus::parse),
        min_price: query.min_price,
        max_price: query.max_price,
        ..Default::default()
    };
    let departures = state.fixed_departures.search(&filter, 20).await?;
    Ok(Json(
        departures
            .into_iter()
            .map(|d| transform(d, state.base_url()))
            .collect(),
    ))
}

async fn fixed_departure_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<FixedDeparture>, AppError> {
    let departure = state
        .fixed_departures
        .find_by_slug(&slug)
        .await?
        .filter(|d| d.is_active)
        .ok_or_else(|| AppError::NotFound("Fixed departure not found".to_string()))?;
    Ok(Json(transform(departure, state.base_url())))
}

async fn fixed_departure_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FixedDeparture>, AppError> {
    let id = parse_object_id(&id)?;
    let departure = state
        .fixed_departures
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Fixed departure not found".to_string()))?;
    Ok(Json(transform(departure, state.base_url())))
}

async fn create_fixed_departure(
    State(state): State<AppState>,
    Json(payload): Json<FixedDeparturePayload>,
) -> Result<(StatusCode, Json<FixedDeparture>), AppError> {
    let title = require(&payload.title, "title")?.to_string();
    let description = require(&payload.description, "description")?.to_string();
    let short_description = require(&payload.short_description, "shortDescription")?.to_string();
    let duration = require(&payload.duration, "duration")?.to_string();
    let destination = require(&payload.destination, "destination")?.to_string();

    let price = payload
        .price
        .ok_or_else(|| AppError::BadRequest("price is required".to_string()))?;
    if price < 0.0 {
        return Err(AppError::BadRequest("Price must be a positive number".to_string()));
    }
    let departure_date = payload
        .departure_date
        .ok_or_else(|| AppError::BadRequest("departureDate is required".to_string()))?;
    let return_date = payload
        .return_date
        .ok_or_else(|| AppError::BadRequest("returnDate is required".to_string()))?;
    let total_seats = payload
        .total_seats
        .ok_or_else(|| AppError::BadRequest("totalSeats is required".to_string()))?;
    let available_seats = payload.available_seats.unwrap_or(total_seats);
    if total_seats < 1 || available_seats < 0 || available_seats > total_seats {
        return Err(AppError::BadRequest("Invalid seat configuration".to_string()));
    }

    let status = match payload.status.as_deref().filter(|s| !s.is_empty()) {
        Some(value) => parse_status(value)?,
        None => DepartureStatus::Upcoming,
    };

    let id = ObjectId::new();
    let slug = match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            require_free_slug(state.fixed_departures.as_ref(), explicit, None).await?;
            explicit.to_string()
        }
        None => {
            unique_slug(
                state.fixed_departures.as_ref(),
                &slugify(&title),
                &id.to_hex(),
                None,
            )
            .await?
        }
    };

    let now = Utc::now();
    let departure = FixedDeparture {
        id,
        title,
        slug,
        description,
        short_description,
        price,
        original_price: payload.original_price,
        discount: payload.discount.unwrap_or(0.0),
        duration,
        destination,
        departure_date,
        return_date,
        available_seats,
        total_seats,
        images: payload.images.clone().unwrap_or_default(),
        highlights: payload.highlights.clone().unwrap_or_default(),
        itinerary: payload.itinerary.clone().unwrap_or_default(),
        inclusions: payload.inclusions.clone().unwrap_or_default(),
        exclusions: payload.exclusions.clone().unwrap_or_default(),
        terms: payload.terms.clone().unwrap_or_default(),
        rating: payload.rating.unwrap_or(0.0),
        is_active: payload.is_active.unwrap_or(true),
        is_featured: payload.is_featured.unwrap_or(false),
        status,
        created_at: now,
        updated_at: now,
    };

    state.fixed_departures.insert(&departure).await?;

    Ok((StatusCode::CREATED, Json(transform(departure, state.base_url()))))
}

async fn update_fixed_departure(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FixedDeparturePayload>,
) -> Result<Json<FixedDeparture>, AppError> {
    let id = parse_object_id(&id)?;
    let mut departure = state
        .fixed_departures
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Fixed departure not found".to_string()))?;

    if let Some(ref status) = payload.status {
        departure.status = parse_status(status)?;
    }
    if let Some(price) = payload.price {
        if price < 0.0 {
            return Err(AppError::BadRequest("Price must be a positive number".to_string()));
        }
        departure.price = price;
    }

    let title_changed = matches!(
        payload.title.as_deref(),
        Some(new_title) if new_title != departure.title
    );
    if let Some(ref title) = payload.title {
        if !title.trim().is_empty() {
            departure.title = title.clone();
        }
    }

    match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            require_free_slug(state.fixed_departures.as_ref(), explicit, Some(id)).await?;
            departure.slug = explicit.to_string();
        }
        None if title_changed => {
            departure.slug = unique_slug(
                state.fixed_departures.as_ref(),
                &slugify(&departure.title),
                &id.to_hex(),
                Some(id),
            )
            .await?;
        }
        None => {}
    }

    if let Some(ref description) = payload.description {
        departure.description = description.clone();
    }
    if let Some(ref short_description) = payload.short_description {
        departure.short_description = short_description.clone();
    }
    if let Some(original_price) = payload.original_price {
        departure.original_price = Some(original_price);
    }
    if let Some(discount) = payload.discount {
        departure.discount = discount;
    }
    if let Some(ref duration) = payload.duration {
        departure.duration = duration.clone();
    }
    if let Some(ref destination) = payload.destination {
        departure.destination = destination.clone();
    }
    if let Some(departure_date) = payload.departure_date {
        departure.departure_date = departure_date;
    }
    if let Some(return_date) = payload.return_date {
        departure.return_date = return_date;
    }
    if let Some(available_seats) = payload.available_seats {
        departure.available_seats = available_seats;
    }
    if let Some(total_seats) = payload.total_seats {
        departure.total_seats = total_seats;
    }
    if let Some(ref images) = payload.images {
        departure.images = images.clone();
    }
    if let Some(ref highlights) = payload.highlights {
        departure.highlights = highlights.clone();
    }
    if let Some(ref itinerary) = payload.itinerary {
        departure.itinerary = itinerary.clone();
    }
    if let Some(ref inclusions) = payload.inclusions {
        departure.inclusions = inclusions.clone();
    }
    if let Some(ref exclusions) = payload.exclusions {
        departure.exclusions = exclusions.clone();
    }
    if let Some(ref terms) = payload.terms {
        departure.terms = terms.clone();
    }
    if let Some(rating) = payload.rating {
        departure.rating = rating;
    }
    if let Some(is_active) = payload.is_active {
        departure.is_active = is_active;
    }
    if let Some(is_featured) = payload.is_featured {
        departure.is_featured = is_featured;
    }
    departure.updated_at = Utc::now();

    if !state.fixed_departures.replace(&departure).await? {
        return Err(AppError::NotFound("Fixed departure not found".to_string()));
    }

    Ok(Json(transform(departure, state.base_url())))
}

async fn delete_fixed_departure(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.fixed_departures.delete(id).await? {
        return Err(AppError::NotFound("Fixed departure not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Fixed departure deleted successfully")))
}

async fn toggle_featured(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FixedDeparture>, AppError> {
    toggle(&state, &id, |departure| {
        departure.is_featured = !departure.is_featured;
    })
    .await
}

async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FixedDeparture>, AppError> {
    toggle(&state, &id, |departure| {
        departure.is_active = !departure.is_active;
    })
    .await
}

async fn toggle(
    state: &AppState,
    id: &str,
    flip: impl FnOnce(&mut FixedDeparture),
) -> Result<Json<FixedDeparture>, AppError> {
    let id = parse_object_id(id)?;
    let mut departure = state
        .fixed_departures
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Fixed departure not found".to_string()))?;

    flip(&mut departure);
    departure.updated_at = Utc::now();
    state.fixed_departures.replace(&departure).await?;

    Ok(Json(transform(departure, state.base_url())))
}
