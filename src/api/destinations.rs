use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use bson::oid::ObjectId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::{parse_object_id, require, MessageResponse, Pagination};
use crate::db::destinations::DestinationFilter;
use crate::db::Page;
use crate::error::AppError;
use crate::images;
use crate::models::category::{Category, TourType};
use crate::models::common::ItineraryDay;
use crate::models::destination::Destination;
use crate::slug::{require_free_slug, slugify, unique_slug};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_destinations).post(create_destination))
        .route("/trending", get(trending_destinations))
        .route("/search", get(search_destinations))
        .route("/tour-type/{tour_type}", get(destinations_by_tour_type))
        .route("/country/{country}", get(destinations_by_country))
        .route("/state/{state}", get(destinations_by_state))
        .route("/countries", get(available_countries))
        .route("/tour-types", get(available_tour_types))
        .route("/states", get(available_states))
        .route(
            "/{id}",
            get(destination_by_id_or_slug)
                .put(update_destination)
                .delete(delete_destination),
        )
}

fn default_limit() -> i64 {
    10
}

fn default_trending_limit() -> i64 {
    6
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDestinationsQuery {
    pub trending: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_page")]
    pub page: i64,
    pub tour_type: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub category: Option<String>,
    pub holiday_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingQuery {
    #[serde(default = "default_trending_limit")]
    pub limit: i64,
    pub country: Option<String>,
    pub state: Option<String>,
    pub tour_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDestinationsQuery {
    pub q: Option<String>,
    pub location: Option<String>,
    pub tour_type: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_page")]
    pub page: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinationPayload {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub image: Option<String>,
    pub location: Option<String>,
    pub holiday_type: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub tour_type: Option<String>,
    pub category: Option<String>,
    pub rating: Option<f64>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub inclusions: Option<Vec<String>>,
    pub exclusions: Option<Vec<String>>,
    pub itinerary: Option<Vec<ItineraryDay>>,
    pub is_active: Option<bool>,
    pub is_trending: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct DestinationListResponse {
    pub destinations: Vec<Destination>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct DestinationMutationResponse {
    pub message: String,
    pub destination: Destination,
}

fn parse_category(value: &str) -> Result<Category, AppError> {
    Category::parse(value).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid category. Must be one of: {}",
            Category::expected_values()
        ))
    })
}

fn parse_tour_type(value: &str) -> Result<TourType, AppError> {
    TourType::parse(value).ok_or_else(|| {
        AppError::BadRequest("Invalid tour type. Must be one of: international, india".to_string())
    })
}

fn transform(mut destination: Destination, base_url: Option<&str>) -> Destination {
    destination.image = images::absolutize(&destination.image, base_url);
    destination
}

/// Builds the shared listing filter; international tours historically file
/// states under the country column, so state queries widen accordingly.
fn listing_filter(
    tour_type: Option<&str>,
    country: Option<String>,
    state: Option<String>,
) -> DestinationFilter {
    let tour_type = tour_type.and_then(TourType::parse);
    DestinationFilter {
        active_only: true,
        tour_type,
        country,
        state,
        state_matches_country: tour_type == Some(TourType::International),
        ..Default::default()
    }
}

async fn list_destinations(
    State(state): State<AppState>,
    Query(query): Query<ListDestinationsQuery>,
) -> Result<Json<DestinationListResponse>, AppError> {
    let mut filter = listing_filter(
        query.tour_type.as_deref(),
        query.country.clone(),
        query.state.clone(),
    );
    if query.trending.as_deref() == Some("true") {
        filter.trending = Some(true);
    }
    filter.category = query.category.clone();
    filter.holiday_type = query
        .holiday_type
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(parse_object_id)
        .transpose()?;

    paginated(&state, filter, query.limit, query.page).await
}

async fn paginated(
    state: &AppState,
    filter: DestinationFilter,
    limit: i64,
    page: i64,
) -> Result<Json<DestinationListResponse>, AppError> {
    let paging = Page::new(limit, page);
    let destinations = state.destinations.list(&filter, paging).await?;
    let total = state.destinations.count(&filter).await?;

    Ok(Json(DestinationListResponse {
        destinations: destinations
            .into_iter()
            .map(|d| transform(d, state.base_url()))
            .collect(),
        pagination: Pagination::new(paging.page, paging.limit, total),
    }))
}

async fn trending_destinations(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<Json<Vec<Destination>>, AppError> {
    let mut filter = listing_filter(
        query.tour_type.as_deref(),
        query.country.clone(),
        query.state.clone(),
    );
    filter.trending = Some(true);

    let destinations = state
        .destinations
        .list(&filter, Page::new(query.limit, 1))
        .await?;
    Ok(Json(
        destinations
            .into_iter()
            .map(|d| transform(d, state.base_url()))
            .collect(),
    ))
}

async fn search_destinations(
    State(state): State<AppState>,
    Query(query): Query<SearchDestinationsQuery>,
) -> Result<Json<Vec<Destination>>, AppError> {
    let mut filter = listing_filter(
        query.tour_type.as_deref(),
        query.country.clone(),
        query.state.clone(),
    );
    filter.text = query.q.clone().filter(|q| !q.trim().is_empty());
    filter.location = query.location.clone();
    filter.category = query.category.clone();

    let destinations = state.destinations.search(&filter).await?;
    Ok(Json(
        destinations
            .into_iter()
            .map(|d| transform(d, state.base_url()))
            .collect(),
    ))
}

async fn destinations_by_tour_type(
    State(state): State<AppState>,
    Path(tour_type): Path<String>,
    Query(query): Query<ScopedListQuery>,
) -> Result<Json<DestinationListResponse>, AppError> {
    let filter = listing_filter(Some(tour_type.as_str()), None, None);
    paginated(&state, filter, query.limit, query.page).await
}

async fn destinations_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(query): Query<ScopedListQuery>,
) -> Result<Json<DestinationListResponse>, AppError> {
    let filter = listing_filter(None, Some(country), None);
    paginated(&state, filter, query.limit, query.page).await
}

async fn destinations_by_state(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
    Query(query): Query<ScopedListQuery>,
) -> Result<Json<DestinationListResponse>, AppError> {
    let filter = listing_filter(None, None, Some(state_name));
    paginated(&state, filter, query.limit, query.page).await
}

async fn available_countries(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let countries = state.destinations.distinct_field("country").await?;
    Ok(Json(serde_json::json!({ "countries": countries })))
}

async fn available_tour_types(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tour_types = state.destinations.distinct_field("tourType").await?;
    Ok(Json(serde_json::json!({ "tourTypes": tour_types })))
}

async fn available_states(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let states = state.destinations.distinct_field("state").await?;
    Ok(Json(serde_json::json!({ "states": states })))
}

/// Destinations are addressed by ObjectId hex or slug interchangeably;
/// every successful read bumps the visit counter.
async fn destination_by_id_or_slug(
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> Result<Json<Destination>, AppError> {
    let looks_like_object_id =
        id_or_slug.len() == 24 && id_or_slug.chars().all(|c| c.is_ascii_hexdigit());

    let destination = if looks_like_object_id {
        state.destinations.find_by_id(parse_object_id(&id_or_slug)?).await?
    } else {
        state.destinations.find_by_slug(&id_or_slug).await?
    };

    let mut destination =
        destination.ok_or_else(|| AppError::NotFound("Destination not found.".to_string()))?;

    state.destinations.increment_visits(destination.id).await?;
    destination.visit_count += 1;

    Ok(Json(transform(destination, state.base_url())))
}

async fn create_destination(
    State(state): State<AppState>,
    Json(payload): Json<DestinationPayload>,
) -> Result<(StatusCode, Json<DestinationMutationResponse>), AppError> {
    let name = require(&payload.name, "name")?.to_string();
    let description = require(&payload.description, "description")?.to_string();
    let short_description = require(&payload.short_description, "shortDescription")?.to_string();
    let location = require(&payload.location, "location")?.to_string();
    let country = require(&payload.country, "country")?.to_string();
    let tour_type = parse_tour_type(require(&payload.tour_type, "tourType")?)?;
    let category = parse_category(require(&payload.category, "category")?)?;

    let holiday_type = payload
        .holiday_type
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(parse_object_id)
        .transpose()?;

    let id = ObjectId::new();
    let slug = match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            require_free_slug(state.destinations.as_ref(), explicit, None).await?;
            explicit.to_string()
        }
        None => {
            unique_slug(state.destinations.as_ref(), &slugify(&name), &id.to_hex(), None).await?
        }
    };

    let now = Utc::now();
    let destination = Destination {
        id,
        name,
        slug,
        description,
        short_description,
        image: payload.image.clone().unwrap_or_default(),
        location,
        holiday_type,
        country,
        state: payload.state.clone().filter(|s| !s.is_empty()),
        tour_type,
        category,
        rating: payload.rating.unwrap_or(0.0),
        price: payload.price,
        duration: payload.duration.clone(),
        highlights: payload.highlights.clone().unwrap_or_default(),
        inclusions: payload.inclusions.clone().unwrap_or_default(),
        exclusions: payload.exclusions.clone().unwrap_or_default(),
        itinerary: payload.itinerary.clone().unwrap_or_default(),
        is_active: payload.is_active.unwrap_or(true),
        is_trending: payload.is_trending.unwrap_or(false),
        visit_count: 0,
        created_at: now,
        updated_at: now,
    };

    state.destinations.insert(&destination).await?;

    Ok((
        StatusCode::CREATED,
        Json(DestinationMutationResponse {
            message: "Destination created successfully".to_string(),
            destination: transform(destination, state.base_url()),
        }),
    ))
}

async fn update_destination(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DestinationPayload>,
) -> Result<Json<DestinationMutationResponse>, AppError> {
    let id = parse_object_id(&id)?;
    let mut destination = state
        .destinations
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Destination not found.".to_string()))?;

    if let Some(ref tour_type) = payload.tour_type {
        destination.tour_type = parse_tour_type(tour_type)?;
    }
    if let Some(ref category) = payload.category {
        destination.category = parse_category(category)?;
    }

    let name_changed = matches!(
        payload.name.as_deref(),
        Some(new_name) if new_name != destination.name
    );
    if let Some(ref name) = payload.name {
        if !name.trim().is_empty() {
            destination.name = name.clone();
        }
    }

    match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            require_free_slug(state.destinations.as_ref(), explicit, Some(id)).await?;
            destination.slug = explicit.to_string();
        }
        None if name_changed => {
            destination.slug = unique_slug(
                state.destinations.as_ref(),
                &slugify(&destination.name),
                &id.to_hex(),
                Some(id),
            )
            .await?;
        }
        None => {}
    }

    if let Some(ref description) = payload.description {
        destination.description = description.clone();
    }
    if let Some(ref short_description) = payload.short_description {
        destination.short_description = short_description.clone();
    }
    if let Some(ref image) = payload.image {
        destination.image = image.clone();
    }
    if let Some(ref location) = payload.location {
        destination.location = location.clone();
    }
    if let Some(ref holiday_type) = payload.holiday_type {
        destination.holiday_type = if holiday_type.is_empty() {
            None
        } else {
            Some(parse_object_id(holiday_type)?)
        };
    }
    if let Some(ref country) = payload.country {
        destination.country = country.clone();
    }
    if let Some(ref state_name) = payload.state {
        destination.state = Some(state_name.clone()).filter(|s| !s.is_empty());
    }
    if let Some(rating) = payload.rating {
        destination.rating = rating;
    }
    if let Some(price) = payload.price {
        destination.price = Some(price);
    }
    if let Some(ref duration) = payload.duration {
        destination.duration = Some(duration.clone());
    }
    if let Some(ref highlights) = payload.highlights {
        destination.highlights = highlights.clone();
    }
    if let Some(ref inclusions) = payload.inclusions {
        destination.inclusions = inclusions.clone();
    }
    if let Some(ref exclusions) = payload.exclusions {
        destination.exclusions = exclusions.clone();
    }
    if let Some(ref itinerary) = payload.itinerary {
        destination.itinerary = itinerary.clone();
    }
    if let Some(is_active) = payload.is_active {
        destination.is_active = is_active;
    }
    if let Some(is_trending) = payload.is_trending {
        destination.is_trending = is_trending;
    }
    destination.updated_at = Utc::now();

    if !state.destinations.replace(&destination).await? {
        return Err(AppError::NotFound("Destination not found.".to_string()));
    }

    Ok(Json(DestinationMutationResponse {
        message: "Destination updated successfully".to_string(),
        destination: transform(destination, state.base_url()),
    }))
}

async fn delete_destination(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.destinations.delete(id).await? {
        return Err(AppError::NotFound("Destination not found.".to_string()));
    }
    Ok(Json(MessageResponse::new("Destination deleted successfully")))
}
