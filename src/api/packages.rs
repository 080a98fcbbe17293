use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use bson::oid::ObjectId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::{parse_object_id, require, MessageResponse, Pagination};
use crate::db::packages::PackageFilter;
use crate::db::Page;
use crate::error::AppError;
use crate::images;
use crate::models::category::{Category, TourType};
use crate::models::common::{ItineraryDay, SeoMeta};
use crate::models::package::TourPackage;
use crate::search::{self, SuggestResponse};
use crate::slug::{require_free_slug, slugify, unique_slug};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/", get(list_packages).post(create_package))
        .route("/search", get(search_packages))
        .route("/suggest", get(suggest_packages))
        .route("/category/{category}", get(packages_by_category))
        .route("/tour-type/{tour_type}", get(packages_by_tour_type))
        .route("/country/{country}", get(packages_by_country))
        .route("/state/{state}", get(packages_by_state))
        .route("/holiday-type/{holiday_type_id}", get(packages_by_holiday_type))
        .route("/countries", get(available_countries))
        .route("/tour-types", get(available_tour_types))
        .route("/states", get(available_states))
        .route("/slug/{slug}", get(package_by_slug))
        .route(
            "/{id}",
            get(package_by_id).put(update_package).delete(delete_package),
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
pub struct ListPackagesQuery {
    pub category: Option<String>,
    pub featured: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_page")]
    pub page: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_category_limit() -> i64 {
    6
}

#[derive(Debug, Deserialize)]
pub struct CategoryListQuery {
    #[serde(default = "default_category_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPackagesQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub q: Option<String>,
}

/// Create/update payload; every field optional so the same shape serves
/// both flows, with required-field checks applied on create.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackagePayload {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub discount: Option<f64>,
    pub duration: Option<String>,
    pub destination: Option<String>,
    pub category: Option<String>,
    pub holiday_type: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub tour_type: Option<String>,
    pub images: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub itinerary: Option<Vec<ItineraryDay>>,
    pub inclusions: Option<Vec<String>>,
    pub exclusions: Option<Vec<String>>,
    pub terms: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    #[serde(flatten)]
    pub seo: SeoMeta,
}

#[derive(Debug, Serialize)]
pub struct PackageListResponse {
    pub packages: Vec<TourPackage>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct PackageMutationResponse {
    pub message: String,
    pub package: TourPackage,
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

fn validate_price(price: f64) -> Result<(), AppError> {
    if price < 0.0 {
        return Err(AppError::BadRequest("Price must be a positive number".to_string()));
    }
    Ok(())
}

fn transform(mut package: TourPackage, base_url: Option<&str>) -> TourPackage {
    images::absolutize_all(&mut package.images, base_url);
    package
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Packages API is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn list_packages(
    State(state): State<AppState>,
    Query(query): Query<ListPackagesQuery>,
) -> Result<Json<PackageListResponse>, AppError> {
    let filter = PackageFilter {
        active_only: true,
        category: query.category.clone(),
        featured: (query.featured.as_deref() == Some("true")).then_some(true),
        ..Default::default()
    };
    paginated(&state, filter, query.limit, query.page).await
}

async fn paginated(
    state: &AppState,
    filter: PackageFilter,
    limit: i64,
    page: i64,
) -> Result<Json<PackageListResponse>, AppError> {
    let paging = Page::new(limit, page);
    let packages = state.packages.list(&filter, paging).await?;
    let total = state.packages.count(&filter).await?;

    Ok(Json(PackageListResponse {
        packages: packages
            .into_iter()
            .map(|p| transform(p, state.base_url()))
            .collect(),
        pagination: Pagination::new(paging.page, paging.limit, total),
    }))
}

async fn search_packages(
    State(state): State<AppState>,
    Query(query): Query<SearchPackagesQuery>,
) -> Result<Json<Vec<TourPackage>>, AppError> {
    let filter = PackageFilter {
        active_only: true,
        text: query.q.clone().filter(|q| !q.trim().is_empty()),
        category: query.category.clone(),
        min_price: query.min_price,
        max_price: query.max_price,
        ..Default::default()
    };

    // limit 0 = unbounded, matching the store's find semantics
    let packages = state.packages.list(&filter, Page { limit: 0, page: 1 }).await?;
    Ok(Json(
        packages
            .into_iter()
            .map(|p| transform(p, state.base_url()))
            .collect(),
    ))
}

async fn suggest_packages(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    let q = query.q.unwrap_or_default();
    Json(search::suggest_packages(state.packages.as_ref(), &q, state.base_url()).await)
}

async fn packages_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<Vec<TourPackage>>, AppError> {
    let filter = PackageFilter {
        active_only: true,
        category: Some(category),
        ..Default::default()
    };
    let packages = state
        .packages
        .list(&filter, Page::new(query.limit, 1))
        .await?;
    Ok(Json(
        packages
            .into_iter()
            .map(|p| transform(p, state.base_url()))
            .collect(),
    ))
}

async fn packages_by_tour_type(
    State(state): State<AppState>,
    Path(tour_type): Path<String>,
    Query(query): Query<ScopedListQuery>,
) -> Result<Json<PackageListResponse>, AppError> {
    let filter = PackageFilter {
        active_only: true,
        tour_type: TourType::parse(&tour_type),
        ..Default::default()
    };
    paginated(&state, filter, query.limit, query.page).await
}

async fn packages_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(query): Query<ScopedListQuery>,
) -> Result<Json<PackageListResponse>, AppError> {
    let filter = PackageFilter {
        active_only: true,
        country: Some(country),
        ..Default::default()
    };
    paginated(&state, filter, query.limit, query.page).await
}

async fn packages_by_state(
    State(state): State<AppState>,
    Path(state_name): Path<String>,
    Query(query): Query<ScopedListQuery>,
) -> Result<Json<PackageListResponse>, AppError> {
    let filter = PackageFilter {
        active_only: true,
        state: Some(state_name),
        ..Default::default()
    };
    paginated(&state, filter, query.limit, query.page).await
}

async fn packages_by_holiday_type(
    State(state): State<AppState>,
    Path(holiday_type_id): Path<String>,
    Query(query): Query<ScopedListQuery>,
) -> Result<Json<PackageListResponse>, AppError> {
    let filter = PackageFilter {
        active_only: true,
        holiday_type: Some(parse_object_id(&holiday_type_id)?),
        ..Default::default()
    };
    paginated(&state, filter, query.limit, query.page).await
}

async fn available_countries(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let countries = state.packages.distinct_field("country").await?;
    Ok(Json(serde_json::json!({ "countries": countries })))
}

async fn available_tour_types(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tour_types = state.packages.distinct_field("tourType").await?;
    Ok(Json(serde_json::json!({ "tourTypes": tour_types })))
}

async fn available_states(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let states = state.packages.distinct_field("state").await?;
    Ok(Json(serde_json::json!({ "states": states })))
}

async fn package_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TourPackage>, AppError> {
    let package = state
        .packages
        .find_by_slug(&slug)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::NotFound("Package not found.".to_string()))?;
    Ok(Json(transform(package, state.base_url())))
}

async fn package_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TourPackage>, AppError> {
    let id = parse_object_id(&id)?;
    let package = state
        .packages
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found.".to_string()))?;
    Ok(Json(transform(package, state.base_url())))
}

async fn create_package(
    State(state): State<AppState>,
    Json(payload): Json<PackagePayload>,
) -> Result<(StatusCode, Json<PackageMutationResponse>), AppError> {
    let title = require(&payload.title, "title")?.to_string();
    let description = require(&payload.description, "description")?.to_string();
    let short_description = require(&payload.short_description, "shortDescription")?.to_string();
    let duration = require(&payload.duration, "duration")?.to_string();
    let destination = require(&payload.destination, "destination")?.to_string();
    let country = require(&payload.country, "country")?.to_string();
    let category = parse_category(require(&payload.category, "category")?)?;

    let price = payload
        .price
        .ok_or_else(|| AppError::BadRequest("price is required".to_string()))?;
    validate_price(price)?;

    let tour_type = match payload.tour_type.as_deref().filter(|t| !t.is_empty()) {
        Some(value) => parse_tour_type(value)?,
        None => TourType::India,
    };
    let holiday_type = payload
        .holiday_type
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(parse_object_id)
        .transpose()?;

    let id = ObjectId::new();
    let slug = match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            require_free_slug(state.packages.as_ref(), explicit, None).await?;
            explicit.to_string()
        }
        None => {
            unique_slug(state.packages.as_ref(), &slugify(&title), &id.to_hex(), None).await?
        }
    };

    let now = Utc::now();
    let package = TourPackage {
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
        category,
        holiday_type,
        country,
        state: payload.state.clone().filter(|s| !s.is_empty()),
        tour_type,
        images: payload.images.clone().unwrap_or_default(),
        highlights: payload.highlights.clone().unwrap_or_default(),
        itinerary: payload.itinerary.clone().unwrap_or_default(),
        inclusions: payload.inclusions.clone().unwrap_or_default(),
        exclusions: payload.exclusions.clone().unwrap_or_default(),
        terms: payload.terms.clone().unwrap_or_default(),
        rating: payload.rating.unwrap_or(0.0),
        is_active: payload.is_active.unwrap_or(true),
        is_featured: payload.is_featured.unwrap_or(false),
        seo: payload.seo.clone(),
        created_at: now,
        updated_at: now,
    };

    state.packages.insert(&package).await?;

    Ok((
        StatusCode::CREATED,
        Json(PackageMutationResponse {
            message: "Package created successfully".to_string(),
            package: transform(package, state.base_url()),
        }),
    ))
}

async fn update_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PackagePayload>,
) -> Result<Json<PackageMutationResponse>, AppError> {
    let id = parse_object_id(&id)?;
    let mut package = state
        .packages
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Package not found.".to_string()))?;

    if let Some(ref category) = payload.category {
        package.category = parse_category(category)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
        package.price = price;
    }
    if let Some(ref tour_type) = payload.tour_type {
        package.tour_type = parse_tour_type(tour_type)?;
    }
    if let Some(ref holiday_type) = payload.holiday_type {
        package.holiday_type = if holiday_type.is_empty() {
            None
        } else {
            Some(parse_object_id(holiday_type)?)
        };
    }

    let title_changed = matches!(
        payload.title.as_deref(),
        Some(new_title) if new_title != package.title
    );
    if let Some(ref title) = payload.title {
        if !title.trim().is_empty() {
            package.title = title.clone();
        }
    }

    // Slug policy: explicit slugs are validated, never disambiguated;
    // otherwise a title change triggers recomputation excluding self.
    match payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => {
            require_free_slug(state.packages.as_ref(), explicit, Some(id)).await?;
            package.slug = explicit.to_string();
        }
        None if title_changed => {
            package.slug = unique_slug(
                state.packages.as_ref(),
                &slugify(&package.title),
                &id.to_hex(),
                Some(id),
            )
            .await?;
        }
        None => {}
    }

    if let Some(ref description) = payload.description {
        package.description = description.clone();
    }
    if let Some(ref short_description) = payload.short_description {
        package.short_description = short_description.clone();
    }
    if let Some(original_price) = payload.original_price {
        package.original_price = Some(original_price);
    }
    if let Some(discount) = payload.discount {
        package.discount = discount;
    }
    if let Some(ref duration) = payload.duration {
        package.duration = duration.clone();
    }
    if let Some(ref destination) = payload.destination {
        package.destination = destination.clone();
    }
    if let Some(ref country) = payload.country {
        package.country = country.clone();
    }
    if let Some(ref state_name) = payload.state {
        package.state = Some(state_name.clone()).filter(|s| !s.is_empty());
    }
    if let Some(ref images) = payload.images {
        package.images = images.clone();
    }
    if let Some(ref highlights) = payload.highlights {
        package.highlights = highlights.clone();
    }
    if let Some(ref itinerary) = payload.itinerary {
        package.itinerary = itinerary.clone();
    }
    if let Some(ref inclusions) = payload.inclusions {
        package.inclusions = inclusions.clone();
    }
    if let Some(ref exclusions) = payload.exclusions {
        package.exclusions = exclusions.clone();
    }
    if let Some(ref terms) = payload.terms {
        package.terms = terms.clone();
    }
    if let Some(rating) = payload.rating {
        package.rating = rating;
    }
    if let Some(is_active) = payload.is_active {
        package.is_active = is_active;
    }
    if let Some(is_featured) = payload.is_featured {
        package.is_featured = is_featured;
    }
    package.seo.apply_patch(&payload.seo);
    package.updated_at = Utc::now();

    if !state.packages.replace(&package).await? {
        return Err(AppError::NotFound("Package not found.".to_string()));
    }

    Ok(Json(PackageMutationResponse {
        message: "Package updated successfully".to_string(),
        package: transform(package, state.base_url()),
    }))
}

async fn delete_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.packages.delete(id).await? {
        return Err(AppError::NotFound("Package not found.".to_string()));
    }
    Ok(Json(MessageResponse::new("Package deleted successfully")))
}
