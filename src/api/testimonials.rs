use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use bson::oid::ObjectId;
use chrono::Utc;
use serde::Deserialize;

use crate::api::{parse_object_id, require, MessageResponse};
use crate::error::AppError;
use crate::images;
use crate::models::testimonial::Testimonial;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_testimonials).post(create_testimonial))
        .route("/featured", get(featured_testimonials))
        .route(
            "/{id}",
            get(testimonial_by_id)
                .put(update_testimonial)
                .delete(delete_testimonial),
        )
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialPayload {
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: Option<f64>,
    pub image: Option<String>,
    pub text: Option<String>,
    pub package: Option<String>,
    pub date: Option<String>,
    pub verified: Option<bool>,
    pub featured: Option<bool>,
    pub is_active: Option<bool>,
}

fn validate_rating(rating: f64) -> Result<(), AppError> {
    if !(1.0..=5.0).contains(&rating) {
        return Err(AppError::BadRequest("Rating must be between 1 and 5".to_string()));
    }
    Ok(())
}

fn transform(mut testimonial: Testimonial, base_url: Option<&str>) -> Testimonial {
    testimonial.image = images::absolutize(&testimonial.image, base_url);
    testimonial
}

async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = state.testimonials.list_active().await?;
    Ok(Json(
        testimonials
            .into_iter()
            .map(|t| transform(t, state.base_url()))
            .collect(),
    ))
}

async fn featured_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = state.testimonials.list_featured().await?;
    Ok(Json(
        testimonials
            .into_iter()
            .map(|t| transform(t, state.base_url()))
            .collect(),
    ))
}

async fn testimonial_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Testimonial>, AppError> {
    let id = parse_object_id(&id)?;
    let testimonial = state
        .testimonials
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))?;
    Ok(Json(transform(testimonial, state.base_url())))
}

async fn create_testimonial(
    State(state): State<AppState>,
    Json(payload): Json<TestimonialPayload>,
) -> Result<(StatusCode, Json<Testimonial>), AppError> {
    let name = require(&payload.name, "name")?.to_string();
    let location = require(&payload.location, "location")?.to_string();
    let image = require(&payload.image, "image")?.to_string();
    let text = require(&payload.text, "text")?.to_string();
    let package = require(&payload.package, "package")?.to_string();
    let date = require(&payload.date, "date")?.to_string();

    let rating = payload
        .rating
        .ok_or_else(|| AppError::BadRequest("rating is required".to_string()))?;
    validate_rating(rating)?;

    let now = Utc::now();
    let testimonial = Testimonial {
        id: ObjectId::new(),
        name,
        location,
        rating,
        image,
        text,
        package,
        date,
        verified: payload.verified.unwrap_or(true),
        featured: payload.featured.unwrap_or(false),
        is_active: payload.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };

    state.testimonials.insert(&testimonial).await?;

    Ok((StatusCode::CREATED, Json(transform(testimonial, state.base_url()))))
}

async fn update_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TestimonialPayload>,
) -> Result<Json<Testimonial>, AppError> {
    let id = parse_object_id(&id)?;
    let mut testimonial = state
        .testimonials
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))?;

    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
        testimonial.rating = rating;
    }
    if let Some(ref name) = payload.name {
        testimonial.name = name.clone();
    }
    if let Some(ref location) = payload.location {
        testimonial.location = location.clone();
    }
    if let Some(ref image) = payload.image {
        testimonial.image = image.clone();
    }
    if let Some(ref text) = payload.text {
        testimonial.text = text.clone();
    }
    if let Some(ref package) = payload.package {
        testimonial.package = package.clone();
    }
    if let Some(ref date) = payload.date {
        testimonial.date = date.clone();
    }
    if let Some(verified) = payload.verified {
        testimonial.verified = verified;
    }
    if let Some(featured) = payload.featured {
        testimonial.featured = featured;
    }
    if let Some(is_active) = payload.is_active {
        testimonial.is_active = is_active;
    }
    testimonial.updated_at = Utc::now();

    if !state.testimonials.replace(&testimonial).await? {
        return Err(AppError::NotFound("Testimonial not found".to_string()));
    }

    Ok(Json(transform(testimonial, state.base_url())))
}

async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.testimonials.delete(id).await? {
        return Err(AppError::NotFound("Testimonial not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Testimonial deleted successfully")))
}
