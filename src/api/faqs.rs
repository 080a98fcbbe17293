use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use bson::oid::ObjectId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::{parse_object_id, require};
use crate::db::faqs::FaqFilter;
use crate::error::AppError;
use crate::models::faq::Faq;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_faqs).post(create_faq))
        .route("/locations", get(faq_locations))
        .route("/reorder", post(reorder_faq))
        .route("/{id}", get(faq_by_id).put(update_faq).delete(delete_faq))
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFaqsQuery {
    pub location: Option<String>,
    pub is_active: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub skip: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqPayload {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPayload {
    pub id: Option<String>,
    pub new_order: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct FaqListResponse {
    pub success: bool,
    pub faqs: Vec<Faq>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct FaqResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq: Option<Faq>,
}

async fn list_faqs(
    State(state): State<AppState>,
    Query(query): Query<ListFaqsQuery>,
) -> Result<Json<FaqListResponse>, AppError> {
    let filter = FaqFilter {
        location: query
            .location
            .as_deref()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty()),
        is_active: query.is_active.as_deref().map(|v| v == "true"),
    };

    let faqs = state.faqs.list(&filter, query.limit, query.skip).await?;
    let total = state.faqs.count(&filter).await?;

    Ok(Json(FaqListResponse { success: true, faqs, total }))
}

async fn faq_locations(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let locations = state.faqs.distinct_locations().await?;
    Ok(Json(serde_json::json!({ "success": true, "locations": locations })))
}

async fn faq_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FaqResponse>, AppError> {
    let id = parse_object_id(&id)?;
    let faq = state
        .faqs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))?;
    Ok(Json(FaqResponse { success: true, message: None, faq: Some(faq) }))
}

async fn create_faq(
    State(state): State<AppState>,
    Json(payload): Json<FaqPayload>,
) -> Result<(StatusCode, Json<FaqResponse>), AppError> {
    if payload.question.is_none() || payload.answer.is_none() || payload.location.is_none() {
        return Err(AppError::BadRequest(
            "Question, answer, and location are required".to_string(),
        ));
    }
    let question = require(&payload.question, "question")?.to_string();
    let answer = require(&payload.answer, "answer")?.to_string();
    let location = require(&payload.location, "location")?.to_lowercase();

    let now = Utc::now();
    let faq = Faq {
        id: ObjectId::new(),
        question,
        answer,
        location,
        is_active: payload.is_active.unwrap_or(true),
        order: payload.order.unwrap_or(1),
        created_at: now,
        updated_at: now,
    };

    state.faqs.insert(&faq).await?;

    Ok((
        StatusCode::CREATED,
        Json(FaqResponse {
            success: true,
            message: Some("FAQ created successfully".to_string()),
            faq: Some(faq),
        }),
    ))
}

async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FaqPayload>,
) -> Result<Json<FaqResponse>, AppError> {
    let id = parse_object_id(&id)?;
    let mut faq = state
        .faqs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))?;

    if let Some(ref question) = payload.question {
        faq.question = question.trim().to_string();
    }
    if let Some(ref answer) = payload.answer {
        faq.answer = answer.trim().to_string();
    }
    if let Some(ref location) = payload.location {
        faq.location = location.trim().to_lowercase();
    }
    if let Some(is_active) = payload.is_active {
        faq.is_active = is_active;
    }
    if let Some(order) = payload.order {
        faq.order = order;
    }
    faq.updated_at = Utc::now();

    if !state.faqs.replace(&faq).await? {
        return Err(AppError::NotFound("FAQ not found".to_string()));
    }

    Ok(Json(FaqResponse {
        success: true,
        message: Some("FAQ updated successfully".to_string()),
        faq: Some(faq),
    }))
}

async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FaqResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.faqs.delete(id).await? {
        return Err(AppError::NotFound("FAQ not found".to_string()));
    }
    Ok(Json(FaqResponse {
        success: true,
        message: Some("FAQ deleted successfully".to_string()),
        faq: None,
    }))
}

async fn reorder_faq(
    State(state): State<AppState>,
    Json(payload): Json<ReorderPayload>,
) -> Result<Json<FaqResponse>, AppError> {
    let (Some(id), Some(new_order)) = (payload.id.as_deref(), payload.new_order) else {
        return Err(AppError::BadRequest("ID and new order are required".to_string()));
    };

    let id = parse_object_id(id)?;
    let mut faq = state
        .faqs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))?;

    faq.order = new_order;
    faq.updated_at = Utc::now();
    state.faqs.replace(&faq).await?;

    Ok(Json(FaqResponse {
        success: true,
        message: Some("FAQ reordered successfully".to_string()),
        faq: Some(faq),
    }))
}
