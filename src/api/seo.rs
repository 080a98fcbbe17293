use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use bson::oid::ObjectId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::seo::SeoSettings;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_seo_settings))
        .route(
            "/{page}",
            get(seo_settings_for_page)
                .put(upsert_seo_settings)
                .delete(delete_seo_settings),
        )
}

const MAX_TITLE_LEN: usize = 60;
const MAX_DESCRIPTION_LEN: usize = 160;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub og_image: Option<String>,
    pub canonical: Option<String>,
    pub robots: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeoResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

async fn seo_settings_for_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Json<SeoResponse<SeoSettings>>, AppError> {
    let page = page.to_lowercase();
    let settings = match state.seo.find_by_page(&page).await? {
        Some(settings) => settings,
        None if page == "homepage" => SeoSettings::homepage_default(),
        None => {
            return Err(AppError::NotFound(
                "SEO settings not found for this page".to_string(),
            ))
        }
    };

    Ok(Json(SeoResponse { success: true, message: None, data: Some(settings) }))
}

async fn upsert_seo_settings(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Json(payload): Json<SeoPayload>,
) -> Result<Json<SeoResponse<SeoSettings>>, AppError> {
    let page = page.to_lowercase();

    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Title and description are required".to_string()))?;
    let description = payload
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::BadRequest("Title and description are required".to_string()))?;

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::BadRequest(
            "Title should be 60 characters or less".to_string(),
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(AppError::BadRequest(
            "Description should be 160 characters or less".to_string(),
        ));
    }

    // Reuse the stored document's id so the upsert replaces in place.
    let existing = state.seo.find_by_page(&page).await?;
    let settings = SeoSettings {
        id: existing.as_ref().map(|s| s.id).unwrap_or_else(ObjectId::new),
        page,
        title: title.to_string(),
        description: description.to_string(),
        keywords: payload
            .keywords
            .clone()
            .or_else(|| existing.as_ref().map(|s| s.keywords.clone()))
            .unwrap_or_default(),
        og_image: payload
            .og_image
            .clone()
            .or_else(|| existing.as_ref().and_then(|s| s.og_image.clone())),
        canonical: payload
            .canonical
            .clone()
            .or_else(|| existing.as_ref().map(|s| s.canonical.clone()))
            .unwrap_or_else(|| "/".to_string()),
        robots: payload
            .robots
            .clone()
            .or_else(|| existing.as_ref().map(|s| s.robots.clone()))
            .unwrap_or_else(|| "index,follow".to_string()),
        last_updated: Utc::now(),
    };

    state.seo.upsert(&settings).await?;

    Ok(Json(SeoResponse {
        success: true,
        message: Some("SEO settings updated successfully".to_string()),
        data: Some(settings),
    }))
}

async fn list_seo_settings(
    State(state): State<AppState>,
) -> Result<Json<SeoResponse<Vec<SeoSettings>>>, AppError> {
    let settings = state.seo.list_all().await?;
    Ok(Json(SeoResponse { success: true, message: None, data: Some(settings) }))
}

async fn delete_seo_settings(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Json<SeoResponse<()>>, AppError> {
    let page = page.to_lowercase();
    if !state.seo.delete_by_page(&page).await? {
        return Err(AppError::NotFound(
            "SEO settings not found for this page".to_string(),
        ));
    }
    Ok(Json(SeoResponse {
        success: true,
        message: Some("SEO settings deleted successfully".to_string()),
        data: None,
    }))
}
