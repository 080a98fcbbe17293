use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use bson::oid::ObjectId;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::{parse_object_id, require, MessageResponse, Pagination};
use crate::db::blogs::BlogFilter;
use crate::db::Page;
use crate::error::AppError;
use crate::images;
use crate::models::blog::Blog;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/featured", get(featured_blogs))
        .route("/search", get(search_blogs))
        .route("/{id}/like", post(like_blog))
        .route("/{id}", get(blog_by_id).put(update_blog).delete(delete_blog))
}

fn default_limit() -> i64 {
    10
}

fn default_featured_limit() -> i64 {
    6
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlogsQuery {
    pub category: Option<String>,
    pub featured: Option<String>,
    pub published: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_page")]
    pub page: i64,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    #[serde(default = "default_featured_limit")]
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchBlogsQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub read_time: Option<i32>,
    pub is_published: Option<bool>,
    pub is_featured: Option<bool>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct BlogListResponse {
    pub blogs: Vec<Blog>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct BlogMutationResponse {
    pub message: String,
    pub blog: Blog,
}

fn transform(mut blog: Blog, base_url: Option<&str>) -> Blog {
    blog.image = images::absolutize(&blog.image, base_url);
    blog
}

async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<ListBlogsQuery>,
) -> Result<Json<BlogListResponse>, AppError> {
    let filter = BlogFilter {
        category: query.category.clone(),
        featured: (query.featured.as_deref() == Some("true")).then_some(true),
        published: (query.published.as_deref() == Some("true")).then_some(true),
        ..Default::default()
    };

    let paging = Page::new(query.limit, query.page);
    let blogs = state.blogs.list(&filter, paging).await?;
    let total = state.blogs.count(&filter).await?;

    Ok(Json(BlogListResponse {
        blogs: blogs
            .into_iter()
            .map(|b| transform(b, state.base_url()))
            .collect(),
        pagination: Pagination::new(paging.page, paging.limit, total),
    }))
}

async fn featured_blogs(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Result<Json<Vec<Blog>>, AppError> {
    let filter = BlogFilter {
        featured: Some(true),
        published: Some(true),
        ..Default::default()
    };
    let blogs = state.blogs.list_by_popularity(&filter, Some(query.limit)).await?;
    Ok(Json(
        blogs
            .into_iter()
            .map(|b| transform(b, state.base_url()))
            .collect(),
    ))
}

async fn search_blogs(
    State(state): State<AppState>,
    Query(query): Query<SearchBlogsQuery>,
) -> Result<Json<Vec<Blog>>, AppError> {
    let filter = BlogFilter {
        published: Some(true),
        text: query.q.clone().filter(|q| !q.trim().is_empty()),
        category: query.category.clone(),
        author: query.author.clone(),
        ..Default::default()
    };
    let blogs = state.blogs.list_by_popularity(&filter, None).await?;
    Ok(Json(
        blogs
            .into_iter()
            .map(|b| transform(b, state.base_url()))
            .collect(),
    ))
}

async fn blog_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Blog>, AppError> {
    let id = parse_object_id(&id)?;
    let mut blog = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found.".to_string()))?;

    state.blogs.increment_views(id).await?;
    blog.views += 1;

    Ok(Json(transform(blog, state.base_url())))
}

async fn create_blog(
    State(state): State<AppState>,
    Json(payload): Json<BlogPayload>,
) -> Result<(StatusCode, Json<BlogMutationResponse>), AppError> {
    let title = require(&payload.title, "title")?.to_string();
    let content = require(&payload.content, "content")?.to_string();
    let excerpt = require(&payload.excerpt, "excerpt")?.to_string();
    let author = require(&payload.author, "author")?.to_string();
    let image = require(&payload.image, "image")?.to_string();
    let category = require(&payload.category, "category")?.to_string();

    let now = Utc::now();
    let blog = Blog {
        id: ObjectId::new(),
        title,
        content,
        excerpt,
        author,
        image,
        tags: payload.tags.clone().unwrap_or_default(),
        category,
        read_time: payload.read_time.unwrap_or(5),
        views: 0,
        likes: 0,
        is_published: payload.is_published.unwrap_or(false),
        is_featured: payload.is_featured.unwrap_or(false),
        seo_title: payload.seo_title.clone(),
        seo_description: payload.seo_description.clone(),
        seo_keywords: payload.seo_keywords.clone().unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    state.blogs.insert(&blog).await?;

    Ok((
        StatusCode::CREATED,
        Json(BlogMutationResponse {
            message: "Blog created successfully".to_string(),
            blog: transform(blog, state.base_url()),
        }),
    ))
}

async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<BlogPayload>,
) -> Result<Json<BlogMutationResponse>, AppError> {
    let id = parse_object_id(&id)?;
    let mut blog = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found.".to_string()))?;

    if let Some(ref title) = payload.title {
        blog.title = title.clone();
    }
    if let Some(ref content) = payload.content {
        blog.content = content.clone();
    }
    if let Some(ref excerpt) = payload.excerpt {
        blog.excerpt = excerpt.clone();
    }
    if let Some(ref author) = payload.author {
        blog.author = author.clone();
    }
    if let Some(ref image) = payload.image {
        blog.image = image.clone();
    }
    if let Some(ref tags) = payload.tags {
        blog.tags = tags.clone();
    }
    if let Some(ref category) = payload.category {
        blog.category = category.clone();
    }
    if let Some(read_time) = payload.read_time {
        blog.read_time = read_time;
    }
    if let Some(is_published) = payload.is_published {
        blog.is_published = is_published;
    }
    if let Some(is_featured) = payload.is_featured {
        blog.is_featured = is_featured;
    }
    if payload.seo_title.is_some() {
        blog.seo_title = payload.seo_title.clone();
    }
    if payload.seo_description.is_some() {
        blog.seo_description = payload.seo_description.clone();
    }
    if let Some(ref seo_keywords) = payload.seo_keywords {
        blog.seo_keywords = seo_keywords.clone();
    }
    blog.updated_at = Utc::now();

    if !state.blogs.replace(&blog).await? {
        return Err(AppError::NotFound("Blog not found.".to_string()));
    }

    Ok(Json(BlogMutationResponse {
        message: "Blog updated successfully".to_string(),
        blog: transform(blog, state.base_url()),
    }))
}

async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_object_id(&id)?;
    if !state.blogs.delete(id).await? {
        return Err(AppError::NotFound("Blog not found.".to_string()));
    }
    Ok(Json(MessageResponse::new("Blog deleted successfully")))
}

async fn like_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_object_id(&id)?;
    let blog = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found.".to_string()))?;

    state.blogs.increment_likes(id).await?;

    Ok(Json(serde_json::json!({
        "message": "Blog liked successfully",
        "likes": blog.likes + 1,
    })))
}
