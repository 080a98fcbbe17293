//! Combined travel search bar: destination matches ranked with the
//! location-aware profile and listed ahead of package matches.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::search::{self, SuggestResponse};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/suggest", get(suggest_travel))
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub q: Option<String>,
}

async fn suggest_travel(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    let q = query.q.unwrap_or_default();
    Json(
        search::suggest_travel(
            state.destinations.as_ref(),
            state.packages.as_ref(),
            &q,
            state.base_url(),
        )
        .await,
    )
}
