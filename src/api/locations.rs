//! Proxy endpoints for the countrystatecity.in geographic lookup API.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(countries))
        .route("/countries/{country_iso2}", get(country_details))
        .route("/countries/{country_iso2}/states", get(states_of_country))
        .route("/countries/{country_iso2}/states/{state_iso2}", get(state_details))
        .route(
            "/countries/{country_iso2}/states/{state_iso2}/cities",
            get(cities_of_state),
        )
        .route("/countries/{country_iso2}/cities", get(cities_of_country))
}

async fn countries(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let countries = state.locations.countries().await?;
    Ok(Json(serde_json::json!({ "countries": countries })))
}

async fn country_details(
    State(state): State<AppState>,
    Path(country_iso2): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let country = state.locations.country_details(&country_iso2).await?;
    Ok(Json(serde_json::json!({ "country": country })))
}

async fn states_of_country(
    State(state): State<AppState>,
    Path(country_iso2): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let states = state.locations.states_of_country(&country_iso2).await?;
    Ok(Json(serde_json::json!({ "states": states })))
}

async fn state_details(
    State(state): State<AppState>,
    Path((country_iso2, state_iso2)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let details = state.locations.state_details(&country_iso2, &state_iso2).await?;
    Ok(Json(serde_json::json!({ "state": details })))
}

async fn cities_of_state(
    State(state): State<AppState>,
    Path((country_iso2, state_iso2)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cities = state.locations.cities_of_state(&country_iso2, &state_iso2).await?;
    Ok(Json(serde_json::json!({ "cities": cities })))
}

async fn cities_of_country(
    State(state): State<AppState>,
    Path(country_iso2): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cities = state.locations.cities_of_country(&country_iso2).await?;
    Ok(Json(serde_json::json!({ "cities": cities })))
}
