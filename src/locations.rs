//! Thin client for the countrystatecity.in geographic lookup API.
//!
//! The admin UI uses these lookups to fill country/state/city dropdowns
//! when editing catalog entries. Upstream failures keep their status code
//! on the way through; only transport errors become internal errors.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const API_BASE: &str = "https://api.countrystatecity.in/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub iso2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tld: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "emojiU")]
    pub emoji_u: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryState {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub state_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

pub struct LocationClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl LocationClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, API_BASE.to_string())
    }

    /// Base URL override for tests.
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        Self { http: reqwest::Client::new(), api_key, base_url }
    }

    fn api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().ok_or_else(|| AppError::Upstream {
            status: 500,
            message: "Country API key not configured".to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let key = self.api_key()?;
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header("X-CSCAPI-KEY", key)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("location API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: "Failed to fetch from location API".to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Internal(format!("location API returned invalid JSON: {e}")))
    }

    pub async fn countries(&self) -> Result<Vec<Country>, AppError> {
        self.get_json("/countries").await
    }

    pub async fn country_details(&self, country_iso2: &str) -> Result<Country, AppError> {
        self.get_json(&format!("/countries/{country_iso2}")).await
    }

    pub async fn states_of_country(&self, country_iso2: &str) -> Result<Vec<CountryState>, AppError> {
        self.get_json(&format!("/countries/{country_iso2}/states")).await
    }

    pub async fn state_details(
        &self,
        country_iso2: &str,
        state_iso2: &str,
    ) -> Result<CountryState, AppError> {
        self.get_json(&format!("/countries/{country_iso2}/states/{state_iso2}")).await
    }

    pub async fn cities_of_state(
        &self,
        country_iso2: &str,
        state_iso2: &str,
    ) -> Result<Vec<City>, AppError> {
        self.get_json(&format!("/countries/{country_iso2}/states/{state_iso2}/cities"))
            .await
    }

    pub async fn cities_of_country(&self, country_iso2: &str) -> Result<Vec<City>, AppError> {
        self.get_json(&format!("/countries/{country_iso2}/cities")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_is_reported_before_any_request() {
        let client = LocationClient::new(None);
        let err = client.countries().await.unwrap_err();
        match err {
            AppError::Upstream { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("not configured"));
            }
            other => panic!("expected Upstream error, got: {other:?}"),
        }
    }
}
