/// Environment-driven application configuration.
///
/// Every knob has a development default so `cargo run` works against a local
/// MongoDB without any setup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub bind_addr: String,
    /// Base URL prepended to stored image paths when building absolute URLs.
    /// When unset, image URLs stay relative (`/uploads/...`).
    pub public_base_url: Option<String>,
    /// Comma-separated list of origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    /// API key for the countrystatecity.in lookup service.
    pub country_api_key: Option<String>,
    /// Directory served under `/uploads`.
    pub uploads_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongodb_database: std::env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "voyagecms".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            public_base_url: std::env::var("PUBLIC_BASE_URL").ok().filter(|s| !s.is_empty()),
            allowed_origins,
            country_api_key: std::env::var("COUNTRY_API_KEY").ok().filter(|s| !s.is_empty()),
            uploads_dir: std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()),
        }
    }
}
