use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::IndexModel;

use crate::db::{db_err, write_err};
use crate::error::AppError;
use crate::models::seo::SeoSettings;

/// Repository trait for per-page SEO settings, keyed by the lowercase
/// page identifier.
#[async_trait]
pub trait SeoRepository: Send + Sync {
    async fn find_by_page(&self, page: &str) -> Result<Option<SeoSettings>, AppError>;

    /// Inserts or fully replaces the settings for `settings.page`.
    async fn upsert(&self, settings: &SeoSettings) -> Result<(), AppError>;

    /// All settings, ordered by page key.
    async fn list_all(&self) -> Result<Vec<SeoSettings>, AppError>;

    async fn delete_by_page(&self, page: &str) -> Result<bool, AppError>;
}

/// MongoDB implementation of the SeoRepository.
pub struct MongoSeoRepository {
    collection: mongodb::Collection<SeoSettings>,
}

impl MongoSeoRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { collection: db.collection("seoSettings") }
    }

    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let unique_page = IndexModel::builder()
            .keys(doc! { "page": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(unique_page).await.map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl SeoRepository for MongoSeoRepository {
    async fn find_by_page(&self, page: &str) -> Result<Option<SeoSettings>, AppError> {
        self.collection.find_one(doc! { "page": page }).await.map_err(db_err)
    }

    async fn upsert(&self, settings: &SeoSettings) -> Result<(), AppError> {
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();
        self.collection
            .replace_one(doc! { "page": &settings.page }, settings)
            .with_options(options)
            .await
            .map_err(write_err)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<SeoSettings>, AppError> {
        let options = FindOptions::builder().sort(doc! { "page": 1 }).build();
        let mut cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(db_err)?;

        let mut settings = Vec::new();
        while let Some(s) = cursor.try_next().await.map_err(db_err)? {
            settings.push(s);
        }
        Ok(settings)
    }

    async fn delete_by_page(&self, page: &str) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "page": page })
            .await
            .map_err(db_err)?;
        Ok(result.deleted_count > 0)
    }
}
