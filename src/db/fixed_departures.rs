use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::IndexModel;

use crate::db::{contains_ci, db_err, regex_ci, write_err, Page};
use crate::error::AppError;
use crate::models::fixed_departure::{DepartureStatus, FixedDeparture};
use crate::slug::SlugLookup;

/// Query-parameter driven filter over the fixed departures collection.
#[derive(Debug, Clone, Default)]
pub struct FixedDepartureFilter {
    pub active_only: bool,
    pub status: Option<DepartureStatus>,
    pub featured: Option<bool>,
    pub destination: Option<String>,
    /// Free-text search over title / destination / description.
    pub text: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Repository trait for fixed departures. Listings are soonest-first
/// (`departureDate` ascending).
#[async_trait]
pub trait FixedDepartureRepository: SlugLookup {
    async fn list(
        &self,
        filter: &FixedDepartureFilter,
        page: Page,
    ) -> Result<Vec<FixedDeparture>, AppError>;

    async fn count(&self, filter: &FixedDepartureFilter) -> Result<u64, AppError>;

    /// Capped search listing (no pagination).
    async fn search(
        &self,
        filter: &FixedDepartureFilter,
        limit: i64,
    ) -> Result<Vec<FixedDeparture>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<FixedDeparture>, AppError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<FixedDeparture>, AppError>;

    async fn insert(&self, departure: &FixedDeparture) -> Result<(), AppError>;

    async fn replace(&self, departure: &FixedDeparture) -> Result<bool, AppError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;
}

/// MongoDB implementation of the FixedDepartureRepository.
pub struct MongoFixedDepartureRepository {
    collection: mongodb::Collection<FixedDeparture>,
}

impl MongoFixedDepartureRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { collection: db.collection("fixedDepartures") }
    }

    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let unique_slug = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(unique_slug).await.map_err(db_err)?;
        Ok(())
    }

    fn filter_doc(filter: &FixedDepartureFilter) -> Document {
        let mut d = Document::new();
        if filter.active_only {
            d.insert("isActive", true);
        }
        if let Some(status) = filter.status {
            d.insert("status", status.as_str());
        }
        if let Some(featured) = filter.featured {
            d.insert("isFeatured", featured);
        }
        if let Some(ref destination) = filter.destination {
            d.insert("destination", regex_ci(destination));
        }
        if let Some(ref q) = filter.text {
            d.insert(
                "$or",
                vec![
                    contains_ci("title", q),
                    contains_ci("destination", q),
                    contains_ci("description", q),
                ],
            );
        }
        if filter.min_price.is_some() || filter.max_price.is_some() {
            let mut range = Document::new();
            if let Some(min) = filter.min_price {
                range.insert("$gte", min);
            }
            if let Some(max) = filter.max_price {
                range.insert("$lte", max);
            }
            d.insert("price", range);
        }
        d
    }

    async fn find_with(
        &self,
        filter: Document,
        options: FindOptions,
    ) -> Result<Vec<FixedDeparture>, AppError> {
        let mut cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(db_err)?;

        let mut departures = Vec::new();
        while let Some(dep) = cursor.try_next().await.map_err(db_err)? {
            departures.push(dep);
        }
        Ok(departures)
    }
}

#[async_trait]
impl SlugLookup for MongoFixedDepartureRepository {
    async fn slug_exists(
        &self,
        slug: &str,
        exclude_id: Option<ObjectId>,
    ) -> Result<bool, AppError> {
        let mut filter = doc! { "slug": slug };
        if let Some(id) = exclude_id {
            filter.insert("_id", doc! { "$ne": id });
        }
        Ok(self.collection.find_one(filter).await.map_err(db_err)?.is_some())
    }
}

#[async_trait]
impl FixedDepartureRepository for MongoFixedDepartureRepository {
    async fn list(
        &self,
        filter: &FixedDepartureFilter,
        page: Page,
    ) -> Result<Vec<FixedDeparture>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "departureDate": 1 })
            .limit(page.limit)
            .skip(page.skip())
            .build();
        self.find_with(Self::filter_doc(filter), options).await
    }

    async fn count(&self, filter: &FixedDepartureFilter) -> Result<u64, AppError> {
        self.collection
            .count_documents(Self::filter_doc(filter))
            .await
            .map_err(db_err)
    }

    async fn search(
        &self,
        filter: &FixedDepartureFilter,
        limit: i64,
    ) -> Result<Vec<FixedDeparture>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "departureDate": 1 })
            .limit(limit)
            .build();
        self.find_with(Self::filter_doc(filter), options).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<FixedDeparture>, AppError> {
        self.collection.find_one(doc! { "_id": id }).await.map_err(db_err)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<FixedDeparture>, AppError> {
        self.collection.find_one(doc! { "slug": slug }).await.map_err(db_err)
    }

    async fn insert(&self, departure: &FixedDeparture) -> Result<(), AppError> {
        self.collection.insert_one(departure).await.map_err(write_err)?;
        Ok(())
    }

    async fn replace(&self, departure: &FixedDeparture) -> Result<bool, AppError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": departure.id }, departure)
            .await
            .map_err(write_err)?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(db_err)?;
        Ok(result.deleted_count > 0)
    }
}
