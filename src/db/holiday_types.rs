use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::IndexModel;

use crate::db::{contains_ci, db_err, write_err};
use crate::error::AppError;
use crate::models::holiday_type::HolidayType;
use crate::search::SuggestCandidate;
use crate::slug::SlugLookup;

/// Repository trait for holiday types. Listings follow the admin-managed
/// carousel order (`order` asc, newest first within a rank).
#[async_trait]
pub trait HolidayTypeRepository: SlugLookup {
    async fn list_active(&self) -> Result<Vec<HolidayType>, AppError>;

    /// Admin listing, including inactive entries.
    async fn list_all(&self) -> Result<Vec<HolidayType>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<HolidayType>, AppError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<HolidayType>, AppError>;

    async fn insert(&self, holiday_type: &HolidayType) -> Result<(), AppError>;

    async fn replace(&self, holiday_type: &HolidayType) -> Result<bool, AppError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    async fn suggest_candidates(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SuggestCandidate>, AppError>;
}

/// MongoDB implementation of the HolidayTypeRepository.
pub struct MongoHolidayTypeRepository {
    collection: mongodb::Collection<HolidayType>,
}

impl MongoHolidayTypeRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { collection: db.collection("holidayTypes") }
    }

    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let unique_slug = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(unique_slug).await.map_err(db_err)?;
        Ok(())
    }

    async fn list_with(&self, filter: bson::Document) -> Result<Vec<HolidayType>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "order": 1, "createdAt": -1 })
            .build();

        let mut cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(db_err)?;

        let mut holiday_types = Vec::new();
        while let Some(ht) = cursor.try_next().await.map_err(db_err)? {
            holiday_types.push(ht);
        }
        Ok(holiday_types)
    }
}

#[async_trait]
impl SlugLookup for MongoHolidayTypeRepository {
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
impl HolidayTypeRepository for MongoHolidayTypeRepository {
    async fn list_active(&self) -> Result<Vec<HolidayType>, AppError> {
        self.list_with(doc! { "isActive": true }).await
    }

    async fn list_all(&self) -> Result<Vec<HolidayType>, AppError> {
        self.list_with(doc! {}).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<HolidayType>, AppError> {
        self.collection.find_one(doc! { "_id": id }).await.map_err(db_err)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<HolidayType>, AppError> {
        self.collection.find_one(doc! { "slug": slug }).await.map_err(db_err)
    }

    async fn insert(&self, holiday_type: &HolidayType) -> Result<(), AppError> {
        self.collection.insert_one(holiday_type).await.map_err(write_err)?;
        Ok(())
    }

    async fn replace(&self, holiday_type: &HolidayType) -> Result<bool, AppError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": holiday_type.id }, holiday_type)
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

    async fn suggest_candidates(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SuggestCandidate>, AppError> {
        let filter = doc! {
            "isActive": true,
            "$and": [
                { "$or": [
                    contains_ci("title", query),
                    contains_ci("description", query),
                    contains_ci("shortDescription", query),
                ] },
                { "title": { "$exists": true, "$nin": [bson::Bson::Null, ""] } },
            ],
        };

        let options = FindOptions::builder().limit(limit).build();
        let mut cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(db_err)?;

        let mut candidates = Vec::new();
        while let Some(ht) = cursor.try_next().await.map_err(db_err)? {
            candidates.push(ht.suggest_candidate());
        }
        Ok(candidates)
    }
}
