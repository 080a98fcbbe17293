use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::FindOptions;

use crate::db::{db_err, distinct_strings};
use crate::error::AppError;
use crate::models::faq::Faq;

/// Query-parameter driven filter over the FAQs collection.
#[derive(Debug, Clone, Default)]
pub struct FaqFilter {
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

/// Repository trait for FAQs, ordered by their admin-assigned rank.
#[async_trait]
pub trait FaqRepository: Send + Sync {
    async fn list(&self, filter: &FaqFilter, limit: i64, skip: u64)
        -> Result<Vec<Faq>, AppError>;

    async fn count(&self, filter: &FaqFilter) -> Result<u64, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Faq>, AppError>;

    async fn insert(&self, faq: &Faq) -> Result<(), AppError>;

    async fn replace(&self, faq: &Faq) -> Result<bool, AppError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    /// Every location key that has at least one FAQ, sorted.
    async fn distinct_locations(&self) -> Result<Vec<String>, AppError>;
}

/// MongoDB implementation of the FaqRepository.
pub struct MongoFaqRepository {
    collection: mongodb::Collection<Faq>,
}

impl MongoFaqRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { collection: db.collection("faqs") }
    }

    fn filter_doc(filter: &FaqFilter) -> Document {
        let mut d = Document::new();
        if let Some(ref location) = filter.location {
            d.insert("location", location.as_str());
        }
        if let Some(is_active) = filter.is_active {
            d.insert("isActive", is_active);
        }
        d
    }
}

#[async_trait]
impl FaqRepository for MongoFaqRepository {
    async fn list(
        &self,
        filter: &FaqFilter,
        limit: i64,
        skip: u64,
    ) -> Result<Vec<Faq>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "order": 1, "createdAt": -1 })
            .limit(limit)
            .skip(skip)
            .build();

        let mut cursor = self
            .collection
            .find(Self::filter_doc(filter))
            .with_options(options)
            .await
            .map_err(db_err)?;

        let mut faqs = Vec::new();
        while let Some(faq) = cursor.try_next().await.map_err(db_err)? {
            faqs.push(faq);
        }
        Ok(faqs)
    }

    async fn count(&self, filter: &FaqFilter) -> Result<u64, AppError> {
        self.collection
            .count_documents(Self::filter_doc(filter))
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Faq>, AppError> {
        self.collection.find_one(doc! { "_id": id }).await.map_err(db_err)
    }

    async fn insert(&self, faq: &Faq) -> Result<(), AppError> {
        self.collection.insert_one(faq).await.map_err(db_err)?;
        Ok(())
    }

    async fn replace(&self, faq: &Faq) -> Result<bool, AppError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": faq.id }, faq)
            .await
            .map_err(db_err)?;
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

    async fn distinct_locations(&self) -> Result<Vec<String>, AppError> {
        let values = self
            .collection
            .distinct("location", doc! {})
            .await
            .map_err(db_err)?;
        Ok(distinct_strings(values))
    }
}
