//! Generic repository for the single-active content block collections
//! (hero, CTA, header, footer). The collections share one shape of
//! lifecycle: at most one active document, activation deactivates the
//! rest, and stale inactive copies can be pruned.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::db_err;
use crate::error::AppError;
use crate::models::content::{CtaContent, FooterContent, HeaderContent, HeroContent};

/// A document type that participates in the single-active lifecycle.
pub trait ContentBlock:
    Clone + Send + Sync + Unpin + Serialize + DeserializeOwned + 'static
{
    const COLLECTION: &'static str;

    fn id(&self) -> ObjectId;
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

macro_rules! impl_content_block {
    ($ty:ty, $collection:literal) => {
        impl ContentBlock for $ty {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> ObjectId {
                self.id
            }

            fn is_active(&self) -> bool {
                self.is_active
            }

            fn set_active(&mut self, active: bool) {
                self.is_active = active;
            }
        }
    };
}

impl_content_block!(HeroContent, "heroContent");
impl_content_block!(CtaContent, "ctaContent");
impl_content_block!(HeaderContent, "headerContent");
impl_content_block!(FooterContent, "footerContent");

/// Repository trait shared by all content block collections.
#[async_trait]
pub trait ContentRepository<T: ContentBlock>: Send + Sync {
    async fn find_active(&self) -> Result<Option<T>, AppError>;

    /// All documents, newest first (admin view).
    async fn list_all(&self) -> Result<Vec<T>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError>;

    /// Inserts a new block after deactivating every existing one.
    async fn insert_as_active(&self, block: &T) -> Result<(), AppError>;

    async fn replace(&self, block: &T) -> Result<bool, AppError>;

    /// Marks every document except `keep` inactive.
    async fn deactivate_others(&self, keep: ObjectId) -> Result<(), AppError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    /// Removes every document except `keep`; used to prune duplicate
    /// footer rows accumulated by older admin tooling.
    async fn delete_except(&self, keep: ObjectId) -> Result<u64, AppError>;
}

/// MongoDB implementation, parameterized over the block type.
pub struct MongoContentRepository<T: Send + Sync> {
    collection: mongodb::Collection<T>,
}

impl<T: ContentBlock> MongoContentRepository<T> {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { collection: db.collection(T::COLLECTION) }
    }
}

#[async_trait]
impl<T: ContentBlock> ContentRepository<T> for MongoContentRepository<T> {
    async fn find_active(&self) -> Result<Option<T>, AppError> {
        self.collection
            .find_one(doc! { "isActive": true })
            .await
            .map_err(db_err)
    }

    async fn list_all(&self) -> Result<Vec<T>, AppError> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let mut cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(db_err)?;

        let mut blocks = Vec::new();
        while let Some(block) = cursor.try_next().await.map_err(db_err)? {
            blocks.push(block);
        }
        Ok(blocks)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError> {
        self.collection.find_one(doc! { "_id": id }).await.map_err(db_err)
    }

    async fn insert_as_active(&self, block: &T) -> Result<(), AppError> {
        self.collection
            .update_many(doc! {}, doc! { "$set": { "isActive": false } })
            .await
            .map_err(db_err)?;
        self.collection.insert_one(block).await.map_err(db_err)?;
        Ok(())
    }

    async fn replace(&self, block: &T) -> Result<bool, AppError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": block.id() }, block)
            .await
            .map_err(db_err)?;
        Ok(result.matched_count > 0)
    }

    async fn deactivate_others(&self, keep: ObjectId) -> Result<(), AppError> {
        self.collection
            .update_many(
                doc! { "_id": { "$ne": keep } },
                doc! { "$set": { "isActive": false } },
            )
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(db_err)?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_except(&self, keep: ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection
            .delete_many(doc! { "_id": { "$ne": keep } })
            .await
            .map_err(db_err)?;
        Ok(result.deleted_count)
    }
}
