use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::FindOptions;

use crate::db::db_err;
use crate::error::AppError;
use crate::models::testimonial::Testimonial;

/// Repository trait for testimonials.
#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    /// Active testimonials, newest first.
    async fn list_active(&self) -> Result<Vec<Testimonial>, AppError>;

    /// Active + featured testimonials, newest first.
    async fn list_featured(&self) -> Result<Vec<Testimonial>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Testimonial>, AppError>;

    async fn insert(&self, testimonial: &Testimonial) -> Result<(), AppError>;

    async fn replace(&self, testimonial: &Testimonial) -> Result<bool, AppError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;
}

/// MongoDB implementation of the TestimonialRepository.
pub struct MongoTestimonialRepository {
    collection: mongodb::Collection<Testimonial>,
}

impl MongoTestimonialRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { collection: db.collection("testimonials") }
    }

    async fn list_with(&self, filter: bson::Document) -> Result<Vec<Testimonial>, AppError> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();

        let mut cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(db_err)?;

        let mut testimonials = Vec::new();
        while let Some(t) = cursor.try_next().await.map_err(db_err)? {
            testimonials.push(t);
        }
        Ok(testimonials)
    }
}

#[async_trait]
impl TestimonialRepository for MongoTestimonialRepository {
    async fn list_active(&self) -> Result<Vec<Testimonial>, AppError> {
        self.list_with(doc! { "isActive": true }).await
    }

    async fn list_featured(&self) -> Result<Vec<Testimonial>, AppError> {
        self.list_with(doc! { "isActive": true, "featured": true }).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Testimonial>, AppError> {
        self.collection.find_one(doc! { "_id": id }).await.map_err(db_err)
    }

    async fn insert(&self, testimonial: &Testimonial) -> Result<(), AppError> {
        self.collection.insert_one(testimonial).await.map_err(db_err)?;
        Ok(())
    }

    async fn replace(&self, testimonial: &Testimonial) -> Result<bool, AppError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": testimonial.id }, testimonial)
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
}
