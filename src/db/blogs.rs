use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::FindOptions;

use crate::db::{contains_ci, db_err, regex_ci, Page};
use crate::error::AppError;
use crate::models::blog::Blog;

/// Query-parameter driven filter over the blogs collection.
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
    pub author: Option<String>,
    /// Free-text search over title / content / excerpt.
    pub text: Option<String>,
}

/// Repository trait for blog posts.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Newest-first listing.
    async fn list(&self, filter: &BlogFilter, page: Page) -> Result<Vec<Blog>, AppError>;

    async fn count(&self, filter: &BlogFilter) -> Result<u64, AppError>;

    /// Most-viewed-first listing used by search and the featured strip.
    async fn list_by_popularity(
        &self,
        filter: &BlogFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Blog>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Blog>, AppError>;

    async fn insert(&self, blog: &Blog) -> Result<(), AppError>;

    async fn replace(&self, blog: &Blog) -> Result<bool, AppError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    async fn increment_views(&self, id: ObjectId) -> Result<(), AppError>;

    async fn increment_likes(&self, id: ObjectId) -> Result<(), AppError>;
}

/// MongoDB implementation of the BlogRepository.
pub struct MongoBlogRepository {
    collection: mongodb::Collection<Blog>,
}

impl MongoBlogRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { collection: db.collection("blogs") }
    }

    fn filter_doc(filter: &BlogFilter) -> Document {
        let mut d = Document::new();
        if let Some(ref category) = filter.category {
            d.insert("category", category.as_str());
        }
        if let Some(featured) = filter.featured {
            d.insert("isFeatured", featured);
        }
        if let Some(published) = filter.published {
            d.insert("isPublished", published);
        }
        if let Some(ref author) = filter.author {
            d.insert("author", regex_ci(author));
        }
        if let Some(ref q) = filter.text {
            d.insert(
                "$or",
                vec![
                    contains_ci("title", q),
                    contains_ci("content", q),
                    contains_ci("excerpt", q),
                ],
            );
        }
        d
    }

    async fn find_with(
        &self,
        filter: Document,
        options: FindOptions,
    ) -> Result<Vec<Blog>, AppError> {
        let mut cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(db_err)?;

        let mut blogs = Vec::new();
        while let Some(blog) = cursor.try_next().await.map_err(db_err)? {
            blogs.push(blog);
        }
        Ok(blogs)
    }
}

#[async_trait]
impl BlogRepository for MongoBlogRepository {
    async fn list(&self, filter: &BlogFilter, page: Page) -> Result<Vec<Blog>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .limit(page.limit)
            .skip(page.skip())
            .build();
        self.find_with(Self::filter_doc(filter), options).await
    }

    async fn count(&self, filter: &BlogFilter) -> Result<u64, AppError> {
        self.collection
            .count_documents(Self::filter_doc(filter))
            .await
            .map_err(db_err)
    }

    async fn list_by_popularity(
        &self,
        filter: &BlogFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Blog>, AppError> {
        let builder = FindOptions::builder()
            .sort(doc! { "views": -1, "createdAt": -1 })
            .limit(limit);
        self.find_with(Self::filter_doc(filter), builder.build()).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Blog>, AppError> {
        self.collection.find_one(doc! { "_id": id }).await.map_err(db_err)
    }

    async fn insert(&self, blog: &Blog) -> Result<(), AppError> {
        self.collection.insert_one(blog).await.map_err(db_err)?;
        Ok(())
    }

    async fn replace(&self, blog: &Blog) -> Result<bool, AppError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": blog.id }, blog)
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

    async fn increment_views(&self, id: ObjectId) -> Result<(), AppError> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$inc": { "views": 1 } })
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn increment_likes(&self, id: ObjectId) -> Result<(), AppError> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$inc": { "likes": 1 } })
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
