use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::IndexModel;

use crate::db::{contains_ci, db_err, distinct_strings, regex_ci, write_err, Page};
use crate::error::AppError;
use crate::models::category::TourType;
use crate::models::destination::Destination;
use crate::search::SuggestCandidate;
use crate::slug::SlugLookup;

/// Query-parameter driven filter over the destinations collection.
#[derive(Debug, Clone, Default)]
pub struct DestinationFilter {
    pub active_only: bool,
    pub trending: Option<bool>,
    pub tour_type: Option<TourType>,
    pub country: Option<String>,
    pub state: Option<String>,
    /// International tours historically file states under the country
    /// field, so a state query must match either column.
    pub state_matches_country: bool,
    pub category: Option<String>,
    pub holiday_type: Option<ObjectId>,
    pub location: Option<String>,
    /// Free-text search over name / description / country / state.
    pub text: Option<String>,
}

/// Repository trait for destinations.
#[async_trait]
pub trait DestinationRepository: SlugLookup {
    /// Newest-first listing (`createdAt` desc, `visitCount` desc).
    async fn list(&self, filter: &DestinationFilter, page: Page)
        -> Result<Vec<Destination>, AppError>;

    async fn count(&self, filter: &DestinationFilter) -> Result<u64, AppError>;

    /// Most-visited-first listing used by the search endpoint.
    async fn search(&self, filter: &DestinationFilter) -> Result<Vec<Destination>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Destination>, AppError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Destination>, AppError>;

    async fn insert(&self, destination: &Destination) -> Result<(), AppError>;

    async fn replace(&self, destination: &Destination) -> Result<bool, AppError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    /// Bumps the visit counter without rewriting the document.
    async fn increment_visits(&self, id: ObjectId) -> Result<(), AppError>;

    async fn distinct_field(&self, field: &str) -> Result<Vec<String>, AppError>;

    async fn suggest_candidates(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SuggestCandidate>, AppError>;
}

/// MongoDB implementation of the DestinationRepository.
pub struct MongoDestinationRepository {
    collection: mongodb::Collection<Destination>,
}

impl MongoDestinationRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { collection: db.collection("destinations") }
    }

    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let unique_slug = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(unique_slug).await.map_err(db_err)?;
        Ok(())
    }

    fn filter_doc(filter: &DestinationFilter) -> Document {
        let mut d = Document::new();
        if filter.active_only {
            d.insert("isActive", true);
        }
        if let Some(trending) = filter.trending {
            d.insert("isTrending", trending);
        }
        if let Some(tour_type) = filter.tour_type {
            d.insert("tourType", tour_type.as_str());
        }
        if let Some(ref country) = filter.country {
            d.insert("country", regex_ci(country));
        }
        if let Some(ref state) = filter.state {
            if filter.state_matches_country {
                d.insert(
                    "$or",
                    vec![contains_ci("state", state), contains_ci("country", state)],
                );
            } else {
                d.insert("state", regex_ci(state));
            }
        }
        if let Some(ref category) = filter.category {
            d.insert("category", category.as_str());
        }
        if let Some(holiday_type) = filter.holiday_type {
            d.insert("holidayType", holiday_type);
        }
        if let Some(ref location) = filter.location {
            d.insert("location", regex_ci(location));
        }
        if let Some(ref q) = filter.text {
            d.insert(
                "$and",
                vec![doc! { "$or": [
                    contains_ci("name", q),
                    contains_ci("description", q),
                    contains_ci("country", q),
                    contains_ci("state", q),
                ] }],
            );
        }
        d
    }

    async fn find_with(
        &self,
        filter: Document,
        options: FindOptions,
    ) -> Result<Vec<Destination>, AppError> {
        let mut cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(db_err)?;

        let mut destinations = Vec::new();
        while let Some(dest) = cursor.try_next().await.map_err(db_err)? {
            destinations.push(dest);
        }
        Ok(destinations)
    }
}

#[async_trait]
impl SlugLookup for MongoDestinationRepository {
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
impl DestinationRepository for MongoDestinationRepository {
    async fn list(
        &self,
        filter: &DestinationFilter,
        page: Page,
    ) -> Result<Vec<Destination>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "visitCount": -1 })
            .limit(page.limit)
            .skip(page.skip())
            .build();
        self.find_with(Self::filter_doc(filter), options).await
    }

    async fn count(&self, filter: &DestinationFilter) -> Result<u64, AppError> {
        self.collection
            .count_documents(Self::filter_doc(filter))
            .await
            .map_err(db_err)
    }

    async fn search(&self, filter: &DestinationFilter) -> Result<Vec<Destination>, AppError> {
        let options = FindOptions::builder().sort(doc! { "visitCount": -1 }).build();
        self.find_with(Self::filter_doc(filter), options).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Destination>, AppError> {
        self.collection.find_one(doc! { "_id": id }).await.map_err(db_err)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Destination>, AppError> {
        self.collection.find_one(doc! { "slug": slug }).await.map_err(db_err)
    }

    async fn insert(&self, destination: &Destination) -> Result<(), AppError> {
        self.collection.insert_one(destination).await.map_err(write_err)?;
        Ok(())
    }

    async fn replace(&self, destination: &Destination) -> Result<bool, AppError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": destination.id }, destination)
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

    async fn increment_visits(&self, id: ObjectId) -> Result<(), AppError> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$inc": { "visitCount": 1 } })
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn distinct_field(&self, field: &str) -> Result<Vec<String>, AppError> {
        let values = self
            .collection
            .distinct(field, doc! { "isActive": true })
            .await
            .map_err(db_err)?;
        Ok(distinct_strings(values))
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
                    contains_ci("name", query),
                    contains_ci("description", query),
                    contains_ci("location", query),
                    contains_ci("country", query),
                    contains_ci("state", query),
                ] },
                { "name": { "$exists": true, "$nin": [bson::Bson::Null, ""] } },
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
        while let Some(dest) = cursor.try_next().await.map_err(db_err)? {
            candidates.push(dest.suggest_candidate());
        }
        Ok(candidates)
    }
}
