use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::IndexModel;

use crate::db::{contains_ci, db_err, distinct_strings, regex_ci, write_err, Page};
use crate::error::AppError;
use crate::models::category::TourType;
use crate::models::package::TourPackage;
use crate::search::SuggestCandidate;
use crate::slug::SlugLookup;

/// Query-parameter driven filter over the packages collection.
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    pub active_only: bool,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub tour_type: Option<TourType>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub holiday_type: Option<ObjectId>,
    /// Free-text search over title / destination / description.
    pub text: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Repository trait for tour packages.
///
/// The [`SlugLookup`] supertrait feeds the slug allocator.
#[async_trait]
pub trait PackageRepository: SlugLookup {
    async fn list(&self, filter: &PackageFilter, page: Page) -> Result<Vec<TourPackage>, AppError>;

    async fn count(&self, filter: &PackageFilter) -> Result<u64, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<TourPackage>, AppError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<TourPackage>, AppError>;

    async fn insert(&self, package: &TourPackage) -> Result<(), AppError>;

    /// Replaces the document with the same id; returns false when it no
    /// longer exists.
    async fn replace(&self, package: &TourPackage) -> Result<bool, AppError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    /// Distinct non-empty values of a string field among active packages.
    async fn distinct_field(&self, field: &str) -> Result<Vec<String>, AppError>;

    /// Active packages matching `query` in any searchable field, capped at
    /// `limit`, projected for ranking.
    async fn suggest_candidates(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SuggestCandidate>, AppError>;
}

/// MongoDB implementation of the PackageRepository.
pub struct MongoPackageRepository {
    collection: mongodb::Collection<TourPackage>,
}

impl MongoPackageRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { collection: db.collection("packages") }
    }

    /// Creates the unique slug index that acts as the final arbiter for
    /// concurrent slug allocation.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let unique_slug = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(unique_slug).await.map_err(db_err)?;
        Ok(())
    }

    fn filter_doc(filter: &PackageFilter) -> Document {
        let mut d = Document::new();
        if filter.active_only {
            d.insert("isActive", true);
        }
        if let Some(ref category) = filter.category {
            d.insert("category", category.as_str());
        }
        if let Some(featured) = filter.featured {
            d.insert("isFeatured", featured);
        }
        if let Some(tour_type) = filter.tour_type {
            d.insert("tourType", tour_type.as_str());
        }
        if let Some(ref country) = filter.country {
            d.insert("country", regex_ci(country));
        }
        if let Some(ref state) = filter.state {
            d.insert("state", regex_ci(state));
        }
        if let Some(holiday_type) = filter.holiday_type {
            d.insert("holidayType", holiday_type);
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
}

#[async_trait]
impl SlugLookup for MongoPackageRepository {
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
impl PackageRepository for MongoPackageRepository {
    async fn list(&self, filter: &PackageFilter, page: Page) -> Result<Vec<TourPackage>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .limit(page.limit)
            .skip(page.skip())
            .build();

        let mut cursor = self
            .collection
            .find(Self::filter_doc(filter))
            .with_options(options)
            .await
            .map_err(db_err)?;

        let mut packages = Vec::new();
        while let Some(pkg) = cursor.try_next().await.map_err(db_err)? {
            packages.push(pkg);
        }
        Ok(packages)
    }

    async fn count(&self, filter: &PackageFilter) -> Result<u64, AppError> {
        self.collection
            .count_documents(Self::filter_doc(filter))
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<TourPackage>, AppError> {
        self.collection.find_one(doc! { "_id": id }).await.map_err(db_err)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<TourPackage>, AppError> {
        self.collection.find_one(doc! { "slug": slug }).await.map_err(db_err)
    }

    async fn insert(&self, package: &TourPackage) -> Result<(), AppError> {
        self.collection.insert_one(package).await.map_err(write_err)?;
        Ok(())
    }

    async fn replace(&self, package: &TourPackage) -> Result<bool, AppError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": package.id }, package)
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
                    contains_ci("title", query),
                    contains_ci("description", query),
                    contains_ci("destination", query),
                ] },
                // Candidates without a usable title are dropped at the
                // filter stage, not during scoring.
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
        while let Some(pkg) = cursor.try_next().await.map_err(db_err)? {
            candidates.push(pkg.suggest_candidate());
        }
        Ok(candidates)
    }
}
