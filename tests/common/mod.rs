#![allow(dead_code)]

//! Shared test environment: the full API router wired to in-memory
//! repository implementations, driven over HTTP with axum-test.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum_test::TestServer;
use bson::oid::ObjectId;
use chrono::Utc;

use voyagecms::api;
use voyagecms::config::AppConfig;
use voyagecms::db::blogs::{BlogFilter, BlogRepository};
use voyagecms::db::content::{ContentBlock, ContentRepository};
use voyagecms::db::destinations::{DestinationFilter, DestinationRepository};
use voyagecms::db::faqs::{FaqFilter, FaqRepository};
use voyagecms::db::fixed_departures::{FixedDepartureFilter, FixedDepartureRepository};
use voyagecms::db::holiday_types::HolidayTypeRepository;
use voyagecms::db::packages::{PackageFilter, PackageRepository};
use voyagecms::db::seo::SeoRepository;
use voyagecms::db::testimonials::TestimonialRepository;
use voyagecms::db::Page;
use voyagecms::error::AppError;
use voyagecms::locations::LocationClient;
use voyagecms::models::blog::Blog;
use voyagecms::models::category::{Category, TourType};
use voyagecms::models::common::SeoMeta;
use voyagecms::models::content::{CtaContent, FooterContent, HeaderContent, HeroContent};
use voyagecms::models::destination::Destination;
use voyagecms::models::faq::Faq;
use voyagecms::models::fixed_departure::FixedDeparture;
use voyagecms::models::holiday_type::HolidayType;
use voyagecms::models::package::TourPackage;
use voyagecms::models::seo::SeoSettings;
use voyagecms::models::testimonial::Testimonial;
use voyagecms::search::SuggestCandidate;
use voyagecms::slug::SlugLookup;
use voyagecms::state::AppState;

pub const TEST_BASE_URL: &str = "https://api.test.example";

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn opt_contains_ci(haystack: &Option<String>, needle: &str) -> bool {
    haystack.as_deref().is_some_and(|h| contains_ci(h, needle))
}

fn apply_page<T: Clone>(items: Vec<T>, page: Page) -> Vec<T> {
    let limit = if page.limit == 0 { usize::MAX } else { page.limit as usize };
    items.into_iter().skip(page.skip() as usize).take(limit).collect()
}

// ---- packages ----

#[derive(Default)]
pub struct InMemoryPackages {
    pub items: Mutex<Vec<TourPackage>>,
}

impl InMemoryPackages {
    fn matches(filter: &PackageFilter, pkg: &TourPackage) -> bool {
        if filter.active_only && !pkg.is_active {
            return false;
        }
        if let Some(ref category) = filter.category {
            if pkg.category.as_str() != category.as_str() {
                return false;
            }
        }
        if let Some(featured) = filter.featured {
            if pkg.is_featured != featured {
                return false;
            }
        }
        if let Some(tour_type) = filter.tour_type {
            if pkg.tour_type != tour_type {
                return false;
            }
        }
        if let Some(ref country) = filter.country {
            if !contains_ci(&pkg.country, country) {
                return false;
            }
        }
        if let Some(ref state) = filter.state {
            if !opt_contains_ci(&pkg.state, state) {
                return false;
            }
        }
        if let Some(holiday_type) = filter.holiday_type {
            if pkg.holiday_type != Some(holiday_type) {
                return false;
            }
        }
        if let Some(ref q) = filter.text {
            if !(contains_ci(&pkg.title, q)
                || contains_ci(&pkg.destination, q)
                || contains_ci(&pkg.description, q))
            {
                return false;
            }
        }
        if let Some(min) = filter.min_price {
            if pkg.price < min {
                return false;
            }
        }
        if let Some(max) = filter.max_price {
            if pkg.price > max {
                return false;
            }
        }
        true
    }

    fn sorted_matching(&self, filter: &PackageFilter) -> Vec<TourPackage> {
        let mut items: Vec<TourPackage> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|p| Self::matches(filter, p))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }
}

#[async_trait]
impl SlugLookup for InMemoryPackages {
    async fn slug_exists(
        &self,
        slug: &str,
        exclude_id: Option<ObjectId>,
    ) -> Result<bool, AppError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.slug == slug && Some(p.id) != exclude_id))
    }
}

#[async_trait]
impl PackageRepository for InMemoryPackages {
    async fn list(&self, filter: &PackageFilter, page: Page) -> Result<Vec<TourPackage>, AppError> {
        Ok(apply_page(self.sorted_matching(filter), page))
    }

    async fn count(&self, filter: &PackageFilter) -> Result<u64, AppError> {
        Ok(self.sorted_matching(filter).len() as u64)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<TourPackage>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<TourPackage>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|p| p.slug == slug).cloned())
    }

    async fn insert(&self, package: &TourPackage) -> Result<(), AppError> {
        let mut items = self.items.lock().unwrap();
        // Mirror the unique slug index: the store is the final arbiter.
        if items.iter().any(|p| p.slug == package.slug) {
            return Err(AppError::Conflict(
                "Slug already exists. Please choose a different one.".to_string(),
            ));
        }
        items.push(package.clone());
        Ok(())
    }

    async fn replace(&self, package: &TourPackage) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        if items.iter().any(|p| p.slug == package.slug && p.id != package.id) {
            return Err(AppError::Conflict(
                "Slug already exists. Please choose a different one.".to_string(),
            ));
        }
        match items.iter_mut().find(|p| p.id == package.id) {
            Some(slot) => {
                *slot = package.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|p| p.id != id);
        Ok(items.len() < before)
    }

    async fn distinct_field(&self, field: &str) -> Result<Vec<String>, AppError> {
        let items = self.items.lock().unwrap();
        let mut values: Vec<String> = items
            .iter()
            .filter(|p| p.is_active)
            .filter_map(|p| match field {
                "country" => Some(p.country.clone()),
                "tourType" => Some(p.tour_type.as_str().to_string()),
                "state" => p.state.clone(),
                _ => None,
            })
            .filter(|v| !v.is_empty())
            .collect();
        values.sort();
        values.dedup();
        Ok(values)
    }

    async fn suggest_candidates(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SuggestCandidate>, AppError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|p| p.is_active && !p.title.is_empty())
            .filter(|p| {
                contains_ci(&p.title, query)
                    || contains_ci(&p.description, query)
                    || contains_ci(&p.destination, query)
            })
            .take(limit as usize)
            .map(|p| p.suggest_candidate())
            .collect())
    }
}

// ---- destinations ----

#[derive(Default)]
pub struct InMemoryDestinations {
    pub items: Mutex<Vec<Destination>>,
}

impl InMemoryDestinations {
    fn matches(filter: &DestinationFilter, dest: &Destination) -> bool {
        if filter.active_only && !dest.is_active {
            return false;
        }
        if let Some(trending) = filter.trending {
            if dest.is_trending != trending {
                return false;
            }
        }
        if let Some(tour_type) = filter.tour_type {
            if dest.tour_type != tour_type {
                return false;
            }
        }
        if let Some(ref country) = filter.country {
            if !contains_ci(&dest.country, country) {
                return false;
            }
        }
        if let Some(ref state) = filter.state {
            let state_hit = opt_contains_ci(&dest.state, state);
            let hit = if filter.state_matches_country {
                state_hit || contains_ci(&dest.country, state)
            } else {
                state_hit
            };
            if !hit {
                return false;
            }
        }
        if let Some(ref category) = filter.category {
            if dest.category.as_str() != category.as_str() {
                return false;
            }
        }
        if let Some(holiday_type) = filter.holiday_type {
            if dest.holiday_type != Some(holiday_type) {
                return false;
            }
        }
        if let Some(ref location) = filter.location {
            if !contains_ci(&dest.location, location) {
                return false;
            }
        }
        if let Some(ref q) = filter.text {
            if !(contains_ci(&dest.name, q)
                || contains_ci(&dest.description, q)
                || contains_ci(&dest.country, q)
                || opt_contains_ci(&dest.state, q))
            {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl SlugLookup for InMemoryDestinations {
    async fn slug_exists(
        &self,
        slug: &str,
        exclude_id: Option<ObjectId>,
    ) -> Result<bool, AppError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .any(|d| d.slug == slug && Some(d.id) != exclude_id))
    }
}

#[async_trait]
impl DestinationRepository for InMemoryDestinations {
    async fn list(
        &self,
        filter: &DestinationFilter,
        page: Page,
    ) -> Result<Vec<Destination>, AppError> {
        let mut items: Vec<Destination> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|d| Self::matches(filter, d))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.visit_count.cmp(&a.visit_count))
        });
        Ok(apply_page(items, page))
    }

    async fn count(&self, filter: &DestinationFilter) -> Result<u64, AppError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|d| Self::matches(filter, d))
            .count() as u64)
    }

    async fn search(&self, filter: &DestinationFilter) -> Result<Vec<Destination>, AppError> {
        let mut items: Vec<Destination> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|d| Self::matches(filter, d))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.visit_count.cmp(&a.visit_count));
        Ok(items)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Destination>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Destination>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|d| d.slug == slug).cloned())
    }

    async fn insert(&self, destination: &Destination) -> Result<(), AppError> {
        let mut items = self.items.lock().unwrap();
        if items.iter().any(|d| d.slug == destination.slug) {
            return Err(AppError::Conflict(
                "Slug already exists. Please choose a different one.".to_string(),
            ));
        }
        items.push(destination.clone());
        Ok(())
    }

    async fn replace(&self, destination: &Destination) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        if items
            .iter()
            .any(|d| d.slug == destination.slug && d.id != destination.id)
        {
            return Err(AppError::Conflict(
                "Slug already exists. Please choose a different one.".to_string(),
            ));
        }
        match items.iter_mut().find(|d| d.id == destination.id) {
            Some(slot) => {
                *slot = destination.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|d| d.id != id);
        Ok(items.len() < before)
    }

    async fn increment_visits(&self, id: ObjectId) -> Result<(), AppError> {
        if let Some(dest) = self.items.lock().unwrap().iter_mut().find(|d| d.id == id) {
            dest.visit_count += 1;
        }
        Ok(())
    }

    async fn distinct_field(&self, field: &str) -> Result<Vec<String>, AppError> {
        let items = self.items.lock().unwrap();
        let mut values: Vec<String> = items
            .iter()
            .filter(|d| d.is_active)
            .filter_map(|d| match field {
                "country" => Some(d.country.clone()),
                "tourType" => Some(d.tour_type.as_str().to_string()),
                "state" => d.state.clone(),
                _ => None,
            })
            .filter(|v| !v.is_empty())
            .collect();
        values.sort();
        values.dedup();
        Ok(values)
    }

    async fn suggest_candidates(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SuggestCandidate>, AppError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|d| d.is_active && !d.name.is_empty())
            .filter(|d| {
                contains_ci(&d.name, query)
                    || contains_ci(&d.description, query)
                    || contains_ci(&d.location, query)
                    || contains_ci(&d.country, query)
                    || opt_contains_ci(&d.state, query)
            })
            .take(limit as usize)
            .map(|d| d.suggest_candidate())
            .collect())
    }
}

// ---- fixed departures ----

#[derive(Default)]
pub struct InMemoryFixedDepartures {
    pub items: Mutex<Vec<FixedDeparture>>,
}

impl InMemoryFixedDepartures {
    fn matches(filter: &FixedDepartureFilter, dep: &FixedDeparture) -> bool {
        if filter.active_only && !dep.is_active {
            return false;
        }
        if let Some(status) = filter.status {
            if dep.status != status {
                return false;
            }
        }
        if let Some(featured) = filter.featured {
            if dep.is_featured != featured {
                return false;
            }
        }
        if let Some(ref destination) = filter.destination {
            if !contains_ci(&dep.destination, destination) {
                return false;
            }
        }
        if let Some(ref q) = filter.text {
            if !(contains_ci(&dep.title, q)
                || contains_ci(&dep.destination, q)
                || contains_ci(&dep.description, q))
            {
                return false;
            }
        }
        if let Some(min) = filter.min_price {
            if dep.price < min {
                return false;
            }
        }
        if let Some(max) = filter.max_price {
            if dep.price > max {
                return false;
            }
        }
        true
    }

    fn sorted_matching(&self, filter: &FixedDepartureFilter) -> Vec<FixedDeparture> {
        let mut items: Vec<FixedDeparture> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|d| Self::matches(filter, d))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.departure_date.cmp(&b.departure_date));
        items
    }
}

#[async_trait]
impl SlugLookup for InMemoryFixedDepartures {
    async fn slug_exists(
        &self,
        slug: &str,
        exclude_id: Option<ObjectId>,
    ) -> Result<bool, AppError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .any(|d| d.slug == slug && Some(d.id) != exclude_id))
    }
}

#[async_trait]
impl FixedDepartureRepository for InMemoryFixedDepartures {
    async fn list(
        &self,
        filter: &FixedDepartureFilter,
        page: Page,
    ) -> Result<Vec<FixedDeparture>, AppError> {
        Ok(apply_page(self.sorted_matching(filter), page))
    }

    async fn count(&self, filter: &FixedDepartureFilter) -> Result<u64, AppError> {
        Ok(self.sorted_matching(filter).len() as u64)
    }

    async fn search(
        &self,
        filter: &FixedDepartureFilter,
        limit: i64,
    ) -> Result<Vec<FixedDeparture>, AppError> {
        Ok(self
            .sorted_matching(filter)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<FixedDeparture>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<FixedDeparture>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|d| d.slug == slug).cloned())
    }

    async fn insert(&self, departure: &FixedDeparture) -> Result<(), AppError> {
        let mut items = self.items.lock().unwrap();
        if items.iter().any(|d| d.slug == departure.slug) {
            return Err(AppError::Conflict(
                "Slug already exists. Please choose a different one.".to_string(),
            ));
        }
        items.push(departure.clone());
        Ok(())
    }

    async fn replace(&self, departure: &FixedDeparture) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        if items
            .iter()
            .any(|d| d.slug == departure.slug && d.id != departure.id)
        {
            return Err(AppError::Conflict(
                "Slug already exists. Please choose a different one.".to_string(),
            ));
        }
        match items.iter_mut().find(|d| d.id == departure.id) {
            Some(slot) => {
                *slot = departure.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|d| d.id != id);
        Ok(items.len() < before)
    }
}

// ---- holiday types ----

#[derive(Default)]
pub struct InMemoryHolidayTypes {
    pub items: Mutex<Vec<HolidayType>>,
}

impl InMemoryHolidayTypes {
    fn ordered(&self, active_only: bool) -> Vec<HolidayType> {
        let mut items: Vec<HolidayType> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|ht| !active_only || ht.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.order.cmp(&b.order).then(b.created_at.cmp(&a.created_at)));
        items
    }
}

#[async_trait]
impl SlugLookup for InMemoryHolidayTypes {
    async fn slug_exists(
        &self,
        slug: &str,
        exclude_id: Option<ObjectId>,
    ) -> Result<bool, AppError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .any(|ht| ht.slug == slug && Some(ht.id) != exclude_id))
    }
}

#[async_trait]
impl HolidayTypeRepository for InMemoryHolidayTypes {
    async fn list_active(&self) -> Result<Vec<HolidayType>, AppError> {
        Ok(self.ordered(true))
    }

    async fn list_all(&self) -> Result<Vec<HolidayType>, AppError> {
        Ok(self.ordered(false))
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<HolidayType>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|ht| ht.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<HolidayType>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|ht| ht.slug == slug).cloned())
    }

    async fn insert(&self, holiday_type: &HolidayType) -> Result<(), AppError> {
        let mut items = self.items.lock().unwrap();
        if items.iter().any(|ht| ht.slug == holiday_type.slug) {
            return Err(AppError::Conflict(
                "Slug already exists. Please choose a different one.".to_string(),
            ));
        }
        items.push(holiday_type.clone());
        Ok(())
    }

    async fn replace(&self, holiday_type: &HolidayType) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        if items
            .iter()
            .any(|ht| ht.slug == holiday_type.slug && ht.id != holiday_type.id)
        {
            return Err(AppError::Conflict(
                "Slug already exists. Please choose a different one.".to_string(),
            ));
        }
        match items.iter_mut().find(|ht| ht.id == holiday_type.id) {
            Some(slot) => {
                *slot = holiday_type.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|ht| ht.id != id);
        Ok(items.len() < before)
    }

    async fn suggest_candidates(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SuggestCandidate>, AppError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|ht| ht.is_active && !ht.title.is_empty())
            .filter(|ht| {
                contains_ci(&ht.title, query)
                    || contains_ci(&ht.description, query)
                    || contains_ci(&ht.short_description, query)
            })
            .take(limit as usize)
            .map(|ht| ht.suggest_candidate())
            .collect())
    }
}

// ---- blogs ----

#[derive(Default)]
pub struct InMemoryBlogs {
    pub items: Mutex<Vec<Blog>>,
}

impl InMemoryBlogs {
    fn matches(filter: &BlogFilter, blog: &Blog) -> bool {
        if let Some(ref category) = filter.category {
            if &blog.category != category {
                return false;
            }
        }
        if let Some(featured) = filter.featured {
            if blog.is_featured != featured {
                return false;
            }
        }
        if let Some(published) = filter.published {
            if blog.is_published != published {
                return false;
            }
        }
        if let Some(ref author) = filter.author {
            if !contains_ci(&blog.author, author) {
                return false;
            }
        }
        if let Some(ref q) = filter.text {
            if !(contains_ci(&blog.title, q)
                || contains_ci(&blog.content, q)
                || contains_ci(&blog.excerpt, q))
            {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogs {
    async fn list(&self, filter: &BlogFilter, page: Page) -> Result<Vec<Blog>, AppError> {
        let mut items: Vec<Blog> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|b| Self::matches(filter, b))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(apply_page(items, page))
    }

    async fn count(&self, filter: &BlogFilter) -> Result<u64, AppError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|b| Self::matches(filter, b))
            .count() as u64)
    }

    async fn list_by_popularity(
        &self,
        filter: &BlogFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Blog>, AppError> {
        let mut items: Vec<Blog> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|b| Self::matches(filter, b))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.views.cmp(&a.views).then(b.created_at.cmp(&a.created_at)));
        if let Some(limit) = limit {
            items.truncate(limit as usize);
        }
        Ok(items)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Blog>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, blog: &Blog) -> Result<(), AppError> {
        self.items.lock().unwrap().push(blog.clone());
        Ok(())
    }

    async fn replace(&self, blog: &Blog) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|b| b.id == blog.id) {
            Some(slot) => {
                *slot = blog.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|b| b.id != id);
        Ok(items.len() < before)
    }

    async fn increment_views(&self, id: ObjectId) -> Result<(), AppError> {
        if let Some(blog) = self.items.lock().unwrap().iter_mut().find(|b| b.id == id) {
            blog.views += 1;
        }
        Ok(())
    }

    async fn increment_likes(&self, id: ObjectId) -> Result<(), AppError> {
        if let Some(blog) = self.items.lock().unwrap().iter_mut().find(|b| b.id == id) {
            blog.likes += 1;
        }
        Ok(())
    }
}

// ---- testimonials ----

#[derive(Default)]
pub struct InMemoryTestimonials {
    pub items: Mutex<Vec<Testimonial>>,
}

#[async_trait]
impl TestimonialRepository for InMemoryTestimonials {
    async fn list_active(&self) -> Result<Vec<Testimonial>, AppError> {
        let mut items: Vec<Testimonial> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn list_featured(&self) -> Result<Vec<Testimonial>, AppError> {
        let mut items: Vec<Testimonial> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_active && t.featured)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Testimonial>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, testimonial: &Testimonial) -> Result<(), AppError> {
        self.items.lock().unwrap().push(testimonial.clone());
        Ok(())
    }

    async fn replace(&self, testimonial: &Testimonial) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|t| t.id == testimonial.id) {
            Some(slot) => {
                *slot = testimonial.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|t| t.id != id);
        Ok(items.len() < before)
    }
}

// ---- content blocks ----

pub struct InMemoryContent<T> {
    pub items: Mutex<Vec<T>>,
}

impl<T> Default for InMemoryContent<T> {
    fn default() -> Self {
        Self { items: Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl<T: ContentBlock> ContentRepository<T> for InMemoryContent<T> {
    async fn find_active(&self) -> Result<Option<T>, AppError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.is_active())
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<T>, AppError> {
        let mut items: Vec<T> = self.items.lock().unwrap().clone();
        items.reverse(); // newest first
        Ok(items)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|b| b.id() == id).cloned())
    }

    async fn insert_as_active(&self, block: &T) -> Result<(), AppError> {
        let mut items = self.items.lock().unwrap();
        for existing in items.iter_mut() {
            existing.set_active(false);
        }
        items.push(block.clone());
        Ok(())
    }

    async fn replace(&self, block: &T) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|b| b.id() == block.id()) {
            Some(slot) => {
                *slot = block.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate_others(&self, keep: ObjectId) -> Result<(), AppError> {
        for block in self.items.lock().unwrap().iter_mut() {
            if block.id() != keep {
                block.set_active(false);
            }
        }
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|b| b.id() != id);
        Ok(items.len() < before)
    }

    async fn delete_except(&self, keep: ObjectId) -> Result<u64, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|b| b.id() == keep);
        Ok((before - items.len()) as u64)
    }
}

// ---- SEO ----

#[derive(Default)]
pub struct InMemorySeo {
    pub items: Mutex<Vec<SeoSettings>>,
}

#[async_trait]
impl SeoRepository for InMemorySeo {
    async fn find_by_page(&self, page: &str) -> Result<Option<SeoSettings>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|s| s.page == page).cloned())
    }

    async fn upsert(&self, settings: &SeoSettings) -> Result<(), AppError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|s| s.page == settings.page) {
            Some(slot) => *slot = settings.clone(),
            None => items.push(settings.clone()),
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<SeoSettings>, AppError> {
        let mut items: Vec<SeoSettings> = self.items.lock().unwrap().clone();
        items.sort_by(|a, b| a.page.cmp(&b.page));
        Ok(items)
    }

    async fn delete_by_page(&self, page: &str) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|s| s.page != page);
        Ok(items.len() < before)
    }
}

// ---- FAQs ----

#[derive(Default)]
pub struct InMemoryFaqs {
    pub items: Mutex<Vec<Faq>>,
}

impl InMemoryFaqs {
    fn matches(filter: &FaqFilter, faq: &Faq) -> bool {
        if let Some(ref location) = filter.location {
            if &faq.location != location {
                return false;
            }
        }
        if let Some(is_active) = filter.is_active {
            if faq.is_active != is_active {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl FaqRepository for InMemoryFaqs {
    async fn list(
        &self,
        filter: &FaqFilter,
        limit: i64,
        skip: u64,
    ) -> Result<Vec<Faq>, AppError> {
        let mut items: Vec<Faq> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|f| Self::matches(filter, f))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.order.cmp(&b.order).then(b.created_at.cmp(&a.created_at)));
        Ok(items
            .into_iter()
            .skip(skip as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, filter: &FaqFilter) -> Result<u64, AppError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|f| Self::matches(filter, f))
            .count() as u64)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Faq>, AppError> {
        Ok(self.items.lock().unwrap().iter().find(|f| f.id == id).cloned())
    }

    async fn insert(&self, faq: &Faq) -> Result<(), AppError> {
        self.items.lock().unwrap().push(faq.clone());
        Ok(())
    }

    async fn replace(&self, faq: &Faq) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|f| f.id == faq.id) {
            Some(slot) => {
                *slot = faq.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|f| f.id != id);
        Ok(items.len() < before)
    }

    async fn distinct_locations(&self) -> Result<Vec<String>, AppError> {
        let items = self.items.lock().unwrap();
        let mut locations: Vec<String> = items.iter().map(|f| f.location.clone()).collect();
        locations.sort();
        locations.dedup();
        Ok(locations)
    }
}

// ---- environment ----

/// In-memory equivalent of the production wiring; typed handles stay
/// available so tests can seed documents directly.
pub struct TestEnv {
    pub state: AppState,
    pub packages: Arc<InMemoryPackages>,
    pub destinations: Arc<InMemoryDestinations>,
    pub fixed_departures: Arc<InMemoryFixedDepartures>,
    pub holiday_types: Arc<InMemoryHolidayTypes>,
    pub blogs: Arc<InMemoryBlogs>,
}

impl TestEnv {
    pub fn new() -> Self {
        let packages = Arc::new(InMemoryPackages::default());
        let destinations = Arc::new(InMemoryDestinations::default());
        let fixed_departures = Arc::new(InMemoryFixedDepartures::default());
        let holiday_types = Arc::new(InMemoryHolidayTypes::default());
        let blogs = Arc::new(InMemoryBlogs::default());

        let config = AppConfig {
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_database: "voyagecms_test".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            public_base_url: Some(TEST_BASE_URL.to_string()),
            allowed_origins: vec![],
            country_api_key: None,
            uploads_dir: "uploads".to_string(),
        };

        let state = AppState {
            config,
            packages: packages.clone(),
            destinations: destinations.clone(),
            fixed_departures: fixed_departures.clone(),
            holiday_types: holiday_types.clone(),
            blogs: blogs.clone(),
            testimonials: Arc::new(InMemoryTestimonials::default()),
            hero: Arc::new(InMemoryContent::<HeroContent>::default()),
            cta: Arc::new(InMemoryContent::<CtaContent>::default()),
            header: Arc::new(InMemoryContent::<HeaderContent>::default()),
            footer: Arc::new(InMemoryContent::<FooterContent>::default()),
            seo: Arc::new(InMemorySeo::default()),
            faqs: Arc::new(InMemoryFaqs::default()),
            locations: Arc::new(LocationClient::new(None)),
        };

        Self { state, packages, destinations, fixed_departures, holiday_types, blogs }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(api::router(self.state.clone()))
    }
}

/// A minimal valid package document for seeding stores directly.
pub fn sample_package(title: &str, slug: &str) -> TourPackage {
    TourPackage {
        id: ObjectId::new(),
        title: title.to_string(),
        slug: slug.to_string(),
        description: format!("{title} description"),
        short_description: format!("{title} in short"),
        price: 15000.0,
        original_price: None,
        discount: 0.0,
        duration: "5D/4N".to_string(),
        destination: "Goa".to_string(),
        category: Category::BeachHolidays,
        holiday_type: None,
        country: "India".to_string(),
        state: Some("Goa".to_string()),
        tour_type: TourType::India,
        images: vec![],
        highlights: vec![],
        itinerary: vec![],
        inclusions: vec![],
        exclusions: vec![],
        terms: vec![],
        rating: 0.0,
        is_active: true,
        is_featured: false,
        seo: SeoMeta::default(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A minimal valid destination document for seeding stores directly.
pub fn sample_destination(name: &str, slug: &str) -> Destination {
    Destination {
        id: ObjectId::new(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: format!("{name} description"),
        short_description: format!("{name} in short"),
        image: "dest.jpg".to_string(),
        location: format!("{name}, India"),
        holiday_type: None,
        country: "India".to_string(),
        state: None,
        tour_type: TourType::India,
        category: Category::TrendingDestinations,
        rating: 0.0,
        price: None,
        duration: None,
        highlights: vec![],
        inclusions: vec![],
        exclusions: vec![],
        itinerary: vec![],
        is_active: true,
        is_trending: false,
        visit_count: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
