use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::blogs::{BlogRepository, MongoBlogRepository};
use crate::db::content::{ContentRepository, MongoContentRepository};
use crate::db::destinations::{DestinationRepository, MongoDestinationRepository};
use crate::db::faqs::{FaqRepository, MongoFaqRepository};
use crate::db::fixed_departures::{FixedDepartureRepository, MongoFixedDepartureRepository};
use crate::db::holiday_types::{HolidayTypeRepository, MongoHolidayTypeRepository};
use crate::db::packages::{MongoPackageRepository, PackageRepository};
use crate::db::seo::{MongoSeoRepository, SeoRepository};
use crate::db::testimonials::{MongoTestimonialRepository, TestimonialRepository};
use crate::error::AppError;
use crate::locations::LocationClient;
use crate::models::content::{CtaContent, FooterContent, HeaderContent, HeroContent};

/// Shared application state: one repository handle per collection plus the
/// location lookup client and configuration.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub packages: Arc<dyn PackageRepository>,
    pub destinations: Arc<dyn DestinationRepository>,
    pub fixed_departures: Arc<dyn FixedDepartureRepository>,
    pub holiday_types: Arc<dyn HolidayTypeRepository>,
    pub blogs: Arc<dyn BlogRepository>,
    pub testimonials: Arc<dyn TestimonialRepository>,
    pub hero: Arc<dyn ContentRepository<HeroContent>>,
    pub cta: Arc<dyn ContentRepository<CtaContent>>,
    pub header: Arc<dyn ContentRepository<HeaderContent>>,
    pub footer: Arc<dyn ContentRepository<FooterContent>>,
    pub seo: Arc<dyn SeoRepository>,
    pub faqs: Arc<dyn FaqRepository>,
    pub locations: Arc<LocationClient>,
}

impl AppState {
    /// Wires every repository to MongoDB and creates the unique indexes
    /// that back slug/page conflict detection.
    pub async fn from_mongo(
        config: AppConfig,
        db: &mongodb::Database,
    ) -> Result<Self, AppError> {
        let packages = MongoPackageRepository::new(db);
        packages.ensure_indexes().await?;
        let destinations = MongoDestinationRepository::new(db);
        destinations.ensure_indexes().await?;
        let fixed_departures = MongoFixedDepartureRepository::new(db);
        fixed_departures.ensure_indexes().await?;
        let holiday_types = MongoHolidayTypeRepository::new(db);
        holiday_types.ensure_indexes().await?;
        let seo = MongoSeoRepository::new(db);
        seo.ensure_indexes().await?;

        let locations = Arc::new(LocationClient::new(config.country_api_key.clone()));

        Ok(Self {
            packages: Arc::new(packages),
            destinations: Arc::new(destinations),
            fixed_departures: Arc::new(fixed_departures),
            holiday_types: Arc::new(holiday_types),
            blogs: Arc::new(MongoBlogRepository::new(db)),
            testimonials: Arc::new(MongoTestimonialRepository::new(db)),
            hero: Arc::new(MongoContentRepository::<HeroContent>::new(db)),
            cta: Arc::new(MongoContentRepository::<CtaContent>::new(db)),
            header: Arc::new(MongoContentRepository::<HeaderContent>::new(db)),
            footer: Arc::new(MongoContentRepository::<FooterContent>::new(db)),
            seo: Arc::new(seo),
            faqs: Arc::new(MongoFaqRepository::new(db)),
            locations,
            config,
        })
    }

    /// Base URL used when absolutizing stored image paths.
    pub fn base_url(&self) -> Option<&str> {
        self.config.public_base_url.as_deref()
    }
}
