use crate::error::Result;
use crate::models::{City, CityLikes, CitySummary, NewReview, Review};
use async_trait::async_trait;

/// Read/write access to cities and reviews.
/// Implemented by the hosted backend and by the in-memory snapshot store.
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// All cities, best rated first
    async fn list_cities(&self) -> Result<Vec<City>>;

    async fn get_city_by_slug(&self, slug: &str) -> Result<Option<City>>;

    async fn get_city_by_id(&self, id: &str) -> Result<Option<City>>;

    /// Reviews for one city, newest first
    async fn list_reviews(&self, city_id: &str) -> Result<Vec<Review>>;

    /// Newest reviews across all cities
    async fn latest_reviews(&self, limit: usize) -> Result<Vec<Review>>;

    /// Name/region lookup returning the narrow summary shape
    async fn search_cities(&self, query: &str) -> Result<Vec<CitySummary>>;

    async fn city_likes(&self, city_id: &str) -> Result<CityLikes>;

    async fn create_review(&self, review: NewReview) -> Result<Review>;

    /// Get the name of the backing source
    fn source_name(&self) -> &'static str;
}
