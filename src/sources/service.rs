use crate::error::{Error, Result};
use crate::filters::{apply_search_filters, filter_cities, unique_regions, HomeFilters, SearchFilters};
use crate::models::{City, CitySummary, LikeCounts, Review, ReviewInput};
use crate::recommend;
use crate::reviews::{self, Page, ReviewQuery};
use crate::search::{sanitize_query, search_cities};
use crate::sources::traits::CityRepository;
use tracing::{debug, info, warn};

/// Read paths that degrade to empty results when the backend fails.
///
/// Only `submit_review` reports errors; everything else logs and returns
/// an empty list, `None` or zero counts.
pub struct CityService<R> {
    repo: R,
}

impl<R: CityRepository> CityService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn source_name(&self) -> &'static str {
        self.repo.source_name()
    }

    fn or_empty<T>(&self, what: &str, result: Result<Vec<T>>) -> Vec<T> {
        result.unwrap_or_else(|e| {
            warn!("{} failed on {}: {}", what, self.repo.source_name(), e);
            Vec::new()
        })
    }

    /// All cities, best rated first.
    pub async fn cities_or_empty(&self) -> Vec<City> {
        let result = self.repo.list_cities().await;
        self.or_empty("list_cities", result)
    }

    pub async fn city_by_slug(&self, slug: &str) -> Option<City> {
        match self.repo.get_city_by_slug(slug).await {
            Ok(city) => city,
            Err(e) => {
                warn!("get_city_by_slug({}) failed: {}", slug, e);
                None
            }
        }
    }

    pub async fn reviews_or_empty(&self, city_id: &str) -> Vec<Review> {
        let result = self.repo.list_reviews(city_id).await;
        self.or_empty("list_reviews", result)
    }

    pub async fn latest_reviews_or_empty(&self, limit: usize) -> Vec<Review> {
        let result = self.repo.latest_reviews(limit).await;
        self.or_empty("latest_reviews", result)
    }

    /// Backend search re-ranked by the local scorer and capped at `limit`.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<CitySummary> {
        self.search_filtered(query, &SearchFilters::default(), limit)
            .await
    }

    /// Like [`search`](Self::search), narrowed by the search-page filters
    /// before the cap is applied.
    pub async fn search_filtered(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> Vec<CitySummary> {
        let cleaned = sanitize_query(query);
        if cleaned.is_empty() {
            debug!("Query '{}' is empty after sanitizing", query);
            return Vec::new();
        }

        let result = self.repo.search_cities(&cleaned).await;
        let candidates = self.or_empty("search_cities", result);

        let mut ranked = apply_search_filters(&search_cities(&candidates, &cleaned), filters);
        ranked.truncate(limit);
        ranked
    }

    /// Every city passing the search-page filters, best rated first.
    pub async fn browse(&self, filters: &SearchFilters) -> Vec<City> {
        apply_search_filters(&self.cities_or_empty().await, filters)
    }

    /// Distinct regions offered by the search-page region picker.
    pub async fn regions(&self) -> Vec<String> {
        unique_regions(&self.cities_or_empty().await)
    }

    pub async fn filtered_cities(&self, filters: &HomeFilters) -> Vec<City> {
        filter_cities(&self.cities_or_empty().await, filters)
    }

    pub async fn related(&self, current: &City, limit: usize) -> Vec<City> {
        recommend::related_cities(current, &self.cities_or_empty().await, limit)
    }

    pub async fn review_page(&self, city_id: &str, query: &ReviewQuery) -> Page<Review> {
        reviews::review_page(&self.reviews_or_empty(city_id).await, query)
    }

    /// Like and dislike totals; zero when they cannot be read.
    pub async fn like_counts(&self, city_id: &str) -> LikeCounts {
        match self.repo.city_likes(city_id).await {
            Ok(likes) => likes.counts,
            Err(e) => {
                warn!("city_likes({}) failed: {}", city_id, e);
                LikeCounts::default()
            }
        }
    }

    /// Validate and persist a review written by `user_id`.
    pub async fn submit_review(&self, input: &ReviewInput, user_id: &str) -> Result<Review> {
        let review = reviews::validate_submission(input, user_id).map_err(Error::Validation)?;
        let created = self.repo.create_review(review).await?;
        info!("Saved review {} for {}", created.id, created.city_name);
        Ok(created)
    }
}
