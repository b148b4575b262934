use crate::error::{Error, Result};
use crate::models::{City, CityLikes, CitySummary, LikeCounts, NewReview, Review};
use crate::search;
use crate::sources::traits::CityRepository;
use crate::sources::types::Snapshot;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Repository over an in-process copy of the data
pub struct MemoryRepository {
    cities: Vec<City>,
    reviews: RwLock<Vec<Review>>,
}

impl MemoryRepository {
    pub fn new(cities: Vec<City>, reviews: Vec<Review>) -> Self {
        Self {
            cities,
            reviews: RwLock::new(reviews),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::new(snapshot.cities, snapshot.reviews)
    }

    /// Load a `{ "cities": [...], "reviews": [...] }` JSON file
    pub async fn from_snapshot_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;

        info!(
            "Loaded {} cities and {} reviews from {}",
            snapshot.cities.len(),
            snapshot.reviews.len(),
            path.display()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    fn find_city(&self, id: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }
}

#[async_trait]
impl CityRepository for MemoryRepository {
    async fn list_cities(&self) -> Result<Vec<City>> {
        let mut cities = self.cities.clone();
        cities.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating));
        Ok(cities)
    }

    async fn get_city_by_slug(&self, slug: &str) -> Result<Option<City>> {
        Ok(self.cities.iter().find(|c| c.slug == slug).cloned())
    }

    async fn get_city_by_id(&self, id: &str) -> Result<Option<City>> {
        Ok(self.find_city(id).cloned())
    }

    async fn list_reviews(&self, city_id: &str) -> Result<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .reviews
            .read()
            .iter()
            .filter(|r| r.city_id == city_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn latest_reviews(&self, limit: usize) -> Result<Vec<Review>> {
        let mut reviews = self.reviews.read().clone();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews.truncate(limit);
        Ok(reviews)
    }

    async fn search_cities(&self, query: &str) -> Result<Vec<CitySummary>> {
        let matches = search::search_cities(&self.cities, query);
        debug!("Memory search for '{}' matched {} cities", query, matches.len());
        Ok(matches.iter().map(CitySummary::from).collect())
    }

    async fn city_likes(&self, city_id: &str) -> Result<CityLikes> {
        let city = self.find_city(city_id).ok_or_else(|| Error::NotFound {
            entity: "city",
            key: city_id.to_string(),
        })?;
        Ok(CityLikes {
            city_id: city.id.clone(),
            counts: LikeCounts {
                likes: city.likes.unwrap_or(0),
                dislikes: city.dislikes.unwrap_or(0),
            },
        })
    }

    async fn create_review(&self, review: NewReview) -> Result<Review> {
        let city = self.find_city(&review.city_id).ok_or_else(|| Error::NotFound {
            entity: "city",
            key: review.city_id.clone(),
        })?;

        let created = Review {
            id: Uuid::now_v7().to_string(),
            city_id: city.id.clone(),
            city_name: city.name.clone(),
            username: review.user_id,
            avatar_url: None,
            rating: review.rating,
            comment: review.comment,
            likes_count: 0,
            comments_count: 0,
            created_at: Utc::now(),
            job_category: review.job_category,
        };

        self.reviews.write().push(created.clone());
        Ok(created)
    }

    fn source_name(&self) -> &'static str {
        "memory"
    }
}
