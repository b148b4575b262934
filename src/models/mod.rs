use serde::{Deserialize, Serialize};

mod review;

pub use review::{JobCategory, NewReview, Review, ReviewInput, UnknownJobCategory};

/// Full city record as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    pub id: String,
    pub name: String,
    pub region: String,
    pub slug: String,
    #[serde(default)]
    pub image_url: String,
    pub avg_rating: f64,
    pub review_count: u32,
    /// Average monthly living cost in KRW
    pub avg_monthly_cost: i64,
    /// Average internet speed in Mbps
    pub avg_internet_speed: u32,
    pub cafe_count: u32,
    pub coworking_count: u32,
    pub transport_score: f64,
    pub environment_score: f64,
    pub dev_score: f64,
    pub design_score: f64,
    #[serde(default)]
    pub trending_score: Option<f64>,
    #[serde(default)]
    pub likes: Option<u32>,
    #[serde(default)]
    pub dislikes: Option<u32>,
}

/// Narrow city shape returned by the backend's search RPC.
///
/// Facet scores and amenity counts are absent, not zero, so this type
/// cannot be handed to the facet filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitySummary {
    pub id: String,
    pub name: String,
    pub region: String,
    pub slug: String,
    #[serde(default)]
    pub image_url: String,
    pub avg_rating: f64,
    pub review_count: u32,
    pub avg_monthly_cost: i64,
}

impl From<&City> for CitySummary {
    fn from(city: &City) -> Self {
        Self {
            id: city.id.clone(),
            name: city.name.clone(),
            region: city.region.clone(),
            slug: city.slug.clone(),
            image_url: city.image_url.clone(),
            avg_rating: city.avg_rating,
            review_count: city.review_count,
            avg_monthly_cost: city.avg_monthly_cost,
        }
    }
}

/// Like/dislike totals for one city
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeCounts {
    pub likes: u32,
    pub dislikes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CityLikes {
    pub city_id: String,
    #[serde(flatten)]
    pub counts: LikeCounts,
}

/// A visitor's reaction to a city
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

impl std::str::FromStr for Reaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(format!("unknown reaction '{other}'")),
        }
    }
}

/// One remembered search query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHistoryEntry {
    pub id: String,
    pub query: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}
