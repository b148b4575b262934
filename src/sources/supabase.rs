use crate::config::SupabaseConfig;
use crate::error::{Error, Result};
use crate::models::{City, CityLikes, CitySummary, JobCategory, LikeCounts, NewReview, Review};
use crate::sources::traits::CityRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Row of the `reviews_with_user` view
#[derive(Debug, Clone, Deserialize)]
struct ReviewRow {
    id: String,
    city_id: String,
    city_name: String,
    username: String,
    avatar_url: Option<String>,
    rating: u8,
    comment: String,
    #[serde(default)]
    likes_count: u32,
    #[serde(default)]
    comments_count: u32,
    created_at: DateTime<Utc>,
    job_category: Option<String>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        // Older rows predate the job column.
        let job_category = row
            .job_category
            .as_deref()
            .and_then(|j| j.parse().ok())
            .unwrap_or(JobCategory::Developer);

        Review {
            id: row.id,
            city_id: row.city_id,
            city_name: row.city_name,
            username: row.username,
            avatar_url: row.avatar_url,
            rating: row.rating,
            comment: row.comment,
            likes_count: row.likes_count,
            comments_count: row.comments_count,
            created_at: row.created_at,
            job_category,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LikesRow {
    id: String,
    likes: Option<u32>,
    dislikes: Option<u32>,
}

/// Insert body for the `reviews` table. The job category lives on the
/// author's profile and reaches reviews through `reviews_with_user`.
#[derive(Debug, Serialize)]
struct ReviewInsert<'a> {
    city_id: &'a str,
    user_id: &'a str,
    rating: u8,
    comment: &'a str,
}

impl<'a> From<&'a NewReview> for ReviewInsert<'a> {
    fn from(review: &'a NewReview) -> Self {
        Self {
            city_id: &review.city_id,
            user_id: &review.user_id,
            rating: review.rating,
            comment: &review.comment,
        }
    }
}

#[derive(Debug, Deserialize)]
struct InsertedReview {
    id: String,
}

/// Repository backed by a Supabase project's PostgREST API
pub struct SupabaseRepository {
    client: Client,
    base_url: String,
}

impl SupabaseRepository {
    pub fn new(config: &SupabaseConfig, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| Error::Config(format!("Invalid SUPABASE_ANON_KEY: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|e| Error::Config(format!("Invalid SUPABASE_ANON_KEY: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nomad-korea/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Supabase returned status: {}", status);
            return Err(Error::Backend {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {} {:?}", table, query);
        self.fetch(self.client.get(self.endpoint(table)).query(query))
            .await
    }

    async fn city_where(&self, column: &str, value: &str) -> Result<Option<City>> {
        let rows: Vec<City> = self
            .select(
                "cities",
                &[
                    ("select", "*".into()),
                    (column, format!("eq.{value}")),
                    ("limit", "1".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn review_by_id(&self, id: &str) -> Result<Review> {
        let rows: Vec<ReviewRow> = self
            .select(
                "reviews_with_user",
                &[("select", "*".into()), ("id", format!("eq.{id}"))],
            )
            .await?;
        rows.into_iter()
            .next()
            .map(Review::from)
            .ok_or_else(|| Error::NotFound {
                entity: "review",
                key: id.to_string(),
            })
    }
}

#[async_trait]
impl CityRepository for SupabaseRepository {
    async fn list_cities(&self) -> Result<Vec<City>> {
        self.select(
            "cities",
            &[("select", "*".into()), ("order", "avg_rating.desc".into())],
        )
        .await
    }

    async fn get_city_by_slug(&self, slug: &str) -> Result<Option<City>> {
        self.city_where("slug", slug).await
    }

    async fn get_city_by_id(&self, id: &str) -> Result<Option<City>> {
        self.city_where("id", id).await
    }

    async fn list_reviews(&self, city_id: &str) -> Result<Vec<Review>> {
        let rows: Vec<ReviewRow> = self
            .select(
                "reviews_with_user",
                &[
                    ("select", "*".into()),
                    ("city_id", format!("eq.{city_id}")),
                    ("order", "created_at.desc".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn latest_reviews(&self, limit: usize) -> Result<Vec<Review>> {
        let rows: Vec<ReviewRow> = self
            .select(
                "reviews_with_user",
                &[
                    ("select", "*".into()),
                    ("order", "created_at.desc".into()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn search_cities(&self, query: &str) -> Result<Vec<CitySummary>> {
        debug!("RPC search_cities '{}'", query);
        self.fetch(
            self.client
                .post(self.endpoint("rpc/search_cities"))
                .json(&json!({ "search_query": query })),
        )
        .await
    }

    async fn city_likes(&self, city_id: &str) -> Result<CityLikes> {
        let rows: Vec<LikesRow> = self
            .select(
                "cities",
                &[
                    ("select", "id,likes,dislikes".into()),
                    ("id", format!("eq.{city_id}")),
                ],
            )
            .await?;
        let row = rows.into_iter().next().ok_or_else(|| Error::NotFound {
            entity: "city",
            key: city_id.to_string(),
        })?;
        Ok(CityLikes {
            city_id: row.id,
            counts: LikeCounts {
                likes: row.likes.unwrap_or(0),
                dislikes: row.dislikes.unwrap_or(0),
            },
        })
    }

    async fn create_review(&self, review: NewReview) -> Result<Review> {
        let inserted: Vec<InsertedReview> = self
            .fetch(
                self.client
                    .post(self.endpoint("reviews"))
                    .header("Prefer", "return=representation")
                    .json(&ReviewInsert::from(&review)),
            )
            .await?;

        let id = inserted
            .into_iter()
            .next()
            .map(|r| r.id)
            .ok_or_else(|| Error::Backend {
                status: 200,
                body: "insert returned no rows".into(),
            })?;

        // Re-read through the view to pick up the author's display fields.
        self.review_by_id(&id).await
    }

    fn source_name(&self) -> &'static str {
        "Supabase"
    }
}
