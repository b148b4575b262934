pub mod validation;

#[cfg(test)]
mod tests;

pub use validation::{
    validate_field, validate_review, validate_submission, ReviewField, ValidationErrors,
    FORM_COMMENT_MAX_CHARS, SUBMISSION_COMMENT_MAX_CHARS,
};

use crate::models::{JobCategory, Review};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Review list ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSort {
    /// Newest first
    #[default]
    Latest,
    /// Highest rating first
    Rating,
    /// Most liked first
    Likes,
}

impl ReviewSort {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "latest" => Some(Self::Latest),
            "rating" => Some(Self::Rating),
            "likes" => Some(Self::Likes),
            _ => None,
        }
    }
}

/// Either every review or only those written by one profession
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobFilter {
    #[default]
    All,
    Only(JobCategory),
}

impl fmt::Display for JobFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobFilter::All => f.write_str("all"),
            JobFilter::Only(job) => job.fmt(f),
        }
    }
}

impl FromStr for JobFilter {
    type Err = crate::models::UnknownJobCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(JobFilter::All),
            other => other.parse().map(JobFilter::Only),
        }
    }
}

/// One page of a longer list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Never less than 1, even for an empty list.
    pub total_pages: usize,
}

pub fn filter_reviews_by_job(reviews: &[Review], job: JobFilter) -> Vec<Review> {
    match job {
        JobFilter::All => reviews.to_vec(),
        JobFilter::Only(category) => reviews
            .iter()
            .filter(|r| r.job_category == category)
            .cloned()
            .collect(),
    }
}

/// Stable sort; ties keep their input order.
pub fn sort_reviews(mut reviews: Vec<Review>, sort: ReviewSort) -> Vec<Review> {
    match sort {
        ReviewSort::Latest => reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ReviewSort::Rating => reviews.sort_by(|a, b| b.rating.cmp(&a.rating)),
        ReviewSort::Likes => reviews.sort_by(|a, b| b.likes_count.cmp(&a.likes_count)),
    }
    reviews
}

/// Sort by a user-supplied key. Unrecognised keys leave the order untouched.
pub fn sort_reviews_by_key(reviews: Vec<Review>, key: &str) -> Vec<Review> {
    match ReviewSort::from_key(key) {
        Some(sort) => sort_reviews(reviews, sort),
        None => {
            debug!(key, "unknown review sort key, keeping input order");
            reviews
        }
    }
}

/// Slice out 1-indexed `page`. Pages before the first or past the last are
/// empty rather than clamped.
pub fn paginate<T: Clone>(items: &[T], page: i64, page_size: usize) -> Page<T> {
    if page_size == 0 {
        return Page {
            items: Vec::new(),
            total_pages: 1,
        };
    }

    let total_pages = items.len().div_ceil(page_size).max(1);

    let start = page
        .checked_sub(1)
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| p.checked_mul(page_size));

    let items = match start {
        Some(start) if start < items.len() => {
            let end = (start + page_size).min(items.len());
            items[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    Page { items, total_pages }
}

/// Review list view parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewQuery {
    pub job: JobFilter,
    pub sort: ReviewSort,
    pub page: i64,
    pub page_size: usize,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            job: JobFilter::All,
            sort: ReviewSort::Latest,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Filter, then sort, then paginate.
pub fn review_page(reviews: &[Review], query: &ReviewQuery) -> Page<Review> {
    let filtered = filter_reviews_by_job(reviews, query.job);
    let sorted = sort_reviews(filtered, query.sort);
    paginate(&sorted, query.page, query.page_size)
}
