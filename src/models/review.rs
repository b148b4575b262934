use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Profession tag attached to every review
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum JobCategory {
    Developer,
    Designer,
    Marketer,
    Writer,
    VideoProducer,
    Planner,
}

impl JobCategory {
    pub const ALL: [JobCategory; 6] = [
        JobCategory::Developer,
        JobCategory::Designer,
        JobCategory::Marketer,
        JobCategory::Writer,
        JobCategory::VideoProducer,
        JobCategory::Planner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobCategory::Developer => "developer",
            JobCategory::Designer => "designer",
            JobCategory::Marketer => "marketer",
            JobCategory::Writer => "writer",
            JobCategory::VideoProducer => "video-producer",
            JobCategory::Planner => "planner",
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job category '{0}'")]
pub struct UnknownJobCategory(pub String);

impl FromStr for JobCategory {
    type Err = UnknownJobCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|job| job.as_str() == s)
            .ok_or_else(|| UnknownJobCategory(s.to_string()))
    }
}

/// A published review, joined with its author's display fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub city_id: String,
    pub city_name: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// 1..=5
    pub rating: u8,
    pub comment: String,
    pub likes_count: u32,
    pub comments_count: u32,
    pub created_at: DateTime<Utc>,
    pub job_category: JobCategory,
}

/// Review form contents as submitted; every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReviewInput {
    pub city_id: Option<String>,
    /// Kept wide so out-of-range and fractional ratings can be reported.
    pub rating: Option<f64>,
    pub comment: Option<String>,
    pub job_category: Option<String>,
}

/// A validated review ready to be persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReview {
    pub city_id: String,
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
    pub job_category: JobCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_category_uses_kebab_case_tokens() {
        assert_eq!(JobCategory::VideoProducer.to_string(), "video-producer");
        assert_eq!(
            "video-producer".parse::<JobCategory>().unwrap(),
            JobCategory::VideoProducer
        );
        let json = serde_json::to_string(&JobCategory::VideoProducer).unwrap();
        assert_eq!(json, "\"video-producer\"");
    }

    #[test]
    fn unknown_job_category_is_rejected() {
        let err = "astronaut".parse::<JobCategory>().unwrap_err();
        assert_eq!(err, UnknownJobCategory("astronaut".to_string()));
    }
}
