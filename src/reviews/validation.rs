use crate::models::{JobCategory, NewReview, ReviewInput};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const COMMENT_MIN_CHARS: usize = 10;
/// Limit enforced by the review form
pub const FORM_COMMENT_MAX_CHARS: usize = 500;
/// Limit enforced when a review is persisted
pub const SUBMISSION_COMMENT_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewField {
    Rating,
    Comment,
    JobCategory,
    CityId,
}

impl fmt::Display for ReviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReviewField::Rating => "rating",
            ReviewField::Comment => "comment",
            ReviewField::JobCategory => "job_category",
            ReviewField::CityId => "city_id",
        })
    }
}

/// Field-level messages; one per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<ReviewField, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: ReviewField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReviewField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn add(&mut self, field: ReviewField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

fn check_rating(rating: Option<f64>) -> Result<u8, String> {
    match rating {
        None => Err("Please select a rating".into()),
        Some(r) if r.is_nan() || r == 0.0 => Err("Please select a rating".into()),
        Some(r) if !(1.0..=5.0).contains(&r) => Err("Rating must be between 1 and 5".into()),
        Some(r) if r.fract() != 0.0 => Err("Rating must be a whole number".into()),
        Some(r) => Ok(r as u8),
    }
}

fn check_comment(comment: Option<&str>, max_chars: usize) -> Result<String, String> {
    let comment = match comment {
        Some(c) if !c.is_empty() => c.trim(),
        _ => return Err("Please write your review".into()),
    };
    let chars = comment.chars().count();
    if chars < COMMENT_MIN_CHARS {
        Err(format!("Reviews need at least {COMMENT_MIN_CHARS} characters"))
    } else if chars > max_chars {
        Err(format!("Reviews can be at most {max_chars} characters"))
    } else {
        Ok(comment.to_string())
    }
}

fn check_job(job: Option<&str>) -> Result<JobCategory, String> {
    match job {
        Some(j) if !j.is_empty() => j.parse().map_err(|_| "Unknown job category".to_string()),
        _ => Err("Please choose a job category".into()),
    }
}

fn check_city(city_id: Option<&str>) -> Result<String, String> {
    match city_id {
        None | Some("") => Err("A city is required".into()),
        Some(id) if id.trim().is_empty() => Err("Invalid city".into()),
        Some(id) => Ok(id.to_string()),
    }
}

fn collect(
    input: &ReviewInput,
    max_chars: usize,
) -> (ValidationErrors, Option<(String, u8, String, JobCategory)>) {
    let mut errors = ValidationErrors::default();

    let rating = check_rating(input.rating)
        .map_err(|e| errors.add(ReviewField::Rating, e))
        .ok();
    let comment = check_comment(input.comment.as_deref(), max_chars)
        .map_err(|e| errors.add(ReviewField::Comment, e))
        .ok();
    let job = check_job(input.job_category.as_deref())
        .map_err(|e| errors.add(ReviewField::JobCategory, e))
        .ok();
    let city = check_city(input.city_id.as_deref())
        .map_err(|e| errors.add(ReviewField::CityId, e))
        .ok();

    let valid = match (city, rating, comment, job) {
        (Some(city), Some(rating), Some(comment), Some(job)) => Some((city, rating, comment, job)),
        _ => None,
    };
    (errors, valid)
}

/// Check a review form (comment limit 500 characters).
pub fn validate_review(input: &ReviewInput) -> Result<(), ValidationErrors> {
    let (errors, _) = collect(input, FORM_COMMENT_MAX_CHARS);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Message for a single field of the form, if it is invalid.
pub fn validate_field(field: ReviewField, input: &ReviewInput) -> Option<String> {
    let (errors, _) = collect(input, FORM_COMMENT_MAX_CHARS);
    errors.get(field).map(str::to_string)
}

/// Validate a submission (comment limit 1000 characters) and turn it into a
/// review ready to persist. The comment is stored trimmed.
pub fn validate_submission(input: &ReviewInput, user_id: &str) -> Result<NewReview, ValidationErrors> {
    match collect(input, SUBMISSION_COMMENT_MAX_CHARS) {
        (errors, Some((city_id, rating, comment, job_category))) if errors.is_empty() => {
            Ok(NewReview {
                city_id,
                user_id: user_id.to_string(),
                rating,
                comment,
                job_category,
            })
        }
        (errors, _) => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ReviewInput {
        ReviewInput {
            city_id: Some("1".into()),
            rating: Some(4.0),
            comment: Some("조용하고 집중하기 좋은 환경이에요".into()),
            job_category: Some("designer".into()),
        }
    }

    #[test]
    fn complete_input_passes() {
        assert_eq!(validate_review(&valid_input()), Ok(()));
    }

    #[test]
    fn empty_input_reports_every_field() {
        let errors = validate_review(&ReviewInput::default()).unwrap_err();
        let fields: Vec<ReviewField> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            vec![
                ReviewField::Rating,
                ReviewField::Comment,
                ReviewField::JobCategory,
                ReviewField::CityId
            ]
        );
    }

    #[test]
    fn rating_rules() {
        for (rating, expected) in [
            (0.0, "Please select a rating"),
            (6.0, "Rating must be between 1 and 5"),
            (-1.0, "Rating must be between 1 and 5"),
            (3.5, "Rating must be a whole number"),
        ] {
            let input = ReviewInput {
                rating: Some(rating),
                ..valid_input()
            };
            assert_eq!(validate_field(ReviewField::Rating, &input).as_deref(), Some(expected));
        }
    }

    #[test]
    fn comment_length_counts_characters_after_trim() {
        let input = ReviewInput {
            comment: Some("   짧아요   ".into()),
            ..valid_input()
        };
        assert!(validate_field(ReviewField::Comment, &input).is_some());

        let input = ReviewInput {
            comment: Some("가".repeat(10)),
            ..valid_input()
        };
        assert_eq!(validate_field(ReviewField::Comment, &input), None);
    }

    #[test]
    fn form_and_submission_limits_differ() {
        let input = ReviewInput {
            comment: Some("a".repeat(700)),
            ..valid_input()
        };
        assert!(validate_review(&input).is_err());
        assert!(validate_submission(&input, "user-1").is_ok());

        let input = ReviewInput {
            comment: Some("a".repeat(1001)),
            ..valid_input()
        };
        assert!(validate_submission(&input, "user-1").is_err());
    }

    #[test]
    fn unknown_job_and_blank_city_are_invalid() {
        let input = ReviewInput {
            job_category: Some("astronaut".into()),
            city_id: Some("   ".into()),
            ..valid_input()
        };
        let errors = validate_review(&input).unwrap_err();
        assert_eq!(errors.get(ReviewField::JobCategory), Some("Unknown job category"));
        assert_eq!(errors.get(ReviewField::CityId), Some("Invalid city"));
    }

    #[test]
    fn submission_trims_comment() {
        let input = ReviewInput {
            comment: Some("  바다 보면서 작업하니 영감이 샘솟아요  ".into()),
            ..valid_input()
        };
        let review = validate_submission(&input, "user-1").unwrap();
        assert_eq!(review.comment, "바다 보면서 작업하니 영감이 샘솟아요");
        assert_eq!(review.rating, 4);
        assert_eq!(review.job_category, JobCategory::Designer);
        assert_eq!(review.user_id, "user-1");
    }
}
