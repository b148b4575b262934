use super::normalize::normalize;
use crate::models::{City, CitySummary};

const NAME_EXACT: f64 = 100.0;
const REGION_EXACT: f64 = 80.0;
const NAME_PREFIX: f64 = 50.0;
const REGION_PREFIX: f64 = 40.0;
const NAME_CONTAINS: f64 = 20.0;
const REGION_CONTAINS: f64 = 15.0;
const RATING_WEIGHT: f64 = 2.0;
const REVIEW_BONUS_CAP: f64 = 5.0;

/// Records that can be matched, ranked and range-filtered by the city search.
pub trait Searchable {
    fn name(&self) -> &str;
    fn region(&self) -> &str;
    fn rating(&self) -> f64;
    fn review_count(&self) -> u32;
    /// Average monthly cost in KRW
    fn monthly_cost(&self) -> i64;
}

impl Searchable for City {
    fn name(&self) -> &str {
        &self.name
    }
    fn region(&self) -> &str {
        &self.region
    }
    fn rating(&self) -> f64 {
        self.avg_rating
    }
    fn review_count(&self) -> u32 {
        self.review_count
    }
    fn monthly_cost(&self) -> i64 {
        self.avg_monthly_cost
    }
}

impl Searchable for CitySummary {
    fn name(&self) -> &str {
        &self.name
    }
    fn region(&self) -> &str {
        &self.region
    }
    fn rating(&self) -> f64 {
        self.avg_rating
    }
    fn review_count(&self) -> u32 {
        self.review_count
    }
    fn monthly_cost(&self) -> i64 {
        self.avg_monthly_cost
    }
}

/// Additive match tiers for one field. Exact implies prefix implies
/// substring, so the tiers stack.
fn field_score(field: &str, query: &str, exact: f64, prefix: f64, contains: f64) -> f64 {
    let mut score = 0.0;
    if field == query {
        score += exact;
    }
    if field.starts_with(query) {
        score += prefix;
    }
    if field.contains(query) {
        score += contains;
    }
    score
}

/// Popularity bonus: twice the rating plus a log-scaled review count,
/// the latter capped at 5.
pub fn popularity_bonus<T: Searchable + ?Sized>(record: &T) -> f64 {
    let reviews = (f64::from(record.review_count()) + 1.0).ln();
    record.rating() * RATING_WEIGHT + reviews.min(REVIEW_BONUS_CAP)
}

/// Relevance of `record` for `query`. Higher is better; there is no upper bound.
pub fn score<T: Searchable + ?Sized>(record: &T, query: &str) -> f64 {
    let query = normalize(query);
    let name = normalize(record.name());
    let region = normalize(record.region());

    field_score(&name, &query, NAME_EXACT, NAME_PREFIX, NAME_CONTAINS)
        + field_score(&region, &query, REGION_EXACT, REGION_PREFIX, REGION_CONTAINS)
        + popularity_bonus(record)
}
