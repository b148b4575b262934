//! City recommendations built from an already-fetched city list.

use crate::models::{City, JobCategory};
use std::collections::HashSet;

/// Cities within this many won of each other count as similarly priced.
pub const PRICE_BAND: i64 = 300_000;
pub const DEFAULT_RELATED_LIMIT: usize = 3;

fn by_rating_desc(a: &City, b: &City) -> std::cmp::Ordering {
    b.avg_rating.total_cmp(&a.avg_rating)
}

/// Cities in the same region or a similar price band as `current`,
/// best rated first. `current` itself is never included.
pub fn related_cities(current: &City, pool: &[City], limit: usize) -> Vec<City> {
    let others = pool.iter().filter(|c| c.id != current.id);

    let same_region = others.clone().filter(|c| c.region == current.region);
    let similar_price = others
        .filter(|c| (c.avg_monthly_cost - current.avg_monthly_cost).abs() <= PRICE_BAND);

    let mut seen = HashSet::new();
    let mut related: Vec<City> = same_region
        .chain(similar_price)
        .filter(|c| seen.insert(c.id.clone()))
        .cloned()
        .collect();

    related.sort_by(by_rating_desc);
    related.truncate(limit);
    related
}

/// Highest trending score first; cities without one rank as zero.
pub fn trending_cities(cities: &[City], limit: usize) -> Vec<City> {
    let mut sorted = cities.to_vec();
    sorted.sort_by(|a, b| {
        b.trending_score
            .unwrap_or(0.0)
            .total_cmp(&a.trending_score.unwrap_or(0.0))
    });
    sorted.truncate(limit);
    sorted
}

pub fn top_rated_cities(cities: &[City], limit: usize) -> Vec<City> {
    let mut sorted = cities.to_vec();
    sorted.sort_by(by_rating_desc);
    sorted.truncate(limit);
    sorted
}

/// Cities costing at least `min` and less than `max`, best rated first.
pub fn cities_by_budget(cities: &[City], min: i64, max: i64, limit: usize) -> Vec<City> {
    let mut matching: Vec<City> = cities
        .iter()
        .filter(|c| c.avg_monthly_cost >= min && c.avg_monthly_cost < max)
        .cloned()
        .collect();
    matching.sort_by(by_rating_desc);
    matching.truncate(limit);
    matching
}

/// Developers are ranked by `dev_score`, everyone else by `design_score`.
pub fn cities_by_job(cities: &[City], job: JobCategory, limit: usize) -> Vec<City> {
    let key = |c: &City| match job {
        JobCategory::Developer => c.dev_score,
        _ => c.design_score,
    };
    let mut sorted = cities.to_vec();
    sorted.sort_by(|a, b| key(b).total_cmp(&key(a)));
    sorted.truncate(limit);
    sorted
}
