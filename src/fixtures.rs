//! Sample dataset shared by unit tests.

use crate::models::{City, Review};
use crate::sources::Snapshot;

const SAMPLE: &str = include_str!("../data/sample.json");

pub fn sample_snapshot() -> Snapshot {
    serde_json::from_str(SAMPLE).expect("sample.json is valid")
}

/// Fifteen cities, ids "1" through "15".
pub fn sample_cities() -> Vec<City> {
    sample_snapshot().cities
}

pub fn sample_reviews() -> Vec<Review> {
    sample_snapshot().reviews
}

pub fn city(id: &str) -> City {
    sample_cities()
        .into_iter()
        .find(|c| c.id == id)
        .expect("fixture city exists")
}
