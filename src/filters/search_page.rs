use crate::models::City;
use crate::search::Searchable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Range filters on the search results page. All bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Exact region names; empty means any region.
    pub regions: Vec<String>,
    pub min_budget: Option<i64>,
    pub max_budget: Option<i64>,
    pub min_rating: Option<f64>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
            && self.min_budget.is_none()
            && self.max_budget.is_none()
            && self.min_rating.is_none()
    }

    pub fn matches<T: Searchable + ?Sized>(&self, city: &T) -> bool {
        if !self.regions.is_empty() && !self.regions.iter().any(|r| r == city.region()) {
            return false;
        }
        let cost = city.monthly_cost();
        if self.min_budget.is_some_and(|min| cost < min) {
            return false;
        }
        if self.max_budget.is_some_and(|max| cost > max) {
            return false;
        }
        if self.min_rating.is_some_and(|min| city.rating() < min) {
            return false;
        }
        true
    }
}

/// Works on full cities and on search summaries alike.
pub fn apply_search_filters<T: Searchable + Clone>(cities: &[T], filters: &SearchFilters) -> Vec<T> {
    cities
        .iter()
        .filter(|city| filters.matches(*city))
        .cloned()
        .collect()
}

/// Distinct region names, sorted.
pub fn unique_regions(cities: &[City]) -> Vec<String> {
    cities
        .iter()
        .map(|city| city.region.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_cities;
    use crate::models::CitySummary;

    #[test]
    fn empty_filters_keep_everything() {
        let cities = sample_cities();
        assert_eq!(apply_search_filters(&cities, &SearchFilters::default()), cities);
    }

    #[test]
    fn bounds_are_inclusive() {
        let cities = sample_cities();
        let filters = SearchFilters {
            min_budget: Some(1_000_000),
            max_budget: Some(1_100_000),
            ..Default::default()
        };
        let slugs: Vec<String> = apply_search_filters(&cities, &filters)
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(
            slugs,
            vec!["jeonbuk-jeonju", "gangwon-chuncheon", "gyeongbuk-gyeongju", "gangwon-sokcho"]
        );
    }

    #[test]
    fn region_and_rating_combine() {
        let cities = sample_cities();
        let filters = SearchFilters {
            regions: vec!["서울".into(), "부산".into()],
            min_rating: Some(4.5),
            ..Default::default()
        };
        let names: Vec<String> = apply_search_filters(&cities, &filters)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["강남구", "성수동", "해운대"]);
    }

    #[test]
    fn summaries_filter_like_cities() {
        let cities = sample_cities();
        let summaries: Vec<CitySummary> = cities.iter().map(CitySummary::from).collect();
        let filters = SearchFilters {
            regions: vec!["강원".into()],
            max_budget: Some(1_100_000),
            ..Default::default()
        };
        let from_cities: Vec<String> = apply_search_filters(&cities, &filters)
            .into_iter()
            .map(|c| c.id)
            .collect();
        let from_summaries: Vec<String> = apply_search_filters(&summaries, &filters)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(from_cities, vec!["10", "14"]);
        assert_eq!(from_summaries, from_cities);
        assert!(!filters.is_empty());
        assert!(SearchFilters::default().is_empty());
    }

    #[test]
    fn regions_are_sorted_and_distinct() {
        let regions = unique_regions(&sample_cities());
        let mut expected = regions.clone();
        expected.sort();
        expected.dedup();
        assert_eq!(regions, expected);
        assert!(regions.contains(&"강원".to_string()));
    }
}
