pub mod facets;
pub mod query;
pub mod search_page;

#[cfg(test)]
mod tests;

pub use facets::{
    AmenityFilter, BudgetFilter, EnvironmentFilter, RegionFilter, SeasonFilter, UnknownFacetValue,
};
pub use search_page::{apply_search_filters, unique_regions, SearchFilters};

use crate::models::City;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment score at or above which a city counts as green.
/// Shared by the `nature` environment and `high-environment` amenity buckets.
pub const HIGH_ENVIRONMENT_SCORE: f64 = 4.0;
pub const MIN_COWORKING_SPACES: u32 = 3;
pub const MIN_CAFES: u32 = 5;
/// Mbps
pub const FAST_INTERNET_SPEED: u32 = 100;

const BUDGET_MAX: i64 = 1_000_000;
const MID_MAX: i64 = 1_500_000;
const PREMIUM_MAX: i64 = 2_000_000;

/// Home page filter state. Every facet defaults to `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeFilters {
    pub budget: BudgetFilter,
    pub region: RegionFilter,
    pub environment: EnvironmentFilter,
    pub season: SeasonFilter,
    pub amenity: AmenityFilter,
}

impl HomeFilters {
    /// True when no facet restricts anything.
    pub fn is_default(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of facets set to something other than `All`.
    pub fn active_count(&self) -> usize {
        [
            self.budget.is_all(),
            self.region.is_all(),
            self.environment.is_all(),
            self.season.is_all(),
            self.amenity.is_all(),
        ]
        .into_iter()
        .filter(|all| !all)
        .count()
    }

    pub fn matches(&self, city: &City) -> bool {
        matches_budget(city, self.budget)
            && matches_region(city, self.region)
            && matches_environment(city, self.environment)
            && matches_season(city, self.season)
            && matches_amenity(city, self.amenity)
    }
}

fn region_contains_any(city: &City, keywords: &[&str]) -> bool {
    let region = city.region.to_lowercase();
    keywords.iter().any(|k| region.contains(k))
}

pub fn matches_budget(city: &City, budget: BudgetFilter) -> bool {
    let cost = city.avg_monthly_cost;
    match budget {
        BudgetFilter::All => true,
        BudgetFilter::Budget => cost <= BUDGET_MAX,
        BudgetFilter::Mid => cost > BUDGET_MAX && cost <= MID_MAX,
        BudgetFilter::Premium => cost > MID_MAX && cost <= PREMIUM_MAX,
        BudgetFilter::Luxury => cost > PREMIUM_MAX,
    }
}

pub fn matches_region(city: &City, region: RegionFilter) -> bool {
    let keywords: &[&str] = match region {
        RegionFilter::All => return true,
        RegionFilter::Seoul => &["서울"],
        RegionFilter::Gyeonggi => &["경기"],
        RegionFilter::Busan => &["부산"],
        RegionFilter::Jeju => &["제주"],
        RegionFilter::Gangwon => &["강원"],
        RegionFilter::Chungcheong => &["충청", "충남", "충북"],
        RegionFilter::Jeolla => &["전라", "전남", "전북", "광주"],
        RegionFilter::Gyeongsang => &["경상", "경남", "경북", "대구", "울산"],
    };
    region_contains_any(city, keywords)
}

/// Mixes two strategies: region keywords for most buckets, the
/// environment score for `Nature`.
pub fn matches_environment(city: &City, environment: EnvironmentFilter) -> bool {
    let keywords: &[&str] = match environment {
        EnvironmentFilter::All => return true,
        EnvironmentFilter::Nature => return city.environment_score >= HIGH_ENVIRONMENT_SCORE,
        EnvironmentFilter::Urban => &["서울", "강남", "부산", "대구"],
        EnvironmentFilter::Suburb => &["경기", "인천", "수원", "성남"],
        EnvironmentFilter::Beach => &["제주", "부산", "강릉", "속초"],
        EnvironmentFilter::Mountain => &["강원", "충청", "경북"],
    };
    region_contains_any(city, keywords)
}

/// Every city passes every season bucket; there is no seasonal data yet.
pub fn matches_season(_city: &City, _season: SeasonFilter) -> bool {
    true
}

pub fn matches_amenity(city: &City, amenity: AmenityFilter) -> bool {
    match amenity {
        AmenityFilter::All => true,
        AmenityFilter::Coworking => city.coworking_count >= MIN_COWORKING_SPACES,
        AmenityFilter::Cafe => city.cafe_count >= MIN_CAFES,
        AmenityFilter::FastInternet => city.avg_internet_speed >= FAST_INTERNET_SPEED,
        AmenityFilter::HighEnvironment => city.environment_score >= HIGH_ENVIRONMENT_SCORE,
    }
}

/// Cities passing every facet, in input order.
pub fn filter_cities(cities: &[City], filters: &HomeFilters) -> Vec<City> {
    let filtered: Vec<City> = cities
        .iter()
        .filter(|city| filters.matches(city))
        .cloned()
        .collect();
    debug!(
        total = cities.len(),
        kept = filtered.len(),
        active = filters.active_count(),
        "applied home filters"
    );
    filtered
}
