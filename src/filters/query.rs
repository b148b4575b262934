//! URL query-string form of [`HomeFilters`], e.g. `budget=mid&region=seoul`.

use super::{AmenityFilter, BudgetFilter, EnvironmentFilter, HomeFilters, RegionFilter, SeasonFilter};
use url::form_urlencoded;

impl HomeFilters {
    /// Encode the active facets; facets left at `All` are omitted, so the
    /// default state encodes to an empty string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let pairs = [
            (BudgetFilter::KEY, self.budget.is_all(), self.budget.as_str()),
            (RegionFilter::KEY, self.region.is_all(), self.region.as_str()),
            (EnvironmentFilter::KEY, self.environment.is_all(), self.environment.as_str()),
            (SeasonFilter::KEY, self.season.is_all(), self.season.as_str()),
            (AmenityFilter::KEY, self.amenity.is_all(), self.amenity.as_str()),
        ];
        for (key, is_all, value) in pairs {
            if !is_all {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Decode a query string. Missing, unknown or malformed values fall back
    /// to `All`; unrelated parameters are ignored.
    pub fn from_query_string(query: &str) -> Self {
        let mut filters = HomeFilters::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match &*key {
                BudgetFilter::KEY => filters.budget = value.parse().unwrap_or_default(),
                RegionFilter::KEY => filters.region = value.parse().unwrap_or_default(),
                EnvironmentFilter::KEY => filters.environment = value.parse().unwrap_or_default(),
                SeasonFilter::KEY => filters.season = value.parse().unwrap_or_default(),
                AmenityFilter::KEY => filters.amenity = value.parse().unwrap_or_default(),
                _ => {}
            }
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_encodes_to_nothing() {
        assert_eq!(HomeFilters::default().to_query_string(), "");
    }

    #[test]
    fn only_active_facets_are_encoded() {
        let filters = HomeFilters {
            budget: BudgetFilter::Mid,
            amenity: AmenityFilter::FastInternet,
            ..Default::default()
        };
        assert_eq!(filters.to_query_string(), "budget=mid&amenity=fast-internet");
    }

    #[test]
    fn decoding_tolerates_junk() {
        let filters =
            HomeFilters::from_query_string("?region=jeju&season=monsoon&page=2&environment=beach");
        assert_eq!(filters.region, RegionFilter::Jeju);
        assert_eq!(filters.environment, EnvironmentFilter::Beach);
        assert_eq!(filters.season, SeasonFilter::All);
        assert_eq!(filters.budget, BudgetFilter::All);
    }

    #[test]
    fn encoded_state_decodes_to_itself() {
        let filters = HomeFilters {
            budget: BudgetFilter::Luxury,
            region: RegionFilter::Gyeongsang,
            environment: EnvironmentFilter::Nature,
            season: SeasonFilter::Winter,
            amenity: AmenityFilter::Cafe,
        };
        assert_eq!(HomeFilters::from_query_string(&filters.to_query_string()), filters);
    }
}
