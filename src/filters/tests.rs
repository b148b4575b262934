use super::*;
use crate::fixtures::{city, sample_cities};

fn names(cities: Vec<City>) -> Vec<String> {
    cities.into_iter().map(|c| c.name).collect()
}

fn with_region(region: &str) -> City {
    City {
        region: region.to_string(),
        ..city("1")
    }
}

#[test]
fn default_filters_are_identity() {
    let cities = sample_cities();
    assert_eq!(filter_cities(&cities, &HomeFilters::default()), cities);
    assert!(HomeFilters::default().is_default());
    assert_eq!(HomeFilters::default().active_count(), 0);
}

#[test]
fn budget_brackets_split_on_boundaries() {
    let mut c = city("1");
    for (cost, expected) in [
        (1_000_000, BudgetFilter::Budget),
        (1_000_001, BudgetFilter::Mid),
        (1_500_000, BudgetFilter::Mid),
        (1_500_001, BudgetFilter::Premium),
        (2_000_000, BudgetFilter::Premium),
        (2_000_001, BudgetFilter::Luxury),
    ] {
        c.avg_monthly_cost = cost;
        for bracket in [
            BudgetFilter::Budget,
            BudgetFilter::Mid,
            BudgetFilter::Premium,
            BudgetFilter::Luxury,
        ] {
            assert_eq!(matches_budget(&c, bracket), bracket == expected, "{cost} {bracket}");
        }
        assert!(matches_budget(&c, BudgetFilter::All));
    }
}

#[test]
fn region_buckets_union_their_keywords() {
    assert!(matches_region(&with_region("경북"), RegionFilter::Gyeongsang));
    assert!(matches_region(&with_region("대구광역시"), RegionFilter::Gyeongsang));
    assert!(matches_region(&with_region("울산"), RegionFilter::Gyeongsang));
    assert!(matches_region(&with_region("광주"), RegionFilter::Jeolla));
    assert!(matches_region(&with_region("충남"), RegionFilter::Chungcheong));
    assert!(matches_region(&with_region("서울특별시"), RegionFilter::Seoul));
    assert!(!matches_region(&with_region("부산"), RegionFilter::Seoul));
    assert!(!matches_region(&with_region("대전"), RegionFilter::Chungcheong));
}

#[test]
fn region_filter_on_sample_data() {
    let filters = HomeFilters {
        region: RegionFilter::Gangwon,
        ..Default::default()
    };
    assert_eq!(
        names(filter_cities(&sample_cities(), &filters)),
        vec!["춘천", "강릉", "속초"]
    );
}

#[test]
fn nature_uses_score_while_other_environments_use_region() {
    let mut c = with_region("서울");
    c.environment_score = 3.9;
    assert!(!matches_environment(&c, EnvironmentFilter::Nature));
    assert!(matches_environment(&c, EnvironmentFilter::Urban));

    c.environment_score = 4.0;
    assert!(matches_environment(&c, EnvironmentFilter::Nature));

    let c = with_region("강원");
    assert!(matches_environment(&c, EnvironmentFilter::Mountain));
    assert!(!matches_environment(&c, EnvironmentFilter::Beach));
    assert!(matches_environment(&with_region("속초"), EnvironmentFilter::Beach));
    assert!(matches_environment(&with_region("인천"), EnvironmentFilter::Suburb));
}

#[test]
fn nature_and_high_environment_agree() {
    for mut c in sample_cities() {
        for score in [0.0, 3.99, 4.0, 9.5] {
            c.environment_score = score;
            assert_eq!(
                matches_environment(&c, EnvironmentFilter::Nature),
                matches_amenity(&c, AmenityFilter::HighEnvironment)
            );
        }
    }
}

#[test]
fn season_never_excludes() {
    let cities = sample_cities();
    for season in [
        SeasonFilter::Spring,
        SeasonFilter::Summer,
        SeasonFilter::Fall,
        SeasonFilter::Winter,
    ] {
        let filters = HomeFilters {
            season,
            ..Default::default()
        };
        assert_eq!(filter_cities(&cities, &filters).len(), cities.len());
    }
}

#[test]
fn amenity_thresholds() {
    let mut c = city("1");
    c.coworking_count = 2;
    c.cafe_count = 4;
    c.avg_internet_speed = 99;
    c.environment_score = 3.5;
    assert!(!matches_amenity(&c, AmenityFilter::Coworking));
    assert!(!matches_amenity(&c, AmenityFilter::Cafe));
    assert!(!matches_amenity(&c, AmenityFilter::FastInternet));
    assert!(!matches_amenity(&c, AmenityFilter::HighEnvironment));

    c.coworking_count = 3;
    c.cafe_count = 5;
    c.avg_internet_speed = 100;
    c.environment_score = 4.0;
    assert!(matches_amenity(&c, AmenityFilter::Coworking));
    assert!(matches_amenity(&c, AmenityFilter::Cafe));
    assert!(matches_amenity(&c, AmenityFilter::FastInternet));
    assert!(matches_amenity(&c, AmenityFilter::HighEnvironment));
}

#[test]
fn facets_combine_with_and() {
    let filters = HomeFilters {
        budget: BudgetFilter::Mid,
        environment: EnvironmentFilter::Beach,
        ..Default::default()
    };
    assert_eq!(
        names(filter_cities(&sample_cities(), &filters)),
        vec!["제주시", "해운대", "광안리"]
    );
    assert_eq!(filters.active_count(), 2);
    assert!(!filters.is_default());
}

#[test]
fn tightening_a_facet_never_grows_the_result() {
    let cities = sample_cities();
    let base = HomeFilters {
        amenity: AmenityFilter::Coworking,
        ..Default::default()
    };
    let base_len = filter_cities(&cities, &base).len();

    let tightened = [
        HomeFilters { budget: BudgetFilter::Premium, ..base },
        HomeFilters { region: RegionFilter::Busan, ..base },
        HomeFilters { environment: EnvironmentFilter::Urban, ..base },
        HomeFilters { season: SeasonFilter::Summer, ..base },
    ];
    for filters in tightened {
        assert!(filter_cities(&cities, &filters).len() <= base_len, "{filters:?}");
    }
}

#[test]
fn active_count_counts_each_facet() {
    let filters = HomeFilters {
        budget: BudgetFilter::Luxury,
        region: RegionFilter::Jeju,
        environment: EnvironmentFilter::Beach,
        season: SeasonFilter::Fall,
        amenity: AmenityFilter::Cafe,
    };
    assert_eq!(filters.active_count(), 5);
}
