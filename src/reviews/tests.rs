use super::*;
use crate::fixtures::sample_reviews;

fn review_with(id: &str, rating: u8, likes: u32) -> Review {
    Review {
        id: id.to_string(),
        rating,
        likes_count: likes,
        ..sample_reviews()[0].clone()
    }
}

fn ids(reviews: &[Review]) -> Vec<&str> {
    reviews.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn rating_sort_orders_descending() {
    let reviews = vec![review_with("a", 3, 0), review_with("b", 5, 0), review_with("c", 4, 0)];
    let ratings: Vec<u8> = sort_reviews(reviews, ReviewSort::Rating)
        .iter()
        .map(|r| r.rating)
        .collect();
    assert_eq!(ratings, vec![5, 4, 3]);
}

#[test]
fn rating_sort_is_stable_and_idempotent() {
    let reviews = sample_reviews();
    let once = sort_reviews(reviews, ReviewSort::Rating);
    let twice = sort_reviews(once.clone(), ReviewSort::Rating);
    assert_eq!(once, twice);

    let tied = vec![review_with("x", 4, 0), review_with("y", 4, 0), review_with("z", 4, 0)];
    assert_eq!(ids(&sort_reviews(tied, ReviewSort::Rating)), vec!["x", "y", "z"]);
}

#[test]
fn latest_sort_uses_creation_time() {
    let sorted = sort_reviews(sample_reviews(), ReviewSort::Latest);
    for pair in sorted.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
    assert_eq!(sorted[0].id, "9");
}

#[test]
fn likes_sort_uses_like_counter() {
    let sorted = sort_reviews(sample_reviews(), ReviewSort::Likes);
    assert_eq!(sorted[0].id, "13");
    assert_eq!(sorted[0].likes_count, 52);
}

#[test]
fn unknown_sort_key_keeps_order() {
    let reviews = sample_reviews();
    assert_eq!(sort_reviews_by_key(reviews.clone(), "popularity"), reviews);
    assert_eq!(sort_reviews_by_key(reviews.clone(), ""), reviews);
    assert_eq!(
        sort_reviews_by_key(reviews.clone(), "likes"),
        sort_reviews(reviews, ReviewSort::Likes)
    );
}

#[test]
fn job_filter() {
    let reviews = sample_reviews();
    assert_eq!(filter_reviews_by_job(&reviews, JobFilter::All), reviews);

    let writers = filter_reviews_by_job(&reviews, JobFilter::Only(JobCategory::Writer));
    assert_eq!(ids(&writers), vec!["4", "12", "17"]);
    assert!(writers.iter().all(|r| r.job_category == JobCategory::Writer));
}

#[test]
fn job_filter_parses_all_and_categories() {
    assert_eq!("all".parse::<JobFilter>().unwrap(), JobFilter::All);
    assert_eq!(
        "video-producer".parse::<JobFilter>().unwrap(),
        JobFilter::Only(JobCategory::VideoProducer)
    );
    assert!("chef".parse::<JobFilter>().is_err());
}

#[test]
fn second_page_of_five() {
    let items = vec![0, 1, 2, 3, 4];
    let page = paginate(&items, 2, 2);
    assert_eq!(page.items, vec![2, 3]);
    assert_eq!(page.total_pages, 3);

    let last = paginate(&items, 3, 2);
    assert_eq!(last.items, vec![4]);
}

#[test]
fn empty_list_still_has_one_page() {
    let empty: Vec<Review> = Vec::new();
    for (page, size) in [(1, 5), (0, 5), (3, 1), (-2, 10)] {
        assert_eq!(paginate(&empty, page, size).total_pages, 1);
    }
}

#[test]
fn out_of_range_pages_are_empty_not_clamped() {
    let items: Vec<u32> = (0..7).collect();
    assert!(paginate(&items, 0, 3).items.is_empty());
    assert!(paginate(&items, -1, 3).items.is_empty());
    assert!(paginate(&items, 4, 3).items.is_empty());
    assert!(paginate(&items, i64::MAX, 3).items.is_empty());
    assert!(paginate(&items, i64::MIN, 3).items.is_empty());
    assert_eq!(paginate(&items, 4, 3).total_pages, 3);
}

#[test]
fn page_never_exceeds_page_size() {
    let items: Vec<u32> = (0..23).collect();
    for size in 1..=10 {
        for page in -1..=10 {
            assert!(paginate(&items, page, size).items.len() <= size);
        }
    }
}

#[test]
fn zero_page_size_yields_nothing() {
    let page = paginate(&[1, 2, 3], 1, 0);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[test]
fn review_page_composes_filter_sort_paginate() {
    let reviews = sample_reviews();
    let query = ReviewQuery {
        job: JobFilter::Only(JobCategory::Developer),
        sort: ReviewSort::Likes,
        page: 1,
        page_size: 2,
    };
    let page = review_page(&reviews, &query);
    assert_eq!(ids(&page.items), vec!["13", "9"]);
    // Six developer reviews in the sample set.
    assert_eq!(page.total_pages, 3);
}

#[test]
fn default_review_query() {
    let query = ReviewQuery::default();
    assert_eq!(query.page, 1);
    assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(query.sort, ReviewSort::Latest);
    assert_eq!(query.job, JobFilter::All);
}
