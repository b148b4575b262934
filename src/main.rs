use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use nomad_korea::config::Config;
use nomad_korea::filters::{
    AmenityFilter, BudgetFilter, EnvironmentFilter, HomeFilters, RegionFilter, SearchFilters,
    SeasonFilter,
};
use nomad_korea::models::{City, CitySummary, JobCategory, Reaction, Review, ReviewInput};
use nomad_korea::recommend::{self, DEFAULT_RELATED_LIMIT};
use nomad_korea::reviews::{filter_reviews_by_job, paginate, sort_reviews_by_key, JobFilter};
use nomad_korea::search::{dropdown, SearchHistory, DROPDOWN_LIMIT};
use nomad_korea::sources::{CityRepository, CityService, MemoryRepository, SupabaseRepository};
use nomad_korea::storage::{FileStore, ReactionStore};
use nomad_korea::Error;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse and review Korean cities for remote workers")]
struct Cli {
    /// Read cities and reviews from a JSON snapshot instead of Supabase
    #[arg(long, global = true, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search cities by name or region
    Search {
        query: String,
        #[arg(long, default_value_t = DROPDOWN_LIMIT)]
        limit: usize,
        /// Keep only this region; repeat for several
        #[arg(long = "region", value_name = "REGION")]
        regions: Vec<String>,
        #[arg(long)]
        min_budget: Option<i64>,
        #[arg(long)]
        max_budget: Option<i64>,
        #[arg(long)]
        min_rating: Option<f64>,
    },
    /// List the regions cities can be filtered by
    Regions,
    /// Show or edit recent searches
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// List cities matching the home page filters
    Cities {
        #[arg(long)]
        budget: Option<BudgetFilter>,
        #[arg(long)]
        region: Option<RegionFilter>,
        #[arg(long)]
        environment: Option<EnvironmentFilter>,
        #[arg(long)]
        season: Option<SeasonFilter>,
        #[arg(long)]
        amenity: Option<AmenityFilter>,
        /// Start from a filter query string, e.g. `budget=mid&region=seoul`
        #[arg(long, value_name = "QS")]
        query: Option<String>,
    },
    /// Page through a city's reviews
    Reviews {
        slug: String,
        #[arg(long, default_value = "all")]
        job: JobFilter,
        /// latest, rating or likes
        #[arg(long, default_value = "latest")]
        sort: String,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Cities similar to the given one
    Related {
        slug: String,
        #[arg(long, default_value_t = DEFAULT_RELATED_LIMIT)]
        limit: usize,
    },
    /// Home page recommendation lists
    Recommend {
        #[command(subcommand)]
        list: Recommendation,
    },
    /// Like or dislike a city; pressing the same reaction again clears it
    React { slug: String, reaction: Reaction },
    /// Write a review
    Review {
        slug: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        rating: f64,
        #[arg(long)]
        job: String,
        #[arg(long)]
        comment: String,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    List,
    Delete { id: String },
    Clear,
}

#[derive(Subcommand, Debug)]
enum Recommendation {
    Trending {
        #[arg(long, default_value_t = 6)]
        limit: usize,
    },
    TopRated {
        #[arg(long, default_value_t = 6)]
        limit: usize,
    },
    Budget {
        #[arg(long, default_value_t = 0)]
        min: i64,
        #[arg(long, default_value_t = 1_200_000)]
        max: i64,
        #[arg(long, default_value_t = 6)]
        limit: usize,
    },
    Job {
        job: JobCategory,
        #[arg(long, default_value_t = 6)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nomad_korea=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to read configuration")?;

    if let Some(path) = cli.snapshot.clone() {
        let repo = MemoryRepository::from_snapshot_file(&path)
            .await
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
        run(CityService::new(repo), &config, cli).await
    } else if let Some(supabase) = &config.supabase {
        let repo = SupabaseRepository::new(supabase, config.http_timeout)
            .context("Failed to create Supabase client")?;
        run(CityService::new(repo), &config, cli).await
    } else {
        bail!("No data source: set SUPABASE_URL and SUPABASE_ANON_KEY or pass --snapshot <file>")
    }
}

async fn run<R: CityRepository>(
    service: CityService<R>,
    config: &Config,
    cli: Cli,
) -> anyhow::Result<()> {
    info!("📍 Using {} data source", service.source_name());
    let store = FileStore::new(&config.data_dir);
    let json = cli.json;

    match cli.command {
        Command::Search {
            query,
            limit,
            regions,
            min_budget,
            max_budget,
            min_rating,
        } => {
            SearchHistory::new(store).add(&query);
            let filters = SearchFilters {
                regions,
                min_budget,
                max_budget,
                min_rating,
            };
            let results = service.search_filtered(&query, &filters, limit).await;
            if json {
                return print_json(&results);
            }
            if results.is_empty() {
                println!("No cities match '{}'", query);
            }
            let view = dropdown(&results);
            for (i, city) in view.items.iter().enumerate() {
                print_summary(i + 1, city);
            }
            if view.more > 0 {
                println!("... {} more", view.more);
            }
        }

        Command::Regions => {
            let regions = service.regions().await;
            if json {
                return print_json(&regions);
            }
            for region in regions {
                println!("{}", region);
            }
        }

        Command::History { action } => {
            let history = SearchHistory::new(store);
            match action.unwrap_or(HistoryAction::List) {
                HistoryAction::List => {
                    let entries = history.entries();
                    if json {
                        return print_json(&entries);
                    }
                    for entry in entries {
                        println!("{}  {}", entry.id, entry.query);
                    }
                }
                HistoryAction::Delete { id } => history.delete(&id),
                HistoryAction::Clear => {
                    history.clear();
                    info!("🧹 Cleared search history");
                }
            }
        }

        Command::Cities {
            budget,
            region,
            environment,
            season,
            amenity,
            query,
        } => {
            let mut filters = query
                .as_deref()
                .map(HomeFilters::from_query_string)
                .unwrap_or_default();
            filters.budget = budget.unwrap_or(filters.budget);
            filters.region = region.unwrap_or(filters.region);
            filters.environment = environment.unwrap_or(filters.environment);
            filters.season = season.unwrap_or(filters.season);
            filters.amenity = amenity.unwrap_or(filters.amenity);

            let cities = service.filtered_cities(&filters).await;
            if json {
                return print_json(&serde_json::json!({
                    "filters": filters,
                    "active_filters": filters.active_count(),
                    "query": filters.to_query_string(),
                    "cities": cities,
                }));
            }

            println!(
                "{} cities, {} active filters (?{})",
                cities.len(),
                filters.active_count(),
                filters.to_query_string()
            );
            println!();
            for (i, city) in cities.iter().enumerate() {
                print_city(i + 1, city);
            }
        }

        Command::Reviews {
            slug,
            job,
            sort,
            page,
            page_size,
        } => {
            let city = find_city(&service, &slug).await?;
            let reviews = service.reviews_or_empty(&city.id).await;
            let sorted = sort_reviews_by_key(filter_reviews_by_job(&reviews, job), &sort);
            let page_size = page_size.unwrap_or(config.review_page_size);
            let result = paginate(&sorted, page, page_size);

            if json {
                return print_json(&result);
            }
            println!("{} reviews (page {} of {})", city.name, page, result.total_pages);
            println!();
            for review in &result.items {
                print_review(review);
            }
        }

        Command::Related { slug, limit } => {
            let city = find_city(&service, &slug).await?;
            let related = service.related(&city, limit).await;
            if json {
                return print_json(&related);
            }
            println!("Cities like {} ({})", city.name, city.region);
            println!();
            for (i, city) in related.iter().enumerate() {
                print_city(i + 1, city);
            }
        }

        Command::Recommend { list } => {
            let cities = service.cities_or_empty().await;
            let picked = match list {
                Recommendation::Trending { limit } => recommend::trending_cities(&cities, limit),
                Recommendation::TopRated { limit } => recommend::top_rated_cities(&cities, limit),
                Recommendation::Budget { min, max, limit } => {
                    recommend::cities_by_budget(&cities, min, max, limit)
                }
                Recommendation::Job { job, limit } => recommend::cities_by_job(&cities, job, limit),
            };
            if json {
                return print_json(&picked);
            }
            for (i, city) in picked.iter().enumerate() {
                print_city(i + 1, city);
            }
        }

        Command::React { slug, reaction } => {
            let city = find_city(&service, &slug).await?;
            let backend = service.like_counts(&city.id).await;
            let update = ReactionStore::new(store).press(&city.id, reaction, backend);
            let counts = update.counts;

            if json {
                return print_json(&serde_json::json!({
                    "city_id": city.id,
                    "reaction": update.reaction,
                    "likes": counts.likes,
                    "dislikes": counts.dislikes,
                }));
            }
            let state = match update.reaction {
                Some(Reaction::Like) => "liked",
                Some(Reaction::Dislike) => "disliked",
                None => "no reaction",
            };
            println!("{}: {} (👍 {} / 👎 {})", city.name, state, counts.likes, counts.dislikes);
        }

        Command::Review {
            slug,
            user_id,
            rating,
            job,
            comment,
        } => {
            let city = find_city(&service, &slug).await?;
            let input = ReviewInput {
                city_id: Some(city.id.clone()),
                rating: Some(rating),
                comment: Some(comment),
                job_category: Some(job),
            };

            match service.submit_review(&input, &user_id).await {
                Ok(review) => {
                    if json {
                        return print_json(&review);
                    }
                    info!("✅ Review saved");
                    print_review(&review);
                }
                Err(Error::Validation(errors)) => {
                    for (field, message) in errors.iter() {
                        eprintln!("  {}: {}", field, message);
                    }
                    bail!("Review was not saved");
                }
                Err(e) => return Err(e).context("Failed to save review"),
            }
        }
    }

    Ok(())
}

async fn find_city<R: CityRepository>(
    service: &CityService<R>,
    slug: &str,
) -> anyhow::Result<City> {
    match service.city_by_slug(slug).await {
        Some(city) => Ok(city),
        None => bail!("City '{}' not found", slug),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summary(rank: usize, city: &CitySummary) {
    println!("{}. {} ({})", rank, city.name, city.region);
    println!(
        "   ★ {:.1} · {} reviews · {} won/month",
        city.avg_rating, city.review_count, city.avg_monthly_cost
    );
}

fn print_city(rank: usize, city: &City) {
    println!("{}. {} ({}) [{}]", rank, city.name, city.region, city.slug);
    println!(
        "   ★ {:.1} · {} reviews · {} won/month",
        city.avg_rating, city.review_count, city.avg_monthly_cost
    );
    println!(
        "   {} Mbps · {} cafes · {} coworking spaces",
        city.avg_internet_speed, city.cafe_count, city.coworking_count
    );
    println!();
}

fn print_review(review: &Review) {
    println!(
        "{} ★{} · {} · {}",
        review.username,
        review.rating,
        review.job_category,
        review.created_at.format("%Y-%m-%d")
    );
    println!("   {}", review.comment);
    println!("   👍 {}  💬 {}", review.likes_count, review.comments_count);
    println!();
}
