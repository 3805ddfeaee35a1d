use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{DataIndex, SEARCH_RESULT_LIMIT};
use recommender::{RecommendError, SimilarityRecommender};
use server::{MovieRecommendation, RecommendationOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tmdb_client::{TmdbClient, TmdbConfig};
use tracing::debug;

/// Movie Recommender - similar movies with live TMDB details
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Content-based movie recommendations from a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Directory containing movies.dat and similarity.dat
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// TMDB API key (overrides TMDB_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by title
    Search {
        /// Text to look for (case-insensitive substring match)
        #[arg(long)]
        query: String,
    },

    /// Show details for a movie
    Show {
        /// Exact catalog title
        #[arg(long)]
        title: String,
    },

    /// Recommend movies similar to a title
    Recommend {
        /// Exact catalog title
        #[arg(long)]
        title: String,
    },

    /// Time recommendations for random titles (no network calls)
    Benchmark {
        /// Number of recommendations to compute
        #[arg(long, default_value = "1000")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Nothing is served unless both artifacts load and line up
    let start = Instant::now();
    let data_index = Arc::new(
        DataIndex::load_from_files(&cli.data_dir).context("Failed to load movie catalog")?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        data_index.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Search { query } => handle_search(&data_index, &query),
        Commands::Show { title } => {
            let orchestrator = build_orchestrator(data_index, cli.api_key)?;
            handle_show(&orchestrator, &title).await?
        }
        Commands::Recommend { title } => {
            let orchestrator = build_orchestrator(data_index, cli.api_key)?;
            handle_recommend(&orchestrator, &title).await?
        }
        Commands::Benchmark { requests } => handle_benchmark(data_index, requests)?,
    }

    Ok(())
}

/// TMDB config from `TMDB_*` variables, with `--api-key` taking precedence
fn tmdb_config(api_key: Option<String>) -> Result<TmdbConfig> {
    let config = match api_key {
        Some(key) => {
            let mut vars: Vec<(String, String)> = std::env::vars()
                .filter(|(name, _)| name != "TMDB_API_KEY")
                .collect();
            vars.push(("TMDB_API_KEY".to_string(), key));
            TmdbConfig::from_vars(vars)
        }
        None => TmdbConfig::from_env(),
    };

    config.context("TMDB API key missing: pass --api-key or set TMDB_API_KEY")
}

fn build_orchestrator(
    data_index: Arc<DataIndex>,
    api_key: Option<String>,
) -> Result<RecommendationOrchestrator> {
    let client = TmdbClient::new(tmdb_config(api_key)?);
    debug!(config = ?client.config(), "Configured TMDB client");
    Ok(RecommendationOrchestrator::new(data_index, Arc::new(client)))
}

/// Handle the 'search' command
fn handle_search(data_index: &DataIndex, query: &str) {
    let matches = data_index.catalog().search(query, SEARCH_RESULT_LIMIT);

    if matches.is_empty() {
        println!("No movies match '{}'", query);
        return;
    }

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    for movie in matches {
        println!("  🎬 {} {}", movie.title, format!("(id {})", movie.id).dimmed());
    }
}

/// An unknown title means nothing is selected; tell the user and carry on
fn report_not_found(err: anyhow::Error, orchestrator: &RecommendationOrchestrator) -> Result<()> {
    let title = match err.downcast_ref::<RecommendError>() {
        Some(RecommendError::MovieNotFound { title }) => title.clone(),
        None => return Err(err),
    };

    println!("{} No movie titled '{}' in the catalog", "✗".red(), title);
    let suggestions = orchestrator.search(&title);
    if !suggestions.is_empty() {
        println!("Did you mean:");
        for movie in suggestions {
            println!("  - {}", movie.title);
        }
    }
    Ok(())
}

/// Handle the 'show' command
async fn handle_show(orchestrator: &RecommendationOrchestrator, title: &str) -> Result<()> {
    let selected = match orchestrator.selected_movie(title).await {
        Ok(selected) => selected,
        Err(err) => return report_not_found(err, orchestrator),
    };

    print_selected(&selected);
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(orchestrator: &RecommendationOrchestrator, title: &str) -> Result<()> {
    let recommendations = match orchestrator.get_recommendations(title).await {
        Ok(recommendations) => recommendations,
        Err(err) => return report_not_found(err, orchestrator),
    };

    print_recommendations(title, &recommendations);
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(data_index: Arc<DataIndex>, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    let catalog_size = data_index.len();
    if catalog_size == 0 {
        bail!("Catalog is empty");
    }

    let recommender = SimilarityRecommender::new(data_index.clone());
    let titles: Vec<String> = (0..requests)
        .filter_map(|_| {
            let row = rand::random_range(0..catalog_size);
            data_index.catalog().get(row).map(|movie| movie.title.clone())
        })
        .collect();

    let mut timings: Vec<Duration> = Vec::with_capacity(titles.len());
    for title in &titles {
        let start = Instant::now();
        recommender.recommend(title)?;
        timings.push(start.elapsed());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = timings.len() as f64 / total_time.as_secs_f64().max(f64::EPSILON);

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", timings.len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| format!("[{}]", g))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_selected(selected: &MovieRecommendation) {
    let detail = &selected.detail;

    println!("{}", selected.title.bold().blue());
    if !detail.genres.is_empty() {
        println!("{}", genre_tags(&detail.genres).cyan());
    }
    println!("{} {}", "Release Date:".bold(), detail.release_date);
    println!(
        "{} {} ({}/10)",
        "Rating:".bold(),
        "⭐".repeat(detail.star_count() as usize),
        detail.rating
    );
    println!("{} {} minutes", "Runtime:".bold(), detail.runtime);
    println!("{} {:.1}", "Popularity Score:".bold(), detail.popularity);
    println!("{} {}", "Poster:".bold(), selected.poster_url);
    println!("{}", "Overview:".bold());
    println!("{}", detail.overview);
}

fn print_recommendations(title: &str, recommendations: &[MovieRecommendation]) {
    println!("{}", format!("Recommended Movies for '{}':", title).bold().blue());
    if recommendations.is_empty() {
        println!("No other movies in the catalog");
        return;
    }

    for (rank, rec) in recommendations.iter().enumerate() {
        let detail = &rec.detail;
        println!(
            "{}. {} {}",
            (rank + 1).to_string().green(),
            rec.title.bold(),
            format!("(similarity {:.3})", rec.score.unwrap_or_default()).dimmed()
        );

        let top_genres: Vec<String> = detail.genres.iter().take(2).cloned().collect();
        if !top_genres.is_empty() {
            println!("   {}", genre_tags(&top_genres).cyan());
        }
        let mut info = format!("⭐ {}/10  🎬 {} min", detail.rating, detail.runtime);
        if let Some(year) = detail.release_year() {
            info.push_str(&format!("  📅 {}", year));
        }
        println!("   {}", info);
        println!("   {}", rec.poster_url.dimmed());
        println!("   {}", detail.overview);
    }
}
