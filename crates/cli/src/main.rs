use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use server::{
    DEFAULT_DISCOVER_K, DEFAULT_RECOMMEND_K, EngineConfig, RecommendationEngine, render,
};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};

/// Default diagnostic log, appended to on every run
const DEFAULT_LOG_FILE: &str = "recommendation_service.log";

/// Filmi Recs - hybrid recommender for Indian movies
#[derive(Parser)]
#[command(name = "filmi-recs", version)]
#[command(about = "Find similar Indian movies or discover popular ones", long_about = None)]
struct Cli {
    /// Path to the movies CSV file
    #[arg(long, global = true, default_value = server::config::DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Where diagnostic logs are appended
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Movie title (case-insensitive)
        title: String,

        /// Language of the release to use when the title is ambiguous ("null" for none)
        language: Option<String>,

        /// Inclusive release-year range such as 2016-2019 ("null" for none)
        year_gap: Option<String>,

        /// Number of recommendations
        #[arg(default_value_t = DEFAULT_RECOMMEND_K)]
        k: usize,
    },

    /// Most popular movies for some genres and languages
    Discover {
        /// Comma-separated genres ("null" for any)
        genres: Option<String>,

        /// Comma-separated languages ("null" for any)
        languages: Option<String>,

        /// Number of movies
        #[arg(default_value_t = DEFAULT_DISCOVER_K)]
        k: usize,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            print_json(&json!({ "error": "Invalid command specified." }));
            std::process::exit(1);
        }
    };

    init_logging(&cli.log_file);

    match run(cli) {
        Ok(output) => print_json(&output),
        Err(err) => {
            error!("Failed to process request: {err:#}");
            print_json(&json!({ "error": "Failed to process request due to a server-side error." }));
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<Value> {
    let config = EngineConfig::default().with_data_path(cli.data);
    let engine = RecommendationEngine::build(&config).context("Failed to build engine")?;

    let output = match cli.command {
        Commands::Recommend {
            title,
            language,
            year_gap,
            k,
        } => {
            let language = optional_arg(language);
            let year_gap = optional_arg(year_gap);
            info!(
                "recommend title={title:?} language={language:?} year_gap={year_gap:?} k={k}"
            );
            render(&engine.smart_recommend(&title, language.as_deref(), year_gap.as_deref(), k))
        }
        Commands::Discover { genres, languages, k } => {
            let genres = optional_arg(genres).map(|raw| split_list(&raw));
            let languages = optional_arg(languages).map(|raw| split_list(&raw));
            info!("discover genres={genres:?} languages={languages:?} k={k}");
            render(&engine.discover_movies(genres.as_deref(), languages.as_deref(), k))
        }
    };
    Ok(output)
}

/// Treat the literal "null" and blank values as not given
fn optional_arg(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != "null"
    })
}

/// Split a comma-separated list, dropping empty items
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

/// Log to the append-only file, or to stderr if it can't be opened.
/// Stdout carries only the JSON result.
fn init_logging(path: &Path) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match open_log(path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn open_log(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
