use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use palisade::classifier::perspective::PerspectiveClassifier;
use palisade::classifier::TextClassifier;
use palisade::config::Config;
use palisade::db::Database;
use palisade::{analytics, db, output, pipeline, status};

/// Palisade: toxicity moderation decisions and analytics.
///
/// Classifies text against a per-category toxicity model, maps the scores
/// to a moderation action (ALLOW / REVIEW / FLAG), and keeps running
/// statistics over every decision made.
#[derive(Parser)]
#[command(name = "palisade", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Analyze one text: classify, decide, store, display
    Analyze {
        /// The text to analyze
        text: String,

        /// Display name of the content author
        #[arg(long)]
        author: Option<String>,

        /// Moderation threshold (overrides PALISADE_THRESHOLD)
        #[arg(long)]
        threshold: Option<f64>,

        /// Display the decision without storing it
        #[arg(long)]
        no_save: bool,
    },

    /// Analyze a file of texts, one per line
    Batch {
        /// Path to the input file
        file: String,

        /// Display name recorded for every line
        #[arg(long)]
        author: Option<String>,

        /// Moderation threshold (overrides PALISADE_THRESHOLD)
        #[arg(long)]
        threshold: Option<f64>,

        /// Number of texts to classify in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: u32,
    },

    /// Run two canned sample posts through the pipeline (never stored)
    Demo {
        /// Moderation threshold (overrides PALISADE_THRESHOLD)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// List the most recent stored analyses, newest first
    Recent {
        /// How many analyses to show (default: 5)
        #[arg(long, default_value = "5")]
        limit: u32,
    },

    /// Show the analytics dashboard over the full history
    Stats,

    /// Show system status (DB stats, config summary)
    Status,
}

/// The two sample posts the demo runs through the pipeline.
const SAMPLE_POSTS: [(&str, &str); 2] = [
    (
        "John Smith",
        "This movie is absolutely terrible! The director should be fired and the actors were completely useless.",
    ),
    (
        "Alice Doe",
        "The so-called \"experts\" are all just paid shills! Don't listen to their lies about climate change. They're trying to destroy our economy and way of life!",
    ),
];

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("palisade=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Palisade database...");
            let db = db::initialize_sqlite(&config.db_path, &config.categories)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nPalisade is ready. Next step: set up your .env file");
            println!("  (see .env.example for required variables)");
            println!("\nThen run: cargo run -- analyze \"some text\"");
        }

        Commands::Analyze {
            text,
            author,
            threshold,
            no_save,
        } => {
            config.require_categories()?;
            config.require_perspective()?;
            let threshold = threshold.unwrap_or(config.threshold);

            let classifier = create_classifier(&config)?;
            let analysis = pipeline::analyze::run(
                classifier.as_ref(),
                &config,
                author.as_deref(),
                &text,
                threshold,
            )
            .await?;

            output::terminal::display_analysis(&analysis);

            if no_save {
                println!("\n{}", "Not stored (--no-save).".dimmed());
            } else {
                let db = open_database(&config)?;
                let id = db
                    .insert_analysis(
                        &analysis.author,
                        &analysis.content,
                        &analysis.scores,
                        analysis.action,
                    )
                    .await?;
                info!(id, "Analysis stored");
            }
        }

        Commands::Batch {
            file,
            author,
            threshold,
            concurrency,
        } => {
            config.require_categories()?;
            config.require_perspective()?;
            let threshold = threshold.unwrap_or(config.threshold);
            let db = open_database(&config)?;

            let input = std::fs::read_to_string(&file)
                .map_err(|e| anyhow::anyhow!("Failed to read {file}: {e}"))?;

            println!("Analyzing {file}...");

            let classifier = create_classifier(&config)?;
            let outcome = pipeline::batch::run(
                classifier.as_ref(),
                &config,
                &db,
                &input,
                author.as_deref(),
                threshold,
                concurrency as usize,
            )
            .await?;

            println!("\n{}", "Batch complete.".bold());
            println!("  Analyzed: {}", outcome.analyzed);
            println!("  Flagged:  {}", outcome.flagged);
            if outcome.failed > 0 {
                println!("  {}", format!("Failed:   {}", outcome.failed).yellow());
            }
        }

        Commands::Demo { threshold } => {
            config.require_categories()?;
            config.require_perspective()?;
            let threshold = threshold.unwrap_or(config.threshold);

            println!("Running sample posts (threshold {threshold:.2}, nothing stored)...");

            let classifier = create_classifier(&config)?;
            for (author, content) in SAMPLE_POSTS {
                let analysis = pipeline::analyze::run(
                    classifier.as_ref(),
                    &config,
                    Some(author),
                    content,
                    threshold,
                )
                .await?;
                output::terminal::display_analysis(&analysis);
            }
        }

        Commands::Recent { limit } => {
            config.require_categories()?;
            let db = open_database(&config)?;
            let records = db.get_recent_analyses(limit).await?;
            output::terminal::display_recent(&records);
        }

        Commands::Stats => {
            config.require_categories()?;
            let db = open_database(&config)?;

            // The aggregator is pure: fetch the full history first, then
            // fold it. A snapshot that misses in-flight writes is fine.
            let records = db.get_all_analyses().await?;
            let summary = analytics::summarize(&config.categories, &records);
            output::terminal::display_summary(&summary, &config.categories);
        }

        Commands::Status => {
            if !std::path::Path::new(&config.db_path).exists() {
                println!("Database: not initialized");
                println!("\nRun `palisade init` to set up the database.");
                return Ok(());
            }
            let db = open_database(&config)?;
            status::show(&db, &config).await?;
        }
    }

    Ok(())
}

fn open_database(config: &Config) -> Result<Arc<dyn Database>> {
    db::open_sqlite(&config.db_path, &config.categories)
}

/// Create the configured classifier.
fn create_classifier(config: &Config) -> Result<Box<dyn TextClassifier>> {
    info!("Using Perspective API classifier");
    let classifier =
        PerspectiveClassifier::new(config.perspective_api_key.clone(), &config.categories)?;
    Ok(Box::new(classifier))
}
