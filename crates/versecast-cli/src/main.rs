//! versecast CLI - poem-to-blog publishing pipeline
//!
//! Usage:
//!   versecast init              Write default config to .versecast/config.toml
//!   versecast post <topic> <contents>   Compose, illustrate, and publish a post

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use versecast_core::{api_key, GenerationRequest, VersecastConfig};
use versecast_pipeline::{HttpFetcher, Pipeline};

#[derive(Parser)]
#[command(name = "versecast")]
#[command(author, version, about = "Poem-to-blog publishing pipeline")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Compose a poem, generate its illustration, and publish both
    Post {
        /// Topic of the poem
        topic: String,

        /// Description the poem builds on
        contents: String,

        /// Publish publicly instead of leaving the post private
        #[arg(long)]
        public: bool,

        /// Override the configured poll attempt budget
        #[arg(long)]
        max_poll_attempts: Option<u32>,

        /// Override the configured poll interval in seconds
        #[arg(long)]
        poll_interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => cmd_init(path),
        Commands::Post {
            topic,
            contents,
            public,
            max_poll_attempts,
            poll_interval,
        } => cmd_post(topic, contents, public, max_poll_attempts, poll_interval).await,
    }
}

fn cmd_init(path: PathBuf) -> Result<()> {
    info!("Initializing versecast in {:?}", path);

    VersecastConfig::write_default(&path).context("Failed to write default config")?;

    println!("Initialized versecast in {:?}", path);
    println!("Created:");
    println!("  .versecast/config.toml");
    println!();
    println!("Set these environment variables before posting:");

    let config = VersecastConfig::default();
    println!("  {}", config.model.api_key_env);
    println!("  {}", config.blog.api_key_env);
    println!("  {}", config.image.api_key_env);

    Ok(())
}

async fn cmd_post(
    topic: String,
    contents: String,
    public: bool,
    max_poll_attempts: Option<u32>,
    poll_interval: Option<u64>,
) -> Result<()> {
    let mut config = VersecastConfig::load_or_default(&PathBuf::from("."))
        .context("Failed to load configuration")?;

    // CLI overrides on top of file config
    if public {
        config.blog.public = true;
    }
    if let Some(attempts) = max_poll_attempts {
        config.poll.max_poll_attempts = attempts;
    }
    if let Some(interval) = poll_interval {
        config.poll.poll_interval_secs = interval;
    }

    // Resolve credentials once, up front
    let model_key = api_key(&config.model.api_key_env)?;
    let blog_key = api_key(&config.blog.api_key_env)?;
    let image_key = api_key(&config.image.api_key_env)?;

    let request = GenerationRequest::new(topic, contents)?;

    let poet = versecast_poet::PoemClient::new(&config.model.name, model_key, &config.blog.tags)?;
    let blog = versecast_blog::WikidocsClient::new(&config.blog.base_url, &blog_key)?;
    let images = versecast_image::FreepikClient::new(&config.image.base_url, image_key)?;
    let fetcher = HttpFetcher::new()?;

    let pipeline = Pipeline::new(poet, blog, images, fetcher, &config);

    println!("Publishing poem post...");
    println!("  Topic: {}", request.topic);
    println!("  Visibility: {}", if config.blog.public { "public" } else { "private" });
    println!();

    let report = pipeline.run(&request).await?;

    println!();
    println!("Post published!");
    println!("  Post ID: {}", report.post_id);
    println!("  Title: {}", report.title);
    println!("  URL: {}", report.post_url);

    Ok(())
}
