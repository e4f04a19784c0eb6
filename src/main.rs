//! CLI entry point for spacetraveling

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spacetraveling::config::SiteConfig;
use spacetraveling::repository::{ContentRepository, MemoryRepository, PrismicRepository};
use spacetraveling::Blog;

#[derive(Parser)]
#[command(name = "spacetraveling")]
#[command(version)]
#[command(about = "Browse a headless-CMS blog: listings, posts and navigation", long_about = None)]
struct Cli {
    /// Site directory holding _config.yml (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Serve content from a JSON file of documents instead of the CMS
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Read content as of a release or preview ref
    #[arg(long = "ref", global = true)]
    release_ref: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Number of pages to load
        #[arg(short, long, default_value = "1")]
        pages: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a post with read time and previous/next links
    Post {
        /// Post slug
        slug: String,

        /// Print the post view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the path of every post
    Paths,

    /// Display version information
    Version,
}

fn open_repository(cli: &Cli, config: &SiteConfig) -> Result<Arc<dyn ContentRepository>> {
    if let Some(path) = &cli.fixtures {
        tracing::info!("Reading content from {:?}", path);
        return Ok(Arc::new(MemoryRepository::load(path)?));
    }

    tracing::debug!("Reading content from {}", config.repository.endpoint);
    let repository =
        PrismicRepository::new(&config.repository)?.with_release_ref(cli.release_ref.clone());
    Ok(Arc::new(repository))
}

fn open_blog(cli: &Cli) -> Result<Blog> {
    // Determine base directory
    let base_dir = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let config = SiteConfig::discover(&base_dir)?;
    let repository = open_repository(cli, &config)?;
    Ok(Blog::new(config, repository))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "spacetraveling=debug,info"
    } else {
        "spacetraveling=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &cli.command {
        Commands::List { pages, json } => {
            let blog = open_blog(&cli)?;
            spacetraveling::commands::list::run(&blog, *pages, *json).await?;
        }

        Commands::Post { slug, json } => {
            let blog = open_blog(&cli)?;
            tracing::debug!("Loading post {}", slug);
            spacetraveling::commands::post::run(&blog, slug, *json).await?;
        }

        Commands::Paths => {
            let blog = open_blog(&cli)?;
            spacetraveling::commands::paths::run(&blog).await?;
        }

        Commands::Version => {
            println!("spacetraveling version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
