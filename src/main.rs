//! CLI entry point for notion-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "notion-blog")]
#[command(version)]
#[command(about = "A blog content layer that uses a Notion database as its CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default _config.yml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// List published posts
    #[command(alias = "ls")]
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a post with its Markdown body
    Show {
        /// Slug of the post
        slug: String,

        /// Print JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },

    /// Print the slugs of all published posts
    Slugs,

    /// Export published posts as Markdown files
    #[command(alias = "e")]
    Export {
        /// Output directory (defaults to export_dir from _config.yml)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Remove exported posts
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "notion_blog=debug,info"
    } else {
        "notion_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            notion_blog::commands::init::init_blog(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::List { json } => {
            let blog = notion_blog::NotionBlog::new(&base_dir)?;
            notion_blog::commands::list::run(&blog, json).await?;
        }

        Commands::Show { slug, json } => {
            let blog = notion_blog::NotionBlog::new(&base_dir)?;
            notion_blog::commands::show::run(&blog, &slug, json).await?;
        }

        Commands::Slugs => {
            let blog = notion_blog::NotionBlog::new(&base_dir)?;
            notion_blog::commands::slugs::run(&blog).await?;
        }

        Commands::Export { out } => {
            let blog = notion_blog::NotionBlog::new(&base_dir)?;
            tracing::info!("Exporting posts...");
            notion_blog::commands::export::run(&blog, out).await?;
        }

        Commands::Clean => {
            let blog = notion_blog::NotionBlog::new(&base_dir)?;
            tracing::info!("Cleaning exported posts...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("notion-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
