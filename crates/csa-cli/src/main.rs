mod analyze;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "csa-cli")]
#[command(about = "Comment sentiment analyzer command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score the comments of one Instagram post or reel
    Analyze {
        /// Post URL, e.g. `https://www.instagram.com/p/<shortcode>/`
        post_url: String,

        /// Print the full summary as JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Override `CSA_MAX_COMMENTS` for this run
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_comments: Option<u32>,

        /// Override `CSA_MAX_PAGES` for this run
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_pages: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("csa-cli: run `csa-cli analyze <POST_URL>` or `csa-cli --help`");
        return Ok(());
    };

    let config = csa_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Analyze {
            post_url,
            json,
            max_comments,
            max_pages,
        } => {
            let limits = csa_scraper::FetchLimits {
                max_comments: max_comments.unwrap_or(config.max_comments),
                max_pages: max_pages.unwrap_or(config.max_pages),
            };
            analyze::run_analyze(&config, &post_url, limits, json).await?;
        }
    }

    Ok(())
}
