use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use stateful_list::config::{Config, PathOpt, USizeOpt};
use stateful_list::demo::{self, DemoOptions, FeedOptions};
use stateful_list::log::Log;
use stateful_list::utils::install_panic_hook;
use stateful_list::{ArcPath, trigger::validate_threshold};

const SCOPE: &str = "main";

#[derive(Parser)]
#[command(name = "stateful-list")]
#[command(about = "A paginated list with initial load, pull-to-refresh and load-more")]
struct Cli {
    /// Path of the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a fake paged feed in the terminal
    Demo {
        /// Number of pages in the feed
        #[arg(long, default_value = "5")]
        pages: usize,
        /// Items per page
        #[arg(long, default_value = "20")]
        page_size: usize,
        /// Latency of every load in milliseconds
        #[arg(long, default_value = "700")]
        latency: u64,
        /// Page (1-based) whose first load fails
        #[arg(long)]
        fail_page: Option<usize>,
        /// Make the first load return nothing
        #[arg(long)]
        empty: bool,
        /// Keep the list visible during the first load
        #[arg(long)]
        show_list: bool,
        /// Load-more threshold in rows, instead of the configured one
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Print the effective configuration
    Config,
}

fn default_config_path() -> PathBuf {
    let home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
    home.join(".config").join("stateful-list").join("config.toml")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    install_panic_hook()?;

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = Config::spawn(ArcPath::from(Path::new(&config_path)));
    if config.load().await.is_err() {
        config.save().await?;
    }

    let log = Log::spawn(
        config.log_level().await?,
        config.usize(USizeOpt::MaxAge).await?,
        config.path(PathOpt::LogDir).await?,
    )
    .await?;
    log.collect_garbage().await;
    log.info(SCOPE, "Starting stateful-list");

    let result = match cli.command {
        Commands::Demo {
            pages,
            page_size,
            latency,
            fail_page,
            empty,
            show_list,
            threshold,
        } => {
            let mut settings = config.settings().await?;
            if let Some(threshold) = threshold {
                settings.load_more_threshold = validate_threshold(threshold)?;
            }
            let options = DemoOptions {
                feed: FeedOptions {
                    pages,
                    page_size,
                    latency: Duration::from_millis(latency),
                    failing_page: fail_page.map(|page| page.saturating_sub(1)),
                    empty,
                },
                show_list_underneath: show_list,
            };
            log.error_on_error(SCOPE, demo::run(options, settings, log.clone()).await)
        }
        Commands::Config => {
            let data = config.data().await?;
            println!("# {}", config_path.display());
            print!("{}", toml::to_string_pretty(&data)?);
            Ok(())
        }
    };

    log.flush().await?;
    result
}
