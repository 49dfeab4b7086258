use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use land_scout::config::{CrawlConfig, DEFAULT_BASE_URL};
use land_scout::crawler::crawl_to_snapshot;
use land_scout::scrapers::{CredentialProvider, EnvCredentials, LandApiFetcher, SearchParams, TradeType};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Collect lease listings for one complex and save a dated CSV snapshot.
///
/// Credentials are read from LAND_COOKIE, LAND_AUTHORIZATION,
/// LAND_USER_AGENT and LAND_REFERER (a .env file is loaded if present).
#[derive(Parser, Debug)]
#[command(name = "land-scout", version, about, long_about = None)]
struct Cli {
    /// Complex number in the listings API
    #[arg(long, default_value = "107024")]
    complex_no: String,

    /// Name used in the snapshot file name
    #[arg(long, default_value = "센텀팰리스")]
    complex_label: String,

    /// Trade type code or label (A1/매매, B1/전세, B2/월세)
    #[arg(long, default_value = "B1")]
    trade_type: TradeType,

    /// Folder that receives snapshot files
    #[arg(long, default_value = "data")]
    data_folder: PathBuf,

    #[arg(long, default_value_t = 1)]
    first_page: u32,

    #[arg(long, default_value_t = 5)]
    last_page: u32,

    /// Attempts per page on 401/403/504
    #[arg(long, default_value_t = 3)]
    max_retries: u32,

    #[arg(long, default_value_t = 3)]
    retry_delay_secs: u64,

    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Pause between pages, in milliseconds
    #[arg(long, default_value_t = 0)]
    page_delay_ms: u64,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Send the broad price/area filters with every request
    #[arg(long)]
    full_params: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> CrawlConfig {
        CrawlConfig {
            base_url: self.base_url,
            search: SearchParams {
                complex_no: self.complex_no,
                trade_type: self.trade_type,
                full_filters: self.full_params,
                ..SearchParams::default()
            },
            complex_label: self.complex_label,
            data_folder: self.data_folder,
            first_page: self.first_page,
            last_page: self.last_page,
            max_retries: self.max_retries,
            retry_delay: Duration::from_secs(self.retry_delay_secs),
            request_timeout: Duration::from_secs(self.timeout_secs),
            page_delay: Duration::from_millis(self.page_delay_ms),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let default = if quiet {
        "error"
    } else {
        match verbose {
            0 => "land_scout=info,warn",
            1 => "land_scout=debug,info",
            _ => "trace",
        }
    };

    // RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let config = cli.into_config();
    config.validate().context("Invalid crawl configuration")?;

    info!("🏠 Land Scout - {} listings", config.search.trade_type.label());
    info!(
        "Complex {} ({}), pages {}..={}",
        config.search.complex_no, config.complex_label, config.first_page, config.last_page
    );

    let credentials = EnvCredentials
        .credentials()
        .context("Failed to load credentials")?;
    let fetcher = LandApiFetcher::new(&config, &credentials)?;

    let run_date = Local::now().date_naive();
    let report = crawl_to_snapshot(fetcher, &config, run_date)
        .await
        .context("Failed to save snapshot")?;

    match &report.output {
        Some(path) => info!(
            "✅ Saved {} listings to {} ({} pages ok, {} failed)",
            report.listings,
            path.display(),
            report.pages_succeeded,
            report.pages_failed
        ),
        None => {
            error!(
                "❌ All {} pages failed, no snapshot written",
                report.pages_failed
            );
            bail!("no page of the requested range succeeded");
        }
    }

    Ok(())
}
