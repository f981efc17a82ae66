use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use daylight_gal::cache::DailyCache;
use daylight_gal::catalog::Catalog;
use daylight_gal::config::{self, SiteConfig};
use daylight_gal::imaging::RustBackend;
use daylight_gal::schedule::RotationSchedule;
use daylight_gal::viewer::{TracingHost, Viewer, ViewerEvent};
use daylight_gal::{generate, output};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "daylight-gal")]
#[command(about = "Daily hero rotation and image viewer tooling for a photo site")]
#[command(long_about = "\
Daily hero rotation and image viewer tooling for a photo site

The catalog is either a TOML file with [[images]] entries or a directory
of images. In a directory, subdirectories become categories and images are
ordered by numeric prefix:

  photos/
  ├── config.toml              # Site config (optional)
  ├── 010-Campus/
  │   ├── 001-Main-Hall.jpg    # alt \"Main Hall\", category \"Campus\"
  │   └── 002-Library.jpg
  └── 020-Sports-Day/
      └── 010-Relay.jpg

Every day shows the next bucket of images_per_day images. The bucket is
(days since reference_date + day_offset) mod number of buckets, so every
visitor sees the same set and each image appears once per cycle.

Run 'daylight-gal gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Catalog file (TOML) or image directory
    #[arg(long, default_value = "catalog.toml", global = true)]
    catalog: PathBuf,

    /// Config file (defaults to config.toml next to the catalog)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the images selected for a day
    Today {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print the selection as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the selection for a run of days
    Calendar {
        /// First day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Number of days
        #[arg(long, default_value_t = 14)]
        days: usize,
    },
    /// Validate the catalog and report rotation coverage
    Check,
    /// Feed a JSON array of viewer events through the viewer
    Replay {
        /// Path to the events file
        events: PathBuf,
    },
    /// Render a static hero preview page for a day
    Preview {
        /// Day to render (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output directory
        #[arg(long, default_value = "preview")]
        output: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        catalog: catalog_path,
        config: config_path,
        command,
    } = Cli::parse();
    let load_site_config = || site_config_for(&catalog_path, config_path.as_deref());

    match command {
        Command::Today { date, json } => {
            let site_config = load_site_config()?;
            let catalog = load_catalog(&catalog_path, &site_config)?;
            let schedule = RotationSchedule::from_config(&site_config.rotation)?;
            let date = date.unwrap_or_else(today);
            let set = schedule.images_for(&catalog, date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&set)?);
            } else {
                output::print_daily_set(date, &set);
            }
        }
        Command::Calendar { from, days } => {
            let site_config = load_site_config()?;
            let catalog = load_catalog(&catalog_path, &site_config)?;
            let schedule = RotationSchedule::from_config(&site_config.rotation)?;
            let from = from.unwrap_or_else(today);
            let mut cache = DailyCache::new(schedule);
            let mut listing = Vec::with_capacity(days);
            for date in from.iter_days().take(days) {
                listing.push((date, cache.images_for(&catalog, date)?));
            }
            output::print_calendar(&listing);
            info!(stats = %cache.stats(), "calendar computed");
        }
        Command::Check => {
            let site_config = load_site_config()?;
            println!("==> Checking {}", catalog_path.display());
            let catalog = load_catalog(&catalog_path, &site_config)?;
            let schedule = RotationSchedule::from_config(&site_config.rotation)?;
            let total_days = schedule.total_days(catalog.len())?;
            let unshown = schedule.unshown_images(&catalog)?;
            output::print_check(&catalog, schedule.images_per_day(), total_days, &unshown);
            println!("==> Catalog is valid");
        }
        Command::Replay { events } => {
            let site_config = load_site_config()?;
            let content = std::fs::read_to_string(&events)?;
            let events: Vec<ViewerEvent> = serde_json::from_str(&content)?;
            let mut viewer = Viewer::new(TracingHost::default(), site_config.viewer.clone());
            for (i, event) in events.iter().enumerate() {
                viewer.dispatch(event);
                println!(
                    "{}",
                    output::format_replay_step(
                        i + 1,
                        event,
                        viewer.transform(),
                        viewer.load_state()
                    )
                );
            }
            println!("Viewer closed {} time(s)", viewer.host().closed);
        }
        Command::Preview { date, output } => {
            let site_config = load_site_config()?;
            let catalog = load_catalog(&catalog_path, &site_config)?;
            let schedule = RotationSchedule::from_config(&site_config.rotation)?;
            let date = date.unwrap_or_else(today);
            let set = schedule.images_for(&catalog, date)?;
            let path = generate::write_preview(&set, &site_config, date, &output)?;
            println!("==> Preview written: {}", path.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Explicit `--config`, otherwise `config.toml` beside the catalog.
fn site_config_for(
    catalog: &Path,
    config_path: Option<&Path>,
) -> Result<SiteConfig, config::ConfigError> {
    match config_path {
        Some(path) => config::load_config_file(path),
        None if catalog.is_dir() => config::load_config(catalog),
        None => config::load_config(catalog.parent().unwrap_or(Path::new("."))),
    }
}

fn load_catalog(
    path: &Path,
    site_config: &SiteConfig,
) -> Result<Catalog, daylight_gal::catalog::CatalogError> {
    init_thread_pool(&site_config.processing);
    Catalog::load(path, &RustBackend::new())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
