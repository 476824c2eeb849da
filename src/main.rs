//! VA Dashboard CLI
//!
//! Command-line front end for the dashboard view model:
//! - Print headline numbers and cause-of-death counts
//! - Print the choropleth colors per region
//! - Inspect breakpoints and date filters offline
//! - Generate a config file

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use va_dashboard::api::DashboardClient;
use va_dashboard::config::{generate_default_config, Config, LoggingConfig};
use va_dashboard::filters::{parse_date, DashboardQuery, DateRangeResolver, DateRangeSelection};
use va_dashboard::geo::{Boundaries, BorderType};
use va_dashboard::scale::{compute_breakpoints, BoundaryMode, ColorScale};
use va_dashboard::view::{
    Dashboard, DashboardState, RenderSurface, TextSurface, ViewError, ViewModel, ViewResult,
    Viewport,
};

#[derive(Parser)]
#[command(name = "va-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verbal autopsy analytics dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dashboard API endpoint, overrides the config file
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and print headline numbers and cause-of-death counts
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Fetch and print the choropleth color of every region
    Map {
        #[command(flatten)]
        filters: FilterArgs,
        /// Border level (Province, District)
        #[arg(short, long)]
        border: Option<String>,
        /// GeoJSON boundary file or URL, overrides the config file
        #[arg(short, long)]
        geojson: Option<String>,
        /// Boundary mode (exclusive, inclusive-lower)
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Print breakpoints and legend for a set of region counts
    Breakpoints {
        /// Region counts
        #[arg(required = true)]
        counts: Vec<u64>,
        /// Boundary mode (exclusive, inclusive-lower)
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Print the date range a death-date selection resolves to
    Dates {
        /// Selection label, e.g. "Within 3 months"
        label: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Dashboard filter flags shared by the fetching commands
#[derive(Args)]
pub struct FilterArgs {
    /// Death-date selection ("Any Time", "Within 1 Month", "Within 3 months", "Within 1 year", "Custom")
    #[arg(short, long, default_value = "Any Time")]
    pub date: String,
    /// Custom start date, used with --date Custom
    #[arg(long)]
    pub start: Option<String>,
    /// Custom end date, used with --date Custom
    #[arg(long)]
    pub end: Option<String>,
    /// Cause of death (default: all)
    #[arg(long)]
    pub cause: Option<String>,
    /// Reference date for relative selections (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub today: Option<String>,
}

impl FilterArgs {
    fn query(&self) -> anyhow::Result<DashboardQuery> {
        let selection: DateRangeSelection = self.date.parse()?;
        Ok(DashboardQuery::new()
            .date_selection(selection)
            .custom_range(
                self.start.clone().unwrap_or_default(),
                self.end.clone().unwrap_or_default(),
            )
            .cause(self.cause.clone().unwrap_or_default()))
    }

    fn today(&self) -> anyhow::Result<NaiveDate> {
        resolve_today(self.today.as_deref())
    }
}

/// Prints each frame as pretty JSON
struct JsonSurface;

impl RenderSurface for JsonSurface {
    fn render(&mut self, view: &ViewModel) -> ViewResult<()> {
        let json =
            serde_json::to_string_pretty(view).map_err(|e| ViewError::Render(e.to_string()))?;
        println!("{}", json);
        Ok(())
    }

    fn resize(&mut self, _viewport: Viewport) -> ViewResult<()> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(endpoint) = &cli.endpoint {
        config.api.endpoint = endpoint.clone();
    }

    init_logging(&config.logging);
    tracing::debug!("VA Dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        endpoint = %config.api.endpoint,
        boundary_mode = %config.map.boundary_mode,
        "Configuration resolved"
    );

    match cli.command {
        Commands::Summary { filters } => {
            let client = DashboardClient::new(config.api.client_config())?;
            let state = DashboardState {
                query: filters.query()?,
                ..Default::default()
            };
            let today = filters.today()?;

            match cli.format.as_str() {
                "json" => {
                    run_dashboard(client, JsonSurface, state, today, BoundaryMode::default())
                        .await?
                }
                _ => {
                    let surface = TextSurface::new(std::io::stdout());
                    run_dashboard(client, surface, state, today, BoundaryMode::default()).await?
                }
            }
        }

        Commands::Map {
            filters,
            border,
            geojson,
            mode,
        } => {
            let client = DashboardClient::new(config.api.client_config())?;

            let border: BorderType = match border {
                Some(b) => b.parse()?,
                None => config.map.border,
            };
            let mode: BoundaryMode = match mode {
                Some(m) => m.parse()?,
                None => config.map.boundary_mode,
            };
            let source = geojson.unwrap_or_else(|| config.map.geojson.clone());
            let boundaries = load_boundaries(&client, &source).await?;

            let state = DashboardState {
                query: filters.query()?,
                border,
                boundaries: Some(boundaries.into()),
                ..Default::default()
            };
            let today = filters.today()?;

            match cli.format.as_str() {
                "json" => run_dashboard(client, JsonSurface, state, today, mode).await?,
                _ => {
                    let surface = TextSurface::new(std::io::stdout());
                    run_dashboard(client, surface, state, today, mode).await?
                }
            }
        }

        Commands::Breakpoints { counts, mode } => {
            let mode: BoundaryMode = match mode {
                Some(m) => m.parse()?,
                None => config.map.boundary_mode,
            };
            let scale = ColorScale::default();
            let breakpoints = compute_breakpoints(&counts)?;

            if cli.format == "json" {
                let body = serde_json::json!({
                    "breakpoints": breakpoints.values(),
                    "legend": breakpoints.legend(&scale),
                    "counts": counts
                        .iter()
                        .map(|c| serde_json::json!({
                            "count": c,
                            "color": breakpoints.fill_for(*c, &scale, mode).color(),
                        }))
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("Breakpoints ({}):", mode);
                for entry in breakpoints.legend(&scale) {
                    println!("  {:>10.1} - {:<10.1} {}", entry.lower, entry.upper, entry.color);
                }
                println!();
                println!("{:<10} {}", "Count", "Color");
                println!("{}", "-".repeat(20));
                for count in &counts {
                    println!(
                        "{:<10} {}",
                        count,
                        breakpoints.fill_for(*count, &scale, mode).color()
                    );
                }
            }
        }

        Commands::Dates {
            label,
            start,
            end,
            today,
        } => {
            let today = resolve_today(today.as_deref())?;
            let range =
                DateRangeResolver::resolve_label(&label, today, start.as_deref(), end.as_deref())?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&range)?);
            } else {
                println!("start_date: {}", display_bound(&range.start_date));
                println!("end_date:   {}", display_bound(&range.end_date));
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("va_dashboard={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_dashboard<R: RenderSurface>(
    client: DashboardClient,
    surface: R,
    state: DashboardState,
    today: NaiveDate,
    mode: BoundaryMode,
) -> anyhow::Result<()> {
    let endpoint = client.config().endpoint.clone();
    let mut dashboard = Dashboard::new(client, surface)
        .with_state(state)
        .today(today)
        .boundary_mode(mode);

    dashboard
        .start(None)
        .await
        .with_context(|| format!("Cannot load dashboard data from {}", endpoint))
}

async fn load_boundaries(client: &DashboardClient, source: &str) -> anyhow::Result<Boundaries> {
    if source.starts_with("http://") || source.starts_with("https://") {
        client
            .fetch_boundaries(source)
            .await
            .with_context(|| format!("Cannot fetch boundaries from {}", source))
    } else {
        Ok(Boundaries::load(Path::new(source))?)
    }
}

fn resolve_today(today: Option<&str>) -> anyhow::Result<NaiveDate> {
    match today {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(Utc::now().date_naive()),
    }
}

fn display_bound(bound: &str) -> &str {
    if bound.is_empty() {
        "(none)"
    } else {
        bound
    }
}
