use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use weatherq_core::Coordinates;
use weatherq_dashboard::{
    Dashboard, Geolocation, HttpWeatherApi, JsonFileStore, Page, Surface, TextSurface,
};

#[derive(Debug, Parser)]
#[command(name = "weatherq")]
#[command(about = "Terminal weather dashboard backed by a weatherq server")]
struct Cli {
    /// Base URL of the weatherq server
    #[arg(long, env = "WEATHERQ_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server_url: String,

    /// JSON file holding saved cities and display preferences
    #[arg(long, env = "WEATHERQ_STATE_PATH", default_value = "weatherq_state.json")]
    state_path: PathBuf,

    /// HTTP timeout for weather lookups, in seconds
    #[arg(long, env = "WEATHERQ_REQUEST_TIMEOUT_SECS", default_value = "10")]
    timeout_secs: u64,

    /// Latitude of the current location
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the current location
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Behave as if the user refused to share their location
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    deny_location: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn geolocation(&self) -> Geolocation {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Geolocation::Granted(Coordinates { lat, lon }),
            _ if self.deny_location => Geolocation::Denied,
            _ => Geolocation::Unavailable,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show weather cards for the current location and saved cities
    Show {
        /// Card to expand, counting from 0
        #[arg(long)]
        card: Option<usize>,
    },
    /// List saved cities
    List,
    /// Search for a city, show it and save it
    Add { city: String },
    /// Remove a city from the saved list
    Remove { city: String },
    /// Switch between Celsius and Fahrenheit
    Unit,
    /// Switch between light and dark theme
    Theme,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let storage = JsonFileStore::open(&cli.state_path)
        .with_context(|| format!("failed to open state file {}", cli.state_path.display()))?;
    let api = HttpWeatherApi::new(&cli.server_url, cli.timeout_secs)
        .context("failed to build weather client")?;
    let mut surface = TextSurface::new(std::io::stdout());

    let geolocation = cli.geolocation();
    let command = cli.command.unwrap_or(Commands::Show { card: None });
    tracing::debug!(
        server_url = %cli.server_url,
        state_path = %cli.state_path.display(),
        ?geolocation,
        ?command,
        "running command"
    );

    match command {
        Commands::Show { card } => {
            let mut dashboard = Dashboard::new(api, storage, Page::Main);
            dashboard.load(geolocation).await;
            if let Some(index) = card {
                if !dashboard.select_card(index) {
                    surface.notify(&format!(
                        "no card {index}; {} available",
                        dashboard.store().len()
                    ))?;
                }
            }
            dashboard.render(&mut surface)?;
        }
        Commands::List => {
            let mut dashboard = Dashboard::new(api, storage, Page::Add);
            dashboard.load(geolocation).await;
            dashboard.render(&mut surface)?;
        }
        Commands::Add { city } => {
            let mut dashboard = Dashboard::new(api, storage, Page::Add);
            dashboard.load(geolocation).await;
            dashboard.add_city(&city).await;
            dashboard.render(&mut surface)?;
        }
        Commands::Remove { city } => {
            let mut dashboard = Dashboard::new(api, storage, Page::Add);
            dashboard.load(geolocation).await;
            if !dashboard.remove_city(&city) && dashboard.notices().is_empty() {
                surface.notify(&format!("{city} is not saved"))?;
            }
            dashboard.render(&mut surface)?;
        }
        Commands::Unit => {
            let mut dashboard = Dashboard::new(api, storage, Page::Main);
            if dashboard.toggle_unit() {
                println!("unit: {}", dashboard.preferences().unit.symbol());
            }
            for notice in dashboard.take_notices() {
                surface.notify(&notice)?;
            }
        }
        Commands::Theme => {
            let mut dashboard = Dashboard::new(api, storage, Page::Main);
            if dashboard.toggle_theme() {
                let theme = if dashboard.preferences().theme.is_dark() { "dark" } else { "light" };
                println!("theme: {theme}");
            }
            for notice in dashboard.take_notices() {
                surface.notify(&notice)?;
            }
        }
    }

    Ok(())
}
