mod geo;
mod map;
mod render;
mod session;
mod shell;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::geo::Geolocation;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "tiim")]
#[command(about = "FASO TiiM Roogo: medicine search, ordering and pharmacy map")]
struct Cli {
    #[command(flatten)]
    position: Position,
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Position supplied by the user instead of a device lookup. Both halves are
/// needed; a lone latitude or longitude counts as no position.
#[derive(Debug, Args)]
struct Position {
    /// Latitude in decimal degrees
    #[arg(
        long = "lat",
        env = "TIIM_LATITUDE",
        global = true,
        allow_hyphen_values = true
    )]
    latitude: Option<f64>,
    /// Longitude in decimal degrees
    #[arg(
        long = "lng",
        env = "TIIM_LONGITUDE",
        global = true,
        allow_hyphen_values = true
    )]
    longitude: Option<f64>,
}

impl Position {
    fn geolocation(&self) -> Geolocation {
        Geolocation::from_args(self.latitude, self.longitude)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List pharmacies and show them on the map
    Pharmacies {
        /// City to filter on (defaults to TIIM_DEFAULT_CITY)
        #[arg(long)]
        city: Option<String>,
    },
    /// Search medicines by name, DCI or barcode
    Search {
        /// Name or DCI
        #[arg(long, short)]
        query: Option<String>,
        /// EAN barcode
        #[arg(long, short)]
        barcode: Option<String>,
    },
    /// Interactive search, cart and checkout
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = tiim_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = tiim_client::ApiClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build API client: {e}"))?;
    tracing::debug!(
        backend = %client.base_url(),
        env = %config.env,
        "api client ready"
    );

    let geo = cli.position.geolocation();
    match cli.command {
        Some(Commands::Pharmacies { city }) => {
            let city = city.as_deref().unwrap_or(&config.default_city);
            let view = map::mount(&client, &geo, Some(city)).await;
            println!("{}", render::map(&view));
        }
        Some(Commands::Search { query, barcode }) => {
            let mut session = Session::new(client);
            session.mount(&geo).await;
            session.search(query.as_deref(), barcode.as_deref()).await;
            println!(
                "{}",
                render::search_outcome(session.message(), session.search_panel())
            );
        }
        Some(Commands::Shell) | None => {
            run_shell(client, geo, &config.default_city).await?;
        }
    }

    Ok(())
}

async fn run_shell(
    client: tiim_client::ApiClient,
    geo: Geolocation,
    default_city: &str,
) -> anyhow::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    shell::run(Session::new(client), geo, default_city, stdin).await
}
