use clap::{Parser, Subcommand};
use siting_core::{select_warehouse, AppConfig, Catalog, Criterion};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "siting-cli")]
#[command(about = "Warehouse siting command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List stores from the reference data
    Stores {
        /// Only stores in this city
        #[arg(long)]
        city: Option<String>,
    },
    /// List warehouses from the reference data
    Warehouses {
        /// Only warehouses in this city
        #[arg(long)]
        city: Option<String>,
    },
    /// Pick the best warehouse for a set of stores
    Select {
        /// Comma-separated store ids (e.g. 1,2,3)
        #[arg(long, value_delimiter = ',', required = true)]
        stores: Vec<i64>,
        /// One of cost, distance, both, capacity
        #[arg(long, default_value = "distance")]
        criterion: String,
    },
    /// Fetch current weather for a coordinate
    Weather {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = siting_core::load_cli_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, "running command");
    let output = run(cli.command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Executes one subcommand and returns the JSON it prints.
///
/// Any error propagates out of `main`, so the process exits non-zero.
async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<serde_json::Value> {
    match command {
        Commands::Stores { city } => {
            let catalog = load(config)?;
            let stores: Vec<_> = match city.as_deref() {
                Some(city) => catalog.stores_in_city(city).collect(),
                None => catalog.stores().iter().collect(),
            };
            Ok(serde_json::to_value(stores)?)
        }
        Commands::Warehouses { city } => {
            let catalog = load(config)?;
            let warehouses: Vec<_> = match city.as_deref() {
                Some(city) => catalog.warehouses_in_city(city).collect(),
                None => catalog.warehouses().iter().collect(),
            };
            Ok(serde_json::to_value(warehouses)?)
        }
        Commands::Select { stores, criterion } => {
            let criterion: Criterion = criterion.parse()?;
            let catalog = load(config)?;
            let selection = select_warehouse(&catalog, &stores, criterion)?;
            Ok(serde_json::to_value(selection)?)
        }
        Commands::Weather { lat, lon } => {
            let Some(key) = config.weather_api_key.as_deref() else {
                anyhow::bail!("OPENWEATHER_API_KEY must be set to look up weather");
            };
            let client = siting_weather::WeatherClient::with_base_url(
                key,
                config.weather_timeout_secs,
                &config.weather_base_url,
            )?;
            let report = client.current(lat, lon).await?;
            Ok(serde_json::to_value(report)?)
        }
    }
}

fn load(config: &AppConfig) -> anyhow::Result<Catalog> {
    Ok(siting_core::load_catalog(
        &config.stores_path,
        &config.warehouses_path,
    )?)
}
