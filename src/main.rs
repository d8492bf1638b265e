use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tenki_core::{AppError, Config};
use tenki_forecast::{
    find_area, list_regions, AreaCode, ForecastEntry, ForecastError, ForecastRecord,
    ForecastService,
};

const ABOUT: &str = "JMA regional weather forecasts with a local SQLite cache";

#[derive(Parser, Debug)]
#[command(version, about = ABOUT)]
struct Args {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the cache database path
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List regions and their area codes
    Regions,
    /// Fetch, cache and show the forecast for an area
    Forecast {
        /// Area code, e.g. 130000 for Tokyo
        area_code: String,
    },
    /// Show the cached forecast for an area without fetching
    Cached { area_code: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = tenki_core::init() {
        return fail(AppError::Other(e));
    }
    let args = Args::parse();

    if let Command::Regions = args.command {
        print_regions();
        return ExitCode::SUCCESS;
    }

    let mut config = match Config::load_validated(args.config.as_deref()) {
        Ok((config, _)) => config,
        Err(e) => return fail(AppError::from_config_failure(e)),
    };
    if let Some(db) = args.db {
        config.storage.database_path = db;
    }

    match run(&config, &args.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => fail(AppError::from(e)),
    }
}

fn fail(err: AppError) -> ExitCode {
    tracing::error!("{}", err);
    eprintln!("{}", err.user_message());
    ExitCode::FAILURE
}

/// Returns whether any forecast entries were shown.
async fn run(config: &Config, command: &Command) -> Result<bool, ForecastError> {
    let service = ForecastService::from_config(config).await?;

    let (code, records) = match command {
        Command::Forecast { area_code } => {
            let code = AreaCode::from(area_code.as_str());
            let name = area_name(&code);
            println!("{}の天気予報", name);
            let records = service.get_forecast(&code, &name).await?;
            (code, records)
        }
        Command::Cached { area_code } => {
            let code = AreaCode::from(area_code.as_str());
            println!("{}の天気予報 (cache)", area_name(&code));
            let records = service.cached(&code).await?;
            (code, records)
        }
        Command::Regions => return Ok(true),
    };

    tracing::debug!("Rendering {} records for {}", records.len(), code);
    Ok(print_forecast(&records))
}

fn area_name(code: &AreaCode) -> String {
    match find_area(code.as_str()) {
        Some((_, area)) => area.name.to_string(),
        None => {
            tracing::warn!("Area {} is not in the catalog", code);
            code.to_string()
        }
    }
}

fn print_regions() {
    for region in list_regions() {
        println!("{}", region.label);
        for area in region.areas {
            println!("  {}  {}", area.code, area.name);
        }
    }
}

fn print_forecast(records: &[ForecastRecord]) -> bool {
    if records.is_empty() {
        eprintln!("読み込み失敗: no forecast available");
        return false;
    }

    for entry in records.iter().map(ForecastEntry::from) {
        println!(
            "{}  {} {:<7}  {}  {}°C / {}°C",
            entry.date,
            entry.icon.glyph(),
            entry.icon.name(),
            entry.weather,
            entry.temp_min,
            entry.temp_max
        );
    }
    true
}
