//! Flood Guard command-line front-end
//!
//! Reads and writes the same history and volunteer slots as the browser
//! dashboard, stored as JSON files in a local data directory.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use floodguard_core::storage::FileStore;
use floodguard_core::{Config, HistoryLedger, VolunteerRegistry};
use shared::{classify, predict_flood_risk, PredictionInput, Volunteer, WeatherReading};

#[derive(Parser)]
#[command(name = "floodguard")]
#[command(about = "Flood Guard - flood risk and event history tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a weather reading into a dashboard risk level
    Classify {
        /// Rainfall in millimeters
        #[arg(long, default_value_t = 0.0)]
        rain: f64,
        /// Relative humidity in percent
        #[arg(long, default_value_t = 0.0)]
        humidity: f64,
    },
    /// Run the composite flood prediction
    Predict {
        #[arg(long, default_value_t = 0.0)]
        rain: f64,
        #[arg(long, default_value_t = 0.0)]
        humidity: f64,
        /// Temperature in °C
        #[arg(long, default_value_t = shared::DEFAULT_TEMPERATURE_C)]
        temperature: f64,
    },
    /// Inspect or edit the event history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Inspect or edit the volunteer list
    Volunteers {
        #[command(subcommand)]
        action: VolunteerAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Print entries, newest first
    List {
        /// Only entries with this category tag
        #[arg(long)]
        category: Option<String>,
    },
    /// Record an entry
    Add { category: String, message: String },
    /// Remove every entry
    Clear,
}

#[derive(Subcommand)]
enum VolunteerAction {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        area: String,
        #[arg(long)]
        phone: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floodguard=info,floodguard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    tracing::debug!("Environment: {}", config.environment);

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { rain, humidity } => {
            let (level, color) = classify(&WeatherReading::new(rain, humidity));
            println!("{} ({})", level, color);
        }
        Commands::Predict {
            rain,
            humidity,
            temperature,
        } => {
            let prediction = predict_flood_risk(&PredictionInput {
                rainfall_mm_24h: rain,
                humidity,
                temperature_c: temperature,
            });
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        }
        Commands::History { action } => run_history(&config, action)?,
        Commands::Volunteers { action } => run_volunteers(&config, action)?,
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<FileStore> {
    Ok(FileStore::open(&config.storage.data_dir)?)
}

fn run_history(config: &Config, action: HistoryAction) -> Result<()> {
    let ledger = HistoryLedger::new(open_store(config)?, config.history.clone())
        .with_key(config.storage.history_key.clone());

    match action {
        HistoryAction::List { category } => {
            let entries = match category {
                Some(category) => ledger.list_by_category(&category),
                None => ledger.list(),
            };
            if entries.is_empty() {
                println!("No history yet.");
            }
            for entry in entries {
                println!("{}\n", entry);
            }
        }
        HistoryAction::Add { category, message } => {
            let appended = ledger.append(category, message);
            if let Some(warning) = appended.warning() {
                eprintln!("warning: {}", warning);
            }
            println!("{}", appended.entry);
        }
        HistoryAction::Clear => {
            if let Some(warning) = ledger.clear().warning() {
                eprintln!("warning: {}", warning);
            }
            println!("History cleared.");
        }
    }

    Ok(())
}

fn run_volunteers(config: &Config, action: VolunteerAction) -> Result<()> {
    let registry = VolunteerRegistry::new(open_store(config)?)
        .with_key(config.storage.volunteers_key.clone());

    match action {
        VolunteerAction::List => {
            let volunteers = registry.list()?;
            if volunteers.is_empty() {
                println!("No volunteers yet.");
            }
            for v in volunteers {
                println!("{} ({}) - {}", v.name, v.area, v.phone);
            }
        }
        VolunteerAction::Add { name, area, phone } => {
            let volunteers = registry.add(Volunteer::new(&name, &area, &phone))?;
            println!("Volunteer added. {} registered.", volunteers.len());
        }
    }

    Ok(())
}
