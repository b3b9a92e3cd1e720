pub mod census;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod seed;

use std::path::PathBuf;

use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

use error::AppError;

/// Where the binary keeps its data.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage {
    Memory,
    File(PathBuf),
}

impl Storage {
    /// `:memory:` selects an in-memory store; any other argument is a path.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some(":memory:") => Self::Memory,
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::File(config::database_path()),
        }
    }
}

fn open_storage(storage: &Storage) -> Result<Connection, AppError> {
    match storage {
        Storage::Memory => Ok(db::open_memory_database()?),
        Storage::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Ok(db::open_database(path)?)
        }
    }
}

/// Open the store, seed the demo census when empty and render the report as JSON.
pub fn census_json(storage: &Storage) -> Result<String, AppError> {
    let conn = open_storage(storage)?;
    if seed::is_empty(&conn)? {
        seed::seed_demo(&conn)?;
    }
    let report = census::build_report(&conn)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn run() -> Result<(), AppError> {
    // Initialize tracing; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let arg = std::env::args().nth(1);
    let storage = Storage::from_arg(arg.as_deref());
    tracing::info!(?storage, "Opening census store");

    println!("{}", census_json(&storage)?);
    Ok(())
}
