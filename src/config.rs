use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Epiward";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Persons this old or older are in the risk group.
pub const AT_RISK_AGE: u16 = 60;

/// Database file name inside the data directory
pub const DATABASE_FILE: &str = "epiward.db";

/// Get the application data directory
/// Platform data dir (e.g. ~/.local/share/epiward), or ./epiward when unknown
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("epiward")
}

/// Default location of the census database
pub fn database_path() -> PathBuf {
    app_data_dir().join(DATABASE_FILE)
}

/// Log filter used when `RUST_LOG` is unset
pub fn default_log_filter() -> &'static str {
    "epiward=info,epiward_lib=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_path_under_app_data() {
        let path = database_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with(DATABASE_FILE));
    }

    #[test]
    fn app_data_dir_is_named_after_app() {
        assert!(app_data_dir().ends_with("epiward"));
    }

    #[test]
    fn app_name_is_epiward() {
        assert_eq!(APP_NAME, "Epiward");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn risk_group_starts_at_sixty() {
        assert_eq!(AT_RISK_AGE, 60);
    }
}
