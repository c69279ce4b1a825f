//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Environment variable prefix, e.g. `FINLEDGER__DATABASE__URL`.
pub const ENV_PREFIX: &str = "FINLEDGER";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Reporting configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://financeiro.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    1 // SQLite serializes writers anyway
}

fn default_min_connections() -> u32 {
    1
}

/// Reporting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Absolute tolerance for reconciliation checks.
    #[serde(default = "default_tolerance")]
    pub reconciliation_tolerance: Decimal,
    /// Suppliers always left out of expense totals.
    #[serde(default)]
    pub excluded_suppliers: Vec<String>,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            reconciliation_tolerance: default_tolerance(),
            excluded_suppliers: Vec::new(),
        }
    }
}

fn default_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("reporting.excluded_suppliers"),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(
            [
                "FINLEDGER__DATABASE__URL",
                "FINLEDGER__REPORTING__RECONCILIATION_TOLERANCE",
                "FINLEDGER__REPORTING__EXCLUDED_SUPPLIERS",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "sqlite://financeiro.db?mode=rwc");
                assert_eq!(config.database.max_connections, 1);
                assert_eq!(config.reporting.reconciliation_tolerance, dec!(0.01));
                assert!(config.reporting.excluded_suppliers.is_empty());
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("FINLEDGER__DATABASE__URL", Some("sqlite://backup.db")),
                ("FINLEDGER__DATABASE__MAX_CONNECTIONS", Some("4")),
                (
                    "FINLEDGER__REPORTING__EXCLUDED_SUPPLIERS",
                    Some("REIS TRANSPORTES,OUTRO FORNECEDOR"),
                ),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "sqlite://backup.db");
                assert_eq!(config.database.max_connections, 4);
                assert_eq!(
                    config.reporting.excluded_suppliers,
                    vec!["REIS TRANSPORTES".to_string(), "OUTRO FORNECEDOR".to_string()]
                );
            },
        );
    }
}
