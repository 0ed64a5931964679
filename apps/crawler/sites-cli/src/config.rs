use core_config::{ConfigError, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration, loaded once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb: MongoConfig,
    pub environment: Environment,
}

impl Config {
    /// Fails when `MONGODB_URI` is missing, before anything connects
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;

        Ok(Self {
            mongodb,
            environment,
        })
    }

    /// Development rebuilds share one client through the process-wide registry
    pub fn reuse_across_reloads(&self) -> bool {
        self.environment.is_development()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_connection_string() {
        temp_env::with_vars_unset(["MONGODB_URI", "APP_ENV"], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("MONGODB_URI"));
        });
    }

    #[test]
    fn test_config_development_reuses_connection() {
        temp_env::with_vars(
            [
                ("MONGODB_URI", Some("mongodb://localhost:27017")),
                ("APP_ENV", Some("development")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.environment, Environment::Development);
                assert!(config.reuse_across_reloads());
            },
        );
    }

    #[test]
    fn test_config_production_owns_connection() {
        temp_env::with_vars(
            [
                ("MONGODB_URI", Some("mongodb://localhost:27017")),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.environment, Environment::Production);
                assert!(!config.reuse_across_reloads());
            },
        );
    }
}
