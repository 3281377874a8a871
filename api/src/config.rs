//! Layered configuration loading
//!
//! Sources, later ones winning:
//! 1. Built-in defaults for the detected environment (`AppConfig::for_environment`)
//! 2. `config/<environment>.toml`, if present
//! 3. `ROTAKEY__<SECTION>__<KEY>` environment variables,
//!    e.g. `ROTAKEY__AUTH__JWT__SECRET` or `ROTAKEY__DATABASE__BACKEND=memory`

use config::{ConfigError, File};
use rk_shared::{AppConfig, Environment};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "ROTAKEY";

/// Separator between the prefix and nested keys
pub const ENV_SEPARATOR: &str = "__";

/// Load the application configuration for the environment named by
/// `ENVIRONMENT` (or `RUST_ENV`)
pub fn load() -> Result<AppConfig, ConfigError> {
    load_for(Environment::from_env())
}

/// Load the application configuration for a given environment
pub fn load_for(environment: Environment) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::for_environment(environment);

    let settings = config::Config::builder()
        .add_source(config::Config::try_from(&defaults)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    tracing::debug!(environment = %config.environment, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_shared::StoreBackend;

    #[test]
    fn test_load_development_defaults() {
        let config = load_for(Environment::Development).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database.backend, StoreBackend::Memory);
        assert_eq!(config.auth.jwt.access_token_expiry, 900);
        assert_eq!(config.auth.jwt.refresh_token_expiry, 604_800);
    }

    #[test]
    fn test_production_defaults_fail_validation() {
        let config = load_for(Environment::Production).unwrap();
        assert!(config.environment.is_production());
        assert!(config.validate().is_err());
    }
}
