use crate::config::Config;
use crate::error::{Error, PlanResult};
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
///
/// `RUST_LOG` wins over the configured filter. Installing a second global
/// subscriber is reported as an error.
pub fn init_logging(config: &Config) -> PlanResult<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config, logging failures before returning them
pub fn load_config() -> PlanResult<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e)
        }
    }
}
