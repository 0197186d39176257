use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;
use waypost_config::AppConfig;
use waypost_database::initialize_database;
use waypost_opaque_id::{OpaqueIdCodec, OpaqueIdConfig};

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub opaque_id_codec: OpaqueIdCodec,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database).await?;

        // Codec misconfiguration aborts startup; it must never surface as
        // a per-request failure.
        let codec_config = OpaqueIdConfig::with_alphabet(
            config.opaque_id.salt.clone(),
            config.opaque_id.min_length,
            config.opaque_id.alphabet.clone(),
        );
        let opaque_id_codec =
            OpaqueIdCodec::new(&codec_config).context("invalid opaque-id configuration")?;

        info!(
            min_length = config.opaque_id.min_length,
            "opaque-id codec ready"
        );

        Ok(Self {
            db_pool,
            opaque_id_codec,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
