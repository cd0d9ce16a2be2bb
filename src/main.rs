use ai_llm_service::telemetry;
use api::core::config::AppConfig;
use tracing::{Level, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` is optional: deployed environments inject variables directly.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    telemetry::init(Level::INFO)?;

    let config = AppConfig::from_env()?;
    info!(
        address = %config.api_address,
        mode = ?config.mode,
        live = config.is_live(),
        "starting mission-ai-backend"
    );

    api::start(config).await?;

    Ok(())
}
