use crate::app;
use crate::config::AppConfig;

pub async fn handle() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    tracing::info!("Starting Landing API in {:?} mode", config.environment);

    let state = app::build_state(config).await?;
    app::serve(state).await
}
