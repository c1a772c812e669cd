use landing_api_rust::{app, cli, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_SECRET, etc.
    let _ = dotenvy::dotenv();
    cli::init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting Landing API in {:?} mode", config.environment);

    let state = app::build_state(config).await?;
    app::serve(state).await
}
