use anyhow::Context;

mod app;
mod auth;
mod config;
mod db;
mod error;
mod pages;
mod songs;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "moodtunes=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = config::AppConfig::from_env()?;
    let addr = config.listen_addr()?;
    let app_state = state::AppState::init(config).await?;

    db::init_schema(&app_state.db)
        .await
        .context("initialise schema")?;
    let seeded = db::seed_if_empty(&app_state.db)
        .await
        .context("seed song catalog")?;
    tracing::info!(seeded, "database ready");

    let app = app::build_app(app_state.clone());
    app::serve(app, addr).await?;

    app_state.db.close().await;
    Ok(())
}
