use std::str::FromStr;

use anyhow::Context;
use codewiz::{AppConfig, Codewiz, LogConfig};
use tracing::Level;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("codewiz: failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("codewiz: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&config).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let level = Level::from_str(&config.level)
        .with_context(|| format!("invalid log level '{}'", config.level))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
    Ok(())
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let codewiz = Codewiz::new(&config.database)
        .await
        .with_context(|| format!("opening {} datastore", config.database.driver))?;

    codewiz.migrate().await.context("applying migrations")?;
    codewiz.health_check().await.context("health check")?;

    tracing::info!(
        driver = %codewiz.store().driver(),
        tables = ?codewiz.tables(),
        "Datastore ready"
    );

    codewiz.close().await;
    Ok(())
}
