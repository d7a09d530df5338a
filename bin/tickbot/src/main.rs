use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use client::BittrexClient;
use common::Config;
use indicators::{EngineSettings, IndicatorConfig, IndicatorEngine};

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    if let Err(e) = run().await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    let indicator_cfg = IndicatorConfig::load(&cfg.indicator_config_path)
        .with_context(|| format!("failed to load '{}'", cfg.indicator_config_path))?;
    info!(
        base_url = %cfg.base_url,
        runs = indicator_cfg.runs.len(),
        "TickBot starting"
    );

    // ── Exchange client ───────────────────────────────────────────────────────
    let client = BittrexClient::new(cfg.credentials.clone(), &cfg.base_url, cfg.request_timeout)
        .context("failed to build exchange client")?;
    let engine = IndicatorEngine::new(Arc::new(client), EngineSettings::from(&indicator_cfg));

    // ── Indicators (sequential) ───────────────────────────────────────────────
    for spec in indicator_cfg.run_specs() {
        let value = engine
            .evaluate(&spec)
            .await
            .with_context(|| format!("{} on {} failed", spec.indicator, spec.pair))?;
        info!(indicator = %spec.indicator, pair = %spec.pair, unit = %spec.unit, %value, "Result");
        println!("{}: {} {}", spec.indicator, spec.pair, value);
    }

    Ok(())
}
