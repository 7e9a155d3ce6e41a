// Keyword Engine demo entry point
// Scores phrases given on the command line, or annotates the sample catalog.

use anyhow::{Context, Result};
use keyword_engine::logging::init_tracing;
use keyword_engine::models::{KeywordFilter, RecomputeOptions};
use keyword_engine::samples::sample_keywords;
use keyword_engine::{CatalogHandle, EngineConfig};
use serde_json::json;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = EngineConfig::from_env().context("Failed to load engine configuration")?;
    init_tracing(config.log_format);

    let engine = config.engine();
    let phrases: Vec<String> = std::env::args().skip(1).collect();

    if !phrases.is_empty() {
        let analyses: Vec<_> = phrases
            .iter()
            .map(|text| json!({ "text": text, "analysis": engine.score(text) }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&analyses)?);
        return Ok(());
    }

    info!("No phrases given, annotating the sample catalog");
    let catalog = CatalogHandle::new(engine);
    for keyword in sample_keywords() {
        catalog.create(keyword).await?;
    }

    let all = catalog.list(KeywordFilter::default()).await?;
    let ids = all.iter().map(|k| k.id.clone()).collect();
    let batch = catalog
        .recompute_many(ids, RecomputeOptions { include_aio: true })
        .await?;
    info!(
        "Recomputed {} keywords ({} skipped)",
        batch.updated.len(),
        batch.skipped.len()
    );

    let output = json!({
        "tiers": config.priority.tiers(),
        "keywords": catalog.list(KeywordFilter::default()).await?,
        "distribution": catalog.distribution().await?,
        "aioDistribution": catalog.aio_distribution().await?,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    catalog.shutdown().await?;
    Ok(())
}
