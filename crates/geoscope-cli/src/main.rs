//! geoscope batch driver: enrich news articles from JSON lines.

mod display;
mod sink;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use geoscope_core::{ArticleRecord, Gazetteer};
use geoscope_oracle::{HttpGeocoder, HttpGeometryService, HttpNerTagger};
use geoscope_pipeline::{enrich_batch, ArticleSink, Pipeline};

use crate::sink::JsonLinesSink;

#[derive(Parser)]
#[command(
    name = "geoscope",
    version,
    about = "Geographic scale/span enrichment for news articles"
)]
struct Cli {
    /// Gazetteer JSON file (array of region records).
    #[arg(long, env = "GEOSCOPE_GAZETTEER")]
    gazetteer: PathBuf,

    /// Input articles, one JSON object per line ({"id", "content", ...}).
    #[arg(long)]
    articles: PathBuf,

    /// Output file for enriched records, one JSON object per line.
    #[arg(long)]
    out: Option<PathBuf>,

    /// NER tagger endpoint.
    #[arg(long, env = "GEOSCOPE_NER_URL", default_value = "http://localhost:8889/NER")]
    ner_url: String,

    /// Geocoding service base URL.
    #[arg(
        long,
        env = "GEOSCOPE_GEOCODE_URL",
        default_value = "http://api.map.baidu.com"
    )]
    geocode_url: String,

    /// Geocoding service access key.
    #[arg(long, env = "GEOSCOPE_GEOCODE_KEY")]
    geocode_key: String,

    /// Geometry service base URL.
    #[arg(long, env = "GEOSCOPE_GEOMETRY_URL")]
    geometry_url: String,

    /// Articles enriched concurrently.
    #[arg(long, default_value_t = 8)]
    concurrency: usize,

    /// Print a card per enriched article.
    #[arg(long)]
    show: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("geoscope v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let gazetteer = load_gazetteer(&cli.gazetteer)?;
    let articles = load_articles(&cli.articles)?;
    tracing::info!(
        regions = gazetteer.len(),
        articles = articles.len(),
        "inputs loaded"
    );

    let pipeline = Arc::new(Pipeline::new(
        Arc::new(gazetteer),
        Arc::new(HttpNerTagger::new(cli.ner_url.clone())),
        Arc::new(HttpGeocoder::new(
            cli.geocode_url.clone(),
            cli.geocode_key.clone(),
        )),
        Arc::new(HttpGeometryService::new(cli.geometry_url.clone())),
    ));

    let results = enrich_batch(pipeline, articles, cli.concurrency).await;

    let mut enriched = 0usize;
    let mut failed = 0usize;
    let mut span_warnings = 0usize;

    let out_sink = match &cli.out {
        Some(path) => Some(JsonLinesSink::create(path).await?),
        None => None,
    };

    for item in &results {
        match &item.outcome {
            Ok(report) => {
                enriched += 1;
                if !report.is_clean() {
                    span_warnings += 1;
                }
                if let Some(sink) = &out_sink {
                    sink.store(&item.article)
                        .await
                        .with_context(|| format!("store article {}", item.article.id))?;
                }
                if cli.show {
                    display::print_card(&item.article);
                }
            }
            Err(_) => failed += 1,
        }
    }

    println!("{enriched} enriched, {failed} failed, {span_warnings} span warnings");
    Ok(())
}

fn load_gazetteer(path: &Path) -> anyhow::Result<Gazetteer> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read gazetteer {}", path.display()))?;
    Gazetteer::from_json(&text).context("load gazetteer")
}

fn load_articles(path: &Path) -> anyhow::Result<Vec<ArticleRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read articles {}", path.display()))?;

    let mut articles = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let article: ArticleRecord = serde_json::from_str(line)
            .with_context(|| format!("parse article at line {}", number + 1))?;
        articles.push(article);
    }
    Ok(articles)
}
