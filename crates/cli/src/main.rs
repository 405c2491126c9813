use clap::Parser;
use marketmood_core::classify::hf::HfInferenceModel;
use marketmood_core::classify::Classifier;
use marketmood_core::config::{RunInputs, Settings};
use marketmood_core::ingest::news::GoogleNewsClient;
use marketmood_core::ingest::quote::FinnhubClient;
use marketmood_core::pipeline::signal::SignalThresholds;
use marketmood_core::pipeline::Analyzer;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;

#[derive(Debug, Parser)]
#[command(name = "marketmood")]
struct Args {
    /// Ticker symbol to quote. Defaults to the TICKER environment variable.
    #[arg(long)]
    ticker: Option<String>,

    /// News search keyword. Defaults to the KEYWORD environment variable.
    #[arg(long)]
    keyword: Option<String>,

    /// Write the snapshot to a JSON file after the run.
    #[arg(long)]
    export: bool,

    /// Export destination. Defaults to sentiment_analysis_<timestamp>.json.
    #[arg(long)]
    output: Option<PathBuf>,

    /// How many per-article lines to print in the report.
    #[arg(long, default_value_t = 10)]
    max_display: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(ticker) = args.ticker.clone() {
        settings.ticker = Some(ticker);
    }
    if let Some(keyword) = args.keyword.clone() {
        settings.keyword = Some(keyword);
    }

    // Configuration is the only fatal error; everything after this degrades
    // inside the run and still exits 0.
    let inputs = RunInputs::from_settings(&settings)?;

    let quotes = Arc::new(FinnhubClient::from_settings(&settings)?);
    let news = Arc::new(GoogleNewsClient::new()?);
    let classifier = Classifier::new(Arc::new(HfInferenceModel::from_settings(&settings)));
    let analyzer = Analyzer::new(
        inputs,
        quotes,
        news,
        classifier,
        SignalThresholds::default(),
    );

    let snapshot = analyzer.run().await;

    report::print_snapshot(&snapshot, args.max_display);

    if args.export {
        let path = args
            .output
            .unwrap_or_else(|| marketmood_core::export::default_export_path(&snapshot));
        match marketmood_core::export::write_snapshot_json(&snapshot, &path) {
            Ok(()) => tracing::info!(path = %path.display(), "snapshot exported"),
            Err(err) => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "snapshot export failed");
            }
        }
    }

    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
