use anyhow::Result;
use clap::Parser;
use jobscout::{Detector, DetectorConfig, PageFetcher, Request};
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Detect the job title, company and location on a job posting page")]
struct Cli {
    /// URL of the page to inspect
    url: String,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,

    /// Maximum time in milliseconds to wait for a non-empty result
    #[arg(long, default_value_t = 1500)]
    wait_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let fetcher = PageFetcher::new()?;
    let page = fetcher.fetch(&cli.url).await?;

    let config = DetectorConfig::default().with_max_wait(Duration::from_millis(cli.wait_ms));
    let detector = Detector::spawn(Arc::new(page), config);
    let response = detector.handle_request(Request::GetJobInfo).await;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");

    Ok(())
}
