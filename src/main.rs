use clap::Parser;
use nfcw_crawler::{CrawlOptions, CrawlerConfig, Document, StopReason, crawl_with_webdriver};
use std::error::Error;
use std::fs;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CrawlerConfig::from_file(path)?,
        None => CrawlerConfig::default(),
    };
    if let Some(webdriver_url) = args.webdriver_url {
        config.webdriver_url = webdriver_url;
    }

    let last_document = match &args.last_document {
        Some(path) => {
            let document: Document = serde_json::from_str(&fs::read_to_string(path)?)?;
            ::log::info!("Resuming until {}", document.web_link);
            Some(document)
        }
        None => None,
    };

    eprintln!("Note: crawling requires a WebDriver server (e.g., ChromeDriver).");
    eprintln!(
        "Set WEBDRIVER_URL environment variable if not using {}",
        config.webdriver_url
    );

    let options = CrawlOptions {
        max_count_documents: args.max_count,
        last_document,
        start_year: args.start_year,
    };
    let start_time = std::time::Instant::now();
    let report = crawl_with_webdriver(config, options).await?;

    ::log::info!(
        "Crawling complete - {} documents in {:.2} seconds",
        report.documents.len(),
        start_time.elapsed().as_secs_f64()
    );
    if let StopReason::Fatal(e) = &report.stop {
        ::log::warn!("Crawl ended early: {}", e);
    }

    let json = serde_json::to_string_pretty(&report.documents)?;
    match &args.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{}", json),
    }
    Ok(())
}
