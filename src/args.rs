use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nfcw-crawler")]
#[command(about = "Crawls the NFCW yearly archive into JSON article records")]
#[command(version)]
pub struct Args {
    /// Path to a JSON crawler configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the WebDriver URL
    #[arg(short, long)]
    pub webdriver_url: Option<String>,

    /// Stop after this many documents
    #[arg(short, long)]
    pub max_count: Option<usize>,

    /// JSON file holding the newest document of the previous run
    #[arg(short, long)]
    pub last_document: Option<PathBuf>,

    /// First archive year to visit (defaults to the current year)
    #[arg(short, long)]
    pub start_year: Option<i32>,

    /// Write the documents here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
