use std::io;
use std::path::PathBuf;

use anyhow::bail;
use podscraper::{CategoryCollector, CollectorConfig, OnError};
use structopt::{clap::AppSettings, clap::Shell, StructOpt};
use tokio::runtime;

/// Scrap podcast category listings into csv files
#[derive(Debug, StructOpt)]
pub struct ScrapOpts {
    /// Directory under which `categories/<name>.csv` files will be written
    #[structopt(parse(from_os_str))]
    pub output_dir: PathBuf,
    /// Optional yaml collector configuration file
    #[structopt(parse(from_os_str), long)]
    pub config: Option<PathBuf>,
    /// Override the request timeout, in seconds
    #[structopt(long)]
    pub timeout: Option<f32>,
    /// Override the fetch error strategy (abort or skip-and-log)
    #[structopt(long)]
    pub on_fetch_error: Option<OnError>,
    /// When quiet no logs are outputted
    #[structopt(long, short)]
    pub quiet: bool,
}

impl ScrapOpts {
    fn collector_config(&self) -> anyhow::Result<CollectorConfig> {
        let mut conf = match &self.config {
            Some(path) => CollectorConfig::from_yaml_file(path)?,
            None => CollectorConfig::default(),
        };
        if let Some(timeout) = self.timeout {
            conf.timeout = timeout;
        }
        if let Some(on_fetch_error) = self.on_fetch_error {
            conf.on_fetch_error = on_fetch_error;
        }
        Ok(conf)
    }
}

#[derive(Debug, StructOpt)]
#[structopt()]
pub enum Command {
    #[structopt(name = "scrap")]
    Scrap(ScrapOpts),
    #[structopt(setting(AppSettings::Hidden))]
    Completion,
}

/// Podcast category scraper
#[derive(Debug, StructOpt)]
pub struct Opts {
    #[structopt(subcommand)]
    pub command: Command,
}

pub fn run_scrap(opts: ScrapOpts) -> anyhow::Result<()> {
    if !opts.quiet {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("podscraper=info"),
        )
        .init();
    }

    let collector = CategoryCollector::new(&opts.output_dir, opts.collector_config()?);

    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
    let report = rt.block_on(collector.scrape())?;

    log::info!(
        "Wrote {} files to {}, {} categories failed",
        report.written_files().len(),
        collector.output_dir().display(),
        report.failures().len()
    );

    if let Some(category) = &report.aborted_at {
        bail!(
            "Scraping aborted at {category}, not scraped: {}",
            report.pending.join(", ")
        );
    }
    if !report.is_complete() {
        bail!("Some categories couldn't be scraped");
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    match Opts::from_args().command {
        Command::Scrap(opts) => run_scrap(opts),
        Command::Completion => {
            Opts::clap().gen_completions_to("podscraper", Shell::Bash, &mut io::stdout());
            Ok(())
        }
    }
}
