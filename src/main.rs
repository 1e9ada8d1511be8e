use dialoguer::Input;
use log::{error, info, warn, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use rust_job_scraper::browser::BrowserSession;
use rust_job_scraper::config::Config;
use rust_job_scraper::crawler::scrape_with_summary;
use rust_job_scraper::export::ExportError;
use rust_job_scraper::models::{ListingRecord, SearchQuery};
use std::error::Error;

const LOG_CONFIG_FILE: &str = "log4rs.yml";

fn init_logging() {
    if log4rs::init_file(LOG_CONFIG_FILE, Default::default()).is_ok() {
        return;
    }

    // No log4rs.yml next to the binary: console only
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info));

    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Failed to initialise logging: {}", e);
            }
        }
        Err(e) => eprintln!("Invalid logging configuration: {}", e),
    }
}

fn prompt_search(cfg: &Config) -> Result<SearchQuery, dialoguer::Error> {
    let query: String = Input::new().with_prompt("Enter job").interact_text()?;
    let location: String = Input::new()
        .with_prompt("Enter location")
        .allow_empty(true)
        .interact_text()?;
    let pages: u32 = Input::new()
        .with_prompt("Enter number of pages to scrape")
        .default(cfg.default_pages.max(1))
        .validate_with(|n: &u32| if *n > 0 { Ok(()) } else { Err("must be at least 1") })
        .interact_text()?;

    Ok(SearchQuery {
        query: query.trim().to_string(),
        location: location.trim().to_string(),
        pages,
    })
}

/// Ask for a format until one is accepted; I/O failures end the save step
fn save_listings(cfg: &Config, listings: &[ListingRecord]) -> Result<(), Box<dyn Error>> {
    let exporter = cfg.exporter();
    loop {
        let format: String = Input::new()
            .with_prompt("Enter file format to save (csv, json, excel)")
            .default("csv".to_string())
            .interact_text()?;

        match exporter.write(listings, &format) {
            Ok(path) => {
                info!("Saved {} jobs to {}", listings.len(), path.display());
                return Ok(());
            }
            Err(ExportError::UnsupportedFormat(f)) => {
                warn!("Invalid file format `{}`! Please enter csv, json, or excel.", f);
            }
            Err(e) => {
                error!("Error saving data: {}", e);
                return Err(e.into());
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let cfg = Config::load();
    let extractor = cfg.extractor()?;
    let pacer = cfg.pacer();

    let search = prompt_search(&cfg)?;
    info!(
        "Searching for '{}' in '{}' across {} page(s)",
        search.query, search.location, search.pages
    );

    let mut session = match BrowserSession::open(cfg.browser.clone()) {
        Ok(session) => session,
        Err(e) => {
            error!("Error creating browser session: {}", e);
            return Err(e.into());
        }
    };

    let (listings, summary) = scrape_with_summary(&mut session, &extractor, &pacer, &search);
    session.close();

    if summary.pages_skipped > 0 {
        warn!(
            "{} of {} page(s) could not be loaded",
            summary.pages_skipped, summary.pages_requested
        );
    }

    if listings.is_empty() {
        info!("No jobs found to save.");
        return Ok(());
    }

    save_listings(&cfg, &listings)
}
