// Job boards the scraper knows how to read
pub mod indeed;
