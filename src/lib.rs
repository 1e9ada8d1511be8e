// Library interface for rust_job_scraper
// The binary is a thin interactive front end over these modules

pub mod browser;
pub mod config;
pub mod crawler;
pub mod export;
pub mod helpers;
pub mod models;
pub mod pacing;
pub mod sources;
