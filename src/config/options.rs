// src/config/options.rs
use std::path::PathBuf;

use super::consts::ROOT_SCHEDULE_URL;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Page listing every period; route hrefs resolve against its origin.
    pub root_url: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self { root_url: ROOT_SCHEDULE_URL.to_string() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub path: Option<PathBuf>, // None → stdout
    pub pretty: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub verbose: bool,
    pub scrape: ScrapeOptions,
    pub output: OutputOptions,
}
