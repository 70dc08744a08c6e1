// src/error.rs
//! Error taxonomy for the whole pipeline.
//!
//! Every variant here is fatal: the run aborts and nothing is emitted. The only
//! recoverable cases (route link without `href`, route listed before any
//! sub-period) are logged and dropped where they occur and never become an
//! `Error`.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("site layout changed")]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error("route '{route}' links to '{href}', which is not an absolute path")]
    RelativeHref { route: String, href: String },

    #[error("invalid url")]
    Url(#[from] url::ParseError),

    #[error("could not write output")]
    Io(#[from] std::io::Error),
}

/// The page's DOM deviates from the nesting the locator relies on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("{source_el} has no parent; expected <{expected}>")]
    NoParent { source_el: String, expected: &'static str },

    #[error("{source_el} has tag <{found}>; expected <{expected}>")]
    WrongTag {
        source_el: String,
        found: String,
        expected: &'static str,
    },

    #[error("{source_el} has {found} element children; expected {expected}")]
    ChildCount {
        source_el: String,
        found: usize,
        expected: usize,
    },

    #[error("{source_el} has no <{expected}>")]
    Missing { source_el: String, expected: &'static str },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("GET {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Text matched its surrounding pattern but its numbers are not a valid date/time.
#[derive(Debug, Error)]
pub enum FormatError {
    /// `source` is `None` when the shape is wrong before chrono sees it
    /// (a year that is not four digits).
    #[error("'{text}' is not a valid MM/DD/YYYY date")]
    Date {
        text: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("'{text}' is not a valid hh:mm AM/PM time")]
    Time {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("route '{0}' has no leading numeric code")]
    MissingRouteCode(String),

    #[error("route '{0}' has no scraped timetable")]
    MissingTimeTable(String),
}
