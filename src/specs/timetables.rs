// src/specs/timetables.rs
//! Scraping *spec* for a route page: the first `<table>` holds the timetable.
//!
//! - `<thead>` cells name the stops, optionally suffixed "Arrival"/"Departure".
//! - `<tbody>` rows hold "hh:mm AM/PM" strings. Cells are matched to columns by
//!   position only; a short row leaves its trailing columns empty.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::types::{ScrapedCell, ScrapedColumn, ScrapedRoute, ScrapedTimeTable};
use crate::ast::StopPart;
use crate::core::html::{self, element_children, expect_descendant};
use crate::core::net::{get_document, Fetch};
use crate::error::{Error, Result, StructureError};

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body table").expect("static selector"));
static THEAD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("thead").expect("static selector"));
static TBODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody").expect("static selector"));
static TH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").expect("static selector"));
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("static selector"));

/// Resolve a route's href against the root page's origin.
/// Only absolute paths are accepted ("/parking/..."), never relative or
/// network-path ("//host/...") references.
pub fn route_url(root: &Url, route: &ScrapedRoute) -> Result<Url> {
    let href = route.href.as_str();
    if !href.starts_with('/') || href.starts_with("//") {
        return Err(Error::RelativeHref { route: route.name.clone(), href: route.href.clone() });
    }
    Ok(root.join(href)?)
}

/// GET the route's page and read its timetable.
pub fn fetch_timetable(fetcher: &dyn Fetch, root: &Url, route: &ScrapedRoute) -> Result<ScrapedTimeTable> {
    let url = route_url(root, route)?;
    let body = get_document(fetcher, &url)?;
    let document = Html::parse_document(&body);
    Ok(parse_timetable(&document)?)
}

/// Split out for unit tests.
pub fn parse_timetable(document: &Html) -> Result<ScrapedTimeTable, StructureError> {
    let table = expect_descendant(document.root_element(), &TABLE, "table")?;

    let columns: Vec<ScrapedColumn> = match table.select(&THEAD).next() {
        Some(thead) => thead.select(&TH).map(|th| parse_column(&html::text(th))).collect(),
        None => Vec::new(),
    };

    let values = match table.select(&TBODY).next() {
        Some(tbody) => tbody.select(&TR).map(|tr| read_row(tr, columns.len())).collect(),
        None => Vec::new(),
    };

    Ok(ScrapedTimeTable { columns, values })
}

/// "Gleason Circle Arrival" → ("Gleason Circle", Some("Arrival"));
/// anything without a part keyword is all stop name.
pub fn parse_column(header: &str) -> ScrapedColumn {
    if let Some((stop, last)) = header.rsplit_once(' ') {
        if last.parse::<StopPart>().is_ok() {
            return (stop.trim().to_string(), Some(last.to_string()));
        }
    }
    (header.to_string(), None)
}

/// Cells by position, padded with `None` up to `width`; extra cells are dropped.
fn read_row(tr: ElementRef<'_>, width: usize) -> Vec<ScrapedCell> {
    let mut row: Vec<ScrapedCell> = element_children(tr)
        .into_iter()
        .take(width)
        .map(|cell| Some(html::text(cell)).filter(|t| !t.is_empty()))
        .collect();
    row.resize(width, None);
    row
}
