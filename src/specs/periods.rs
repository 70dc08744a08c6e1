// src/specs/periods.rs
//! Scraping *spec* for the root campus-shuttles page.
//!
//! Assumed layout, one pair group per period:
//!
//! ```text
//! <div>                                   pair group (exactly two children)
//!   <div><h3>PERIOD Shuttle Schedule</h3></div>
//!   <div>                                 parts container
//!     <div><div><h4>SUB_PERIOD</h4></div></div>
//!     <div><div><span>
//!       <a href="/ROUTE_HREF">N ROUTE_NAME</a>
//!       <span>Begins MM/DD/YYYY</span>    optional
//!     </span></div></div>
//!     ...
//!   </div>
//! </div>
//! ```
//!
//! A deviation in the pair group is fatal (`StructureError`); a part that looks
//! like neither a sub-period nor a route is page decoration and is skipped.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::types::{PeriodsScrape, ScrapedPeriod, ScrapedPeriodParts, ScrapedRoute, ScrapedSubPeriod};
use crate::config::consts::{
    GROUP_TAG, PERIOD_HEADING_SUFFIX, PERIOD_HEADING_TAG, ROUTE_LINK, SUB_PERIOD_HEADING_TAG,
};
use crate::core::html::{self, element_children, expect_child_count, expect_parent, expect_tag, only_child, tag};
use crate::error::StructureError;

static PERIOD_HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("body {PERIOD_HEADING_TAG}")).expect("static selector"));
static ROUTE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(ROUTE_LINK).expect("static regex"));

/// One classified child of a parts container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    SubPeriod(ScrapedSubPeriod),
    Route(ScrapedRoute),
    Ignored,
}

/// Parse the root page into periods and their parts.
pub fn scrape_periods(document: &Html) -> Result<PeriodsScrape, StructureError> {
    let mut out = PeriodsScrape::default();
    for (period, container) in locate(document)? {
        out.period_parts.push(extract_parts(container));
        out.periods.push(period);
    }
    Ok(out)
}

/// Every period heading paired with its parts container, in page order.
pub fn locate(document: &Html) -> Result<Vec<(ScrapedPeriod, ElementRef<'_>)>, StructureError> {
    let mut found = Vec::new();
    for h3 in document.select(&PERIOD_HEADINGS) {
        // only the heading's own text; inline links ("(PDF)") follow it
        let name = html::leading_text(h3);
        if !name.ends_with(PERIOD_HEADING_SUFFIX) {
            continue; // other page content
        }
        found.push((ScrapedPeriod { name }, parts_container(h3)?));
    }
    Ok(found)
}

/// heading → wrapper `<div>` → pair group `<div>` → the group's other child.
pub fn parts_container(heading: ElementRef<'_>) -> Result<ElementRef<'_>, StructureError> {
    let wrapper = expect_parent(heading, GROUP_TAG)?;
    let group = expect_parent(wrapper, GROUP_TAG)?;
    let pair = expect_child_count(group, 2)?;

    // exactly one of the pair is the wrapper itself
    let other = if pair[0].id() == wrapper.id() { pair[1] } else { pair[0] };
    Ok(other)
}

/// Partition a container's children by the most recent sub-period header.
pub fn extract_parts(container: ElementRef<'_>) -> ScrapedPeriodParts {
    let mut parts = ScrapedPeriodParts::default();
    let mut current = None;

    for child in element_children(container) {
        match classify(child) {
            Part::SubPeriod(sub_period) => current = Some(parts.push_sub_period(sub_period)),
            Part::Route(route) => {
                parts.push_route(current, route);
            }
            Part::Ignored => {}
        }
    }
    parts
}

/// Sub-period header first, then route entry, else noise.
pub fn classify(part: ElementRef<'_>) -> Part {
    if let Some(sub_period) = try_sub_period(part) {
        return Part::SubPeriod(sub_period);
    }
    try_route(part).map_or(Part::Ignored, Part::Route)
}

/// Follow the single-child chain down to an `<h4>` with text.
fn try_sub_period(part: ElementRef<'_>) -> Option<ScrapedSubPeriod> {
    let mut el = only_child(part)?;
    loop {
        if tag(el) == SUB_PERIOD_HEADING_TAG {
            let name = html::text(el);
            return (!name.is_empty()).then_some(ScrapedSubPeriod { name });
        }
        el = only_child(el)?;
    }
}

/// part `<div>` → wrapper → inline holder → (`<a>`, optional begins element).
fn try_route(part: ElementRef<'_>) -> Option<ScrapedRoute> {
    let wrapper = only_child(part)?;
    let holder = only_child(wrapper)?;

    let inline = element_children(holder);
    let link = expect_tag(*inline.first()?, "a").ok()?;

    let name = html::text(link);
    if !ROUTE_LINK_RE.is_match(&name) {
        debug!("skipping non-route link '{name}'");
        return None;
    }

    let Some(href) = link.value().attr("href") else {
        warn!("route '{name}' doesn't have a valid href attribute");
        return None;
    };

    let begins = inline.get(1).map(|el| html::text(*el)).filter(|t| !t.is_empty());

    Some(ScrapedRoute { name, href: href.to_string(), begins })
}
