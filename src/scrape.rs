// src/scrape.rs
// Drive the pipeline: root page → periods → one timetable page per route → Ast.
// Strictly sequential; the first failure aborts the run.

use indexmap::IndexMap;
use scraper::Html;
use tracing::info;
use url::Url;

use crate::{
    ast::Ast,
    config::options::ScrapeOptions,
    core::net::{get_document, Fetch},
    error::Result,
    parse,
    specs::{
        periods::scrape_periods,
        timetables::fetch_timetable,
        types::{PeriodsScrape, TimeTablesScrape},
    },
};

/// Scrape everything reachable from `options.root_url` and build the AST.
pub fn run(fetcher: &dyn Fetch, options: &ScrapeOptions) -> Result<Ast> {
    let root = Url::parse(&options.root_url)?;

    let periods = collect_periods(fetcher, &root)?;
    let time_tables = collect_time_tables(fetcher, &root, &periods)?;

    let ast = parse::build(&periods, &time_tables)?;
    info!(
        "built {} periods, {} routes, {} stops",
        ast.periods().len(),
        ast.routes().len(),
        ast.stops().len()
    );
    Ok(ast)
}

pub fn collect_periods(fetcher: &dyn Fetch, root: &Url) -> Result<PeriodsScrape> {
    let body = get_document(fetcher, root)?;
    let document = Html::parse_document(&body);
    Ok(scrape_periods(&document)?)
}

/// Fetch the timetable of every route that sits under a sub-period, in page
/// order. Routes before the first sub-period are never fetched; the builder
/// drops them.
pub fn collect_time_tables(fetcher: &dyn Fetch, root: &Url, periods: &PeriodsScrape) -> Result<TimeTablesScrape> {
    let mut out = Vec::with_capacity(periods.period_parts.len());

    for parts in &periods.period_parts {
        let mut tables = IndexMap::new();
        for (sub_period, route_idxs) in &parts.sub_period_to_routes {
            if sub_period.is_none() {
                continue;
            }
            for &route_idx in route_idxs {
                let route = &parts.routes[route_idx.get()];
                tables.insert(route_idx, fetch_timetable(fetcher, root, route)?);
            }
        }
        out.push(tables);
    }
    Ok(out)
}
