// src/parse.rs
//! Turn the scraped forest into the normalized, cross-referenced `Ast`.
//!
//! One linear pass in page order. The only shared state is the builder's
//! name → stop index map, which lives for exactly one `build` call; that map is
//! why a stop listed by several routes resolves to a single `StopIdx`.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, warn};

use crate::ast::{
    Ast, Period, PeriodIdx, Route, RouteIdx, Stop, StopIdx, StopPart, SubPeriod, SubPeriodIdx, TimeTable,
    TimeTableCell, TimeTableIdx,
};
use crate::config::consts::{
    BEGINS_DATE_FORMAT, CELL_TIME_FORMAT, PERIOD_FLUFF, ROUTE_BEGINS, ROUTE_NAME, SUB_PERIOD_FLUFF,
};
use crate::core::sanitize::strip_fluff;
use crate::error::{ConsistencyError, FormatError, Result};
use crate::specs::types::{
    PeriodsScrape, ScrapedCell, ScrapedColumn, ScrapedPeriod, ScrapedRoute, ScrapedSubPeriod, ScrapedSubPeriodIdx,
    ScrapedTimeTable, TimeTablesScrape,
};

static PERIOD_FLUFF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(PERIOD_FLUFF).expect("static regex"));
static SUB_PERIOD_FLUFF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(SUB_PERIOD_FLUFF).expect("static regex"));
static ROUTE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(ROUTE_NAME).expect("static regex"));
static ROUTE_BEGINS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(ROUTE_BEGINS).expect("static regex"));

/// Build the `Ast`. `time_tables[i]` holds the timetables of `periods.periods[i]`,
/// keyed by the route's position in that period's parts.
pub fn build(periods: &PeriodsScrape, time_tables: &TimeTablesScrape) -> Result<Ast> {
    let mut builder = AstBuilder::default();
    let no_time_tables = IndexMap::new();

    for (s_period_idx, (s_period, s_parts)) in periods.periods.iter().zip(&periods.period_parts).enumerate() {
        let s_time_tables = time_tables.get(s_period_idx).unwrap_or(&no_time_tables);
        let period_idx = builder.push_period(period(s_period));

        for &s_route_idx in s_parts.routes_of(None) {
            let name = &s_parts.routes[s_route_idx.get()].name;
            warn!("could not find a matching sub-period for route '{name}'; dropping it");
        }

        for (s_sub_period_idx, s_sub_period) in s_parts.sub_periods.iter().enumerate() {
            let sub_period_idx = builder.push_sub_period(period_idx, sub_period(s_sub_period));

            for &s_route_idx in s_parts.routes_of(Some(ScrapedSubPeriodIdx(s_sub_period_idx))) {
                let s_route = &s_parts.routes[s_route_idx.get()];
                let route_idx = builder.push_route(sub_period_idx, route(s_route)?);

                let s_time_table = s_time_tables
                    .get(&s_route_idx)
                    .ok_or_else(|| ConsistencyError::MissingTimeTable(s_route.name.clone()))?;
                builder.push_time_table(route_idx, s_time_table)?;
            }
        }
        debug!("built period '{}'", s_period.name);
    }

    Ok(builder.finish())
}

/* ---------------- builder ---------------- */

/// Owns every vector and map of the AST under construction. Entities are
/// append-only; the index each `push_*` returns is stable.
#[derive(Debug, Default)]
pub struct AstBuilder {
    routes: Vec<Route>,
    stops: Vec<Stop>,
    time_tables: Vec<TimeTable>,

    periods: Vec<Period>,
    sub_periods: Vec<SubPeriod>,

    route_stops: IndexMap<RouteIdx, Vec<StopIdx>>,
    route_time_table: IndexMap<RouteIdx, TimeTableIdx>,

    period_to_sub_periods: IndexMap<PeriodIdx, Vec<SubPeriodIdx>>,
    sub_period_routes: IndexMap<SubPeriodIdx, Vec<RouteIdx>>,

    stop_index: HashMap<Stop, StopIdx>,
}

impl AstBuilder {
    pub fn push_period(&mut self, period: Period) -> PeriodIdx {
        let idx = PeriodIdx::next(&self.periods);
        self.periods.push(period);
        self.period_to_sub_periods.insert(idx, Vec::new());
        idx
    }

    pub fn push_sub_period(&mut self, period: PeriodIdx, sub_period: SubPeriod) -> SubPeriodIdx {
        let idx = SubPeriodIdx::next(&self.sub_periods);
        self.sub_periods.push(sub_period);
        self.period_to_sub_periods.entry(period).or_default().push(idx);
        self.sub_period_routes.insert(idx, Vec::new());
        idx
    }

    pub fn push_route(&mut self, sub_period: SubPeriodIdx, route: Route) -> RouteIdx {
        let idx = RouteIdx::next(&self.routes);
        self.routes.push(route);
        self.sub_period_routes.entry(sub_period).or_default().push(idx);
        idx
    }

    /// Index of the stop called `name`, created on first sight.
    pub fn stop_idx(&mut self, name: &str) -> StopIdx {
        if let Some(&idx) = self.stop_index.get(name) {
            return idx;
        }
        let idx = StopIdx::next(&self.stops);
        self.stops.push(name.to_string());
        self.stop_index.insert(name.to_string(), idx);
        idx
    }

    /// Normalize `scraped`, link it to `route` and record the route's stops.
    pub fn push_time_table(
        &mut self,
        route: RouteIdx,
        scraped: &ScrapedTimeTable,
    ) -> Result<TimeTableIdx, FormatError> {
        let mut cols = Vec::with_capacity(scraped.columns.len());
        let mut route_stops: Vec<StopIdx> = Vec::new();

        for column in &scraped.columns {
            let (name, part) = stop(column);
            let stop_idx = self.stop_idx(&name);
            if !route_stops.contains(&stop_idx) {
                route_stops.push(stop_idx);
            }
            cols.push((stop_idx, part));
        }

        let width = cols.len();
        let matrix = scraped
            .values
            .iter()
            .map(|row| -> Result<Vec<TimeTableCell>, FormatError> {
                let mut cells = row.iter().take(width).map(cell).collect::<Result<Vec<_>, _>>()?;
                cells.resize(width, None);
                Ok(cells)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let idx = TimeTableIdx::next(&self.time_tables);
        self.time_tables.push(TimeTable { cols, matrix });
        self.route_time_table.insert(route, idx);
        self.route_stops.insert(route, route_stops);
        Ok(idx)
    }

    pub fn finish(self) -> Ast {
        Ast {
            routes: self.routes,
            stops: self.stops,
            time_tables: self.time_tables,
            periods: self.periods,
            sub_periods: self.sub_periods,
            route_stops: self.route_stops,
            route_time_table: self.route_time_table,
            period_to_sub_periods: self.period_to_sub_periods,
            sub_period_routes: self.sub_period_routes,
        }
    }
}

/* ---------------- field parsers ---------------- */

/// "Spring 2025 Shuttle Schedule" → "Spring 2025"
pub fn period(s_period: &ScrapedPeriod) -> Period {
    Period { name: strip_fluff(&PERIOD_FLUFF_RE, &s_period.name) }
}

/// "Weekday Shuttle Schedules and Maps" → "Weekday"
pub fn sub_period(s_sub_period: &ScrapedSubPeriod) -> SubPeriod {
    SubPeriod { name: strip_fluff(&SUB_PERIOD_FLUFF_RE, &s_sub_period.name) }
}

/// "3 RIT Inn" + "Begins 08/25/2025" → Route { 3, "RIT Inn", 2025-08-25 }
pub fn route(s_route: &ScrapedRoute) -> Result<Route> {
    let missing_code = || ConsistencyError::MissingRouteCode(s_route.name.clone());

    let caps = ROUTE_NAME_RE.captures(&s_route.name).ok_or_else(missing_code)?;
    let code = caps[1].parse::<u32>().map_err(|_| missing_code())?;
    let name = caps[2].trim_end().to_string();

    let begins = begins(s_route.begins.as_deref())?;
    Ok(Route { code, name, begins })
}

/// Only the exact "Begins MM/DD/YYYY" shape yields a date; any other text is no
/// date at all. A matching shape with impossible numbers is fatal.
pub fn begins(raw: Option<&str>) -> Result<Option<NaiveDate>, FormatError> {
    let Some(caps) = raw.and_then(|r| ROUTE_BEGINS_RE.captures(r)) else {
        return Ok(None);
    };
    let text = &caps[1];
    // chrono's %Y takes any digit count; "08/25/25" must not become year 25
    let year = text.rsplit('/').next().unwrap_or_default();
    if year.len() != 4 {
        return Err(FormatError::Date { text: text.to_string(), source: None });
    }
    NaiveDate::parse_from_str(text, BEGINS_DATE_FORMAT)
        .map(Some)
        .map_err(|source| FormatError::Date { text: text.to_string(), source: Some(source) })
}

pub fn stop(column: &ScrapedColumn) -> (Stop, Option<StopPart>) {
    let (label, part) = column;
    (label.trim().to_string(), part.as_deref().and_then(|p| p.parse().ok()))
}

/// Blank stays blank; text must be "hh:mm AM/PM".
pub fn cell(raw: &ScrapedCell) -> Result<TimeTableCell, FormatError> {
    let Some(text) = raw.as_deref() else {
        return Ok(None);
    };
    NaiveTime::parse_from_str(text, CELL_TIME_FORMAT)
        .map(Some)
        .map_err(|source| FormatError::Time { text: text.to_string(), source })
}
