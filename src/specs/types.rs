// src/specs/types.rs
//! Scraped layer: page-shaped records, loosely typed, as read off the HTML.
//! Consumed once by `parse::build` and then dropped.

use indexmap::IndexMap;

index_type!(
    /// Position of a sub-period within one period's parts.
    ScrapedSubPeriodIdx
);
index_type!(
    /// Position of a route within one period's parts.
    ScrapedRouteIdx
);

/// A schedule heading (e.g. "Spring 2025 Shuttle Schedule").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapedPeriod {
    pub name: String,
}

/// A grouping within a period (e.g. "Weekday Shuttle Schedules and Maps").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapedSubPeriod {
    pub name: String,
}

/// A route as advertised (e.g. "1 Off Campus Express").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapedRoute {
    pub name: String,
    pub href: String,
    pub begins: Option<String>,
}

/// Children of one period, partitioned by the sub-period they follow.
/// Routes seen before any sub-period header sit under the `None` key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapedPeriodParts {
    pub routes: Vec<ScrapedRoute>,
    pub sub_periods: Vec<ScrapedSubPeriod>,
    pub sub_period_to_routes: IndexMap<Option<ScrapedSubPeriodIdx>, Vec<ScrapedRouteIdx>>,
}

impl Default for ScrapedPeriodParts {
    fn default() -> Self {
        let mut sub_period_to_routes = IndexMap::new();
        sub_period_to_routes.insert(None, Vec::new());
        Self { routes: Vec::new(), sub_periods: Vec::new(), sub_period_to_routes }
    }
}

impl ScrapedPeriodParts {
    pub fn push_sub_period(&mut self, sub_period: ScrapedSubPeriod) -> ScrapedSubPeriodIdx {
        let idx = ScrapedSubPeriodIdx::next(&self.sub_periods);
        self.sub_periods.push(sub_period);
        self.sub_period_to_routes.insert(Some(idx), Vec::new());
        idx
    }

    pub fn push_route(&mut self, under: Option<ScrapedSubPeriodIdx>, route: ScrapedRoute) -> ScrapedRouteIdx {
        let idx = ScrapedRouteIdx::next(&self.routes);
        self.routes.push(route);
        self.sub_period_to_routes.entry(under).or_default().push(idx);
        idx
    }

    /// Routes listed under `sub_period`, in page order.
    pub fn routes_of(&self, sub_period: Option<ScrapedSubPeriodIdx>) -> &[ScrapedRouteIdx] {
        self.sub_period_to_routes.get(&sub_period).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Everything read from the root page; `periods` and `period_parts` run in parallel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PeriodsScrape {
    pub periods: Vec<ScrapedPeriod>,
    pub period_parts: Vec<ScrapedPeriodParts>,
}

/// Raw header cell split into stop label and optional part label ("Arrival").
pub type ScrapedColumn = (String, Option<String>);
pub type ScrapedCell = Option<String>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrapedTimeTable {
    pub columns: Vec<ScrapedColumn>,
    /// Row-major; each row padded with `None` to `columns.len()`.
    pub values: Vec<Vec<ScrapedCell>>,
}

/// Per period (same order as `PeriodsScrape::periods`), the timetable of each
/// route that was fetched.
pub type TimeTablesScrape = Vec<IndexMap<ScrapedRouteIdx, ScrapedTimeTable>>;
