// src/ast.rs
//! The normalized document.
//!
//! Entities live in flat vectors and refer to one another by index; the
//! cross-reference maps tie periods → sub-periods → routes → timetables → stops.
//! An `Ast` is only produced by `parse::AstBuilder::finish` and is read-only
//! afterwards.

use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use serde::Serialize;
use strum::EnumString;

index_type!(PeriodIdx);
index_type!(SubPeriodIdx);
index_type!(RouteIdx);
index_type!(StopIdx);
index_type!(TimeTableIdx);

/// A schedule season, fluff stripped (e.g. "Spring 2025").
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Period {
    pub name: String,
}

/// A day-type grouping within a period (e.g. "Weekday").
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubPeriod {
    pub name: String,
}

/// A numbered bus line (e.g. 3 "RIT Inn").
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    pub code: u32,
    pub name: String,
    pub begins: Option<NaiveDate>,
}

/// Stops are plain names, shared by every timetable that lists them.
pub type Stop = String;

/// Which side of a stop a column records (e.g. Gleason Circle *Arrival*).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StopPart {
    Arrival,
    Departure,
}

pub type TimeTableColumn = (StopIdx, Option<StopPart>);

/// `None` is a blank cell on the page, not a failed parse.
pub type TimeTableCell = Option<NaiveTime>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimeTable {
    pub cols: Vec<TimeTableColumn>,
    /// Row-major, every row `cols.len()` wide.
    pub matrix: Vec<Vec<TimeTableCell>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ast {
    pub(crate) routes: Vec<Route>,
    pub(crate) stops: Vec<Stop>,
    pub(crate) time_tables: Vec<TimeTable>,

    pub(crate) periods: Vec<Period>,
    pub(crate) sub_periods: Vec<SubPeriod>,

    pub(crate) route_stops: IndexMap<RouteIdx, Vec<StopIdx>>,
    pub(crate) route_time_table: IndexMap<RouteIdx, TimeTableIdx>,

    pub(crate) period_to_sub_periods: IndexMap<PeriodIdx, Vec<SubPeriodIdx>>,
    pub(crate) sub_period_routes: IndexMap<SubPeriodIdx, Vec<RouteIdx>>,
}

impl Ast {
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn time_tables(&self) -> &[TimeTable] {
        &self.time_tables
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn sub_periods(&self) -> &[SubPeriod] {
        &self.sub_periods
    }

    pub fn route_stops(&self) -> &IndexMap<RouteIdx, Vec<StopIdx>> {
        &self.route_stops
    }

    pub fn route_time_table(&self) -> &IndexMap<RouteIdx, TimeTableIdx> {
        &self.route_time_table
    }

    pub fn period_to_sub_periods(&self) -> &IndexMap<PeriodIdx, Vec<SubPeriodIdx>> {
        &self.period_to_sub_periods
    }

    pub fn sub_period_routes(&self) -> &IndexMap<SubPeriodIdx, Vec<RouteIdx>> {
        &self.sub_period_routes
    }

    pub fn route(&self, idx: RouteIdx) -> Option<&Route> {
        self.routes.get(idx.get())
    }

    pub fn stop(&self, idx: StopIdx) -> Option<&Stop> {
        self.stops.get(idx.get())
    }

    /// Timetable linked to `route`.
    pub fn time_table_of(&self, route: RouteIdx) -> Option<&TimeTable> {
        let idx = self.route_time_table.get(&route)?;
        self.time_tables.get(idx.get())
    }

    /// Every index referenced by a cross-reference map or timetable column
    /// points at an existing entity.
    pub fn is_linked(&self) -> bool {
        let routes = self.routes.len();
        let stops = self.stops.len();

        self.route_stops.iter().all(|(r, ss)| r.get() < routes && ss.iter().all(|s| s.get() < stops))
            && self.route_time_table.iter().all(|(r, t)| r.get() < routes && t.get() < self.time_tables.len())
            && self.period_to_sub_periods.iter().all(|(p, sps)| {
                p.get() < self.periods.len() && sps.iter().all(|sp| sp.get() < self.sub_periods.len())
            })
            && self.sub_period_routes.iter().all(|(sp, rs)| {
                sp.get() < self.sub_periods.len() && rs.iter().all(|r| r.get() < routes)
            })
            && self.time_tables.iter().all(|t| t.cols.iter().all(|(s, _)| s.get() < stops))
    }
}
