// tests/scrape_e2e.rs
use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use url::Url;

use yass::ast::{PeriodIdx, RouteIdx, StopIdx, StopPart, SubPeriodIdx};
use yass::config::options::ScrapeOptions;
use yass::core::net::{Fetch, Page};
use yass::error::{Error, FetchError, StructureError};
use yass::file::write_json;
use yass::scrape;

const ROOT: &str = "https://shuttles.example.edu/parking/campus-shuttles";

/// Serves canned pages by URL; anything else is a 404. Records every GET.
#[derive(Default)]
struct FakeSite {
    pages: HashMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl FakeSite {
    fn page(mut self, path: &str, body: &str) -> Self {
        let url = Url::parse(ROOT).unwrap().join(path).unwrap();
        self.pages.insert(url.to_string(), body.to_string());
        self
    }
}

impl Fetch for FakeSite {
    fn get(&self, url: &Url) -> Result<Page, FetchError> {
        self.requested.borrow_mut().push(url.path().to_string());
        Ok(match self.pages.get(url.as_str()) {
            Some(body) => Page { status: 200, body: body.clone() },
            None => Page { status: 404, body: String::new() },
        })
    }
}

fn route(href: &str, name: &str, begins: &str) -> String {
    format!(r#"<div><div><span><a href="{href}">{name}</a><span>{begins}</span></span></div></div>"#)
}

fn root_page(parts: &str) -> String {
    root_page_with(&[("Fall 2025 Shuttle Schedule", parts)])
}

fn root_page_with(periods: &[(&str, &str)]) -> String {
    let groups: String = periods
        .iter()
        .map(|(heading, parts)| format!("<div><div><h3>{heading}</h3></div><div>{parts}</div></div>"))
        .collect();
    format!("<html><body><header><h3>Parking Services</h3></header><main>{groups}</main></body></html>")
}

fn timetable(head: &[&str], rows: &[&[&str]]) -> String {
    let ths: String = head.iter().map(|h| format!("<th>{h}</th>")).collect();
    let trs: String = rows
        .iter()
        .map(|r| format!("<tr>{}</tr>", r.iter().map(|c| format!("<td>{c}</td>")).collect::<String>()))
        .collect();
    format!("<html><body><table><thead><tr>{ths}</tr></thead><tbody>{trs}</tbody></table></body></html>")
}

fn options() -> ScrapeOptions {
    ScrapeOptions { root_url: ROOT.to_string() }
}

fn hm(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

fn fall_site() -> FakeSite {
    let parts = format!(
        "{}<div><div><h4>Weekday Shuttle Schedules and Maps</h4></div></div>{}{}",
        route("/parking/route-9", "9 Early Bird", ""),
        route("/parking/route-1", "1 Off Campus Express", "Begins 08/25/2025"),
        route("/parking/route-2", "2 Crossroads", ""),
    );
    FakeSite::default()
        .page("/parking/campus-shuttles", &root_page(&parts))
        .page(
            "/parking/route-1",
            &timetable(
                &["Gleason Circle Departure", "Park Point Arrival"],
                &[&["07:30 AM", "07:45 AM"], &["08:30 AM"]],
            ),
        )
        .page("/parking/route-2", &timetable(&["Park Point", "Crossroads Arrival"], &[&["", "12:05 PM"]]))
}

#[test]
fn scrapes_a_full_period() {
    let site = fall_site();
    let ast = scrape::run(&site, &options()).unwrap();

    assert_eq!(ast.periods().len(), 1);
    assert_eq!(ast.periods()[0].name, "Fall 2025");
    assert_eq!(ast.sub_periods()[0].name, "Weekday");

    let routes = ast.routes();
    assert_eq!(routes.len(), 2);
    assert_eq!((routes[0].code, routes[0].name.as_str()), (1, "Off Campus Express"));
    assert_eq!(routes[0].begins, NaiveDate::from_ymd_opt(2025, 8, 25));
    assert_eq!((routes[1].code, routes[1].begins), (2, None));

    let tt = ast.time_table_of(RouteIdx(0)).unwrap();
    assert_eq!(
        tt.cols,
        [(StopIdx(0), Some(StopPart::Departure)), (StopIdx(1), Some(StopPart::Arrival))]
    );
    assert_eq!(tt.matrix, [[hm(7, 30), hm(7, 45)], [hm(8, 30), None]]);

    // "Park Point" is one stop shared by both routes
    assert_eq!(ast.stops(), ["Gleason Circle", "Park Point", "Crossroads"]);
    assert_eq!(ast.route_stops()[&RouteIdx(1)], [StopIdx(1), StopIdx(2)]);
    assert!(ast.is_linked());
}

#[test]
fn routes_before_any_sub_period_are_never_fetched() {
    let site = fall_site();
    scrape::run(&site, &options()).unwrap();
    let requested = site.requested.borrow();
    assert_eq!(
        *requested,
        ["/parking/campus-shuttles", "/parking/route-1", "/parking/route-2"]
    );
}

#[test]
fn json_document_uses_indices_and_iso_values() {
    let ast = scrape::run(&fall_site(), &options()).unwrap();
    let mut buf = Vec::new();
    write_json(&mut buf, &ast, false).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert_eq!(json["routes"][0]["begins"], "2025-08-25");
    assert_eq!(json["routes"][1]["begins"], serde_json::Value::Null);
    assert_eq!(json["time_tables"][0]["cols"][0], serde_json::json!([0, "departure"]));
    assert_eq!(json["time_tables"][0]["matrix"][1][0], "08:30:00");
    assert_eq!(json["time_tables"][1]["matrix"][0][0], serde_json::Value::Null);
    assert_eq!(json["period_to_sub_periods"]["0"], serde_json::json!([0]));
    assert_eq!(json["sub_period_routes"]["0"], serde_json::json!([0, 1]));
    assert_eq!(json["route_time_table"]["1"], 1);
}

#[test]
fn missing_route_page_aborts_the_run() {
    let parts = format!("<div><div><h4>Weekend</h4></div></div>{}", route("/parking/route-5", "5 Gone", ""));
    let site = FakeSite::default().page("/parking/campus-shuttles", &root_page(&parts));

    match scrape::run(&site, &options()) {
        Err(Error::Fetch(FetchError::Status { url, status })) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/parking/route-5"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn route_page_without_table_aborts_the_run() {
    let parts = format!("<div><div><h4>Weekend</h4></div></div>{}", route("/parking/route-5", "5 Detour", ""));
    let site = FakeSite::default()
        .page("/parking/campus-shuttles", &root_page(&parts))
        .page("/parking/route-5", "<html><body><p>No service this term.</p></body></html>");

    assert!(matches!(
        scrape::run(&site, &options()),
        Err(Error::Structure(StructureError::Missing { expected: "table", .. }))
    ));
}

#[test]
fn root_unreachable_is_fatal() {
    let site = FakeSite::default();
    assert!(matches!(
        scrape::run(&site, &options()),
        Err(Error::Fetch(FetchError::Status { status: 404, .. }))
    ));
}

#[test]
fn page_without_periods_yields_empty_ast() {
    let site = FakeSite::default().page("/parking/campus-shuttles", "<html><body><h3>Closed</h3></body></html>");
    let ast = scrape::run(&site, &options()).unwrap();
    assert!(ast.periods().is_empty());
    assert!(ast.routes().is_empty());
    assert!(ast.is_linked());
}

fn two_term_site() -> FakeSite {
    let fall = format!(
        "<div><div><h4>Weekday</h4></div></div>{}",
        route("/parking/fall/route-1", "1 Off Campus Express", ""),
    );
    let spring = format!(
        "<div><div><h4>Weekday</h4></div></div>{}<div><div><h4>Weekend</h4></div></div>{}",
        route("/parking/spring/route-1", "1 Off Campus Express", "Begins 01/12/2026"),
        route("/parking/spring/route-6", "6 Province", ""),
    );
    FakeSite::default()
        .page(
            "/parking/campus-shuttles",
            &root_page_with(&[("Fall 2025 Shuttle Schedule", fall.as_str()), ("Spring 2026 Shuttle Schedule", spring.as_str())]),
        )
        .page("/parking/fall/route-1", &timetable(&["Gleason Circle Departure", "Park Point Arrival"], &[&["07:30 AM", "07:45 AM"]]))
        .page("/parking/spring/route-1", &timetable(&["Gleason Circle Departure", "Park Point Arrival"], &[&["08:00 AM", "08:20 AM"]]))
        .page("/parking/spring/route-6", &timetable(&["Province Departure", "Gleason Circle Arrival"], &[&["10:00 AM", "10:12 AM"]]))
}

#[test]
fn each_period_links_its_own_route_pages() {
    let site = two_term_site();
    let ast = scrape::run(&site, &options()).unwrap();

    let names: Vec<_> = ast.periods().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Fall 2025", "Spring 2026"]);
    assert_eq!(ast.period_to_sub_periods()[&PeriodIdx(0)], [SubPeriodIdx(0)]);
    assert_eq!(ast.period_to_sub_periods()[&PeriodIdx(1)], [SubPeriodIdx(1), SubPeriodIdx(2)]);
    assert_eq!(ast.sub_period_routes()[&SubPeriodIdx(1)], [RouteIdx(1)]);
    assert_eq!(ast.sub_period_routes()[&SubPeriodIdx(2)], [RouteIdx(2)]);

    // route 1 runs in both terms, each with its own page
    let spring_express = ast.route(RouteIdx(1)).unwrap();
    assert_eq!((spring_express.code, spring_express.begins), (1, NaiveDate::from_ymd_opt(2026, 1, 12)));
    assert_eq!(ast.time_table_of(RouteIdx(0)).unwrap().matrix, [[hm(7, 30), hm(7, 45)]]);
    assert_eq!(ast.time_table_of(RouteIdx(1)).unwrap().matrix, [[hm(8, 0), hm(8, 20)]]);
    assert_eq!(ast.time_table_of(RouteIdx(2)).unwrap().matrix, [[hm(10, 0), hm(10, 12)]]);

    // stops are shared across periods
    assert_eq!(ast.stops().len(), 3);
    assert_eq!(ast.route_stops()[&RouteIdx(0)], ast.route_stops()[&RouteIdx(1)]);
    assert_eq!(ast.route_stops()[&RouteIdx(2)], [StopIdx(2), StopIdx(0)]);
    assert_eq!(ast.stop(StopIdx(2)).map(String::as_str), Some("Province"));
    assert!(ast.stop(StopIdx(3)).is_none());
    assert!(ast.is_linked());

    assert_eq!(
        *site.requested.borrow(),
        ["/parking/campus-shuttles", "/parking/fall/route-1", "/parking/spring/route-1", "/parking/spring/route-6"]
    );
}
