// src/config/consts.rs

// Net config
pub const ROOT_SCHEDULE_URL: &str = "https://www.rit.edu/parking/campus-shuttles";
pub const USER_AGENT: &str = concat!("yass/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Root page layout
pub const PERIOD_HEADING_SUFFIX: &str = "Shuttle Schedule";
pub const PERIOD_HEADING_TAG: &str = "h3";
pub const SUB_PERIOD_HEADING_TAG: &str = "h4";
pub const GROUP_TAG: &str = "div";

// Fluff stripped from scraped names
pub const PERIOD_FLUFF: &str = r" *[Ss]huttle *[Ss]chedule";
pub const SUB_PERIOD_FLUFF: &str = r"[Ss]huttle [Ss]chedules and [Mm]aps";

// Field patterns
pub const ROUTE_LINK: &str = r"^[0-9]{1,2} .*$";
pub const ROUTE_NAME: &str = r"^ *([0-9]*) *(.*)";
pub const ROUTE_BEGINS: &str = r"^ *Begins *([0-9]*/[0-9]*/[0-9]*) *$";
pub const BEGINS_DATE_FORMAT: &str = "%m/%d/%Y";
pub const CELL_TIME_FORMAT: &str = "%I:%M %p";

// Output
pub const PRETTY_INDENT: &[u8] = b"    ";
