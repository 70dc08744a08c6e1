// src/core/sanitize.rs
use regex::Regex;

/// Collapse every whitespace run (including `&nbsp;`) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Remove every match of `fluff` from `name`, then trim.
pub fn strip_fluff(fluff: &Regex, name: &str) -> String {
    fluff.replace_all(name, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_nbsp_and_newlines() {
        assert_eq!(normalize_ws("  Gleason\u{a0}\n  Circle "), "Gleason Circle");
        assert_eq!(normalize_ws("\n\t"), "");
    }

    #[test]
    fn strips_fluff_anywhere() {
        let fluff = Regex::new(r" *[Ss]huttle *[Ss]chedule").unwrap();
        assert_eq!(strip_fluff(&fluff, "Spring 2025 Shuttle Schedule"), "Spring 2025");
        assert_eq!(strip_fluff(&fluff, "Summer shuttle schedule "), "Summer");
        assert_eq!(strip_fluff(&fluff, "Intersession"), "Intersession");
    }
}
