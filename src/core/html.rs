// src/core/html.rs
// DOM navigation over `scraper` trees. Every layout assumption the locator makes
// is one of the `expect_*` checks below, so a changed page fails at a named spot.

use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;
use crate::error::StructureError;

pub fn tag<'a>(el: ElementRef<'a>) -> &'a str {
    el.value().name()
}

/// All descendant text, whitespace-normalized.
pub fn text(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Text before the first child node, whitespace-normalized; empty when the
/// element opens with a child element.
pub fn leading_text(el: ElementRef<'_>) -> String {
    el.first_child()
        .and_then(|node| node.value().as_text().map(|t| normalize_ws(t)))
        .unwrap_or_default()
}

/// Element children only; text and comment nodes are skipped.
pub fn element_children<'a>(el: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap).collect()
}

pub fn parent_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.parent().and_then(ElementRef::wrap)
}

/// The single element child, if there is exactly one.
pub fn only_child<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    match element_children(el).as_slice() {
        [child] => Some(*child),
        _ => None,
    }
}

/// Short human label for error messages: tag plus the start of its text.
pub fn describe(el: ElementRef<'_>) -> String {
    let snippet: String = text(el).chars().take(40).collect();
    if snippet.is_empty() {
        format!("<{}>", tag(el))
    } else {
        format!("<{}> \"{}\"", tag(el), snippet)
    }
}

pub fn expect_tag<'a>(
    el: ElementRef<'a>,
    expected: &'static str,
) -> Result<ElementRef<'a>, StructureError> {
    if tag(el) == expected {
        Ok(el)
    } else {
        Err(StructureError::WrongTag {
            source_el: describe(el),
            found: tag(el).to_string(),
            expected,
        })
    }
}

/// Parent of `el`, which must carry the tag `expected`.
pub fn expect_parent<'a>(
    el: ElementRef<'a>,
    expected: &'static str,
) -> Result<ElementRef<'a>, StructureError> {
    let parent = parent_element(el).ok_or_else(|| StructureError::NoParent {
        source_el: describe(el),
        expected,
    })?;

    if tag(parent) != expected {
        return Err(StructureError::WrongTag {
            source_el: describe(el),
            found: tag(parent).to_string(),
            expected,
        });
    }
    Ok(parent)
}

/// Element children of `el`, which must number exactly `expected`.
pub fn expect_child_count<'a>(
    el: ElementRef<'a>,
    expected: usize,
) -> Result<Vec<ElementRef<'a>>, StructureError> {
    let children = element_children(el);
    if children.len() != expected {
        return Err(StructureError::ChildCount {
            source_el: describe(el),
            found: children.len(),
            expected,
        });
    }
    Ok(children)
}

/// First descendant matching `selector`; `expected` names it in the error.
pub fn expect_descendant<'a>(
    el: ElementRef<'a>,
    selector: &Selector,
    expected: &'static str,
) -> Result<ElementRef<'a>, StructureError> {
    el.select(selector).next().ok_or_else(|| StructureError::Missing {
        source_el: format!("<{}>", tag(el)),
        expected,
    })
}
