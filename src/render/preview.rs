//! Preview wrapping for arbitrary SVG fragments.

use crate::svg::{cached_regex, SVG_NS, XLINK_NS};
use regex::Regex;
use std::sync::OnceLock;

/// viewBox used when a fragment carries no usable size.
const DEFAULT_VIEW_BOX: &str = "0 0 100 100";

static SVG_OPEN: OnceLock<Regex> = OnceLock::new();
static VIEW_BOX: OnceLock<Regex> = OnceLock::new();
static WIDTH: OnceLock<Regex> = OnceLock::new();
static HEIGHT: OnceLock<Regex> = OnceLock::new();

/// Makes a fragment previewable at any size.
///
/// - empty input is returned unchanged
/// - an `<svg>` with a `viewBox` is returned unchanged
/// - an `<svg>` without one gains a `viewBox` (from its `width`/`height`, or
///   `0 0 100 100`) and a white background `<rect>`
/// - markup without an `<svg>` element is wrapped in one, treated the same way
#[must_use]
pub fn wrap_svg_for_preview(fragment: &str) -> String {
    if fragment.trim().is_empty() {
        return fragment.to_string();
    }

    let svg_open = cached_regex(&SVG_OPEN, r"(?s)<svg\b[^>]*>");
    let Some(open) = svg_open.find(fragment) else {
        return format!(
            r#"<svg xmlns="{SVG_NS}" xmlns:xlink="{XLINK_NS}" viewBox="{DEFAULT_VIEW_BOX}">{}{fragment}</svg>"#,
            background_rect()
        );
    };

    let tag = open.as_str();
    if cached_regex(&VIEW_BOX, r"\sviewBox\s*=").is_match(tag) {
        return fragment.to_string();
    }

    let dimension = |cell: &'static OnceLock<Regex>, pattern: &str| {
        cached_regex(cell, pattern)
            .captures(tag)
            .and_then(|caps| caps[1].parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
    };
    let width = dimension(&WIDTH, r#"\swidth\s*=\s*["']\s*([0-9]*\.?[0-9]+)"#);
    let height = dimension(&HEIGHT, r#"\sheight\s*=\s*["']\s*([0-9]*\.?[0-9]+)"#);
    let view_box = match (width, height) {
        (Some(w), Some(h)) => format!("0 0 {} {}", crate::svg::num(w), crate::svg::num(h)),
        _ => DEFAULT_VIEW_BOX.to_string(),
    };

    let self_closing = tag.ends_with("/>");
    let attrs_end = if self_closing {
        tag.len() - 2
    } else {
        tag.len() - 1
    };
    let mut opening = tag[..attrs_end].trim_end().to_string();
    if !opening.contains("xmlns=") {
        opening.push_str(&format!(r#" xmlns="{SVG_NS}""#));
    }
    opening.push_str(&format!(r#" viewBox="{view_box}">"#));

    let mut out = String::with_capacity(fragment.len() + 128);
    out.push_str(&fragment[..open.start()]);
    out.push_str(&opening);
    out.push_str(&background_rect());
    if self_closing {
        out.push_str("</svg>");
    }
    out.push_str(&fragment[open.end()..]);
    out
}

fn background_rect() -> String {
    r##"<rect x="0" y="0" width="100%" height="100%" fill="#FFFFFF"/>"##.to_string()
}
