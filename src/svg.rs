//! Small helpers for building SVG markup with `format!`.

use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

/// SVG namespace.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// XLink namespace, needed for `xlink:href` on `<use>`.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Compiles a literal pattern once and keeps it for the process lifetime.
pub(crate) fn cached_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("literal regex pattern"))
}

/// Escapes text for use in element content and attribute values.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Formats a coordinate with at most two decimals and no trailing zeros.
#[must_use]
pub fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// `rotate(deg x y)` transform attribute, or nothing when the angle is zero.
#[must_use]
pub fn rotate_attr(degrees: f64, x: f64, y: f64) -> String {
    if degrees == 0.0 || !degrees.is_finite() {
        return String::new();
    }
    format!(
        r#" transform="rotate({} {} {})""#,
        num(degrees),
        num(x),
        num(y)
    )
}

/// A plain rectangle.
#[must_use]
pub fn rect(x: f64, y: f64, width: f64, height: f64, fill: &str) -> String {
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        num(x),
        num(y),
        num(width),
        num(height),
        escape_xml(fill)
    )
}

/// Text attributes shared by every `<text>` element.
#[derive(Debug, Clone, Copy)]
pub struct TextAttrs<'a> {
    /// Font size in px
    pub size: f64,
    /// Fill color
    pub fill: &'a str,
    /// `text-anchor` value
    pub anchor: &'a str,
    /// Bold weight
    pub bold: bool,
    /// Font family list
    pub family: &'a str,
}

/// A single `<text>` element. `extra` is appended verbatim to the attributes.
#[must_use]
pub fn text(x: f64, y: f64, content: &str, attrs: TextAttrs<'_>, extra: &str) -> String {
    let mut out = format!(
        r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}""#,
        num(x),
        num(y),
        escape_xml(attrs.family),
        num(attrs.size),
        escape_xml(attrs.fill)
    );
    if attrs.anchor != "start" {
        let _ = write!(out, r#" text-anchor="{}""#, attrs.anchor);
    }
    if attrs.bold {
        out.push_str(r#" font-weight="bold""#);
    }
    out.push_str(extra);
    let _ = write!(out, ">{}</text>", escape_xml(content));
    out
}
