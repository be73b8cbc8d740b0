//! SVG to PDF transcoding.
//!
//! Each page is parsed with `usvg`, converted into a form XObject by
//! `svg2pdf` and placed on a page sized like the layout page. Paint values are
//! first rewritten to forms the converter handles without alpha compositing.

use crate::error::PdfError;
use crate::models::RgbColor;
use crate::render::PageGeometry;
use crate::svg::cached_regex;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Paint used when a color is missing or transparent.
pub const SAFE_DEFAULT_COLOR: &str = "#FFFFFF";

/// Points per CSS pixel.
const PT_PER_PX: f64 = crate::constants::PT_PER_INCH / crate::constants::PX_PER_INCH;

static PAINT_ATTR: OnceLock<Regex> = OnceLock::new();
static ID_ATTR: OnceLock<Regex> = OnceLock::new();
static URL_REF: OnceLock<Regex> = OnceLock::new();
static HREF_REF: OnceLock<Regex> = OnceLock::new();
static SVG_WIDTH: OnceLock<Regex> = OnceLock::new();

/// Normalizes a CSS color to a form the PDF converter renders faithfully.
///
/// Hex and named colors are returned unchanged. `rgba(...)` loses its alpha
/// channel. Missing, empty, `transparent` or unparsable `rgba` values become
/// [`SAFE_DEFAULT_COLOR`].
///
/// # Examples
///
/// ```
/// use yearcal::pdf::convert_color_for_pdf;
///
/// assert_eq!(convert_color_for_pdf(Some("#Ab12cD")), "#Ab12cD");
/// assert_eq!(convert_color_for_pdf(Some("rgba(10, 20, 30, 0.4)")), "rgb(10,20,30)");
/// assert_eq!(convert_color_for_pdf(None), "#FFFFFF");
/// ```
#[must_use]
pub fn convert_color_for_pdf(color: Option<&str>) -> String {
    let Some(value) = color.map(str::trim).filter(|v| !v.is_empty()) else {
        return SAFE_DEFAULT_COLOR.to_string();
    };

    if value.eq_ignore_ascii_case("transparent") {
        return SAFE_DEFAULT_COLOR.to_string();
    }

    if value.to_ascii_lowercase().starts_with("rgba(") {
        return match RgbColor::from_css_rgba(value) {
            Ok((rgb, _)) => rgb.to_css_rgb(),
            Err(err) => {
                warn!("{err:#}");
                SAFE_DEFAULT_COLOR.to_string()
            }
        };
    }

    value.to_string()
}

/// Rewrites `fill`, `stroke` and `stop-color` attributes for PDF output.
///
/// Paint server references (`url(#...)`), `none` and `currentColor` are left
/// alone. Fully transparent fill and stroke paint becomes `none`.
#[must_use]
pub fn normalize_svg_colors(svg: &str) -> String {
    let pattern = cached_regex(
        &PAINT_ATTR,
        r#"(\s)(fill|stroke|stop-color)\s*=\s*"([^"]*)""#,
    );
    pattern
        .replace_all(svg, |caps: &Captures<'_>| {
            let (space, name, value) = (&caps[1], &caps[2], caps[3].trim());
            let paint = normalize_paint(name, value);
            format!(r#"{space}{name}="{paint}""#)
        })
        .into_owned()
}

fn normalize_paint(attribute: &str, value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("url(") || lower == "none" || lower == "currentcolor" {
        return value.to_string();
    }

    let invisible = lower.is_empty()
        || lower == "transparent"
        || (lower.starts_with("rgba(")
            && RgbColor::from_css_rgba(value).is_ok_and(|(_, alpha)| alpha <= 0.0));
    if invisible && attribute != "stop-color" {
        return "none".to_string();
    }

    convert_color_for_pdf(Some(value))
}

/// Fails with the first `url(#id)` or `href="#id"` attribute value that no
/// element defines. Text content is not inspected.
pub fn check_references(svg: &str) -> Result<(), PdfError> {
    let ids: HashSet<&str> = cached_regex(&ID_ATTR, r#"\sid\s*=\s*["']([^"']+)["']"#)
        .captures_iter(svg)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    let url_refs = cached_regex(
        &URL_REF,
        r#"\s(?:fill|stroke|clip-path|mask|filter|marker-start|marker-mid|marker-end)\s*=\s*["']\s*url\(\s*#([^)'"\s]+)\s*\)"#,
    );
    let href_refs = cached_regex(&HREF_REF, r#"\s(?:xlink:)?href\s*=\s*["']#([^"']+)["']"#);

    url_refs
        .captures_iter(svg)
        .chain(href_refs.captures_iter(svg))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .find(|id| !ids.contains(id))
        .map_or(Ok(()), |id| Err(PdfError::UnresolvedReference(id.to_string())))
}

/// Converts one calendar SVG into a single-page PDF.
///
/// The page size follows the SVG: documents no wider than the compact page
/// get the compact page, everything else US Letter landscape.
pub fn render_svg_to_pdf(svg: &str, year: i32) -> Result<Vec<u8>, PdfError> {
    let page = page_for_svg(svg);
    let title = format!("{} {year}", crate::constants::APP_NAME);
    render_pages_to_pdf(&[svg], &page, &title)
}

/// Page geometry matching the declared width of a calendar SVG.
fn page_for_svg(svg: &str) -> PageGeometry {
    let compact = PageGeometry::new(true);
    let width = cached_regex(&SVG_WIDTH, r#"<svg\b[^>]*?\swidth\s*=\s*["']\s*([0-9]*\.?[0-9]+)"#)
        .captures(svg)
        .and_then(|caps| caps[1].parse::<f64>().ok());
    match width {
        Some(w) if w <= compact.width + 0.5 => compact,
        _ => PageGeometry::new(false),
    }
}

/// Converts SVG pages into one PDF document.
///
/// Every page shares `page`'s size. An SVG whose size matches the page covers
/// it edge to edge; any other SVG is scaled to fit the printable area and
/// centered.
pub fn render_pages_to_pdf(
    pages: &[&str],
    page: &PageGeometry,
    title: &str,
) -> Result<Vec<u8>, PdfError> {
    if pages.is_empty() {
        return Err(PdfError::EmptyDocument);
    }

    let normalized: Vec<String> = pages
        .iter()
        .map(|svg| -> Result<String, PdfError> {
            check_references(svg)?;
            Ok(normalize_svg_colors(svg))
        })
        .collect::<Result<_, PdfError>>()?;

    debug!(pages = normalized.len(), "Converting SVG to PDF");
    backend::write_document(&normalized, page, title)
}

/// Where an SVG of `svg_width` × `svg_height` px lands on `page`.
///
/// Returns `[x, y, width, height]` in PDF points with a bottom-left origin.
fn placement(svg_width: f64, svg_height: f64, page: &PageGeometry) -> [f64; 4] {
    let full_page = (svg_width - page.width).abs() < 0.5 && (svg_height - page.height).abs() < 0.5;
    if full_page || svg_width <= 0.0 || svg_height <= 0.0 {
        return [0.0, 0.0, page.width * PT_PER_PX, page.height * PT_PER_PX];
    }

    let area = page.printable();
    let scale = (area.width / svg_width).min(area.height / svg_height);
    let (width, height) = (svg_width * scale, svg_height * scale);
    let x = area.x + (area.width - width) / 2.0;
    // PDF y grows upwards
    let y = page.height - (area.y + (area.height - height) / 2.0) - height;
    [x * PT_PER_PX, y * PT_PER_PX, width * PT_PER_PX, height * PT_PER_PX]
}

#[cfg(feature = "pdf")]
mod backend {
    use super::{placement, PT_PER_PX};
    use crate::error::PdfError;
    use crate::render::PageGeometry;
    use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, TextStr};
    use std::collections::HashMap;
    use std::sync::{Arc, OnceLock};
    use svg2pdf::usvg;

    const SVG_XOBJECT: Name<'static> = Name(b"S0");

    /// System fonts, loaded once per process.
    fn font_database() -> Arc<usvg::fontdb::Database> {
        static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
        FONTS
            .get_or_init(|| {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                tracing::debug!(faces = db.len(), "Loaded system fonts");
                Arc::new(db)
            })
            .clone()
    }

    pub(super) fn write_document(
        pages: &[String],
        page: &PageGeometry,
        title: &str,
    ) -> Result<Vec<u8>, PdfError> {
        let options = usvg::Options {
            fontdb: font_database(),
            ..usvg::Options::default()
        };

        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();
        let info_id = alloc.bump();
        let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc.bump(), alloc.bump())).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(page_ids.len() as i32);
        pdf.document_info(info_id).title(TextStr(title));

        let media_box = Rect::new(
            0.0,
            0.0,
            (page.width * PT_PER_PX) as f32,
            (page.height * PT_PER_PX) as f32,
        );

        for (svg, (page_id, content_id)) in pages.iter().zip(&page_ids) {
            let tree = usvg::Tree::from_str(svg, &options)
                .map_err(|err| PdfError::Parse(err.to_string()))?;
            let (chunk, svg_id) =
                svg2pdf::to_chunk(&tree, svg2pdf::ConversionOptions::default())
                    .map_err(|err| PdfError::Conversion(err.to_string()))?;

            let mut map = HashMap::new();
            let chunk = chunk.renumber(|old| *map.entry(old).or_insert_with(|| alloc.bump()));
            let svg_id = map
                .get(&svg_id)
                .copied()
                .ok_or_else(|| PdfError::Conversion("SVG object missing from chunk".to_string()))?;

            let size = tree.size();
            let [x, y, width, height] =
                placement(f64::from(size.width()), f64::from(size.height()), page);

            let mut pdf_page = pdf.page(*page_id);
            pdf_page.media_box(media_box);
            pdf_page.parent(page_tree_id);
            pdf_page.contents(*content_id);
            pdf_page.resources().x_objects().pair(SVG_XOBJECT, svg_id);
            pdf_page.finish();

            let mut content = Content::new();
            content
                .save_state()
                .transform([width as f32, 0.0, 0.0, height as f32, x as f32, y as f32])
                .x_object(SVG_XOBJECT)
                .restore_state();
            pdf.stream(*content_id, &content.finish());
            pdf.extend(&chunk);
        }

        Ok(pdf.finish())
    }
}

#[cfg(not(feature = "pdf"))]
mod backend {
    use crate::error::PdfError;
    use crate::render::PageGeometry;

    pub(super) fn write_document(
        _pages: &[String],
        _page: &PageGeometry,
        _title: &str,
    ) -> Result<Vec<u8>, PdfError> {
        Err(PdfError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_color_passthrough() {
        assert_eq!(convert_color_for_pdf(Some("#FF5252")), "#FF5252");
        assert_eq!(convert_color_for_pdf(Some("#ff5252")), "#ff5252");
        assert_eq!(convert_color_for_pdf(Some("red")), "red");
        let once = convert_color_for_pdf(Some("#abc"));
        assert_eq!(convert_color_for_pdf(Some(&once)), once);
    }

    #[test]
    fn test_convert_color_defaults() {
        for input in [None, Some(""), Some("  "), Some("transparent"), Some("TRANSPARENT")] {
            assert_eq!(convert_color_for_pdf(input), SAFE_DEFAULT_COLOR, "{input:?}");
        }
        assert_eq!(convert_color_for_pdf(Some("rgba(nope)")), SAFE_DEFAULT_COLOR);
    }

    #[test]
    fn test_convert_color_strips_alpha() {
        assert_eq!(convert_color_for_pdf(Some("rgba(255, 0, 128, 0.25)")), "rgb(255,0,128)");
        assert_eq!(convert_color_for_pdf(Some("RGBA(1,2,3,1)")), "rgb(1,2,3)");
    }

    #[test]
    fn test_normalize_svg_colors() {
        let svg = r##"<svg><rect fill="rgba(0,0,0,0)" stroke="rgba(10,20,30,0.5)"/><stop stop-color="transparent"/><path fill="url(#g)"/><circle fill="#123456"/></svg>"##;
        let out = normalize_svg_colors(svg);
        assert!(out.contains(r#"fill="none" stroke="rgb(10,20,30)""#), "{out}");
        assert!(out.contains(r##"stop-color="#FFFFFF""##));
        assert!(out.contains(r##"fill="url(#g)""##));
        assert!(out.contains(r##"fill="#123456""##));
    }

    #[test]
    fn test_check_references() {
        let ok = r##"<svg><defs><symbol id="e-1"/><linearGradient id="g"/></defs><use xlink:href="#e-1"/><rect fill="url(#g)"/></svg>"##;
        assert!(check_references(ok).is_ok());

        let dangling = r##"<svg><rect fill="url(#missing)"/></svg>"##;
        assert!(matches!(
            check_references(dangling),
            Err(PdfError::UnresolvedReference(id)) if id == "missing"
        ));

        let dangling_href = r##"<svg><use href="#nowhere"/></svg>"##;
        assert!(check_references(dangling_href).is_err());
        let dangling_xlink = r##"<svg><use xlink:href="#nowhere"/></svg>"##;
        assert!(check_references(dangling_xlink).is_err());
    }

    #[test]
    fn test_references_in_text_are_ignored() {
        let svg = r##"<svg><text x="1" y="2">url(#a) href=&quot;#b&quot;</text><title> fill=&quot;url(#c)&quot;</title></svg>"##;
        assert!(check_references(svg).is_ok());
    }

    #[test]
    fn test_empty_document() {
        let page = PageGeometry::new(false);
        assert!(matches!(
            render_pages_to_pdf(&[], &page, "x"),
            Err(PdfError::EmptyDocument)
        ));
    }

    #[test]
    fn test_placement() {
        let page = PageGeometry::new(false);
        let full = placement(page.width, page.height, &page);
        assert_eq!(full, [0.0, 0.0, 792.0, 612.0]);

        let square = placement(100.0, 100.0, &page);
        let printable_h = (page.height - 2.0 * page.margin) * PT_PER_PX;
        assert!((square[3] - printable_h).abs() < 1e-9);
        assert!((square[2] - square[3]).abs() < 1e-9);
        assert!((square[0] * 2.0 + square[2] - 792.0).abs() < 1e-9, "centered");
    }

    #[test]
    fn test_page_for_svg() {
        let compact = PageGeometry::new(true);
        let svg = format!(r#"<svg width="{}" height="10"></svg>"#, compact.width);
        assert_eq!(page_for_svg(&svg), compact);
        assert_eq!(page_for_svg(r#"<svg width="1056"></svg>"#), PageGeometry::new(false));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_pdf_magic() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="100" height="50" fill="rgba(255,0,0,0.5)"/></svg>"##;
        let bytes = render_svg_to_pdf(svg, 2025).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_malformed_svg_fails() {
        let result = render_svg_to_pdf("<svg><rect", 2025);
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn test_unsupported_without_feature() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#;
        assert!(matches!(render_svg_to_pdf(svg, 2025), Err(PdfError::Unsupported)));
    }
}
