//! Moon illumination glyphs.
//!
//! A moon is a dark disc with the lit region painted on top and an optional
//! outline. The lit region is bounded by the bright limb (a semicircle) and
//! the terminator, an elliptical arc whose horizontal radius shrinks to zero
//! at the quarters. The shape is drawn with the bright limb facing +x and
//! then rotated so the limb points where the observer sees it.

use crate::astronomy::{
    bright_limb_zenith_angle, ephemeris::noon_utc, moon_illumination, moon_position, phase_label,
    MoonIllumination, MoonPosition,
};
use crate::config::Configuration;
use crate::models::Cell;
use crate::svg::{escape_xml, num};
use crate::theme::ColorScheme;
use chrono::NaiveDate;
use std::fmt::Write;

/// Below this fraction the moon is drawn fully dark.
const NEW_MOON_FRACTION: f64 = 0.01;

/// Above this fraction the moon is drawn fully lit.
const FULL_MOON_FRACTION: f64 = 0.99;

/// Colors and stroke of a moon glyph.
#[derive(Debug, Clone, Copy)]
pub struct MoonStyle<'a> {
    /// Lit part
    pub light: &'a str,
    /// Dark part
    pub dark: &'a str,
    /// Outline
    pub border: &'a str,
    /// Outline width; zero disables the outline
    pub border_width: f64,
}

impl<'a> MoonStyle<'a> {
    /// Style from resolved colors and the configured border width.
    #[must_use]
    pub fn from_scheme(scheme: &'a ColorScheme, border_width: f64) -> Self {
        Self {
            light: &scheme.moon_light,
            dark: &scheme.moon_dark,
            border: &scheme.moon_border,
            border_width,
        }
    }
}

/// Path of the lit region of a disc, bright limb facing +x.
///
/// Returns `None` when nothing is lit.
#[must_use]
pub fn lit_region_path(cx: f64, cy: f64, radius: f64, fraction: f64) -> Option<String> {
    let fraction = fraction.clamp(0.0, 1.0);
    if fraction < NEW_MOON_FRACTION || radius <= 0.0 {
        return None;
    }

    let top = (cx, cy - radius);
    let bottom = (cx, cy + radius);
    let (r, cx_s) = (num(radius), num(cx));

    if fraction > FULL_MOON_FRACTION {
        // Two half arcs: a full circle as a path
        return Some(format!(
            "M {cx_s} {} A {r} {r} 0 1 1 {cx_s} {} A {r} {r} 0 1 1 {cx_s} {} Z",
            num(top.1),
            num(bottom.1),
            num(top.1)
        ));
    }

    let terminator_rx = radius * (1.0 - 2.0 * fraction).abs();
    // Crescent: the terminator bows towards the limb. Gibbous: away from it.
    let sweep = u8::from(fraction > 0.5);
    Some(format!(
        "M {cx_s} {} A {r} {r} 0 0 1 {cx_s} {} A {} {r} 0 0 {sweep} {cx_s} {} Z",
        num(top.1),
        num(bottom.1),
        num(terminator_rx),
        num(top.1)
    ))
}

/// Rotation in degrees that turns the +x limb to the observed bright limb.
///
/// The bright-limb angle is reckoned from the zenith towards the east (screen
/// left), while SVG rotations turn clockwise on screen.
#[must_use]
pub fn limb_rotation_degrees(illumination: &MoonIllumination, position: &MoonPosition) -> f64 {
    -(bright_limb_zenith_angle(illumination, position).to_degrees() + 90.0)
}

/// Draws one moon glyph as a `<g>` element.
#[must_use]
pub fn render_moon(
    cx: f64,
    cy: f64,
    radius: f64,
    illumination: &MoonIllumination,
    position: &MoonPosition,
    style: &MoonStyle<'_>,
) -> String {
    let mut out = String::from(r#"<g class="moon">"#);
    let _ = write!(
        out,
        "<title>{} ({}%)</title>",
        phase_label(illumination.phase),
        (illumination.fraction * 100.0).round()
    );
    let _ = write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
        num(cx),
        num(cy),
        num(radius),
        escape_xml(style.dark)
    );

    if let Some(path) = lit_region_path(cx, cy, radius, illumination.fraction) {
        let rotation = limb_rotation_degrees(illumination, position);
        let _ = write!(
            out,
            r#"<path d="{path}" fill="{}" transform="rotate({} {} {})"/>"#,
            escape_xml(style.light),
            num(rotation),
            num(cx),
            num(cy)
        );
    }

    if style.border_width > 0.0 {
        let _ = write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            num(cx),
            num(cy),
            num(radius),
            escape_xml(style.border),
            num(style.border_width)
        );
    }

    out.push_str("</g>");
    out
}

/// Center and radius of the moon inside a day cell.
///
/// Large moons are centered at the configured percentage offsets, with the
/// diameter and center clamped so the disc stays inside the cell. Small
/// moons sit in the top-right corner.
#[must_use]
pub fn moon_placement(cell: &Cell, config: &Configuration) -> (f64, f64, f64) {
    let moon = &config.moon;
    if config.large_moon() {
        let radius = moon.moon_size.min(cell.min_side() * 0.9) / 2.0;
        let (cx, cy) = cell.point_at_percent(moon.moon_offset_x, moon.moon_offset_y);
        (
            cx.clamp(cell.x + radius, cell.right() - radius),
            cy.clamp(cell.y + radius, cell.bottom() - radius),
            radius,
        )
    } else {
        let radius = (moon.moon_size / 2.0).min(cell.min_side() * 0.2);
        let inset = radius + 2.0;
        (cell.right() - inset, cell.y + inset, radius)
    }
}

/// A standalone moon glyph for `date` as seen from (`latitude`, `longitude`).
///
/// Uses the moon size, border and colors of `config`; the moon is computed
/// for noon UTC.
#[must_use]
pub fn generate_moon_illumination_svg(
    date: NaiveDate,
    cx: f64,
    cy: f64,
    latitude: f64,
    longitude: f64,
    config: &Configuration,
) -> String {
    let config = config.normalized();
    let scheme = ColorScheme::from_config(&config);
    let style = MoonStyle::from_scheme(&scheme, config.moon.moon_border_width);
    let instant = noon_utc(date);
    let illumination = moon_illumination(instant);
    let position = moon_position(instant, latitude.clamp(-90.0, 90.0), longitude);
    render_moon(
        cx,
        cy,
        config.moon.moon_size / 2.0,
        &illumination,
        &position,
        &style,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MoonDisplayMode;

    fn illumination(fraction: f64, phase: f64) -> MoonIllumination {
        MoonIllumination {
            fraction,
            phase,
            angle: -1.0,
        }
    }

    fn position() -> MoonPosition {
        MoonPosition {
            altitude: 0.5,
            azimuth: 0.0,
            parallactic_angle: 0.2,
            distance: 384_400.0,
        }
    }

    const STYLE: MoonStyle<'static> = MoonStyle {
        light: "#FFFFFF",
        dark: "#222222",
        border: "#888888",
        border_width: 1.5,
    };

    #[test]
    fn test_terminator_radius() {
        let quarter = lit_region_path(0.0, 0.0, 10.0, 0.5).unwrap();
        assert!(quarter.contains("A 0 10 0 0 0"), "{quarter}");

        let crescent = lit_region_path(0.0, 0.0, 10.0, 0.25).unwrap();
        assert!(crescent.contains("A 5 10 0 0 0"), "{crescent}");

        let gibbous = lit_region_path(0.0, 0.0, 10.0, 0.75).unwrap();
        assert!(gibbous.contains("A 5 10 0 0 1"), "{gibbous}");
    }

    #[test]
    fn test_new_and_full_extremes() {
        assert!(lit_region_path(0.0, 0.0, 10.0, 0.0).is_none());
        let full = lit_region_path(0.0, 0.0, 10.0, 1.0).unwrap();
        assert!(full.contains("0 1 1"));
    }

    #[test]
    fn test_render_moon_parts() {
        let markup = render_moon(50.0, 50.0, 10.0, &illumination(0.3, 0.2), &position(), &STYLE);
        assert!(markup.starts_with(r#"<g class="moon"><title>Waxing Crescent (30%)</title>"#));
        assert!(markup.contains(r##"fill="#222222""##));
        assert!(markup.contains(r##"fill="#FFFFFF""##));
        assert!(markup.contains(r##"stroke="#888888""##));
        assert!(markup.contains("rotate("));

        let no_border = MoonStyle {
            border_width: 0.0,
            ..STYLE
        };
        let markup = render_moon(50.0, 50.0, 10.0, &illumination(0.0, 0.0), &position(), &no_border);
        assert!(!markup.contains("stroke"));
        assert!(!markup.contains("<path"));
    }

    #[test]
    fn test_rotation_follows_bright_limb() {
        let illum = illumination(0.5, 0.25);
        let mut pos = position();
        pos.parallactic_angle = 0.0;
        let mut illum_up = illum;
        illum_up.angle = 0.0;
        // Limb straight up: rotate the +x limb by -90°
        assert!((limb_rotation_degrees(&illum_up, &pos) + 90.0).abs() < 1e-9);
        pos.parallactic_angle = 0.5;
        assert!((limb_rotation_degrees(&illum_up, &pos) - (0.5f64.to_degrees() - 90.0)).abs() < 1e-9);
    }

    #[test]
    fn test_hemispheres_differ() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let config = Configuration::for_year(2025);
        let north = generate_moon_illumination_svg(date, 20.0, 20.0, 51.5, 0.0, &config);
        let south = generate_moon_illumination_svg(date, 20.0, 20.0, -33.9, 0.0, &config);
        assert_ne!(north, south);
        assert!(north.contains(r#"r="10""#));
    }

    #[test]
    fn test_placement() {
        let cell = Cell::new(0.0, 0.0, 40.0, 30.0);
        let mut config = Configuration::for_year(2025);
        config.moon.moon_display_mode = MoonDisplayMode::Illumination;
        config.moon.moon_size = 100.0;
        let (cx, cy, r) = moon_placement(&cell, &config);
        assert!((r - 13.5).abs() < 1e-9, "clamped to 0.9 of the short side");
        assert!(cx - r >= 0.0 && cx + r <= 40.0);
        assert!(cy - r >= 0.0 && cy + r <= 30.0);

        config.moon.moon_size = 10.0;
        let (cx, cy, r) = moon_placement(&cell, &config);
        assert_eq!(r, 5.0);
        assert!(cx > 20.0 && cy < 15.0, "small moons sit top-right");
    }
}
