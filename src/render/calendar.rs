//! Calendar assembler.
//!
//! Combines layout, colors, astronomy, holidays and glyphs into one SVG
//! document. Drawing order, back to front: page background, year title,
//! month labels, day names, day cells (fill, moon, events, day number,
//! Hebrew date), grid, week numbers. Sprite symbols used by any cell are
//! collected while drawing and emitted once in `<defs>`.

use super::layout::{CalendarLayout, DayCell};
use super::moon::{moon_placement, render_moon, MoonStyle};
use crate::astronomy::{
    ephemeris::noon_utc, gregorian_to_hebrew, moon_illumination, moon_position, should_show_moon,
    MoonCalendar,
};
use crate::config::Configuration;
use crate::constants::TRANSPARENT_FILL;
use crate::error::Result;
use crate::glyph::{
    render_emoji, render_event_text, wrap_title, EmojiRender, EventTextStyle, SpriteLookup,
    SymbolDefs,
};
use crate::holidays::{holidays_for_year, Holiday};
use crate::locale::{LocaleNames, LocaleProvider};
use crate::models::{Cell, CustomDateEntry, DisplaySettings, MoonDisplayMode, TextAlign};
use crate::svg::{escape_xml, num, rect, rotate_attr, text, TextAttrs, SVG_NS, XLINK_NS};
use crate::theme::{
    is_weekend, weekend_occurrence_index, year_gradient, ColorScheme, YEAR_GRADIENT_ID,
};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Line height of wrapped event titles, as a multiple of the font size.
const EVENT_LINE_HEIGHT: f64 = 1.15;

/// One thing to draw in a day cell: a holiday or a custom date.
#[derive(Debug, Clone, Copy)]
struct DayEvent<'a> {
    emoji: &'a str,
    title: Option<&'a str>,
    settings: Option<&'a DisplaySettings>,
    color: &'a str,
}

/// Renders one configuration into an SVG document.
pub struct CalendarRenderer<'a> {
    config: Configuration,
    layout: CalendarLayout,
    scheme: ColorScheme,
    names: &'a LocaleNames,
    sprites: &'a dyn SpriteLookup,
    moons: MoonCalendar,
    holidays: BTreeMap<NaiveDate, Vec<Holiday>>,
    defs: SymbolDefs,
}

impl<'a> CalendarRenderer<'a> {
    /// Validates the configuration and prepares everything the drawing needs.
    pub fn new(
        config: &Configuration,
        sprites: &'a dyn SpriteLookup,
        locales: &'a dyn LocaleProvider,
    ) -> Result<Self> {
        config.validate()?;
        let config = config.normalized();

        let layout = CalendarLayout::compute(&config);
        let scheme = ColorScheme::from_config(&config);
        let names = locales.names(&config.locale);
        let moons = if config.moon.moon_display_mode != MoonDisplayMode::None {
            MoonCalendar::for_year(config.year)
        } else {
            MoonCalendar::default()
        };
        let holidays =
            holidays_for_year(config.year, config.holiday_sets.iter().map(String::as_str));

        tracing::debug!(
            "Rendering {} ({} layout, theme '{}', {} holiday dates)",
            config.year,
            config.layout_style,
            scheme.theme.id,
            holidays.len()
        );

        Ok(Self {
            config,
            layout,
            scheme,
            names,
            sprites,
            moons,
            holidays,
            defs: SymbolDefs::default(),
        })
    }

    /// The computed layout.
    #[must_use]
    pub fn layout(&self) -> &CalendarLayout {
        &self.layout
    }

    /// Draws the whole document.
    #[must_use]
    pub fn render(mut self) -> String {
        let mut body = String::with_capacity(256 * 1024);

        let page = self.layout.page;
        body.push_str(&rect(0.0, 0.0, page.width, page.height, &self.scheme.background));
        self.draw_title(&mut body);
        self.draw_month_labels(&mut body);
        self.draw_day_names(&mut body);

        body.push_str(r#"<g class="days">"#);
        let custom_dates: BTreeMap<NaiveDate, Vec<CustomDateEntry>> = self
            .config
            .custom_dates_for_year()
            .into_iter()
            .map(|(date, entries)| (date, entries.into_iter().cloned().collect()))
            .collect();
        let days = self.layout.days.clone();
        for day in &days {
            let custom = custom_dates.get(&day.date).map_or(&[][..], Vec::as_slice);
            let markup = self.draw_day(day, custom);
            body.push_str(&markup);
        }
        body.push_str("</g>");

        if self.config.show_grid {
            self.draw_grid(&mut body);
        }
        if self.config.show_week_numbers {
            self.draw_week_numbers(&mut body);
        }

        let mut out = String::with_capacity(body.len() + 4096);
        let _ = write!(
            out,
            r#"<svg xmlns="{SVG_NS}" xmlns:xlink="{XLINK_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(page.width),
            h = num(page.height)
        );
        let _ = write!(out, "<title>{}</title>", self.config.year);
        out.push_str(&self.defs_markup());
        out.push_str(&body);
        out.push_str("</svg>");

        tracing::debug!(
            "Rendered {} bytes with {} sprite symbols",
            out.len(),
            self.defs.len()
        );
        out
    }

    fn defs_markup(&self) -> String {
        let gradient = self.scheme.uses_year_gradient();
        if !gradient && self.defs.is_empty() {
            return String::new();
        }

        let mut out = String::from("<defs>");
        if gradient {
            let _ = write!(
                out,
                r#"<linearGradient id="{YEAR_GRADIENT_ID}" x1="0%" y1="0%" x2="100%" y2="0%">"#
            );
            for stop in year_gradient() {
                let _ = write!(
                    out,
                    r#"<stop offset="{}%" stop-color="{}"/>"#,
                    num(stop.offset),
                    stop.color
                );
            }
            out.push_str("</linearGradient>");
        }
        out.push_str(&self.defs.to_markup());
        out.push_str("</defs>");
        out
    }

    fn draw_title(&self, out: &mut String) {
        let (x, y) = self.layout.title;
        let attrs = TextAttrs {
            bold: true,
            ..text_attrs(self.layout.fonts.title, &self.scheme.year)
        };
        out.push_str(&text(x, y, &self.config.year.to_string(), attrs, ""));
    }

    fn draw_month_labels(&self, out: &mut String) {
        out.push_str(r#"<g class="months">"#);
        for label in &self.layout.month_labels {
            let attrs = TextAttrs {
                anchor: label.anchor,
                bold: true,
                ..text_attrs(self.layout.fonts.month, &self.scheme.month)
            };
            let rotation = rotate_attr(label.rotation, label.x, label.y);
            out.push_str(&text(
                label.x,
                label.y,
                self.names.month(label.month0),
                attrs,
                &rotation,
            ));
        }
        out.push_str("</g>");
    }

    fn draw_day_names(&self, out: &mut String) {
        if self.layout.day_names.is_empty() {
            return;
        }
        out.push_str(r#"<g class="day-names">"#);
        let attrs = text_attrs(self.layout.fonts.day_name, &self.scheme.day_name);
        for label in &self.layout.day_names {
            out.push_str(&text(
                label.x,
                label.y,
                self.names.weekday(label.weekday),
                attrs,
                "",
            ));
        }
        if let Some((x, y)) = self.layout.week_header {
            out.push_str(&text(x, y, &self.names.week_label, attrs, ""));
        }
        out.push_str("</g>");
    }

    fn draw_day(&mut self, day: &DayCell, custom: &[CustomDateEntry]) -> String {
        let date = day.date;
        let cell = day.cell;
        let scale = self.layout.page.scale;
        let mut out = format!(r#"<g class="day" data-date="{date}">"#);

        let weekend = is_weekend(date);
        let fill = self.scheme.cell_background(
            date,
            weekend,
            weekend_occurrence_index(date).unwrap_or(0),
        );
        if fill != TRANSPARENT_FILL {
            out.push_str(&rect(cell.x, cell.y, cell.width, cell.height, &fill));
        }

        let moon_drawn = should_show_moon(self.config.moon.moon_display_mode, date, &self.moons);
        if moon_drawn {
            out.push_str(&self.draw_moon(date, &cell));
        }

        let holidays = self.holidays.get(&date).cloned().unwrap_or_default();
        let holiday_color = self.scheme.holiday.clone();
        let custom_color = self.scheme.custom_date.clone();
        let events: Vec<DayEvent<'_>> = holidays
            .iter()
            .map(|holiday| DayEvent {
                emoji: holiday.emoji,
                title: Some(holiday.title),
                settings: None,
                color: &holiday_color,
            })
            .chain(custom.iter().map(|entry| DayEvent {
                emoji: &entry.emoji,
                title: entry.title_text(),
                settings: entry.display_settings.as_ref(),
                color: &custom_color,
            }))
            .collect();
        out.push_str(&self.draw_events(&cell, &events));

        if self.config.show_day_numbers {
            let color = if !custom.is_empty() {
                &self.scheme.custom_date
            } else if !holidays.is_empty() {
                &self.scheme.holiday
            } else {
                &self.scheme.day_text
            };
            let font = self.layout.fonts.day_number;
            let inset = 3.0 * scale;
            // A large moon takes the top-left of the cell; the number moves right
            let (x, anchor) = if moon_drawn && self.config.large_moon() {
                (cell.right() - inset, "end")
            } else {
                (cell.x + inset, "start")
            };
            let attrs = TextAttrs {
                anchor,
                bold: !holidays.is_empty() || !custom.is_empty(),
                ..text_attrs(font, color)
            };
            let y = cell.y + inset + font * 0.8;
            out.push_str(&text(x, y, &date.day().to_string(), attrs, ""));
        }

        if self.config.show_hebrew_dates {
            let hebrew = gregorian_to_hebrew(date);
            let label = format!("{} {}", hebrew.day, hebrew.month_name());
            let attrs = TextAttrs {
                anchor: "end",
                ..text_attrs(self.layout.fonts.hebrew, &self.scheme.day_name)
            };
            out.push_str(&text(
                cell.right() - 2.0 * scale,
                cell.bottom() - 2.0 * scale,
                &label,
                attrs,
                "",
            ));
        }

        out.push_str("</g>");
        out
    }

    fn draw_moon(&self, date: NaiveDate, cell: &Cell) -> String {
        let (cx, cy, radius) = moon_placement(cell, &self.config);
        let instant = noon_utc(date);
        let illumination = moon_illumination(instant);
        let moon = &self.config.moon;
        let position = moon_position(instant, moon.latitude, moon.longitude);
        let style = MoonStyle::from_scheme(&self.scheme, self.config.moon.moon_border_width);
        render_moon(cx, cy, radius, &illumination, &position, &style)
    }

    fn draw_events(&mut self, cell: &Cell, events: &[DayEvent<'_>]) -> String {
        let mode = self.config.event_display_mode;
        let mut out = String::new();
        if events.is_empty() {
            return out;
        }

        if mode.shows_emoji() {
            let size = if mode.is_large() {
                cell.min_side() * 0.5
            } else {
                cell.min_side() * 0.3
            };
            for (i, event) in events.iter().enumerate() {
                // Later glyphs step right so they don't cover each other
                let shift = (i as f64 * size).min(cell.width - size).max(0.0);
                let slot = Cell::new(cell.x + shift, cell.y, cell.width - shift, cell.height);
                let request = EmojiRender {
                    emoji: event.emoji,
                    cell: &slot,
                    anchor: self.config.emoji_position,
                    size,
                    settings: event.settings,
                    emoji_font: self.config.emoji_font.as_deref(),
                    text_color: &self.scheme.day_text,
                };
                out.push_str(&render_emoji(&request, self.sprites, &mut self.defs));
            }
        }

        if mode.shows_text() {
            let titled = events
                .iter()
                .find(|e| e.title.is_some_and(|t| !t.trim().is_empty()));
            if let Some(event) = titled {
                out.push_str(&self.draw_event_title(cell, event));
            }
        }
        out
    }

    fn draw_event_title(&self, cell: &Cell, event: &DayEvent<'_>) -> String {
        let Some(title) = event.title else {
            return String::new();
        };
        let scale = self.layout.page.scale;
        let style = EventTextStyle::new(self.layout.fonts.event, event.color)
            .with_settings(event.settings);

        let inset = 2.0 * scale;
        let x = match style.align {
            TextAlign::Left => cell.x + inset,
            TextAlign::Center => cell.center().0,
            TextAlign::Right => cell.right() - inset,
        };
        let lines = if style.wrap {
            wrap_title(title).map_or(1, |lines| lines.len())
        } else {
            1
        };
        let block = (lines - 1) as f64 * style.font_size * EVENT_LINE_HEIGHT;
        let y = (cell.bottom() - inset - block).max(cell.y + style.font_size);
        render_event_text(title, x, y, &style)
    }

    fn draw_grid(&self, out: &mut String) {
        let stroke = escape_xml(&self.scheme.grid);
        let width = num(0.5 * self.layout.page.scale);
        out.push_str(&format!(
            r#"<g class="grid" fill="none" stroke="{stroke}" stroke-width="{width}">"#
        ));
        for slot in &self.layout.slots {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
                num(slot.x),
                num(slot.y),
                num(slot.width),
                num(slot.height)
            );
        }
        out.push_str("</g>");
    }

    fn draw_week_numbers(&self, out: &mut String) {
        out.push_str(r#"<g class="week-numbers">"#);
        let attrs = text_attrs(self.layout.fonts.week_number, &self.scheme.day_name);
        for label in &self.layout.week_numbers {
            out.push_str(&text(
                label.x,
                label.y,
                &label.number.to_string(),
                attrs,
                "",
            ));
        }
        out.push_str("</g>");
    }
}

fn text_attrs(size: f64, fill: &str) -> TextAttrs<'_> {
    TextAttrs {
        size,
        fill,
        anchor: "middle",
        bold: false,
        family: crate::constants::TEXT_FONT_FAMILY,
    }
}

/// Renders `config` with the given sprite and locale sources.
pub fn render_calendar(
    config: &Configuration,
    sprites: &dyn SpriteLookup,
    locales: &dyn LocaleProvider,
) -> Result<String> {
    Ok(CalendarRenderer::new(config, sprites, locales)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::SpriteCache;
    use crate::locale::LocaleTable;
    use crate::models::EventDisplayMode;

    fn render(config: &Configuration) -> String {
        let sprites = SpriteCache::load().unwrap();
        let locales = LocaleTable::load().unwrap();
        render_calendar(config, &sprites, &locales).unwrap()
    }

    #[test]
    fn test_document_wrapper() {
        let svg = render(&Configuration::for_year(2025));
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink""#
        ));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(">2025</text>"));
        assert!(svg.contains(">January</text>"));
        assert!(svg.contains(">Sun</text>"));
    }

    #[test]
    fn test_invalid_year_rejected() {
        let sprites = SpriteCache::default();
        let locales = LocaleTable::default();
        assert!(render_calendar(&Configuration::for_year(999), &sprites, &locales).is_err());
    }

    #[test]
    fn test_every_day_present() {
        let svg = render(&Configuration::for_year(2024));
        assert_eq!(svg.matches(r#"<g class="day""#).count(), 366);
        assert!(svg.contains(r#"data-date="2024-02-29""#));
    }

    #[test]
    fn test_toggles() {
        let mut config = Configuration::for_year(2025);
        config.show_grid = false;
        config.show_day_names = false;
        let svg = render(&config);
        assert!(!svg.contains(r#"class="grid""#));
        assert!(!svg.contains(r#"class="day-names""#));
        assert!(!svg.contains(r#"class="week-numbers""#));

        config.show_week_numbers = true;
        config.show_grid = true;
        let svg = render(&config);
        assert!(svg.contains(r#"class="grid""#));
        assert!(svg.contains(r#"class="week-numbers""#));
    }

    #[test]
    fn test_localized_names() {
        let mut config = Configuration::for_year(2025);
        config.locale = "de".to_string();
        let svg = render(&config);
        assert!(svg.contains(">März</text>"));
        assert!(svg.contains(">Mo</text>"));
    }

    #[test]
    fn test_custom_dates_and_sprites_in_defs() {
        let mut config = Configuration::for_year(2025);
        config.custom_dates.insert(
            "2025-07-04".to_string(),
            CustomDateEntry::new("🎆", "Fireworks!").into(),
        );
        config.event_display_mode = EventDisplayMode::LargeText;
        let svg = render(&config);
        assert!(svg.contains(r#"<symbol id="emoji-1f386""#));
        assert!(svg.contains(r##"xlink:href="#emoji-1f386""##));
        assert!(svg.contains(">Fireworks!</text>"));
        assert_eq!(svg.matches(r#"<symbol id="emoji-1f386""#).count(), 1);
    }

    #[test]
    fn test_event_mode_none_hides_events() {
        let mut config = Configuration::for_year(2025);
        config.holiday_sets.insert("us".to_string());
        config.event_display_mode = EventDisplayMode::None;
        let svg = render(&config);
        assert!(!svg.contains("<use "));
        assert!(!svg.contains("Thanksgiving"));
    }

    #[test]
    fn test_holiday_day_number_color() {
        let mut config = Configuration::for_year(2025);
        config.holiday_sets.insert("us".to_string());
        let svg = render(&config);
        let day = svg
            .split(r#"<g class="day" data-date="2025-07-04">"#)
            .nth(1)
            .unwrap();
        let day = &day[..day.find(r#"<g class="day""#).unwrap()];
        assert!(day.contains(r##"fill="#ff5252""##), "{day}");
    }

    #[test]
    fn test_moons_follow_display_mode() {
        let mut config = Configuration::for_year(2025);
        config.moon.moon_display_mode = MoonDisplayMode::FullOnly;
        let svg = render(&config);
        let full = svg.matches(r#"<g class="moon">"#).count();
        assert!((12..=13).contains(&full), "{full}");

        config.moon.moon_display_mode = MoonDisplayMode::Illumination;
        let svg = render(&config);
        assert_eq!(svg.matches(r#"<g class="moon">"#).count(), 365);
    }

    #[test]
    fn test_rainbow_theme_uses_gradient() {
        let mut config = Configuration::for_year(2025);
        config.theme = "rainbowDays1".to_string();
        let svg = render(&config);
        assert!(svg.contains(r#"<linearGradient id="yearGradient""#));
        assert!(svg.contains("url(#yearGradient)"));
    }

    #[test]
    fn test_hebrew_dates() {
        let mut config = Configuration::for_year(2025);
        config.show_hebrew_dates = true;
        let svg = render(&config);
        assert!(svg.contains(">1 Tevet</text>"));
    }
}
