//! Page geometry and per-day cells.
//!
//! # Coordinate System
//!
//! All values are SVG user units (CSS px, 96 per inch) with the origin in the
//! top-left corner of the page. Compact mode multiplies every length,
//! including font sizes, by [`COMPACT_SCALE`].
//!
//! # Layout Styles
//!
//! - `default`: 12 month blocks, 4 columns × 3 rows. Each block has a title
//!   band, an optional day-name band, an optional week-number column and a
//!   7 × 6 grid of slots; days before the 1st and after the last day of the
//!   month stay blank so weekdays line up.
//! - `weekday-grid`: 7 weekday columns spanning the page and one row per
//!   week of the year (53 or 54), with month labels in a left gutter.

use crate::config::Configuration;
use crate::constants::{
    COMPACT_SCALE, MARGIN_INCHES, PAGE_HEIGHT_INCHES, PAGE_WIDTH_INCHES, PX_PER_INCH,
};
use crate::models::{Cell, LayoutStyle};
use chrono::{Datelike, NaiveDate, Weekday};

/// Rows of slots in a month block.
const MONTH_ROWS: u32 = 6;

/// Month blocks per row in the default layout.
const BLOCK_COLUMNS: u32 = 4;

/// Month blocks per column in the default layout.
const BLOCK_ROWS: u32 = 3;

/// Page size and printable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width in px
    pub width: f64,
    /// Page height in px
    pub height: f64,
    /// Margin on every edge in px
    pub margin: f64,
    /// Uniform scale (1 or the compact factor)
    pub scale: f64,
}

impl PageGeometry {
    /// Geometry for a full-size or compact page.
    #[must_use]
    pub fn new(compact: bool) -> Self {
        let scale = if compact { COMPACT_SCALE } else { 1.0 };
        Self {
            width: PAGE_WIDTH_INCHES * PX_PER_INCH * scale,
            height: PAGE_HEIGHT_INCHES * PX_PER_INCH * scale,
            margin: MARGIN_INCHES * PX_PER_INCH * scale,
            scale,
        }
    }

    /// The area inside the margins.
    #[must_use]
    pub fn printable(&self) -> Cell {
        Cell::new(
            self.margin,
            self.margin,
            self.width - 2.0 * self.margin,
            self.height - 2.0 * self.margin,
        )
    }
}

/// Font sizes of one render, already scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Year title
    pub title: f64,
    /// Month labels
    pub month: f64,
    /// Day-name band
    pub day_name: f64,
    /// Day numbers
    pub day_number: f64,
    /// Week numbers
    pub week_number: f64,
    /// Event titles
    pub event: f64,
    /// Hebrew dates
    pub hebrew: f64,
}

impl FontMetrics {
    fn scaled(scale: f64, style: LayoutStyle) -> Self {
        let day_number = match style {
            LayoutStyle::Default => 9.0,
            LayoutStyle::WeekdayGrid => 8.0,
        };
        Self {
            title: 36.0 * scale,
            month: 14.0 * scale,
            day_name: 9.0 * scale,
            day_number: day_number * scale,
            week_number: 7.0 * scale,
            event: 6.5 * scale,
            hebrew: 5.0 * scale,
        }
    }
}

/// A month label and where it goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthLabel {
    /// Month, 0 = January
    pub month0: u32,
    /// Anchor x
    pub x: f64,
    /// Anchor y (baseline)
    pub y: f64,
    /// `text-anchor` value
    pub anchor: &'static str,
    /// Rotation about the anchor in degrees
    pub rotation: f64,
}

/// A weekday name in a day-name band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayNameLabel {
    /// Weekday
    pub weekday: Weekday,
    /// Center x
    pub x: f64,
    /// Baseline y
    pub y: f64,
}

/// A week number next to a row of cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekNumberLabel {
    /// Week number
    pub number: u32,
    /// Center x
    pub x: f64,
    /// Baseline y
    pub y: f64,
}

/// The rectangle of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCell {
    /// The day
    pub date: NaiveDate,
    /// Where it is drawn
    pub cell: Cell,
}

/// Everything the assembler positions, computed once per render.
#[derive(Debug, Clone)]
pub struct CalendarLayout {
    /// Page size
    pub page: PageGeometry,
    /// Style the geometry was computed for
    pub style: LayoutStyle,
    /// Font sizes
    pub fonts: FontMetrics,
    /// Year title anchor (centered)
    pub title: (f64, f64),
    /// Month labels, January first
    pub month_labels: Vec<MonthLabel>,
    /// Day-name labels (empty when day names are off)
    pub day_names: Vec<DayNameLabel>,
    /// Header of the week-number column in the weekday grid
    pub week_header: Option<(f64, f64)>,
    /// Week numbers (empty when week numbers are off)
    pub week_numbers: Vec<WeekNumberLabel>,
    /// One cell per day of the year, in date order
    pub days: Vec<DayCell>,
    /// Every grid slot, blank ones included
    pub slots: Vec<Cell>,
}

impl CalendarLayout {
    /// Computes the layout for a configuration.
    #[must_use]
    pub fn compute(config: &Configuration) -> Self {
        let page = PageGeometry::new(config.compact_mode);
        let fonts = FontMetrics::scaled(page.scale, config.layout_style);
        let printable = page.printable();
        let title_height = 48.0 * page.scale;
        let title = (
            printable.x + printable.width / 2.0,
            printable.y + fonts.title,
        );

        let mut layout = Self {
            page,
            style: config.layout_style,
            fonts,
            title,
            month_labels: Vec::with_capacity(12),
            day_names: Vec::new(),
            week_header: None,
            week_numbers: Vec::new(),
            days: Vec::with_capacity(366),
            slots: Vec::new(),
        };

        let body = Cell::new(
            printable.x,
            printable.y + title_height,
            printable.width,
            printable.height - title_height,
        );
        match config.layout_style {
            LayoutStyle::Default => layout.month_blocks(config, body),
            LayoutStyle::WeekdayGrid => layout.weekday_grid(config, body),
        }
        layout
    }

    /// The cell of a date, if the date belongs to the laid-out year.
    #[must_use]
    pub fn cell_for(&self, date: NaiveDate) -> Option<&Cell> {
        let first = self.days.first()?.date;
        let index = usize::try_from((date - first).num_days()).ok()?;
        self.days
            .get(index)
            .filter(|day| day.date == date)
            .map(|day| &day.cell)
    }

    fn month_blocks(&mut self, config: &Configuration, body: Cell) {
        let scale = self.page.scale;
        let gap = 12.0 * scale;
        let month_band = 20.0 * scale;
        let day_name_band = if config.show_day_names {
            14.0 * scale
        } else {
            0.0
        };
        let week_column = if config.show_week_numbers {
            16.0 * scale
        } else {
            0.0
        };

        let block_width =
            (body.width - gap * f64::from(BLOCK_COLUMNS - 1)) / f64::from(BLOCK_COLUMNS);
        let block_height = (body.height - gap * f64::from(BLOCK_ROWS - 1)) / f64::from(BLOCK_ROWS);
        let cell_width = (block_width - week_column) / 7.0;
        let cell_height = (block_height - month_band - day_name_band) / f64::from(MONTH_ROWS);
        let week_start = config.week_start();

        for month0 in 0..12 {
            let block_x = body.x + f64::from(month0 % BLOCK_COLUMNS) * (block_width + gap);
            let block_y = body.y + f64::from(month0 / BLOCK_COLUMNS) * (block_height + gap);
            let grid_x = block_x + week_column;
            let grid_y = block_y + month_band + day_name_band;

            self.month_labels.push(if config.rotate_month_names {
                MonthLabel {
                    month0,
                    x: block_x - 3.0 * scale,
                    y: block_y + block_height / 2.0,
                    anchor: "middle",
                    rotation: -90.0,
                }
            } else {
                MonthLabel {
                    month0,
                    x: block_x + block_width / 2.0,
                    y: block_y + month_band * 0.75,
                    anchor: "middle",
                    rotation: 0.0,
                }
            });

            if config.show_day_names {
                let name_baseline = day_name_baseline(config);
                for column in 0..7 {
                    self.day_names.push(DayNameLabel {
                        weekday: weekday_at_column(week_start, column),
                        x: grid_x + (f64::from(column) + 0.5) * cell_width,
                        y: block_y + month_band + day_name_band * name_baseline,
                    });
                }
            }

            for row in 0..MONTH_ROWS {
                for column in 0..7 {
                    self.slots.push(Cell::new(
                        grid_x + f64::from(column) * cell_width,
                        grid_y + f64::from(row) * cell_height,
                        cell_width,
                        cell_height,
                    ));
                }
            }

            let offset = column_of(first_of_month(config.year, month0 + 1), week_start);
            let mut week_rows_seen = Vec::new();
            for date in month_days(config.year, month0 + 1) {
                let slot = offset + date.day0();
                let (row, column) = (slot / 7, slot % 7);
                let cell = Cell::new(
                    grid_x + f64::from(column) * cell_width,
                    grid_y + f64::from(row) * cell_height,
                    cell_width,
                    cell_height,
                );
                self.days.push(DayCell { date, cell });

                if config.show_week_numbers && !week_rows_seen.contains(&row) {
                    week_rows_seen.push(row);
                    self.week_numbers.push(WeekNumberLabel {
                        number: week_number(date, week_start),
                        x: block_x + week_column / 2.0,
                        y: cell.y + cell_height * 0.6,
                    });
                }
            }
        }
    }

    fn weekday_grid(&mut self, config: &Configuration, body: Cell) {
        let scale = self.page.scale;
        let gutter = 60.0 * scale;
        let header = if config.show_day_names {
            16.0 * scale
        } else {
            0.0
        };
        let week_column = if config.show_week_numbers {
            24.0 * scale
        } else {
            0.0
        };
        let week_start = config.week_start();
        let rows = week_rows_in_year(config.year, week_start);

        let grid_x = body.x + gutter + week_column;
        let grid_y = body.y + header;
        let cell_width = (body.width - gutter - week_column) / 7.0;
        let cell_height = (body.height - header) / f64::from(rows);

        if config.show_day_names {
            let name_baseline = day_name_baseline(config);
            for column in 0..7 {
                self.day_names.push(DayNameLabel {
                    weekday: weekday_at_column(week_start, column),
                    x: grid_x + (f64::from(column) + 0.5) * cell_width,
                    y: body.y + header * name_baseline,
                });
            }
            if config.show_week_numbers {
                self.week_header = Some((
                    body.x + gutter + week_column / 2.0,
                    body.y + header * 0.75,
                ));
            }
        }

        for row in 0..rows {
            for column in 0..7 {
                self.slots.push(Cell::new(
                    grid_x + f64::from(column) * cell_width,
                    grid_y + f64::from(row) * cell_height,
                    cell_width,
                    cell_height,
                ));
            }
        }

        let jan1_offset = column_of(first_of_month(config.year, 1), week_start);
        let mut last_row = None;
        for month in 1..=12 {
            for date in month_days(config.year, month) {
                let slot = jan1_offset + date.ordinal0();
                let (row, column) = (slot / 7, slot % 7);
                let cell = Cell::new(
                    grid_x + f64::from(column) * cell_width,
                    grid_y + f64::from(row) * cell_height,
                    cell_width,
                    cell_height,
                );

                if date.day() == 1 {
                    let label_y = cell.y + cell_height * 0.75;
                    self.month_labels.push(if config.rotate_month_names {
                        MonthLabel {
                            month0: date.month0(),
                            x: body.x + gutter / 2.0,
                            y: cell.y + cell_height * 2.0,
                            anchor: "middle",
                            rotation: -90.0,
                        }
                    } else {
                        MonthLabel {
                            month0: date.month0(),
                            x: body.x + gutter - 6.0 * scale,
                            y: label_y,
                            anchor: "end",
                            rotation: 0.0,
                        }
                    });
                }

                if config.show_week_numbers && last_row != Some(row) {
                    last_row = Some(row);
                    self.week_numbers.push(WeekNumberLabel {
                        number: week_number(date, week_start),
                        x: body.x + gutter + week_column / 2.0,
                        y: cell.y + cell_height * 0.75,
                    });
                }

                self.days.push(DayCell { date, cell });
            }
        }
    }
}

/// Column (0..7) of a date when weeks start on `week_start`.
#[must_use]
pub fn column_of(date: NaiveDate, week_start: Weekday) -> u32 {
    (date.weekday().num_days_from_sunday() + 7 - week_start.num_days_from_sunday()) % 7
}

/// Weekday shown in a column when weeks start on `week_start`.
#[must_use]
pub fn weekday_at_column(week_start: Weekday, column: u32) -> Weekday {
    let mut day = week_start;
    for _ in 0..column % 7 {
        day = day.succ();
    }
    day
}

/// Week number of a date.
///
/// Monday-start weeks use ISO 8601 numbering. For any other start day,
/// week 1 is the week containing January 1.
#[must_use]
pub fn week_number(date: NaiveDate, week_start: Weekday) -> u32 {
    if week_start == Weekday::Mon {
        return date.iso_week().week();
    }
    let jan1_offset = column_of(first_of_month(date.year(), 1), week_start);
    (date.ordinal0() + jan1_offset) / 7 + 1
}

/// Baseline of day-name labels as a fraction of their band's height.
///
/// Large moons sit at the top of each cell, so the labels move up and away
/// from the first row of cells.
fn day_name_baseline(config: &Configuration) -> f64 {
    if config.large_moon() {
        0.55
    } else {
        0.75
    }
}

/// Number of week rows the weekday grid needs for a year (53 or 54).
#[must_use]
pub fn week_rows_in_year(year: i32, week_start: Weekday) -> u32 {
    let days = if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    };
    let offset = column_of(first_of_month(year, 1), week_start);
    (offset + days).div_ceil(7)
}

/// Number of days in a month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    month_days(year, month).count() as u32
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn month_days(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    (1..=31).map_while(move |day| NaiveDate::from_ymd_opt(year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config(year: i32) -> Configuration {
        Configuration::for_year(year)
    }

    #[test]
    fn test_printable_area_inside_page() {
        for compact in [false, true] {
            let page = PageGeometry::new(compact);
            let printable = page.printable();
            assert!(printable.width < page.width);
            assert!(printable.height < page.height);
        }
        assert_eq!(PageGeometry::new(false).width, 1056.0);
        assert_eq!(PageGeometry::new(false).height, 816.0);
    }

    #[test]
    fn test_one_cell_per_day() {
        let leap = CalendarLayout::compute(&config(2024));
        assert_eq!(leap.days.len(), 366);
        assert!(leap.cell_for(date(2024, 2, 29)).is_some());
        let common = CalendarLayout::compute(&config(2025));
        assert_eq!(common.days.len(), 365);
        assert!(common.cell_for(date(2024, 12, 31)).is_none());
    }

    #[test]
    fn test_cells_stay_on_printable_area() {
        for style in [LayoutStyle::Default, LayoutStyle::WeekdayGrid] {
            for compact in [false, true] {
                let mut cfg = config(2026);
                cfg.layout_style = style;
                cfg.compact_mode = compact;
                cfg.show_week_numbers = true;
                let layout = CalendarLayout::compute(&cfg);
                let printable = layout.page.printable();
                for day in &layout.days {
                    assert!(printable.contains(&day.cell), "{style} {:?}", day.date);
                }
            }
        }
    }

    #[test]
    fn test_default_layout_aligns_weekdays() {
        // 2025-06-01 is a Sunday: first slot of the block when weeks start Sunday
        let layout = CalendarLayout::compute(&config(2025));
        let june1 = layout.cell_for(date(2025, 6, 1)).unwrap();
        let june2 = layout.cell_for(date(2025, 6, 2)).unwrap();
        let june8 = layout.cell_for(date(2025, 6, 8)).unwrap();
        assert!(june2.x > june1.x);
        assert_eq!(june8.x, june1.x);
        assert!(june8.y > june1.y);

        let mut monday = config(2025);
        monday.first_day_of_week = 1;
        let shifted = CalendarLayout::compute(&monday);
        let june1_mon = shifted.cell_for(date(2025, 6, 1)).unwrap();
        let june2_mon = shifted.cell_for(date(2025, 6, 2)).unwrap();
        assert!(june1_mon.x > june2_mon.x, "Sunday moves to the last column");
    }

    #[test]
    fn test_compact_scales_uniformly() {
        let full = CalendarLayout::compute(&config(2025));
        let mut cfg = config(2025);
        cfg.compact_mode = true;
        let compact = CalendarLayout::compute(&cfg);
        let a = full.days[40].cell;
        let b = compact.days[40].cell;
        assert!((b.width - a.width * COMPACT_SCALE).abs() < 1e-9);
        assert!((compact.fonts.title - full.fonts.title * COMPACT_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_leaves_cells_alone() {
        let plain = CalendarLayout::compute(&config(2025));
        let mut cfg = config(2025);
        cfg.rotate_month_names = true;
        let rotated = CalendarLayout::compute(&cfg);
        assert_eq!(plain.days, rotated.days);
        assert!(rotated.month_labels.iter().all(|l| l.rotation == -90.0));
        assert!(plain.month_labels.iter().all(|l| l.rotation == 0.0));
    }

    #[test]
    fn test_weekday_grid_rows() {
        // 2023 starts on a Sunday: 365 days fill 53 rows exactly
        assert_eq!(week_rows_in_year(2023, Weekday::Sun), 53);
        // 2000 is a leap year starting on a Saturday: 54 rows
        assert_eq!(week_rows_in_year(2000, Weekday::Sun), 54);
        assert_eq!(week_rows_in_year(2022, Weekday::Sun), 53);

        let mut cfg = config(2025);
        cfg.layout_style = LayoutStyle::WeekdayGrid;
        let layout = CalendarLayout::compute(&cfg);
        assert_eq!(layout.month_labels.len(), 12);
        assert_eq!(layout.day_names.len(), 7);
        let rows = week_rows_in_year(2025, Weekday::Sun) as usize;
        assert_eq!(layout.slots.len(), rows * 7);
    }

    #[test]
    fn test_large_moons_lift_day_names() {
        for layout_style in [LayoutStyle::Default, LayoutStyle::WeekdayGrid] {
            let mut cfg = config(2025);
            cfg.layout_style = layout_style;
            let plain = CalendarLayout::compute(&cfg);

            cfg.moon.moon_display_mode = crate::models::MoonDisplayMode::Phases;
            cfg.moon.moon_size = 20.0;
            let large = CalendarLayout::compute(&cfg);
            assert!(large.day_names[0].y < plain.day_names[0].y, "{layout_style:?}");
            assert_eq!(plain.days, large.days);

            cfg.moon.moon_size = 10.0;
            let small = CalendarLayout::compute(&cfg);
            assert_eq!(small.day_names[0].y, plain.day_names[0].y);
        }
    }

    #[test]
    fn test_week_numbers() {
        assert_eq!(week_number(date(2025, 1, 1), Weekday::Mon), 1);
        assert_eq!(week_number(date(2021, 1, 1), Weekday::Mon), 53);
        assert_eq!(week_number(date(2025, 1, 4), Weekday::Sun), 1);
        assert_eq!(week_number(date(2025, 1, 5), Weekday::Sun), 2);

        let mut cfg = config(2025);
        cfg.show_week_numbers = true;
        let layout = CalendarLayout::compute(&cfg);
        assert!(!layout.week_numbers.is_empty());
        assert_eq!(layout.week_numbers[0].number, 1);
    }

    #[test]
    fn test_column_helpers() {
        assert_eq!(column_of(date(2025, 6, 1), Weekday::Sun), 0);
        assert_eq!(column_of(date(2025, 6, 1), Weekday::Mon), 6);
        assert_eq!(weekday_at_column(Weekday::Sat, 2), Weekday::Mon);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
    }
}
