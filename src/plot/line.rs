//! Line chart of total Sales per day.

use std::error::Error;
use std::path::Path;

use chrono::{Days, NaiveDate};
use plotters::prelude::*;

use crate::plot::fonts::CHART_FONT;

pub const LINE_TITLE: &str = "Daily Sales Trend";

/// 10 × 6 inches at 300 DPI.
pub const LINE_SIZE: (u32, u32) = (3000, 1800);

const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Draw the daily series into a PNG at `path`.
///
/// The x axis counts days from the first date, so gaps in the data show as
/// gaps on the chart. Axis labels map whole day offsets back to ISO dates.
pub(crate) fn draw_line(path: &Path, daily: &[(NaiveDate, f64)], with_text: bool) -> Result<(), Box<dyn Error>> {
    if daily.is_empty() {
        return Err("no dated sales to plot".into());
    }

    let root = BitMapBackend::new(path, LINE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let first = daily[0].0;
    let points: Vec<(f64, f64)> = daily
        .iter()
        .map(|(d, v)| ((*d - first).num_days() as f64, *v))
        .collect();

    let (y0, y1) = value_bounds(daily.iter().map(|(_, v)| *v));
    let span = points.last().map_or(0.0, |p| p.0);
    let x1 = span + 0.5;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(60);
    if with_text {
        builder
            .caption(LINE_TITLE, (CHART_FONT, 72).into_font())
            .set_label_area_size(LabelAreaPosition::Left, 220)
            .set_label_area_size(LabelAreaPosition::Bottom, 120);
    }
    let mut chart = builder.build_cartesian_2d(-0.5..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_labels((span as usize + 1).clamp(2, 8))
        .y_labels(8)
        .x_label_formatter(&|x| date_label(first, *x))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .label_style((CHART_FONT, 40).into_font())
        .bold_line_style(&RGBColor(200, 200, 200))
        .light_line_style(&RGBColor(235, 235, 235))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), LINE_COLOR.stroke_width(6)))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 14, LINE_COLOR.filled())))?;

    root.present()?;
    Ok(())
}

/// Y range that always includes zero, padded so markers stay inside the frame.
fn value_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = if hi - lo > 1e-9 { hi - lo } else { 1.0 };
    let pad = span * 0.05;
    let lo = if lo < 0.0 { lo - pad } else { lo };
    (lo, hi + pad)
}

/// Tick label for a day offset from `first`; only whole days carry a date.
fn date_label(first: NaiveDate, x: f64) -> String {
    let day = x.round();
    if (x - day).abs() > 1e-6 || day < 0.0 {
        return String::new();
    }
    first
        .checked_add_days(Days::new(day as u64))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
