//! Pie chart of total Sales per category.

use std::error::Error;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::domain::CategoryTotals;
use crate::plot::fonts::CHART_FONT;

pub const PIE_TITLE: &str = "Sales by Category";

/// 8 × 6 inches at 300 DPI.
pub const PIE_SIZE: (u32, u32) = (2400, 1800);

const TITLE_BAND: u32 = 180;

/// Wedges start at 12 o'clock.
const START_ANGLE_DEG: f64 = -90.0;

/// Draw the pie into a PNG at `path`.
///
/// Wedges run clockwise in category order. With text, plotters' `Pie`
/// element draws wedges, category labels and `{:.1}%` shares. Its labels
/// always need a font, so the text-free variant fills plain polygons.
pub(crate) fn draw_pie(path: &Path, totals: &CategoryTotals, with_text: bool) -> Result<(), Box<dyn Error>> {
    let total: f64 = totals.iter().map(|t| t.sales).sum();
    if totals.iter().any(|t| !t.sales.is_finite() || t.sales < 0.0) || !(total > 0.0) {
        return Err("pie chart needs non-negative category totals with a positive sum".into());
    }

    let root = BitMapBackend::new(path, PIE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (width, height) = root.dim_in_pixel();
    let top = if with_text { TITLE_BAND } else { 0 };
    let center = (width as i32 / 2, (top + (height - top) / 2) as i32);
    let radius = 0.38 * f64::from(width.min(height - top));

    let sizes: Vec<f64> = totals.iter().map(|t| t.sales).collect();
    let colors: Vec<RGBColor> = (0..totals.len()).map(wedge_color).collect();

    if with_text {
        let title = (CHART_FONT, 72).into_font().color(&BLACK).pos(centered());
        root.draw(&Text::new(PIE_TITLE, (width as i32 / 2, TITLE_BAND as i32 / 2), title))?;

        let labels: Vec<&str> = totals.iter().map(|t| t.category.as_str()).collect();
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(START_ANGLE_DEG);
        pie.label_style((CHART_FONT, 52).into_font().color(&BLACK));
        pie.label_offset(radius * 0.08);
        pie.percentages((CHART_FONT, 48).into_font().color(&BLACK));
        root.draw(&pie)?;
    } else {
        let mut start = START_ANGLE_DEG.to_radians();
        for (size, color) in sizes.iter().zip(&colors) {
            let sweep = size / total * TAU;
            if sweep > 0.0 {
                root.draw(&Polygon::new(wedge(center, radius, start, sweep), color.filled()))?;
            }
            start += sweep;
        }
    }

    root.present()?;
    Ok(())
}

fn wedge_color(idx: usize) -> RGBColor {
    let (r, g, b) = Palette99::pick(idx).rgb();
    RGBColor(r, g, b)
}

fn centered() -> Pos {
    Pos::new(HPos::Center, VPos::Center)
}

/// Pixel position at `angle` radians, clockwise from 3 o'clock on screen.
fn point_at(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 + (radius * angle.sin()).round() as i32,
    )
}

/// Closed outline of one wedge, sampled at roughly one point per degree.
fn wedge(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = (sweep.to_degrees().round() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let angle = start + sweep * i as f64 / steps as f64;
        points.push(point_at(center, radius, angle));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryTotal;

    fn totals(values: &[(&str, f64)]) -> CategoryTotals {
        values
            .iter()
            .map(|(c, s)| CategoryTotal {
                category: c.to_string(),
                sales: *s,
                quantity: 1,
            })
            .collect()
    }

    #[test]
    fn point_at_uses_screen_coordinates() {
        let c = (100, 100);
        assert_eq!(point_at(c, 10.0, 0.0), (110, 100));
        assert_eq!(point_at(c, 10.0, -FRAC_PI_2), (100, 90));
    }

    #[test]
    fn wedge_starts_at_center_and_spans_the_arc() {
        let pts = wedge((0, 0), 100.0, 0.0, TAU / 2.0);
        assert_eq!(pts[0], (0, 0));
        assert_eq!(pts[1], (100, 0));
        assert_eq!(*pts.last().unwrap(), (-100, 0));
        assert_eq!(pts.len(), 180 + 2);
    }

    #[test]
    fn draws_without_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pie.png");
        draw_pie(&path, &totals(&[("Books", 20.0), ("Electronics", 115.0), ("Empty", 0.0)]), false).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"\x89PNG"));
    }

    #[test]
    fn zero_total_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = draw_pie(&dir.path().join("pie.png"), &totals(&[("Books", 0.0)]), false).unwrap_err();
        assert!(err.to_string().contains("positive sum"));
    }
}
