//! Plotters-powered sector chart widget for Ratatui.
//!
//! Sectors sit on a segmented x axis, one segment per sector, labelled with
//! the sector's 1-based number from the legend next to the chart. Rendering
//! goes through `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Render-only chart description; values are prepared by the caller.
pub struct SectorBarChart<'a> {
    /// One value per sector, in display order.
    pub values: &'a [f64],
    /// Draw a line through the values instead of bars.
    pub as_line: bool,
    pub fmt_y: fn(f64) -> String,
}

/// Y range covering all values plus 10% headroom; always includes zero.
pub fn value_bounds(values: &[f64]) -> [f64; 2] {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let lo = finite.clone().fold(0.0_f64, f64::min);
    let hi = finite.fold(0.0_f64, f64::max);
    if hi <= lo {
        return [lo, lo + 1.0];
    }
    let pad = (hi - lo) * 0.1;
    [if lo < 0.0 { lo - pad } else { lo }, hi + pad]
}

impl<'a> Widget for SectorBarChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters fails to lay out a chart in very small areas.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }
        if self.values.is_empty() {
            buf.set_string(area.x, area.y, "No data.", Style::default().fg(Color::Yellow));
            return;
        }

        let len = self.values.len();
        let last = len as i32 - 1;
        let [y0, y1] = value_bounds(self.values);

        let widget = widget_fn(move |root| {
            // Label areas are in backend pixels (4 per terminal cell).
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 32)
                .set_label_area_size(LabelAreaPosition::Bottom, 12)
                .build_cartesian_2d((0..last).into_segmented(), y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(len)
                .y_labels(5)
                .x_label_formatter(&|v| slot_label(v, len))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let bar_color = RGBColor(0, 255, 255); // cyan

            if self.as_line {
                let points = self
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (SegmentValue::CenterOf(i as i32), v));
                chart.draw_series(LineSeries::new(points.clone(), &bar_color))?;
                chart.draw_series(points.map(|p| Pixel::new(p, WHITE)))?;
            } else {
                let base = 0.0_f64.max(y0);
                chart.draw_series(self.values.iter().enumerate().map(|(i, &v)| {
                    let i = i as i32;
                    let mut bar = Rectangle::new(
                        [(SegmentValue::Exact(i), base), (SegmentValue::Exact(i + 1), v)],
                        bar_color.filled(),
                    );
                    bar.set_margin(0, 0, 2, 2);
                    bar
                }))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// 1-based sector number at a segment centre, blank elsewhere.
fn slot_label(v: &SegmentValue<i32>, len: usize) -> String {
    match v {
        SegmentValue::CenterOf(i) if *i >= 0 && (*i as usize) < len => format!("{}", i + 1),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(chart: SectorBarChart<'_>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);
        (0..height)
            .map(|y| (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    #[test]
    fn bounds_start_at_zero_with_headroom() {
        let [lo, hi] = value_bounds(&[3.0, 1.0, 2.0]);
        assert_eq!(lo, 0.0);
        assert!((hi - 3.3).abs() < 1e-9);
    }

    #[test]
    fn bounds_cover_negative_values() {
        let [lo, hi] = value_bounds(&[-2.0, 8.0]);
        assert!(lo < -2.0);
        assert!(hi > 8.0);
    }

    #[test]
    fn bounds_never_collapse() {
        assert_eq!(value_bounds(&[]), [0.0, 1.0]);
        assert_eq!(value_bounds(&[0.0, f64::NAN]), [0.0, 1.0]);
    }

    #[test]
    fn slot_labels_only_at_centres() {
        assert_eq!(slot_label(&SegmentValue::CenterOf(0), 3), "1");
        assert_eq!(slot_label(&SegmentValue::CenterOf(2), 3), "3");
        assert_eq!(slot_label(&SegmentValue::Exact(1), 3), "");
        assert_eq!(slot_label(&SegmentValue::CenterOf(3), 3), "");
        assert_eq!(slot_label(&SegmentValue::Last, 3), "");
    }

    #[test]
    fn bar_chart_labels_every_sector_on_x_axis() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        let rows = render(
            SectorBarChart {
                values: &values,
                as_line: false,
                fmt_y: |_| String::new(),
            },
            80,
            24,
        );
        let bottom = rows[16..].concat();
        for n in 1..=5 {
            let digit = char::from_digit(n, 10).unwrap();
            assert!(bottom.contains(digit), "sector {n} missing from x axis:\n{}", rows.join("\n"));
        }
    }

    #[test]
    fn line_chart_draws_y_labels() {
        let values = [27.3, 58.9, 42.1];
        let rows = render(
            SectorBarChart {
                values: &values,
                as_line: true,
                fmt_y: |v| format!("y{v:.0}"),
            },
            80,
            24,
        );
        assert!(rows.concat().contains('y'), "no y labels:\n{}", rows.join("\n"));
    }

    #[test]
    fn small_area_shows_hint() {
        let rows = render(
            SectorBarChart {
                values: &[1.0],
                as_line: false,
                fmt_y: |_| String::new(),
            },
            40,
            5,
        );
        assert!(rows[0].starts_with("Chart area too small"));
    }
}
