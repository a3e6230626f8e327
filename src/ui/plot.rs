use std::sync::Arc;

use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::chart::{ChartKind, ChartSpec, Slot};
use crate::color::series_color;
use crate::data::model::Numeric;

// ---------------------------------------------------------------------------
// Chart rendering (central panel)
// ---------------------------------------------------------------------------

/// Render one chart slot: its title and plot, or a placeholder when empty.
pub fn chart_slot(ui: &mut Ui, slot: Slot, chart: Option<&ChartSpec>, height: f32) {
    let Some(chart) = chart else {
        ui.label("No data loaded.");
        return;
    };

    ui.label(RichText::new(&chart.title).strong());
    if chart.is_empty() {
        ui.label("No values to plot.");
        return;
    }

    let labels: Arc<[String]> = chart.labels.clone().into();
    let axis_labels = Arc::clone(&labels);
    let hover_labels = Arc::clone(&labels);

    Plot::new(slot.id())
        .height(height)
        .legend(Legend::default())
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| label_at(&axis_labels, mark.value).to_string())
        .label_formatter(move |name, point| {
            let x = label_at(&hover_labels, point.x.round());
            if name.is_empty() {
                format!("{x}\n{:.4}", point.y)
            } else {
                format!("{name}\n{x}: {:.4}", point.y)
            }
        })
        .show(ui, |plot_ui| {
            let total = chart.series.len();
            for (i, s) in chart.series.iter().enumerate() {
                let color = series_color(i, total);
                match chart.kind {
                    ChartKind::Line => {
                        // One line per run of present values so absent points show as gaps.
                        for segment in segments(&s.values) {
                            plot_ui.line(
                                Line::new(PlotPoints::from(segment))
                                    .name(&s.name)
                                    .color(color)
                                    .width(1.5),
                            );
                        }
                    }
                    ChartKind::Bar => {
                        let width = 0.8 / total as f64;
                        let offset = (i as f64 - (total as f64 - 1.0) / 2.0) * width;
                        let bars: Vec<Bar> = s
                            .values
                            .iter()
                            .enumerate()
                            .filter_map(|(x, v)| {
                                v.value()
                                    .map(|y| Bar::new(x as f64 + offset, y).width(width))
                            })
                            .collect();
                        plot_ui.bar_chart(BarChart::new(bars).name(&s.name).color(color));
                    }
                }
            }
        });
}

/// Label for an x position, empty between integer positions or out of range.
fn label_at(labels: &[String], x: f64) -> &str {
    if x < 0.0 || x.fract() != 0.0 {
        return "";
    }
    labels.get(x as usize).map(String::as_str).unwrap_or("")
}

/// Split a series into runs of consecutive present points, indexed by position.
fn segments(values: &[Numeric]) -> Vec<Vec<[f64; 2]>> {
    let mut out = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (x, v) in values.iter().enumerate() {
        match v.value() {
            Some(y) => current.push([x as f64, y]),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_split_line_segments() {
        let values = [
            Numeric::Value(1.0),
            Numeric::Value(2.0),
            Numeric::Absent,
            Numeric::Absent,
            Numeric::Value(5.0),
        ];
        assert_eq!(
            segments(&values),
            vec![vec![[0.0, 1.0], [1.0, 2.0]], vec![[4.0, 5.0]]]
        );
        assert!(segments(&[Numeric::Absent]).is_empty());
    }

    #[test]
    fn labels_only_on_integer_marks() {
        let labels = vec!["2022".to_string(), "2023".to_string()];
        assert_eq!(label_at(&labels, 1.0), "2023");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, -1.0), "");
        assert_eq!(label_at(&labels, 2.0), "");
    }
}
