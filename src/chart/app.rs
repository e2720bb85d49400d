use eframe::egui::{self, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use super::spec::{ChartSpec, Series};

/// How close a grid mark must be to a category position to get its name.
const TICK_TOLERANCE: f64 = 1e-6;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// A window that draws exactly one chart.
pub struct ChartApp {
    chart: ChartSpec,
}

impl ChartApp {
    pub fn new(chart: ChartSpec) -> Self {
        Self { chart }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            chart_plot(ui, &self.chart);
        });
    }
}

// ---------------------------------------------------------------------------
// Plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart title, optional legend title, and the plot itself.
pub fn chart_plot(ui: &mut Ui, chart: &ChartSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });
    if let Some(legend_title) = &chart.legend_title {
        ui.label(RichText::new(legend_title).strong());
    }

    let mut plot = Plot::new(format!("{:?}_plot", chart.kind))
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if chart.show_legend {
        plot = plot.legend(Legend::default());
    }

    if !chart.x_ticks.is_empty() {
        let ticks = chart.x_ticks.clone();
        plot = plot.x_axis_formatter(move |mark, _range| {
            ticks
                .iter()
                .find(|(x, _)| (mark.value - x).abs() < TICK_TOLERANCE)
                .map(|(_, name)| name.clone())
                .unwrap_or_default()
        });
    }

    plot.show(ui, |plot_ui| {
        for series in &chart.series {
            match series {
                Series::Line {
                    name,
                    points,
                    color,
                    width,
                } => {
                    let points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(name).color(*color).width(*width));
                }
                Series::Points {
                    name,
                    points,
                    color,
                    radius,
                } => {
                    let points: PlotPoints = points.iter().copied().collect();
                    plot_ui.points(
                        Points::new(points)
                            .name(name)
                            .color(*color)
                            .radius(*radius)
                            .shape(MarkerShape::Circle)
                            .filled(true),
                    );
                }
                Series::Bars { name, bars, color } => {
                    let bars: Vec<Bar> = bars
                        .iter()
                        .map(|b| Bar::new(b.x, b.height).width(b.width).fill(*color))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).name(name).color(*color));
                }
            }
        }
    });
}
