use anyhow::{Result, anyhow};
use eframe::egui;

use super::app::ChartApp;
use super::spec::ChartSpec;

/// Presents a finished chart. Implementations block until the chart has
/// been dismissed, so charts appear strictly one after another.
pub trait ChartDisplay {
    fn show(&mut self, chart: &ChartSpec) -> Result<()>;
}

/// Opens one native window per chart and returns when it is closed.
#[derive(Debug, Default)]
pub struct NativeWindow;

impl ChartDisplay for NativeWindow {
    fn show(&mut self, chart: &ChartSpec) -> Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(chart.title.clone())
                .with_inner_size(chart.size)
                .with_min_inner_size([300.0, 200.0]),
            // Return on close so the next chart can open its own window.
            run_and_return: true,
            ..Default::default()
        };

        let owned = chart.clone();
        eframe::run_native(
            &chart.title,
            options,
            Box::new(|cc| {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
                Ok(Box::new(ChartApp::new(owned)))
            }),
        )
        .map_err(|e| anyhow!("showing chart '{}': {e}", chart.title))
    }
}
