/// Chart layer: pure chart descriptions and the window that draws them.
///
/// ```text
///   RecordTable ──► spec (ChartSpec) ──► display (ChartDisplay) ──► app (egui_plot)
/// ```

pub mod app;
pub mod display;
pub mod spec;
