use std::io::Write;

use crate::chart::display::ChartDisplay;
use crate::chart::spec::{ChartKind, build_chart};
use crate::color::SpeciesColors;
use crate::data::loader::DatasetSource;
use crate::error::PipelineError;
use crate::narrator;
use crate::report;

pub const ERROR_PREFIX: &str = "❌ Error during processing:";

// ---------------------------------------------------------------------------
// Pipeline: load → summarise → observe → chart → summarise insights
// ---------------------------------------------------------------------------

/// Run every stage in order, stopping at the first failure.
pub fn run<S, D, W>(source: &S, display: &mut D, out: &mut W) -> Result<(), PipelineError>
where
    S: DatasetSource + ?Sized,
    D: ChartDisplay + ?Sized,
    W: Write,
{
    log::info!("Loading dataset from {}", source.name());
    let mut table = source.load().map_err(PipelineError::Load)?;

    report::print_summary(out, &table).map_err(PipelineError::Compute)?;
    narrator::print_observations(out).map_err(|e| PipelineError::Compute(e.into()))?;
    out.flush().map_err(|e| PipelineError::Compute(e.into()))?;

    table.add_index();
    let colors = SpeciesColors::new(&table.labels);
    for kind in ChartKind::ORDER {
        let chart = build_chart(kind, &table, &colors).map_err(PipelineError::Render)?;
        log::info!("Showing {kind:?} chart: {}", chart.title);
        display.show(&chart).map_err(PipelineError::Render)?;
    }

    narrator::print_insights(out).map_err(|e| PipelineError::Compute(e.into()))?;
    Ok(())
}

/// Run the pipeline behind a single recovery boundary: any failure is
/// reported as one line on `out` and otherwise swallowed.
pub fn run_reporting<S, D, W>(source: &S, display: &mut D, out: &mut W)
where
    S: DatasetSource + ?Sized,
    D: ChartDisplay + ?Sized,
    W: Write,
{
    if let Err(e) = run(source, display, out) {
        log::error!("Pipeline stopped: {e}");
        if let Err(write_err) = writeln!(out, "{ERROR_PREFIX} {e}") {
            log::error!("Could not report failure: {write_err}");
        }
    }
}
