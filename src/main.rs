mod chart;
mod color;
mod data;
mod error;
mod narrator;
mod pipeline;
mod report;
mod stats;

use chart::display::NativeWindow;
use data::loader::BundledIris;

fn main() {
    env_logger::init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    pipeline::run_reporting(&BundledIris, &mut NativeWindow, &mut out);
}
