//! Statistics used by the report and the charts.

pub mod describe;
pub mod group;
pub mod histogram;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("column '{column}' has no observations")]
    NoObservations { column: String },

    #[error("column '{column}' has no observations for label '{label}'")]
    EmptyGroup { column: String, label: String },

    #[error("histogram needs at least one bin")]
    ZeroBins,

    #[error("column '{column}' has too little spread for a density estimate")]
    DegenerateBandwidth { column: String },
}
