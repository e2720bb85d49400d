use std::io::Read;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::model::{Record, RecordTable, Species};

/// The reference dataset shipped inside the binary.
const BUNDLED_IRIS_CSV: &str = include_str!("../../assets/iris.csv");

// ---------------------------------------------------------------------------
// Source abstraction
// ---------------------------------------------------------------------------

/// Anything that can produce the record table.
pub trait DatasetSource {
    /// Short name used in log output.
    fn name(&self) -> &str;

    fn load(&self) -> Result<RecordTable>;
}

/// The 150-row iris dataset bundled at compile time.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledIris;

impl DatasetSource for BundledIris {
    fn name(&self) -> &str {
        "bundled iris"
    }

    fn load(&self) -> Result<RecordTable> {
        let table = parse_csv(BUNDLED_IRIS_CSV.as_bytes()).context("parsing bundled iris data")?;
        log::info!(
            "Loaded {} records with labels {:?}",
            table.len(),
            table.labels
        );
        Ok(table)
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// One CSV row before the class code is resolved. Empty cells become `None`.
#[derive(Debug, Deserialize)]
struct RawRow {
    sepal_length: Option<f64>,
    sepal_width: Option<f64>,
    petal_length: Option<f64>,
    petal_width: Option<f64>,
    target: u8,
}

/// CSV layout: header `sepal_length,sepal_width,petal_length,petal_width,target`,
/// where `target` is the integer class code.
pub fn parse_csv<R: Read>(input: R) -> Result<RecordTable> {
    let mut reader = csv::Reader::from_reader(input);
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;

        let Some(species) = Species::from_code(raw.target) else {
            bail!("CSV row {row_no}: unknown class code {}", raw.target);
        };

        records.push(Record {
            sepal_length: raw.sepal_length.unwrap_or(f64::NAN),
            sepal_width: raw.sepal_width.unwrap_or(f64::NAN),
            petal_length: raw.petal_length.unwrap_or(f64::NAN),
            petal_width: raw.petal_width.unwrap_or(f64::NAN),
            species,
        });
    }

    Ok(RecordTable::from_records(records))
}
