use std::ops::Range;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, DictionaryArray, Float64Array};
use arrow::datatypes::Int8Type;
use arrow::record_batch::RecordBatch;

use super::model::{Measurement, RecordTable, Species};

/// Name of the categorical label column in tabular output.
pub const SPECIES_COLUMN: &str = "species";

// ---------------------------------------------------------------------------
// Column builders
// ---------------------------------------------------------------------------

/// Build a nullable float column; NaN is written as null.
pub fn float_column(values: impl IntoIterator<Item = f64>) -> ArrayRef {
    let array: Float64Array = values
        .into_iter()
        .map(|v| if v.is_nan() { None } else { Some(v) })
        .collect();
    Arc::new(array)
}

/// Build the label column as a dictionary (categorical) array.
pub fn species_column(values: impl IntoIterator<Item = Species>) -> ArrayRef {
    let array: DictionaryArray<Int8Type> = values.into_iter().map(Species::name).collect();
    Arc::new(array)
}

// ---------------------------------------------------------------------------
// Table → RecordBatch
// ---------------------------------------------------------------------------

/// Convert a contiguous row range of the table into a record batch with the
/// four measurement columns followed by `species`.
pub fn rows_to_batch(table: &RecordTable, rows: Range<usize>) -> Result<RecordBatch> {
    if rows.end > table.len() || rows.start > rows.end {
        bail!(
            "row range {}..{} out of bounds for {} rows",
            rows.start,
            rows.end,
            table.len()
        );
    }
    let slice = &table.records[rows];

    let mut columns: Vec<(&str, ArrayRef)> = Measurement::ALL
        .iter()
        .map(|&m| (m.column_name(), float_column(slice.iter().map(|r| r.value(m)))))
        .collect();
    columns.push((SPECIES_COLUMN, species_column(slice.iter().map(|r| r.species))));

    RecordBatch::try_from_iter(columns).context("building record batch")
}

/// The whole table as one record batch.
pub fn table_to_batch(table: &RecordTable) -> Result<RecordBatch> {
    rows_to_batch(table, 0..table.len())
}
