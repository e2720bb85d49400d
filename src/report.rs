use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::batch::{float_column, rows_to_batch, species_column, table_to_batch, SPECIES_COLUMN};
use crate::data::model::{Measurement, RecordTable};
use crate::stats::describe::ColumnSummary;
use crate::stats::group::group_means;

pub const PREVIEW_ROWS: usize = 5;
pub const PREVIEW_HEADER: &str = "🔍 First 5 rows of the dataset:";

/// Decimal places kept when printing computed statistics.
const DISPLAY_DECIMALS: i32 = 6;

fn round_for_display(v: f64) -> f64 {
    let factor = 10f64.powi(DISPLAY_DECIMALS);
    (v * factor).round() / factor
}

fn render(batch: RecordBatch) -> Result<String> {
    Ok(pretty_format_batches(&[batch])
        .context("formatting table")?
        .to_string())
}

/// Human-readable dtype of an Arrow column, in dataframe terms.
fn dtype_name(data_type: &DataType) -> String {
    match data_type {
        DataType::Float64 => "float64".to_string(),
        DataType::Int64 => "int64".to_string(),
        DataType::Dictionary(_, _) => "category".to_string(),
        DataType::Utf8 => "object".to_string(),
        other => format!("{other:?}").to_lowercase(),
    }
}

// ---------------------------------------------------------------------------
// Row preview
// ---------------------------------------------------------------------------

/// The first rows of the table, all columns, as a formatted table.
pub fn preview_table(table: &RecordTable) -> Result<String> {
    let batch = rows_to_batch(table, 0..table.len().min(PREVIEW_ROWS))?;
    render(batch)
}

pub fn print_preview(out: &mut impl Write, table: &RecordTable) -> Result<()> {
    writeln!(out, "{PREVIEW_HEADER}")?;
    writeln!(out, "{}", preview_table(table)?)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Schema / null counts
// ---------------------------------------------------------------------------

pub fn print_info(out: &mut impl Write, table: &RecordTable) -> Result<()> {
    let batch = table_to_batch(table)?;
    let schema = batch.schema();

    let mut positions = Vec::new();
    let mut names = Vec::new();
    let mut non_null = Vec::new();
    let mut dtypes: Vec<String> = Vec::new();
    for (i, field) in schema.fields().iter().enumerate() {
        let column = batch.column(i);
        positions.push(i as i64);
        names.push(field.name().clone());
        non_null.push(format!("{} non-null", column.len() - column.null_count()));
        dtypes.push(dtype_name(field.data_type()));
    }

    // dtype → column count, in order of first appearance
    let mut dtype_counts: Vec<(String, usize)> = Vec::new();
    for d in &dtypes {
        match dtype_counts.iter_mut().find(|(name, _)| name == d) {
            Some((_, n)) => *n += 1,
            None => dtype_counts.push((d.clone(), 1)),
        }
    }

    let info = RecordBatch::try_from_iter([
        ("#", Arc::new(Int64Array::from(positions)) as ArrayRef),
        ("Column", Arc::new(StringArray::from(names)) as ArrayRef),
        ("Non-Null Count", Arc::new(StringArray::from(non_null)) as ArrayRef),
        ("Dtype", Arc::new(StringArray::from(dtypes)) as ArrayRef),
    ])
    .context("building info table")?;

    let last = table.len().saturating_sub(1);
    writeln!(out, "RangeIndex: {} entries, 0 to {last}", table.len())?;
    writeln!(out, "Data columns (total {} columns):", schema.fields().len())?;
    writeln!(out, "{}", render(info)?)?;
    let summary: Vec<String> = dtype_counts
        .iter()
        .map(|(name, n)| format!("{name}({n})"))
        .collect();
    writeln!(out, "dtypes: {}", summary.join(", "))?;
    Ok(())
}

pub fn print_missing(out: &mut impl Write, table: &RecordTable) -> Result<()> {
    let batch = table_to_batch(table)?;
    let schema = batch.schema();
    let names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
    let missing: Vec<i64> = batch.columns().iter().map(|c| c.null_count() as i64).collect();

    let counts = RecordBatch::try_from_iter([
        ("column", Arc::new(StringArray::from(names)) as ArrayRef),
        ("missing", Arc::new(Int64Array::from(missing)) as ArrayRef),
    ])
    .context("building missing-value table")?;
    writeln!(out, "{}", render(counts)?)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

pub fn describe(table: &RecordTable) -> Result<Vec<(Measurement, ColumnSummary)>> {
    Measurement::ALL
        .iter()
        .map(|&m| -> Result<(Measurement, ColumnSummary)> {
            let summary = ColumnSummary::from_values(m.column_name(), &table.column(m))?;
            log::debug!("{m}: {summary:?}");
            Ok((m, summary))
        })
        .collect()
}

pub fn print_describe(out: &mut impl Write, table: &RecordTable) -> Result<()> {
    let summaries = describe(table)?;

    let mut columns: Vec<(&str, ArrayRef)> = vec![(
        "statistic",
        Arc::new(StringArray::from(ColumnSummary::STAT_NAMES.to_vec())) as ArrayRef,
    )];
    for (m, summary) in &summaries {
        let row = summary.as_row();
        columns.push((m.column_name(), float_column(row.map(round_for_display))));
    }

    let batch = RecordBatch::try_from_iter(columns).context("building describe table")?;
    writeln!(out, "{}", render(batch)?)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Grouped means
// ---------------------------------------------------------------------------

pub fn print_group_means(out: &mut impl Write, table: &RecordTable) -> Result<()> {
    let means = group_means(table)?;

    let mut columns: Vec<(&str, ArrayRef)> =
        vec![(SPECIES_COLUMN, species_column(means.keys().copied()))];
    for (col, m) in Measurement::ALL.iter().enumerate() {
        let values = means.values().map(|row| round_for_display(row[col]));
        columns.push((m.column_name(), float_column(values)));
    }

    let batch = RecordBatch::try_from_iter(columns).context("building grouped means table")?;
    writeln!(out, "{}", render(batch)?)?;
    Ok(())
}

/// Every summary block, in print order, each under its heading.
pub fn print_summary(out: &mut impl Write, table: &RecordTable) -> Result<()> {
    print_preview(out, table)?;

    writeln!(out, "\n📋 Dataset Info:")?;
    print_info(out, table)?;

    writeln!(out, "\n❓ Missing Values Check:")?;
    print_missing(out, table)?;

    writeln!(out, "\n📊 Descriptive Statistics:")?;
    print_describe(out, table)?;

    writeln!(out, "\n📊 Mean values per species:")?;
    print_group_means(out, table)?;
    Ok(())
}
