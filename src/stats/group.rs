use std::collections::BTreeMap;

use super::StatsError;
use super::describe::RunningStats;
use crate::data::model::{Measurement, RecordTable, Species};

/// Per-label means of all four measurements, in natural label order.
pub type GroupMeans = BTreeMap<Species, [f64; 4]>;

/// Running moments of one measurement for every label present in the table.
pub fn group_stats(table: &RecordTable, measurement: Measurement) -> BTreeMap<Species, RunningStats> {
    let mut groups: BTreeMap<Species, RunningStats> = BTreeMap::new();
    for r in &table.records {
        groups.entry(r.species).or_default().add(r.value(measurement));
    }
    groups
}

/// Mean of each numeric column grouped by label.
pub fn group_means(table: &RecordTable) -> Result<GroupMeans, StatsError> {
    let mut means: GroupMeans = table.labels.iter().map(|&s| (s, [f64::NAN; 4])).collect();

    for (col, &m) in Measurement::ALL.iter().enumerate() {
        for (species, stats) in group_stats(table, m) {
            if stats.is_empty() {
                return Err(StatsError::EmptyGroup {
                    column: m.column_name().to_string(),
                    label: species.to_string(),
                });
            }
            if let Some(row) = means.get_mut(&species) {
                row[col] = stats.mean();
            }
        }
    }
    Ok(means)
}
