use anyhow::{Context, Result};
use eframe::egui::Color32;

use crate::color::{SKY_BLUE, STEEL_BLUE, SpeciesColors};
use crate::data::model::{Measurement, RecordTable};
use crate::stats::group::group_stats;
use crate::stats::histogram::{Histogram, kde_curve};

pub const HISTOGRAM_BINS: usize = 15;
const KDE_GRID_POINTS: usize = 200;
/// Two-sided 95% normal quantile, used for bar error bars.
const Z_95: f64 = 1.96;

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

/// The four charts, in the order they are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Histogram,
    Scatter,
}

impl ChartKind {
    pub const ORDER: [ChartKind; 4] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Histogram,
        ChartKind::Scatter,
    ];
}

/// One rectangle of a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub x: f64,
    pub height: f64,
    pub width: f64,
}

/// A drawable series. An empty `name` keeps the series out of the legend.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Line {
        name: String,
        points: Vec<[f64; 2]>,
        color: Color32,
        width: f32,
    },
    Points {
        name: String,
        points: Vec<[f64; 2]>,
        color: Color32,
        radius: f32,
    },
    Bars {
        name: String,
        bars: Vec<BarSpec>,
        color: Color32,
    },
}

/// Everything needed to draw one chart, independent of any window system.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Window size in logical pixels.
    pub size: [f32; 2],
    pub series: Vec<Series>,
    /// Category names drawn at fixed x positions instead of numbers.
    pub x_ticks: Vec<(f64, String)>,
    pub show_legend: bool,
    pub legend_title: Option<String>,
}

impl ChartSpec {
    fn new(kind: ChartKind, title: &str, x_label: &str, y_label: &str, size: [f32; 2]) -> Self {
        ChartSpec {
            kind,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            size,
            series: Vec::new(),
            x_ticks: Vec::new(),
            show_legend: false,
            legend_title: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn build_chart(kind: ChartKind, table: &RecordTable, colors: &SpeciesColors) -> Result<ChartSpec> {
    match kind {
        ChartKind::Line => line_chart(table, colors),
        ChartKind::Bar => bar_chart(table, colors),
        ChartKind::Histogram => histogram_chart(table),
        ChartKind::Scatter => scatter_chart(table, colors),
    }
}

/// Sepal length against the row index, one line per label.
pub fn line_chart(table: &RecordTable, colors: &SpeciesColors) -> Result<ChartSpec> {
    let index = table
        .index()
        .context("row index column has not been added to the table")?;
    let y = Measurement::SepalLength;

    let mut chart = ChartSpec::new(
        ChartKind::Line,
        "Sepal Length Over Index (Simulated Time)",
        "Index",
        y.axis_label(),
        [1000.0, 500.0],
    );
    chart.show_legend = true;

    for species in table.labels_in_appearance_order() {
        let points = table
            .rows_with(species)
            .map(|(row, r)| [index[row] as f64, r.value(y)])
            .collect();
        chart.series.push(Series::Line {
            name: species.to_string(),
            points,
            color: colors.color_for(species),
            width: 1.5,
        });
    }
    Ok(chart)
}

/// Mean petal length per label with a 95% confidence interval.
pub fn bar_chart(table: &RecordTable, colors: &SpeciesColors) -> Result<ChartSpec> {
    let y = Measurement::PetalLength;
    let mut chart = ChartSpec::new(
        ChartKind::Bar,
        "Average Petal Length per Species",
        "Species",
        y.axis_label(),
        [600.0, 400.0],
    );

    for (pos, (species, stats)) in group_stats(table, y).into_iter().enumerate() {
        let x = pos as f64;
        let mean = stats.mean();
        chart.series.push(Series::Bars {
            name: species.to_string(),
            bars: vec![BarSpec {
                x,
                height: mean,
                width: 0.8,
            }],
            color: colors.color_for(species),
        });

        let half = Z_95 * stats.sem();
        if half.is_finite() {
            chart.series.push(Series::Line {
                name: String::new(),
                points: vec![[x, mean - half], [x, mean + half]],
                color: Color32::from_gray(60),
                width: 2.0,
            });
        }
        chart.x_ticks.push((x, species.to_string()));
    }
    Ok(chart)
}

/// Sepal width distribution with a count-scaled density curve.
pub fn histogram_chart(table: &RecordTable) -> Result<ChartSpec> {
    let x = Measurement::SepalWidth;
    let values = table.column(x);
    let hist = Histogram::new(x.column_name(), &values, HISTOGRAM_BINS)?;

    let mut chart = ChartSpec::new(
        ChartKind::Histogram,
        "Distribution of Sepal Width",
        x.axis_label(),
        "Count",
        [600.0, 400.0],
    );

    let width = hist.bin_width();
    let bars = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| BarSpec {
            x: hist.bin_center(i),
            height: count as f64,
            width,
        })
        .collect();
    chart.series.push(Series::Bars {
        name: String::new(),
        bars,
        color: SKY_BLUE,
    });

    let scale = hist.total() as f64 * width;
    let curve = kde_curve(x.column_name(), &values, hist.min, hist.max, KDE_GRID_POINTS, scale)?;
    chart.series.push(Series::Line {
        name: String::new(),
        points: curve,
        color: STEEL_BLUE,
        width: 2.0,
    });
    Ok(chart)
}

/// Sepal length against petal length, coloured by label.
pub fn scatter_chart(table: &RecordTable, colors: &SpeciesColors) -> Result<ChartSpec> {
    let (x, y) = (Measurement::SepalLength, Measurement::PetalLength);
    let mut chart = ChartSpec::new(
        ChartKind::Scatter,
        "Sepal Length vs. Petal Length by Species",
        x.axis_label(),
        y.axis_label(),
        [600.0, 400.0],
    );
    chart.show_legend = true;
    chart.legend_title = Some("Species".to_string());

    for &species in &table.labels {
        let points = table
            .rows_with(species)
            .map(|(_, r)| [r.value(x), r.value(y)])
            .collect();
        chart.series.push(Series::Points {
            name: species.to_string(),
            points,
            color: colors.color_for(species),
            radius: 3.0,
        });
    }
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{BundledIris, DatasetSource};

    fn iris_with_index() -> (RecordTable, SpeciesColors) {
        let mut table = BundledIris.load().unwrap();
        table.add_index();
        let colors = SpeciesColors::new(&table.labels);
        (table, colors)
    }

    fn names(chart: &ChartSpec) -> Vec<&str> {
        chart
            .series
            .iter()
            .map(|s| match s {
                Series::Line { name, .. } | Series::Points { name, .. } | Series::Bars { name, .. } => {
                    name.as_str()
                }
            })
            .filter(|n| !n.is_empty())
            .collect()
    }

    #[test]
    fn line_chart_needs_index() {
        let table = BundledIris.load().unwrap();
        let colors = SpeciesColors::new(&table.labels);
        assert!(line_chart(&table, &colors).is_err());
    }

    #[test]
    fn line_chart_one_line_per_label() {
        let (table, colors) = iris_with_index();
        let chart = line_chart(&table, &colors).unwrap();
        assert_eq!(names(&chart), vec!["setosa", "versicolor", "virginica"]);
        let Series::Line { points, .. } = &chart.series[1] else {
            panic!("expected a line");
        };
        assert_eq!(points.len(), 50);
        assert_eq!(points[0], [50.0, 7.0]);
        assert_eq!(chart.size, [1000.0, 500.0]);
    }

    #[test]
    fn bar_chart_heights_are_group_means() {
        let (table, colors) = iris_with_index();
        let chart = bar_chart(&table, &colors).unwrap();
        let heights: Vec<f64> = chart
            .series
            .iter()
            .filter_map(|s| match s {
                Series::Bars { bars, .. } => Some(bars[0].height),
                _ => None,
            })
            .collect();
        assert_eq!(heights.len(), 3);
        assert!((heights[0] - 1.462).abs() < 1e-9);
        assert!((heights[2] - 5.552).abs() < 1e-9);
        let ticks: Vec<&str> = chart.x_ticks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(ticks, vec!["setosa", "versicolor", "virginica"]);
    }

    #[test]
    fn bar_error_bars_bracket_the_mean() {
        let (table, colors) = iris_with_index();
        let chart = bar_chart(&table, &colors).unwrap();
        let Series::Line { points, .. } = &chart.series[1] else {
            panic!("expected an error bar after the first bar");
        };
        assert!(points[0][1] < 1.462 && points[1][1] > 1.462);
    }

    #[test]
    fn histogram_has_fifteen_bins_and_curve() {
        let (table, _) = iris_with_index();
        let chart = histogram_chart(&table).unwrap();
        let Series::Bars { bars, .. } = &chart.series[0] else {
            panic!("expected bars first");
        };
        assert_eq!(bars.len(), HISTOGRAM_BINS);
        let total: f64 = bars.iter().map(|b| b.height).sum();
        assert_eq!(total, 150.0);
        assert!(matches!(&chart.series[1], Series::Line { points, .. } if points.len() == 200));
        assert!(!chart.show_legend);
    }

    #[test]
    fn scatter_has_one_point_per_row() {
        let (table, colors) = iris_with_index();
        let chart = scatter_chart(&table, &colors).unwrap();
        let total: usize = chart
            .series
            .iter()
            .map(|s| match s {
                Series::Points { points, .. } => points.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(total, 150);
        assert_eq!(chart.legend_title.as_deref(), Some("Species"));
    }
}
