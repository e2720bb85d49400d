use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Species – the categorical label column
// ---------------------------------------------------------------------------

/// The class label of an iris flower.
///
/// Variants are declared in class-code order so the derived `Ord` gives the
/// natural category ordering used by grouped output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    /// Map an integer class code (0, 1, 2) to its species.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Measurement – the four numeric columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Measurement {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Measurement {
    pub const ALL: [Measurement; 4] = [
        Measurement::SepalLength,
        Measurement::SepalWidth,
        Measurement::PetalLength,
        Measurement::PetalWidth,
    ];

    /// Column header as printed in tabular output.
    pub fn column_name(self) -> &'static str {
        match self {
            Measurement::SepalLength => "sepal length (cm)",
            Measurement::SepalWidth => "sepal width (cm)",
            Measurement::PetalLength => "petal length (cm)",
            Measurement::PetalWidth => "petal width (cm)",
        }
    }

    /// Title-cased label used on chart axes.
    pub fn axis_label(self) -> &'static str {
        match self {
            Measurement::SepalLength => "Sepal Length (cm)",
            Measurement::SepalWidth => "Sepal Width (cm)",
            Measurement::PetalLength => "Petal Length (cm)",
            Measurement::PetalWidth => "Petal Width (cm)",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single flower. A missing measurement is stored as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: Species,
}

impl Record {
    pub fn value(&self, measurement: Measurement) -> f64 {
        match measurement {
            Measurement::SepalLength => self.sepal_length,
            Measurement::SepalWidth => self.sepal_width,
            Measurement::PetalLength => self.petal_length,
            Measurement::PetalWidth => self.petal_width,
        }
    }
}

// ---------------------------------------------------------------------------
// RecordTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full dataset in load order, plus the optional derived row index.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    /// All rows in load order.
    pub records: Vec<Record>,
    /// Sorted set of labels present in the table.
    pub labels: BTreeSet<Species>,
    /// Derived 0..N-1 index, present once [`RecordTable::add_index`] ran.
    index: Option<Vec<usize>>,
}

impl RecordTable {
    pub fn from_records(records: Vec<Record>) -> Self {
        let labels = records.iter().map(|r| r.species).collect();
        RecordTable {
            records,
            labels,
            index: None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of one numeric column, in table order (NaN for missing).
    pub fn column(&self, measurement: Measurement) -> Vec<f64> {
        self.records.iter().map(|r| r.value(measurement)).collect()
    }

    /// Number of missing (NaN) cells in a numeric column.
    pub fn missing_count(&self, measurement: Measurement) -> usize {
        self.records
            .iter()
            .filter(|r| r.value(measurement).is_nan())
            .count()
    }

    /// Distinct labels in order of first appearance.
    pub fn labels_in_appearance_order(&self) -> Vec<Species> {
        let mut seen = Vec::with_capacity(self.labels.len());
        for r in &self.records {
            if !seen.contains(&r.species) {
                seen.push(r.species);
            }
        }
        seen
    }

    /// Row positions (with their records) whose label equals `species`.
    pub fn rows_with(&self, species: Species) -> impl Iterator<Item = (usize, &Record)> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.species == species)
    }

    /// Attach the derived row index column.
    pub fn add_index(&mut self) {
        self.index = Some((0..self.records.len()).collect());
    }

    pub fn index(&self) -> Option<&[usize]> {
        self.index.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(v: f64, species: Species) -> Record {
        Record {
            sepal_length: v,
            sepal_width: v,
            petal_length: v,
            petal_width: v,
            species,
        }
    }

    #[test]
    fn species_codes_map_in_order() {
        assert_eq!(Species::from_code(0), Some(Species::Setosa));
        assert_eq!(Species::from_code(2), Some(Species::Virginica));
        assert_eq!(Species::from_code(3), None);
        assert!(Species::Setosa < Species::Versicolor);
    }

    #[test]
    fn appearance_order_differs_from_natural_order() {
        let table = RecordTable::from_records(vec![
            rec(1.0, Species::Virginica),
            rec(2.0, Species::Setosa),
            rec(3.0, Species::Virginica),
        ]);
        assert_eq!(
            table.labels_in_appearance_order(),
            vec![Species::Virginica, Species::Setosa]
        );
        assert_eq!(
            table.labels.iter().copied().collect::<Vec<_>>(),
            vec![Species::Setosa, Species::Virginica]
        );
    }

    #[test]
    fn rows_with_keeps_positions() {
        let table = RecordTable::from_records(vec![
            rec(1.0, Species::Setosa),
            rec(2.0, Species::Virginica),
            rec(3.0, Species::Setosa),
        ]);
        let positions: Vec<usize> = table.rows_with(Species::Setosa).map(|(i, _)| i).collect();
        assert_eq!(positions, vec![0, 2]);
    }

    #[test]
    fn index_is_added_once_on_request() {
        let mut table = RecordTable::from_records(vec![rec(1.0, Species::Setosa); 3]);
        assert!(table.index().is_none());
        table.add_index();
        assert_eq!(table.index(), Some(&[0, 1, 2][..]));
    }

    #[test]
    fn missing_values_are_counted() {
        let table = RecordTable::from_records(vec![
            rec(f64::NAN, Species::Setosa),
            rec(1.0, Species::Setosa),
        ]);
        assert_eq!(table.missing_count(Measurement::PetalWidth), 1);
    }
}
