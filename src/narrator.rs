//! Hand-written observations about the iris data.
//!
//! These are authored text, printed verbatim; nothing here looks at the
//! computed statistics.

use std::io::{self, Write};

pub const OBSERVATIONS: [&str; 3] = [
    "• Setosa has smaller petal size than others.",
    "• Virginica has the highest average measurements.",
    "• Some features like petal length vary greatly by species.",
];

pub const INSIGHTS: [&str; 4] = [
    "- Setosa flowers are clearly different in petal size.",
    "- Virginica tends to dominate in terms of size.",
    "- Sepal length and petal length show a positive correlation.",
    "- Histogram reveals the distribution is fairly normal for sepal width.",
];

pub fn print_observations(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n📌 Observation:")?;
    for line in OBSERVATIONS {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn print_insights(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n🧠 Summary of Insights:")?;
    for line in INSIGHTS {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
