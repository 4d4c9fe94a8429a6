use std::fmt;

use super::model::{FilteredTable, NumericColumn};

// ---------------------------------------------------------------------------
// Statistic – the aggregates computed per column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Statistic {
    Min,
    Max,
    Median,
    Mean,
    Std,
}

impl Statistic {
    /// Display order.
    pub const ALL: [Statistic; 5] = [
        Statistic::Min,
        Statistic::Max,
        Statistic::Median,
        Statistic::Mean,
        Statistic::Std,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::Median => "median",
            Statistic::Mean => "mean",
            Statistic::Std => "std",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ColumnSummary / SummaryTable
// ---------------------------------------------------------------------------

/// Descriptive statistics of one column. `None` means undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnSummary {
    /// Number of non-missing values the statistics were computed from.
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

impl ColumnSummary {
    /// Compute all statistics over `values`, which must not contain NaN.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            count: values.len(),
            min: values.iter().copied().reduce(f64::min),
            max: values.iter().copied().reduce(f64::max),
            median: median(values),
            mean: mean(values),
            std: sample_std_dev(values),
        }
    }

    pub fn get(&self, stat: Statistic) -> Option<f64> {
        match stat {
            Statistic::Min => self.min,
            Statistic::Max => self.max,
            Statistic::Median => self.median,
            Statistic::Mean => self.mean,
            Statistic::Std => self.std,
        }
    }

    /// Like [`ColumnSummary::get`] with undefined values as NaN.
    pub fn value(&self, stat: Statistic) -> f64 {
        self.get(stat).unwrap_or(f64::NAN)
    }
}

/// Per-column statistics, columns kept in the order they were requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    columns: Vec<(NumericColumn, ColumnSummary)>,
}

impl SummaryTable {
    pub fn columns(&self) -> &[(NumericColumn, ColumnSummary)] {
        &self.columns
    }

    pub fn get(&self, column: NumericColumn) -> Option<&ColumnSummary> {
        self.columns
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, s)| s)
    }
}

/// Compute the summary of `columns` over `table`. Missing values are ignored
/// per column.
pub fn summarize(table: &FilteredTable, columns: &[NumericColumn]) -> SummaryTable {
    let columns = columns
        .iter()
        .map(|&col| {
            let summary = ColumnSummary::from_values(&table.column_values(col));
            if summary.count == 0 {
                log::debug!("Column {col} has no values in the filtered table");
            }
            (col, summary)
        })
        .collect();
    SummaryTable { columns }
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean. `None` when `data` is empty.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Middle value, or the average of the two middle values for even lengths.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Sample standard deviation (denominator `n - 1`). `None` for fewer than
/// two values.
pub fn sample_std_dev(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let mean = mean(data)?;
    let sum_sq: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
    Some((sum_sq / (data.len() - 1) as f64).sqrt())
}
