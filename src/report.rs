use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::summary::{Statistic, SummaryTable};

// ---------------------------------------------------------------------------
// Summary table presentation
// ---------------------------------------------------------------------------

/// Lay the summary out as a record batch: a `statistic` column followed by one
/// Float64 column per numeric field, one row per [`Statistic`]. Undefined
/// statistics are stored as NaN.
pub fn summary_batch(summary: &SummaryTable) -> Result<RecordBatch, ArrowError> {
    let mut fields = vec![Field::new("statistic", DataType::Utf8, false)];
    let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from(
        Statistic::ALL.iter().map(|s| s.name()).collect::<Vec<_>>(),
    ))];

    for (col, stats) in summary.columns() {
        fields.push(Field::new(col.name(), DataType::Float64, false));
        columns.push(Arc::new(Float64Array::from(
            Statistic::ALL
                .iter()
                .map(|&s| stats.value(s))
                .collect::<Vec<_>>(),
        )));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

/// Render the summary as a bordered text table for the terminal.
pub fn format_summary(summary: &SummaryTable) -> Result<String, ArrowError> {
    let batch = summary_batch(summary)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}

/// Short text used by the UI and the table for one value.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.abs() >= 1e5 || (v != 0.0 && v.abs() < 1e-3) => format!("{v:.4e}"),
        Some(v) => format!("{v:.4}"),
        None => "NaN".to_string(),
    }
}
