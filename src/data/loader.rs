use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::{CatalogError, CatalogResult};
use super::model::{Catalog, NumericColumn, PlanetRecord, NAME_COLUMN};
use super::votable::parse_votable;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the exoplanet catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xml` / `.vot` / `.votable` – VOTable with TABLEDATA (archive default)
/// * `.csv`     – archive CSV export, `#` comment lines skipped
/// * `.parquet` – Utf8 `pl_name` column plus numeric columns
pub fn load_catalog(path: &Path) -> CatalogResult<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let catalog = match ext.as_str() {
        "xml" | "vot" | "votable" => load_votable(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(CatalogError::parse(
            path,
            format!("unsupported catalog extension: .{other}"),
        )),
    }?;

    log::info!("Loaded {} catalog rows from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Read planet names from a comma-delimited file.
///
/// Every field of every row is kept, in file order; row boundaries carry no
/// meaning and fields are not trimmed.
pub fn load_target_names(path: &Path) -> CatalogResult<Vec<String>> {
    let file = File::open(path).map_err(|e| CatalogError::from_io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut names = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| CatalogError::parse(path, format!("row {row_no}: {e}")))?;
        names.extend(record.iter().map(str::to_string));
    }

    log::info!("Read {} target names from {}", names.len(), path.display());
    Ok(names)
}

// ---------------------------------------------------------------------------
// VOTable loader
// ---------------------------------------------------------------------------

fn load_votable(path: &Path) -> CatalogResult<Catalog> {
    log::debug!("Reading {} as VOTable", path.display());
    let file = File::open(path).map_err(|e| CatalogError::from_io(path, e))?;
    parse_votable(BufReader::new(file), path)?.into_catalog(path)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with archive column names, one planet per row.
/// Empty cells are missing values; extra columns are ignored.
fn load_csv(path: &Path) -> CatalogResult<Catalog> {
    log::debug!("Reading {} as CSV", path.display());
    let file = File::open(path).map_err(|e| CatalogError::from_io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| CatalogError::parse(path, format!("reading CSV headers: {e}")))?
        .clone();
    let required = std::iter::once(NAME_COLUMN).chain(NumericColumn::ALL.iter().map(|c| c.name()));
    for column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::schema(path, column));
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<PlanetRecord>().enumerate() {
        let mut record =
            result.map_err(|e| CatalogError::parse(path, format!("CSV row {row_no}: {e}")))?;
        // Normalise NaN cells the same way the other loaders do.
        for col in NumericColumn::ALL {
            let value = record.value(col);
            record.set(col, value);
        }
        records.push(record);
    }

    Ok(Catalog::new(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing catalog rows.
///
/// Expected schema:
/// - `pl_name`: Utf8 / LargeUtf8
/// - the thirteen numeric columns: Float64, Float32, Int32 or Int64
///
/// Any other columns are ignored.
fn load_parquet(path: &Path) -> CatalogResult<Catalog> {
    log::debug!("Reading {} as Parquet", path.display());
    let file = File::open(path).map_err(|e| CatalogError::from_io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| CatalogError::parse(path, format!("reading parquet metadata: {e}")))?;
    // Resolve columns from the file schema so files without row groups are
    // still checked.
    let schema = builder.schema().clone();
    let name_idx = schema
        .index_of(NAME_COLUMN)
        .map_err(|_| CatalogError::schema(path, NAME_COLUMN))?;
    let numeric_idx: Vec<(NumericColumn, usize)> = NumericColumn::ALL
        .iter()
        .map(|&col| {
            schema
                .index_of(col.name())
                .map(|idx| (col, idx))
                .map_err(|_| CatalogError::schema(path, col.name()))
        })
        .collect::<CatalogResult<_>>()?;

    let reader = builder
        .build()
        .map_err(|e| CatalogError::parse(path, format!("building parquet reader: {e}")))?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| CatalogError::parse(path, format!("reading record batch: {e}")))?;
        let numeric_cols: Vec<(NumericColumn, &Arc<dyn Array>)> = numeric_idx
            .iter()
            .map(|&(col, idx)| (col, batch.column(idx)))
            .collect();

        let name_col = batch.column(name_idx);

        for row in 0..batch.num_rows() {
            let mut record = PlanetRecord {
                pl_name: extract_string(name_col, row)
                    .map_err(|msg| CatalogError::parse(path, format!("row {row}, {NAME_COLUMN}: {msg}")))?,
                ..Default::default()
            };
            for &(col, array) in &numeric_cols {
                let value = extract_f64(array, row)
                    .map_err(|msg| CatalogError::parse(path, format!("row {row}, {col}: {msg}")))?;
                record.set(col, value);
            }
            records.push(record);
        }
    }

    Ok(Catalog::new(records))
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>, String> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or("expected StringArray")?;
            Ok(Some(arr.value(row).to_string()))
        }
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => Err(format!("expected Utf8 column, got {other:?}")),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>, String> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        other => return Err(format!("expected a numeric column, got {other:?}")),
    };
    value
        .map(Some)
        .ok_or_else(|| format!("array does not match its {:?} type", col.data_type()))
}
