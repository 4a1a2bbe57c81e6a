use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchDataset, LaunchRecord, RawRecord, SchemaError};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch-records dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – canonical layout, header row with the four column names
/// * `.json`    – records-oriented array of objects with the same keys
/// * `.parquet` – flat columns of the same names (e.g. `df.to_parquet()`)
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            read_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the columns `Launch Site`,
/// `Payload Mass (kg)`, `Booster Version Category`, `class`, in any order.
/// Extra columns are ignored; a missing column is a hard error.
fn read_csv<R: Read>(reader: R) -> Result<LaunchDataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (row_no, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let record =
            LaunchRecord::try_from(raw).with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "KSC LC-39A",
///     "Payload Mass (kg)": 3696.6,
///     "Booster Version Category": "FT",
///     "class": 1
///   },
///   ...
/// ]
/// ```
fn read_json(text: &str) -> Result<LaunchDataset> {
    let raw: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON records")?;

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(row_no, raw)| {
            LaunchRecord::try_from(raw).with_context(|| format!("JSON row {row_no}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat launch-record columns.
///
/// Expected schema: `Launch Site` (Utf8), `Payload Mass (kg)` (Float64 or
/// Float32/Int64), `Booster Version Category` (Utf8), `class` (Int64 or
/// Int32). Extra columns are ignored.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<Arc<dyn Array>> {
            let idx = schema
                .index_of(name)
                .map_err(|_| SchemaError::MissingColumn(name))?;
            Ok(Arc::clone(batch.column(idx)))
        };

        let site_col = column("Launch Site")?;
        let payload_col = column("Payload Mass (kg)")?;
        let booster_col = column("Booster Version Category")?;
        let class_col = column("class")?;

        for row in 0..batch.num_rows() {
            let raw = RawRecord {
                launch_site: extract_string(&site_col, row)
                    .with_context(|| format!("Row {row}: 'Launch Site'"))?,
                payload_mass_kg: extract_f64(&payload_col, row)
                    .with_context(|| format!("Row {row}: 'Payload Mass (kg)'"))?,
                booster_version_category: extract_string(&booster_col, row)
                    .with_context(|| format!("Row {row}: 'Booster Version Category'"))?,
                class: extract_i64(&class_col, row)
                    .with_context(|| format!("Row {row}: 'class'"))?,
            };
            records.push(
                LaunchRecord::try_from(raw).with_context(|| format!("Parquet row {row}"))?,
            );
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) as f64)
        }
        other => bail!("Expected numeric column, got {other:?}"),
    }
}

fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        other => bail!("Expected integer column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    const CSV: &str = "\
Launch Site,Payload Mass (kg),Booster Version Category,class
CCAFS LC-40,500.0,v1.0,1
CCAFS LC-40,1500.0,v1.1,0
KSC LC-39A,3696.6,FT,1
";

    #[test]
    fn csv_roundtrip() {
        let ds = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(ds.payload_bounds, (500.0, 3696.6));
        assert_eq!(ds.records[2].outcome, Outcome::Success);
        assert_eq!(ds.records[2].booster_version_category, "FT");
    }

    #[test]
    fn csv_extra_columns_are_ignored() {
        let csv = "\
Flight Number,Launch Site,Payload Mass (kg),Booster Version Category,class
1,CCAFS LC-40,500.0,v1.0,1
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].launch_site, "CCAFS LC-40");
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let csv = "\
Launch Site,Booster Version Category,class
CCAFS LC-40,v1.0,1
";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn csv_bad_class_value_is_an_error() {
        let csv = "\
Launch Site,Payload Mass (kg),Booster Version Category,class
CCAFS LC-40,500.0,v1.0,3
";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn csv_negative_payload_is_an_error() {
        let csv = "\
Launch Site,Payload Mass (kg),Booster Version Category,class
CCAFS LC-40,-500.0,v1.0,1
";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn json_records() {
        let json = r#"[
            {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 500.0,
             "Booster Version Category": "v1.1", "class": 0},
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 5300.0,
             "Booster Version Category": "B4", "class": 1}
        ]"#;
        let ds = read_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].outcome, Outcome::Failure);
        assert_eq!(ds.booster_categories, vec!["B4", "v1.1"]);
    }

    #[test]
    fn json_missing_key_is_an_error() {
        let json = r#"[{"Launch Site": "KSC LC-39A", "class": 1}]"#;
        assert!(read_json(json).is_err());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        assert!(load_file(Path::new("records.xlsx")).is_err());
    }
}
