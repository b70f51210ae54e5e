use std::io::Read;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// Column names of the tabular launch schema, shared by all three formats.
const COL_FLIGHT_NUMBER: &str = "Flight Number";
const COL_LAUNCH_SITE: &str = "Launch Site";
const COL_CLASS: &str = "class";
const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
const COL_BOOSTER_VERSION: &str = "Booster Version";
const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("dataset contains no launch records")]
    Empty,
    #[error("row {row}: {problem}")]
    InvalidRecord { row: usize, problem: String },
    #[error("column '{0}' is missing from the dataset")]
    MissingColumn(&'static str),
    #[error("column '{column}' has unexpected type {datatype}")]
    ColumnType {
        column: &'static str,
        datatype: String,
    },
    #[error("row {row}: column '{column}' is null")]
    NullValue { column: &'static str, row: usize },
    #[error("reading dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reading Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("reading Arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch columns; extra columns (such as
///   a pandas index column) are ignored
/// * `.json`    – array of record objects with the same keys
/// * `.parquet` – flat scalar columns of the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset, DatasetError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Raw row – the on-disk shape before validation
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    outcome_class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord, DatasetError> {
        let outcome =
            Outcome::from_class(self.outcome_class).ok_or_else(|| DatasetError::InvalidRecord {
                row,
                problem: format!("outcome class {} is not 0 or 1", self.outcome_class),
            })?;

        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(DatasetError::InvalidRecord {
                row,
                problem: format!(
                    "payload mass {} kg is negative or not finite",
                    self.payload_mass_kg
                ),
            });
        }

        Ok(LaunchRecord {
            flight_number: self.flight_number,
            site: self.launch_site,
            payload_mass_kg: self.payload_mass_kg,
            outcome,
            booster_version: self.booster_version,
            booster_category: self.booster_version_category,
        })
    }
}

fn build_dataset(records: Vec<LaunchRecord>) -> Result<LaunchDataset, DatasetError> {
    let dataset = LaunchDataset::from_records(records);
    if dataset.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset, DatasetError> {
    let file = std::fs::File::open(path)?;
    parse_csv(file)
}

fn parse_csv<R: Read>(reader: R) -> Result<LaunchDataset, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut records = Vec::new();
    for (row, result) in csv_reader.deserialize::<RawLaunchRow>().enumerate() {
        records.push(result?.into_record(row)?);
    }
    build_dataset(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "Flight Number": 23,
///     "Launch Site": "CCAFS LC-40",
///     "class": 1,
///     "Payload Mass (kg)": 2395.0,
///     "Booster Version": "F9 FT B1021.1",
///     "Booster Version Category": "FT"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset, DatasetError> {
    let text = std::fs::read_to_string(path)?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<LaunchDataset, DatasetError> {
    let rows: Vec<RawLaunchRow> = serde_json::from_str(text)?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, raw) in rows.into_iter().enumerate() {
        records.push(raw.into_record(row)?);
    }
    build_dataset(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar launch columns.
///
/// Integer columns may be Int32 or Int64; the payload column may be Float32,
/// Float64 or an integer type. Works with files written by both Pandas
/// (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset, DatasetError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let flight_col = launch_column(&batch, &schema, COL_FLIGHT_NUMBER)?;
        let site_col = launch_column(&batch, &schema, COL_LAUNCH_SITE)?;
        let class_col = launch_column(&batch, &schema, COL_CLASS)?;
        let payload_col = launch_column(&batch, &schema, COL_PAYLOAD_MASS)?;
        let booster_col = launch_column(&batch, &schema, COL_BOOSTER_VERSION)?;
        let category_col = launch_column(&batch, &schema, COL_BOOSTER_CATEGORY)?;

        for row in 0..batch.num_rows() {
            let raw = RawLaunchRow {
                flight_number: i64_at(flight_col, row, COL_FLIGHT_NUMBER)?,
                launch_site: string_at(site_col, row, COL_LAUNCH_SITE)?,
                outcome_class: i64_at(class_col, row, COL_CLASS)?,
                payload_mass_kg: f64_at(payload_col, row, COL_PAYLOAD_MASS)?,
                booster_version: string_at(booster_col, row, COL_BOOSTER_VERSION)?,
                booster_version_category: string_at(category_col, row, COL_BOOSTER_CATEGORY)?,
            };
            let index = records.len();
            records.push(raw.into_record(index)?);
        }
    }

    build_dataset(records)
}

// -- Parquet / Arrow helpers --

fn launch_column<'a>(
    batch: &'a arrow::record_batch::RecordBatch,
    schema: &arrow::datatypes::SchemaRef,
    name: &'static str,
) -> Result<&'a ArrayRef, DatasetError> {
    let index = schema
        .index_of(name)
        .map_err(|_| DatasetError::MissingColumn(name))?;
    Ok(batch.column(index))
}

fn string_at(col: &ArrayRef, row: usize, column: &'static str) -> Result<String, DatasetError> {
    if col.is_null(row) {
        return Err(DatasetError::NullValue { column, row });
    }
    match col.data_type() {
        DataType::Utf8 => {
            // Infallible after the type check above.
            let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => Err(DatasetError::ColumnType {
            column,
            datatype: format!("{other:?}"),
        }),
    }
}

fn i64_at(col: &ArrayRef, row: usize, column: &'static str) -> Result<i64, DatasetError> {
    if col.is_null(row) {
        return Err(DatasetError::NullValue { column, row });
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Ok(arr.value(row))
        }
        other => Err(DatasetError::ColumnType {
            column,
            datatype: format!("{other:?}"),
        }),
    }
}

fn f64_at(col: &ArrayRef, row: usize, column: &'static str) -> Result<f64, DatasetError> {
    if col.is_null(row) {
        return Err(DatasetError::NullValue { column, row });
    }
    match col.data_type() {
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            Ok(arr.value(row))
        }
        DataType::Int32 | DataType::Int64 => i64_at(col, row, column).map(|v| v as f64),
        other => Err(DatasetError::ColumnType {
            column,
            datatype: format!("{other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_FIXTURE: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,1,525.0,F9 v1.1  B1011,v1.1
2,3,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1
";

    #[test]
    fn parses_csv_with_pandas_index_column() {
        let dataset = parse_csv(CSV_FIXTURE.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.sites, vec!["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(dataset.records[1].payload_mass_kg, 525.0);
        assert_eq!(dataset.records[1].outcome, Outcome::Success);
        assert_eq!(dataset.records[0].booster_category, "v1.0");
    }

    #[test]
    fn parses_record_oriented_json() {
        let text = r#"[
            {
                "Flight Number": 23,
                "Launch Site": "CCAFS LC-40",
                "class": 1,
                "Payload Mass (kg)": 2395.0,
                "Booster Version": "F9 FT B1021.1",
                "Booster Version Category": "FT"
            }
        ]"#;
        let dataset = parse_json(text).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].flight_number, 23);
        assert_eq!(dataset.payload_extent, (2395.0, 2395.0));
    }

    #[test]
    fn rejects_out_of_range_outcome_class() {
        let csv = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,2,100.0,F9 v1.0,v1.0
";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRecord { row: 0, .. }));
    }

    #[test]
    fn rejects_negative_payload_mass() {
        let csv = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,1,-5.0,F9 v1.0,v1.0
";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRecord { row: 0, .. }));
    }

    #[test]
    fn empty_file_is_an_error() {
        let csv =
            "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn unknown_extension_is_rejected_before_io() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedExtension(ext) if ext == "xlsx"));
    }
}
