use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::error::DataError;
use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

const REQUIRED_COLUMNS: [&str; 4] = [COL_LAUNCH_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER_CATEGORY];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (the SpaceX dashboard export)
/// * `.json`    – `[{ "Launch Site": ..., "class": ..., ... }, ...]`
/// * `.parquet` – one column per field, same names as the CSV header
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;
    log::debug!("{}: {} launches parsed", path.display(), dataset.len());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row shape shared by the CSV and JSON readers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLaunch {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    /// Read as float: pandas exports may write `1.0`.
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
}

impl TryFrom<RawLaunch> for LaunchRecord {
    type Error = DataError;

    fn try_from(raw: RawLaunch) -> Result<Self, Self::Error> {
        Ok(LaunchRecord {
            flight_number: raw.flight_number,
            booster_version: raw.booster_version.filter(|s| !s.is_empty()),
            ..LaunchRecord::new(
                raw.launch_site,
                validate_payload(raw.payload_mass_kg)?,
                Outcome::try_from(raw.class)?,
                raw.booster_version_category,
            )
        })
    }
}

fn validate_payload(payload: f64) -> Result<f64, DataError> {
    if payload.is_finite() && payload >= 0.0 {
        Ok(payload)
    } else {
        Err(DataError::InvalidPayload(payload))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with at least the four required columns.
/// `Flight Number` and `Booster Version` are picked up when present;
/// every other column (e.g. the pandas `Unnamed: 0` index) is ignored.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunch>().enumerate() {
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
///     "Flight Number": 1,
///     "Launch Site": "CCAFS LC-40",
///     "class": 0,
///     "Payload Mass (kg)": 0.0,
///     "Booster Version": "F9 v1.0  B0003",
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&text).context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let raw: RawLaunch =
            serde_json::from_value(row).with_context(|| format!("JSON row {i}"))?;
        records.push(LaunchRecord::try_from(raw).with_context(|| format!("JSON row {i}"))?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launches.
///
/// Expected schema: the CSV column names, with
/// - string columns as Utf8 or LargeUtf8
/// - numeric columns as Int32, Int64, Float32 or Float64
///
/// Works with files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let site = required_column(&batch, COL_LAUNCH_SITE)?;
        let payload = required_column(&batch, COL_PAYLOAD)?;
        let class = required_column(&batch, COL_CLASS)?;
        let category = required_column(&batch, COL_BOOSTER_CATEGORY)?;
        let flight = optional_column(&batch, COL_FLIGHT_NUMBER);
        let version = optional_column(&batch, COL_BOOSTER_VERSION);

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row;
            let record = (|| -> Result<LaunchRecord> {
                let flight_number = match flight {
                    Some(col) => optional_u32(col, row, COL_FLIGHT_NUMBER)?,
                    None => None,
                };
                let booster_version = match version {
                    Some(col) => optional_string(col, row, COL_BOOSTER_VERSION)?,
                    None => None,
                };
                let outcome = Outcome::try_from(required_f64(class, row, COL_CLASS)?)?;
                let payload_mass_kg = validate_payload(required_f64(payload, row, COL_PAYLOAD)?)?;
                Ok(LaunchRecord {
                    flight_number,
                    booster_version,
                    ..LaunchRecord::new(
                        required_string(site, row, COL_LAUNCH_SITE)?,
                        payload_mass_kg,
                        outcome,
                        required_string(category, row, COL_BOOSTER_CATEGORY)?,
                    )
                })
            })()
            .with_context(|| format!("Parquet row {row_no}"))?;
            records.push(record);
        }
        row_offset += batch.num_rows();
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn required_column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a Arc<dyn Array>> {
    batch
        .schema()
        .index_of(name)
        .map(|idx| batch.column(idx))
        .map_err(|_| DataError::MissingColumn(name).into())
}

fn optional_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a Arc<dyn Array>> {
    batch.schema().index_of(name).ok().map(|idx| batch.column(idx))
}

fn required_string(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<String> {
    optional_string(col, row, name)?.ok_or_else(|| DataError::NullValue(name.to_string()).into())
}

fn required_f64(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<f64> {
    optional_f64(col, row, name)?.ok_or_else(|| DataError::NullValue(name.to_string()).into())
}

/// Extract a string cell from a Utf8 / LargeUtf8 column.
fn optional_string(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        other => bail!(unsupported(name, other)),
    };
    Ok(Some(value.to_string()))
}

/// Extract a numeric cell as `f64` from any integer or float column.
fn optional_f64(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        _ => None,
    };
    value
        .map(Some)
        .ok_or_else(|| unsupported(name, col.data_type()).into())
}

/// Extract a count-like cell (flight number). Integer columns must fit `u32`;
/// float columns (pandas' nullable ints) must also hold a whole number.
fn optional_u32(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<Option<u32>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| u32::try_from(a.value(row)).map_err(|_| a.value(row).to_string())),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| u32::try_from(a.value(row)).map_err(|_| a.value(row).to_string())),
        DataType::Float32 | DataType::Float64 => {
            let v = required_f64(col, row, name)?;
            Some(whole_u32(v).ok_or_else(|| v.to_string()))
        }
        _ => None,
    };
    match value {
        Some(Ok(n)) => Ok(Some(n)),
        Some(Err(shown)) => Err(DataError::InvalidFlightNumber(shown).into()),
        None => Err(unsupported(name, col.data_type()).into()),
    }
}

fn whole_u32(v: f64) -> Option<u32> {
    (v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v)).then(|| v as u32)
}

fn unsupported(name: &str, data_type: &DataType) -> DataError {
    DataError::UnsupportedColumnType {
        column: name.to_string(),
        data_type: format!("{data_type:?}"),
    }
}
