use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use serde_json::{Map, Value as JsonValue};

use super::error::DatasetError;
use super::model::{LaunchDataset, LaunchRecord, Outcome};

/// Column names as they appear in the published launch dataset.
pub mod columns {
    pub const LAUNCH_SITE: &str = "Launch Site";
    pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
    pub const CLASS: &str = "class";
    pub const BOOSTER_CATEGORY: &str = "Booster Version Category";
    pub const FLIGHT_NUMBER: &str = "Flight Number";
    pub const BOOSTER_VERSION: &str = "Booster Version";
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset from a local path or an `http(s)://` URL.
///
/// The whole source is read and validated before anything is returned, so a
/// caller never sees a partially loaded dataset.
pub fn load_source(source: &str) -> Result<LaunchDataset> {
    if is_remote(source) {
        load_remote(source)
    } else {
        load_file(Path::new(source))
    }
}

/// Load a dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – one column per field, same names as the CSV header
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening CSV {}", path.display()))?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading JSON {}", path.display()))?;
            read_json(&text)
        }
        "parquet" | "pq" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening parquet file {}", path.display()))?;
            read_parquet(file)
        }
        other => bail!(DatasetError::UnsupportedFormat(other.to_string())),
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Lower-cased extension of the last path segment of a URL, ignoring any
/// query string or fragment.
fn url_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let segment = path.rsplit('/').next().unwrap_or("");
    match segment.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

fn load_remote(url: &str) -> Result<LaunchDataset> {
    let ext = url_extension(url);
    if !matches!(ext.as_str(), "csv" | "json" | "parquet" | "pq") {
        bail!(DatasetError::UnsupportedFormat(ext));
    }

    log::info!("Fetching launch dataset from {url}");
    let body = reqwest::blocking::get(url)
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?
        .bytes()
        .with_context(|| format!("reading response body from {url}"))?;

    match ext.as_str() {
        "csv" => read_csv(body.as_ref()),
        "json" => {
            let text = std::str::from_utf8(&body).context("response body is not UTF-8")?;
            read_json(text)
        }
        _ => read_parquet(body),
    }
}

fn finish(records: Vec<LaunchRecord>) -> Result<LaunchDataset> {
    match LaunchDataset::from_records(records) {
        Some(ds) => Ok(ds),
        None => bail!(DatasetError::Empty),
    }
}

// ---------------------------------------------------------------------------
// Row validation shared by all formats
// ---------------------------------------------------------------------------

/// Typed cell values of one row before invariant checks.
struct RowValues {
    launch_site: String,
    payload_mass_kg: f64,
    outcome: Outcome,
    booster_category: String,
    flight_number: Option<u32>,
    booster_version: Option<String>,
}

fn validate(row: usize, values: RowValues) -> Result<LaunchRecord, DatasetError> {
    if values.launch_site.trim().is_empty() {
        return Err(DatasetError::invalid(row, columns::LAUNCH_SITE, "", "is empty"));
    }
    if values.booster_category.trim().is_empty() {
        return Err(DatasetError::invalid(row, columns::BOOSTER_CATEGORY, "", "is empty"));
    }
    let payload = values.payload_mass_kg;
    if !payload.is_finite() || payload < 0.0 {
        return Err(DatasetError::invalid(
            row,
            columns::PAYLOAD_MASS,
            payload,
            "is not a non-negative mass",
        ));
    }

    Ok(LaunchRecord {
        launch_site: values.launch_site,
        payload_mass_kg: payload,
        outcome: values.outcome,
        booster_category: values.booster_category,
        flight_number: values.flight_number,
        booster_version: values.booster_version.filter(|v| !v.is_empty()),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, required columns
/// `Launch Site`, `Payload Mass (kg)`, `class`, `Booster Version Category`.
/// `Flight Number` and `Booster Version` are picked up when present; every
/// other column is ignored.
pub fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| position(name).ok_or_else(|| DatasetError::missing(name));

    let site_idx = require(columns::LAUNCH_SITE)?;
    let payload_idx = require(columns::PAYLOAD_MASS)?;
    let class_idx = require(columns::CLASS)?;
    let booster_idx = require(columns::BOOSTER_CATEGORY)?;
    let flight_idx = position(columns::FLIGHT_NUMBER);
    let version_idx = position(columns::BOOSTER_VERSION);

    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.with_context(|| format!("CSV row {row}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let payload_text = cell(payload_idx);
        let payload_mass_kg = payload_text.parse::<f64>().map_err(|_| {
            DatasetError::invalid(row, columns::PAYLOAD_MASS, payload_text, "is not a number")
        })?;

        let class_text = cell(class_idx);
        let outcome = Outcome::parse(class_text).ok_or_else(|| {
            DatasetError::invalid(row, columns::CLASS, class_text, "is not 0 or 1")
        })?;

        let flight_number = match flight_idx.map(cell).filter(|s| !s.is_empty()) {
            Some(text) => Some(text.parse::<u32>().map_err(|_| {
                DatasetError::invalid(row, columns::FLIGHT_NUMBER, text, "is not a flight number")
            })?),
            None => None,
        };

        let values = RowValues {
            launch_site: cell(site_idx).to_string(),
            payload_mass_kg,
            outcome,
            booster_category: cell(booster_idx).to_string(),
            flight_number,
            booster_version: version_idx.map(|idx| cell(idx).to_string()),
        };
        records.push(validate(row, values)?);
    }

    finish(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
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
pub fn read_json(text: &str) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, value) in rows.iter().enumerate() {
        let row = i + 1;
        let obj = value
            .as_object()
            .with_context(|| format!("Row {row} is not a JSON object"))?;

        let class = json_field(obj, columns::CLASS)?;
        let outcome = class
            .as_i64()
            .and_then(Outcome::from_class)
            .or_else(|| class.as_str().and_then(Outcome::parse))
            .or_else(|| class.as_f64().and_then(|f| Outcome::parse(&f.to_string())))
            .ok_or_else(|| DatasetError::invalid(row, columns::CLASS, class, "is not 0 or 1"))?;

        let payload = json_field(obj, columns::PAYLOAD_MASS)?;
        let payload_mass_kg = payload.as_f64().ok_or_else(|| {
            DatasetError::invalid(row, columns::PAYLOAD_MASS, payload, "is not a number")
        })?;

        let flight_number = match obj.get(columns::FLIGHT_NUMBER) {
            None | Some(JsonValue::Null) => None,
            Some(v) => Some(
                v.as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| {
                        DatasetError::invalid(row, columns::FLIGHT_NUMBER, v, "is not a flight number")
                    })?,
            ),
        };

        let values = RowValues {
            launch_site: json_string(obj, row, columns::LAUNCH_SITE)?,
            payload_mass_kg,
            outcome,
            booster_category: json_string(obj, row, columns::BOOSTER_CATEGORY)?,
            flight_number,
            booster_version: obj
                .get(columns::BOOSTER_VERSION)
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_string()),
        };
        records.push(validate(row, values)?);
    }

    finish(records)
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    column: &str,
) -> Result<&'a JsonValue, DatasetError> {
    obj.get(column).ok_or_else(|| DatasetError::missing(column))
}

fn json_string(
    obj: &Map<String, JsonValue>,
    row: usize,
    column: &str,
) -> Result<String, DatasetError> {
    let value = json_field(obj, column)?;
    value
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| DatasetError::invalid(row, column, value, "is not a string"))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load launch records from Parquet.
///
/// Each field is its own column under the CSV header name. Numeric columns
/// may be any integer or float type and string columns Utf8 or LargeUtf8;
/// everything is cast to `Float64` / `Utf8` before reading. Works with files
/// written by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`).
pub fn read_parquet<T: ChunkReader + 'static>(input: T) -> Result<LaunchDataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(input).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str, to: &DataType| -> Result<Option<arrow::array::ArrayRef>> {
            match schema.index_of(name) {
                Ok(idx) => Ok(Some(
                    cast(batch.column(idx), to)
                        .with_context(|| format!("casting column '{name}' to {to}"))?,
                )),
                Err(_) => Ok(None),
            }
        };
        let require = |name: &str, to: &DataType| -> Result<arrow::array::ArrayRef> {
            match column(name, to)? {
                Some(array) => Ok(array),
                None => bail!(DatasetError::missing(name)),
            }
        };

        let sites = require(columns::LAUNCH_SITE, &DataType::Utf8)?;
        let payloads = require(columns::PAYLOAD_MASS, &DataType::Float64)?;
        let classes = require(columns::CLASS, &DataType::Float64)?;
        let boosters = require(columns::BOOSTER_CATEGORY, &DataType::Utf8)?;
        let flights = column(columns::FLIGHT_NUMBER, &DataType::Float64)?;
        let versions = column(columns::BOOSTER_VERSION, &DataType::Utf8)?;

        let sites = sites.as_string::<i32>();
        let payloads = payloads.as_primitive::<Float64Type>();
        let classes = classes.as_primitive::<Float64Type>();
        let boosters = boosters.as_string::<i32>();
        let flights = flights.as_ref().map(|a| a.as_primitive::<Float64Type>());
        let versions = versions.as_ref().map(|a| a.as_string::<i32>());

        for i in 0..batch.num_rows() {
            let row = records.len() + 1;

            let required_null = [
                (sites.is_null(i), columns::LAUNCH_SITE),
                (payloads.is_null(i), columns::PAYLOAD_MASS),
                (classes.is_null(i), columns::CLASS),
                (boosters.is_null(i), columns::BOOSTER_CATEGORY),
            ];
            if let Some((_, name)) = required_null.iter().find(|(null, _)| *null) {
                bail!(DatasetError::invalid(row, name, "null", "is missing"));
            }

            let class = classes.value(i);
            let outcome = Outcome::parse(&class.to_string())
                .ok_or_else(|| DatasetError::invalid(row, columns::CLASS, class, "is not 0 or 1"))?;

            let flight_number = match flights.filter(|f| !f.is_null(i)) {
                Some(f) => {
                    let n = f.value(i);
                    if n.fract() != 0.0 || n < 0.0 || n > u32::MAX as f64 {
                        bail!(DatasetError::invalid(
                            row,
                            columns::FLIGHT_NUMBER,
                            n,
                            "is not a flight number"
                        ));
                    }
                    Some(n as u32)
                }
                None => None,
            };

            let values = RowValues {
                launch_site: sites.value(i).trim().to_string(),
                payload_mass_kg: payloads.value(i),
                outcome,
                booster_category: boosters.value(i).trim().to_string(),
                flight_number,
                booster_version: versions
                    .filter(|v| !v.is_null(i))
                    .map(|v| v.value(i).trim().to_string()),
            };
            records.push(validate(row, values)?);
        }
    }

    finish(records)
}
