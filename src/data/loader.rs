use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{EvDataset, RawRecord};

// ---------------------------------------------------------------------------
// Source & errors
// ---------------------------------------------------------------------------

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Path(PathBuf),
    Url(String),
}

impl DatasetSource {
    /// `http://` / `https://` locations are fetched over the network,
    /// anything else is a local path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DatasetSource::Url(location.to_string())
        } else {
            DatasetSource::Path(PathBuf::from(location))
        }
    }

    fn is_json(&self) -> bool {
        let ext = match self {
            DatasetSource::Path(p) => p
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_ascii_lowercase(),
            DatasetSource::Url(u) => {
                let path = u.split(['?', '#']).next().unwrap_or("");
                Path::new(path)
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_ascii_lowercase()
            }
        };
        ext == "json"
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Path(p) => write!(f, "{}", p.display()),
            DatasetSource::Url(u) => write!(f, "{u}"),
        }
    }
}

/// Whole-file transport failures. Row-level problems never end up here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch and parse the dataset. Only transport failures are errors; an
/// empty or malformed body yields an empty (or partial) dataset.
pub fn load(source: &DatasetSource) -> Result<EvDataset, LoadError> {
    let body = fetch_bytes(source)?;
    let records = parse_records(source, &body);
    Ok(EvDataset::from_raw_records(&records))
}

/// Result of a background load, tagged with the generation that started it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub generation: u64,
    pub result: Result<EvDataset, LoadError>,
}

/// Run [`load`] on a worker thread and send the outcome to `tx`.
/// `notify` runs after sending so the UI can wake up.
pub fn spawn_load<F>(source: DatasetSource, generation: u64, tx: Sender<LoadOutcome>, notify: F)
where
    F: FnOnce() + Send + 'static,
{
    thread::spawn(move || {
        log::debug!("Load #{generation} started from {source}");
        let result = load(&source);
        if tx.send(LoadOutcome { generation, result }).is_err() {
            log::debug!("Load #{generation} finished after the session closed");
            return;
        }
        notify();
    });
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Raw body of the source. Decoding is left to the parsers so a bad byte
/// only costs the row it sits in.
pub fn fetch_bytes(source: &DatasetSource) -> Result<Vec<u8>, LoadError> {
    match source {
        DatasetSource::Path(path) => std::fs::read(path).map_err(|e| LoadError::Io {
            path: path.clone(),
            source: e,
        }),
        DatasetSource::Url(url) => {
            let request_err = |e: reqwest::Error| LoadError::Request {
                url: url.clone(),
                source: e,
            };
            let response = reqwest::blocking::get(url).map_err(request_err)?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status,
                });
            }
            response
                .bytes()
                .map(|body| body.to_vec())
                .map_err(request_err)
        }
    }
}

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

pub fn parse_records(source: &DatasetSource, body: &[u8]) -> Vec<RawRecord> {
    if source.is_json() {
        parse_json(body)
    } else {
        parse_csv(body)
    }
}

/// CSV layout: header row with column names, one vehicle per line.
/// Short rows produce records without the missing columns; rows the reader
/// cannot decode (e.g. invalid UTF-8) are skipped.
pub fn parse_csv(body: &[u8]) -> Vec<RawRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body);

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(|h| h.trim().to_string()).collect(),
        Err(e) => {
            log::warn!("Unreadable CSV header, treating dataset as empty: {e}");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping CSV row {row_no}: {e}");
                skipped += 1;
                continue;
            }
        };

        let raw: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        records.push(raw);
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} unreadable CSV rows");
    }
    records
}

/// Records-oriented JSON, as written by `df.to_json(orient='records')`:
///
/// ```json
/// [ { "Make": "TESLA", "Model": "MODEL 3", "Electric Range": 220 }, ... ]
/// ```
///
/// Non-string values are stringified, nulls dropped, non-object rows skipped.
pub fn parse_json(body: &[u8]) -> Vec<RawRecord> {
    let root: JsonValue = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Unparsable JSON dataset, treating as empty: {e}");
            return Vec::new();
        }
    };

    let Some(rows) = root.as_array() else {
        log::warn!("Expected top-level JSON array, treating dataset as empty");
        return Vec::new();
    };

    rows.iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let obj = row.as_object();
            if obj.is_none() {
                log::warn!("Skipping JSON row {i}: not an object");
            }
            obj
        })
        .map(|obj| {
            obj.iter()
                .filter_map(|(key, val)| json_to_text(val).map(|v| (key.clone(), v)))
                .collect()
        })
        .collect()
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
