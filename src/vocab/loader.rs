use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rust_embed::Embed;

use crate::error::LoadError;
use crate::vocab::record::{ColumnNames, RawRecord};
use crate::vocab::store::VocabularyStore;

#[derive(Embed)]
#[folder = "assets/wordlists/"]
struct WordListAssets;

pub const BUNDLED_WORD_LIST: &str = "sample.csv";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordListSource {
    Bundled,
    File(PathBuf),
    Url(String),
}

impl WordListSource {
    /// `None` or an empty setting selects the bundled list.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => WordListSource::Bundled,
            Some(v) if v.starts_with("http://") || v.starts_with("https://") => {
                WordListSource::Url(v.to_string())
            }
            Some(v) => WordListSource::File(PathBuf::from(v)),
        }
    }
}

impl fmt::Display for WordListSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordListSource::Bundled => write!(f, "bundled {BUNDLED_WORD_LIST}"),
            WordListSource::File(path) => write!(f, "{}", path.display()),
            WordListSource::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Csv,
    Tsv,
    Json,
}

impl Format {
    fn from_name(name: &str) -> Result<Self, LoadError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") | None => Ok(Format::Csv),
            Some("tsv") => Ok(Format::Tsv),
            Some("json") => Ok(Format::Json),
            Some(other) => Err(LoadError::UnsupportedFormat(other.to_string())),
        }
    }
}

pub fn load_store(
    source: &WordListSource,
    columns: &ColumnNames,
) -> Result<VocabularyStore, LoadError> {
    let rows = read_rows(source)?;
    info!("read {} rows from {}", rows.len(), source);
    VocabularyStore::load(rows, columns)
}

pub fn read_rows(source: &WordListSource) -> Result<Vec<RawRecord>, LoadError> {
    match source {
        WordListSource::Bundled => {
            let file = WordListAssets::get(BUNDLED_WORD_LIST)
                .ok_or_else(|| LoadError::MissingBundle(BUNDLED_WORD_LIST.to_string()))?;
            parse_csv(file.data.as_ref(), b',')
        }
        WordListSource::File(path) => {
            let format = Format::from_name(&path.to_string_lossy())?;
            let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            parse_text(&text, format)
        }
        WordListSource::Url(url) => {
            let path = url.split(['?', '#']).next().unwrap_or(url);
            let format = Format::from_name(path).unwrap_or(Format::Csv);
            let text = fetch(url)?;
            parse_text(&text, format)
        }
    }
}

fn parse_text(text: &str, format: Format) -> Result<Vec<RawRecord>, LoadError> {
    match format {
        Format::Csv => parse_csv(text.as_bytes(), b','),
        Format::Tsv => parse_csv(text.as_bytes(), b'\t'),
        Format::Json => parse_json(text),
    }
}

/// Header row required. Malformed rows are logged and skipped, blank rows dropped.
pub fn parse_csv<R: std::io::Read>(reader: R, delimiter: u8) -> Result<Vec<RawRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{FEFF}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                warn!("skipping malformed row {}: {err}", idx + 2);
                continue;
            }
        };
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: RawRecord = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// An array of flat objects. Numbers and booleans become text, nulls are dropped.
/// Keys are trimmed like CSV headers; when two keys trim to the same name the one
/// already spelled without padding wins, otherwise the first in key order.
pub fn parse_json(text: &str) -> Result<Vec<RawRecord>, LoadError> {
    let values: Vec<BTreeMap<String, serde_json::Value>> = serde_json::from_str(text)?;
    let rows = values
        .into_iter()
        .map(|object| {
            let mut row = RawRecord::new();
            for (key, value) in object {
                let text = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => continue,
                    other => other.to_string(),
                };
                let name = key.trim();
                if name == key {
                    row.insert(key, text);
                } else {
                    row.entry(name.to_string()).or_insert(text);
                }
            }
            row
        })
        .collect();
    Ok(rows)
}

#[cfg(feature = "network")]
fn fetch(url: &str) -> Result<String, LoadError> {
    let fetch_error = |reason: String| LoadError::Fetch {
        url: url.to_string(),
        reason,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| fetch_error(e.to_string()))?;
    let response = client
        .get(url)
        .send()
        .map_err(|e| fetch_error(e.to_string()))?;
    if !response.status().is_success() {
        return Err(fetch_error(response.status().to_string()));
    }
    response.text().map_err(|e| fetch_error(e.to_string()))
}

#[cfg(not(feature = "network"))]
fn fetch(url: &str) -> Result<String, LoadError> {
    Err(LoadError::Fetch {
        url: url.to_string(),
        reason: "built without the network feature".to_string(),
    })
}
