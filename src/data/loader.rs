// ============================================================
// Layer 4 — Table Loader
// ============================================================
// Reads comma-separated data into an in-memory Table.
//
// Two sources implement the TableSource trait from Layer 3:
//   CsvFileSource  → a CSV file on local disk
//   HttpCsvSource  → a CSV downloaded with a blocking GET
//
// Both feed the same parser, which follows the conventions the
// raw spam corpus relies on:
//   - The first record is the header
//   - A blank header cell at position i is named "Unnamed: i"
//     (spam.csv ends in three unnamed junk columns)
//   - A repeated header name gets a ".N" suffix
//   - Rows shorter than the header are padded with missing cells
//   - An empty field is a missing value (None)
//
// Reference: csv crate documentation
//            reqwest crate documentation (blocking client)

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::error::PipelineError;
use crate::domain::table::Table;
use crate::domain::traits::TableSource;

/// Reads a CSV file from local disk.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for CsvFileSource {
    fn load(&self) -> Result<Table, PipelineError> {
        let file = File::open(&self.path).map_err(|e| PipelineError::io(&self.path, e))?;
        let table = read_csv(file, &self.path.display().to_string())?;
        tracing::debug!("Data loaded from {}", self.path.display());
        Ok(table)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Downloads a CSV file over http(s).
pub struct HttpCsvSource {
    url:    String,
    client: Option<reqwest::blocking::Client>,
}

impl HttpCsvSource {
    /// Fetch with reqwest's default client (system proxy settings apply).
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), client: None }
    }

    /// Fetch with a caller-configured client (timeouts, proxies).
    pub fn with_client(url: impl Into<String>, client: reqwest::blocking::Client) -> Self {
        Self { url: url.into(), client: Some(client) }
    }
}

impl TableSource for HttpCsvSource {
    fn load(&self) -> Result<Table, PipelineError> {
        let fetch_err = |reason: String| PipelineError::Fetch {
            url: self.url.clone(),
            reason,
        };

        let sent = match &self.client {
            Some(client) => client.get(&self.url).send(),
            None         => reqwest::blocking::get(&self.url),
        };
        let response = sent
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_err(e.to_string()))?;
        let body = response.bytes().map_err(|e| fetch_err(e.to_string()))?;

        tracing::debug!("Fetched {} bytes from {}", body.len(), self.url);
        let table = read_csv(body.as_ref(), &self.url)?;
        tracing::debug!("Data loaded from {}", self.url);
        Ok(table)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Pick a source implementation from the location string:
/// `http://` and `https://` URLs are downloaded, anything else
/// is treated as a local path.
pub fn source_for(location: &str) -> Box<dyn TableSource> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpCsvSource::new(location))
    } else {
        Box::new(CsvFileSource::new(location))
    }
}

/// Read a previously persisted partition.
///
/// Unlike a raw source, a partition with a header but no rows is
/// useless downstream, so it is reported as EmptyData.
pub fn load_partition(path: &Path) -> Result<Table, PipelineError> {
    let table = CsvFileSource::new(path).load()?;
    if table.is_empty() {
        return Err(PipelineError::EmptyData(format!(
            "'{}' contains no rows",
            path.display()
        )));
    }
    Ok(table)
}

/// Parse CSV bytes from any reader into a Table.
/// `origin` is only used to make error messages traceable.
pub fn read_csv<R: Read>(reader: R, origin: &str) -> Result<Table, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = rdr.headers().map_err(|e| csv_error(origin, e))?.clone();
    if header.is_empty() || (header.len() == 1 && header[0].is_empty()) {
        return Err(PipelineError::EmptyData(format!(
            "'{origin}' has no columns to parse"
        )));
    }

    let mut table = Table::new(column_names(&header));

    for record in rdr.records() {
        let record = record.map_err(|e| csv_error(origin, e))?;
        let row = record
            .iter()
            .map(|field| (!field.is_empty()).then(|| field.to_string()))
            .collect();
        table
            .push_row(row)
            .map_err(|e| PipelineError::Parse(format!("'{origin}': {e}")))?;
    }

    Ok(table)
}

/// Name blank header cells "Unnamed: i" and suffix repeats with ".N".
fn column_names(header: &csv::StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let base = if raw.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                raw.to_string()
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

/// Split csv errors into I/O failures and malformed-data failures.
fn csv_error(origin: &str, err: csv::Error) -> PipelineError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => PipelineError::io(origin, source),
        _ => PipelineError::Parse(format!("'{origin}': {message}")),
    }
}
