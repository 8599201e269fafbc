//! Export of constituent tables.
//!
//! CSV output carries a header row taken from the table columns and one
//! record per row, with no index column. Serialization is deterministic: the
//! same table always yields the same bytes.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use ndx_data::ConstituentTable;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name of the CSV download.
pub const CSV_FILENAME: &str = "Nasdaq-100.csv";

/// MIME type of the CSV download.
pub const CSV_MIME: &str = "text/csv";

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output was not valid UTF-8.
    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Chart drawing error.
    #[error("Chart error: {0}")]
    Chart(String),

    /// No price series for the requested ticker.
    #[error("Missing price series for {0}")]
    MissingSeries(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Get the MIME type for this format.
    pub const fn mime(&self) -> &str {
        match self {
            Self::Csv => CSV_MIME,
            Self::Json | Self::PrettyJson => "application/json",
        }
    }

    /// Short name shown on download links.
    pub const fn label(&self) -> &str {
        match self {
            Self::Csv => "CSV",
            Self::Json | Self::PrettyJson => "JSON",
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to UTF-8 bytes in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_bytes(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        Ok(self.export_to_string(format)?.into_bytes())
    }

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for ConstituentTable {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::WriterBuilder::new()
                    .terminator(csv::Terminator::Any(b'\n'))
                    .from_writer(vec![]);
                wtr.write_record(self.columns())?;
                for row in self.rows() {
                    wtr.write_record(&row.fields)?;
                }
                let data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)?;
                Ok(data)
            }
            ExportFormat::Json => Ok(serde_json::to_string(&JsonTable(self))?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(&JsonTable(self))?),
        }
    }
}

/// JSON view of a table: an array of objects keyed in column order.
struct JsonTable<'a>(&'a ConstituentTable);

struct JsonRow<'a> {
    columns: &'a [String],
    fields: &'a [String],
}

impl Serialize for JsonTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for row in self.0.rows() {
            seq.serialize_element(&JsonRow {
                columns: self.0.columns(),
                fields: &row.fields,
            })?;
        }
        seq.end()
    }
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, field) in self.columns.iter().zip(self.fields) {
            map.serialize_entry(column, field)?;
        }
        map.end()
    }
}

/// Downloadable export artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    /// Suggested file name.
    pub filename: String,
    /// MIME type of the payload.
    pub mime: String,
    /// Format of the payload.
    pub format: ExportFormat,
    /// Serialized table.
    pub payload: Vec<u8>,
}

impl DownloadLink {
    /// `Nasdaq-100.csv` download for a table.
    ///
    /// # Errors
    ///
    /// Returns an error if CSV serialization fails.
    pub fn csv(table: &ConstituentTable) -> Result<Self, ExportError> {
        Self::new(table, ExportFormat::Csv)
    }

    /// Download for a table in any format. Non-CSV formats swap the file
    /// extension of [`CSV_FILENAME`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn new(table: &ConstituentTable, format: ExportFormat) -> Result<Self, ExportError> {
        let payload = table.export_to_bytes(format)?;
        let filename = Path::new(CSV_FILENAME)
            .with_extension(format.extension())
            .to_string_lossy()
            .into_owned();
        debug!(%filename, bytes = payload.len(), "prepared download");

        Ok(Self {
            filename,
            mime: format.mime().to_string(),
            format,
            payload,
        })
    }

    /// Payload embedded as a base64 data URI.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.payload))
    }

    /// HTML anchor that downloads the payload.
    pub fn to_html_anchor(&self) -> String {
        format!(
            r#"<a href="{}" download="{}">Download {} File</a>"#,
            self.data_uri(),
            self.filename,
            self.format.label()
        )
    }

    /// Write the payload into `dir` under its file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.payload)?;
        Ok(path)
    }
}

/// Row and column count readout, e.g. `5 rows × 4 columns`.
pub fn shape_readout(table: &ConstituentTable) -> String {
    let (rows, columns) = table.shape();
    format!("{rows} rows × {columns} columns")
}
