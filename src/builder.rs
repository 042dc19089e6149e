use std::fs;

use crate::{errors::ReconcileError, parsers::prelude::*, types::Transaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParsedRecord {
    Csv(CsvRecord),
    Json(JsonRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordFormat {
    #[serde(rename = "csv")]
    Csv,
    #[serde(rename = "json")]
    Json,
}

impl RecordFormat {
    fn parse_raw(&self, content: &str) -> Result<Vec<ParsedRecord>, ReconcileError> {
        match self {
            RecordFormat::Csv => {
                let records = CsvParser::parse(content).map_err(ReconcileError::ParseFailed)?;
                Ok(records.into_iter().map(ParsedRecord::Csv).collect())
            }
            RecordFormat::Json => {
                let records = JsonParser::parse(content).map_err(ReconcileError::ParseFailed)?;
                Ok(records.into_iter().map(ParsedRecord::Json).collect())
            }
        }
    }

    fn parse<T>(&self, content: &str) -> Result<Vec<T>, ReconcileError>
    where
        T: TryFrom<ParsedRecord, Error = ReconcileError>,
    {
        self.parse_raw(content)?
            .into_iter()
            .map(T::try_from)
            .collect()
    }

    fn detect(filename: Option<&str>, content: Option<&str>) -> Result<Self, ReconcileError> {
        if let Some(content) = content {
            if JsonParser::is_supported(filename, content) {
                return Ok(RecordFormat::Json);
            }
            if CsvParser::is_supported(filename, content) {
                return Ok(RecordFormat::Csv);
            }
        }

        if let Some(filename) = filename {
            if let Some(ext) = filename.rsplit('.').next() {
                match ext.to_lowercase().as_str() {
                    "json" => return Ok(RecordFormat::Json),
                    "csv" => return Ok(RecordFormat::Csv),
                    _ => {}
                }
            }
        }

        Err(ReconcileError::UnsupportedFormat)
    }
}

/// Loads one side's records from a JSON array or a `Date,Description,Amount` CSV.
///
/// ```rust,ignore
/// use bank_recon_rs::RecordLoader;
///
/// let bank = RecordLoader::new().filename("bank.csv").load()?;
/// ```
#[derive(Default)]
pub struct RecordLoader {
    content: Option<String>,
    filepath: Option<String>,
    format: Option<RecordFormat>,
}

impl RecordLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: RecordFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn load(self) -> Result<Vec<Transaction>, ReconcileError> {
        self.load_into::<Transaction>()
    }

    pub fn load_into<T>(self) -> Result<Vec<T>, ReconcileError>
    where
        T: TryFrom<ParsedRecord, Error = ReconcileError>,
    {
        let content = self
            .content
            .map(Ok)
            .unwrap_or_else(|| {
                self.filepath
                    .as_deref()
                    .ok_or(ReconcileError::MissingContentAndFilepath)
                    .and_then(|path| fs::read_to_string(path).map_err(Into::into))
            })?;

        let format = self
            .format
            .map(Ok)
            .unwrap_or_else(|| RecordFormat::detect(self.filepath.as_deref(), Some(&content)))?;
        debug!(?format, path = ?self.filepath, "loading records");

        format.parse(&content)
    }
}
