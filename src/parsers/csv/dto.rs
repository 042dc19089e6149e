use serde::{Deserialize, Serialize};

use crate::parsers::fields::{RecordAmount, RecordDate};

/// Row as read from the file, after header names are lowercased.
#[derive(Debug, Deserialize)]
pub(super) struct CsvRecordRaw {
    pub(super) date: Option<String>,
    pub(super) description: Option<String>,
    pub(super) amount: Option<String>,
}

/// One CSV row, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvRecord {
    /// Zero-based position among the data rows.
    pub index: usize,
    /// One-based line in the file, counting the header.
    pub line: u64,
    pub date: Option<RecordDate>,
    pub description: Option<String>,
    pub amount: Option<RecordAmount>,
}

impl CsvRecord {
    pub(super) fn from_raw(index: usize, line: u64, raw: CsvRecordRaw) -> Self {
        CsvRecord {
            index,
            line,
            date: raw.date.map(RecordDate::from),
            description: raw.description,
            amount: raw.amount.map(RecordAmount::from),
        }
    }
}
