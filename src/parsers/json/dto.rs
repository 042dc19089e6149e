use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parsers::fields::{RecordAmount, RecordDate};

#[derive(Debug, Deserialize)]
pub(super) struct JsonRecordRaw {
    #[serde(default)]
    pub(super) date: Option<String>,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) amount: Option<Value>,
}

/// One element of a JSON record array, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRecord {
    pub index: usize,
    pub date: Option<RecordDate>,
    pub description: Option<String>,
    pub amount: Option<RecordAmount>,
}

impl JsonRecord {
    pub(super) fn from_raw(index: usize, raw: JsonRecordRaw) -> Result<Self, String> {
        // Numbers keep their original text, so `250.00` stays at two decimal places
        let amount = match raw.amount {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(RecordAmount::from(n.to_string())),
            Some(Value::String(s)) => Some(RecordAmount::from(s)),
            Some(other) => {
                return Err(format!("record {}: amount must be a number, got {}", index, other));
            }
        };

        Ok(JsonRecord {
            index,
            date: raw.date.map(RecordDate::from),
            description: raw.description,
            amount,
        })
    }
}
