use super::dto::{JsonRecord, JsonRecordRaw};
use crate::parsers::traits::Parser;

pub struct JsonParser;

impl Parser for JsonParser {
    type Output = JsonRecord;

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        let looks_like_json = content.trim_start().starts_with('[');

        match filename {
            Some(name) => name.to_lowercase().ends_with(".json") && looks_like_json,
            None => looks_like_json,
        }
    }

    fn parse(content: &str) -> Result<Vec<Self::Output>, String> {
        let raw: Vec<JsonRecordRaw> =
            serde_json::from_str(content).map_err(|e| format!("JSON parse error: {}", e))?;

        raw.into_iter()
            .enumerate()
            .map(|(i, r)| JsonRecord::from_raw(i, r))
            .collect()
    }
}
