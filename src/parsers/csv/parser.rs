use super::dto::{CsvRecord, CsvRecordRaw};
use crate::parsers::traits::Parser;
use csv::{ReaderBuilder, StringRecord, Trim};

pub struct CsvParser;

impl CsvParser {
    /// Cabeçalho precisa ter as colunas `date` e `amount` com nome exato
    fn header_looks_valid(content: &str) -> bool {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        match reader.headers() {
            Ok(headers) => ["date", "amount"]
                .iter()
                .all(|required| headers.iter().any(|h| h.eq_ignore_ascii_case(required))),
            Err(_) => false,
        }
    }
}

impl Parser for CsvParser {
    type Output = CsvRecord;

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        let has_csv_extension = filename
            .map(|name| name.to_lowercase().ends_with(".csv"))
            .unwrap_or(false);

        // Com filename exige extensão e cabeçalho; sem filename, só o cabeçalho
        match filename {
            Some(_) => has_csv_extension && Self::header_looks_valid(content),
            None => Self::header_looks_valid(content),
        }
    }

    fn parse(content: &str) -> Result<Vec<Self::Output>, String> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: StringRecord = reader
            .headers()
            .map_err(|e| format!("CSV header error: {}", e))?
            .iter()
            .map(|h| h.to_lowercase())
            .collect();

        for required in ["date", "description", "amount"] {
            if !headers.iter().any(|h| h == required) {
                return Err(format!("Missing required column '{}'", required));
            }
        }

        let mut records = Vec::new();
        let mut row = StringRecord::new();

        while reader
            .read_record(&mut row)
            .map_err(|e| format!("CSV read error: {}", e))?
        {
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let raw: CsvRecordRaw = row
                .deserialize(Some(&headers))
                .map_err(|e| format!("CSV deserialize error at line {}: {}", line, e))?;
            records.push(CsvRecord::from_raw(records.len(), line, raw));
        }

        Ok(records)
    }
}
