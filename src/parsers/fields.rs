use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Representa uma data extraída de um arquivo de registros.
///
/// Formatos aceitos, nesta ordem:
/// - YYYY-MM-DD (canônico)
/// - DD/MM/YYYY
/// - MM/DD/YYYY
///
/// Uma data como `05/01/2024` é lida como 5 de janeiro, pois o formato
/// dia/mês é tentado primeiro.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDate(String);

impl RecordDate {
    const FORMATS: [&'static str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

    pub fn parse(&self) -> Result<NaiveDate, String> {
        let s = self.0.trim();

        Self::FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .ok_or_else(|| format!("unrecognized date '{}'", self.0))
    }
}

impl From<String> for RecordDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<RecordDate> for NaiveDate {
    type Error = String;

    fn try_from(date: RecordDate) -> Result<Self, Self::Error> {
        date.parse()
    }
}

/// Texto de um valor monetário, ainda com sinal e separadores de milhar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAmount(String);

impl RecordAmount {
    /// Converte para `Decimal` sem arredondar; o sinal é preservado.
    pub fn parse(&self) -> Result<Decimal, String> {
        let cleaned: String = self
            .0
            .trim()
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        if cleaned.is_empty() {
            return Err("amount is empty".to_string());
        }

        cleaned
            .parse::<Decimal>()
            .map_err(|e| format!("invalid amount '{}': {}", self.0, e))
    }

    /// Valor absoluto, como o matcher espera.
    pub fn magnitude(&self) -> Result<Decimal, String> {
        self.parse().map(|amount| amount.abs())
    }
}

impl From<String> for RecordAmount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordAmount {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// -----------------------------------------------------------------------------
// Testes
// -----------------------------------------------------------------------------
