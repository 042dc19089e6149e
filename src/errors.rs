use std::fmt;

use thiserror::Error;

/// Origem de um registro: extrato bancário ou razão contábil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bank,
    Ledger,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bank => write!(f, "bank"),
            Side::Ledger => write!(f, "ledger"),
        }
    }
}

/// Localização de um registro rejeitado, usada só na mensagem de erro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLocation {
    pub side: Option<Side>,
    pub index: usize,
}

impl fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            Some(side) => write!(f, "{} record #{}", side, self.index),
            None => write!(f, "record #{}", self.index),
        }
    }
}

/// Erros possíveis durante a carga de registros e a conciliação
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Registro sem data, descrição ou valor válido
    #[error("Invalid {location}: {reason}")]
    InvalidRecord {
        location: RecordLocation,
        reason: String,
    },

    /// Número de comparações necessárias excede o orçamento configurado
    #[error("Resource exceeded: {required} comparisons required, budget is {budget}")]
    ResourceExceeded { required: u64, budget: u64 },

    /// Soma dos valores não cabe em um `Decimal`
    #[error("Amount overflow while computing {total}")]
    AmountOverflow { total: &'static str },

    /// Falha genérica durante o parsing do conteúdo (detalhe na mensagem)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// Formato do arquivo não é suportado pela biblioteca
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// O loader foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// Configuração TOML inválida
    #[error("Invalid match configuration: {0}")]
    ConfigParse(String),

    /// Falha ao serializar o relatório em JSON
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReconcileError {
    pub fn invalid_record(side: Option<Side>, index: usize, reason: impl Into<String>) -> Self {
        ReconcileError::InvalidRecord {
            location: RecordLocation { side, index },
            reason: reason.into(),
        }
    }
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type ReconResult<T> = Result<T, ReconcileError>;
