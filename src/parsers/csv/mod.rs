mod dto;
mod parser;

pub mod prelude {
    pub use super::dto::CsvRecord;
    pub use super::parser::CsvParser;
}
