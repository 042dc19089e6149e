mod dto;
mod parser;

pub mod prelude {
    pub use super::dto::JsonRecord;
    pub use super::parser::JsonParser;
}
