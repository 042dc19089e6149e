pub mod csv;
pub mod fields;
pub mod json;
pub mod traits;

pub mod prelude {
    pub use super::csv::prelude::*;
    pub use super::fields::{RecordAmount, RecordDate};
    pub use super::json::prelude::*;
    pub use super::traits::Parser;
}
