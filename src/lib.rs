//! Reconcile a bank statement against a general ledger.
//!
//! Records are paired one-to-one on exact amount, within a date tolerance
//! (3 days by default), preferring the closest description. Everything left
//! over is reported as unmatched, with a summary of counts and totals.
//!
//! ```rust,ignore
//! use bank_recon_rs::{reconcile, RecordLoader};
//!
//! let bank = RecordLoader::new().filename("bank.csv").load()?;
//! let ledger = RecordLoader::new().filename("ledger.json").load()?;
//! let report = reconcile(&bank, &ledger)?;
//! println!("{}", report.to_json_pretty()?);
//! ```

mod builder;
mod matcher;
mod types;

pub mod config;
pub mod errors;
pub mod parsers;
pub mod similarity;

pub use builder::{ParsedRecord, RecordFormat, RecordLoader};
pub use config::MatchConfig;
pub use errors::{ReconResult, ReconcileError, Side};
pub use matcher::{reconcile, Matcher};
pub use parsers::prelude::*;
pub use types::{MatchedPair, ReconciliationResult, Summary, Transaction};
