use crate::{
    builder::ParsedRecord,
    errors::{ReconResult, ReconcileError, Side},
    parsers::prelude::*,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One dated, described, non-negative money movement from either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
        }
    }

    /// Rejects records the matcher must never coerce: blank description or negative amount.
    pub fn validate(&self, side: Option<Side>, index: usize) -> ReconResult<()> {
        if self.description.trim().is_empty() {
            return Err(ReconcileError::invalid_record(side, index, "description is empty"));
        }
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(ReconcileError::invalid_record(
                side,
                index,
                format!("amount {} is negative", self.amount),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedPair {
    pub bank_transaction: Transaction,
    pub ledger_transaction: Transaction,
}

impl MatchedPair {
    pub fn date_gap_days(&self) -> i64 {
        (self.bank_transaction.date - self.ledger_transaction.date)
            .num_days()
            .abs()
    }
}

/// Counts and totals derived from the three partitions of a result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub matched_count: usize,
    pub unmatched_bank_count: usize,
    pub unmatched_ledger_count: usize,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub matched_total: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unmatched_bank_total: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub unmatched_ledger_total: Decimal,
}

impl Summary {
    /// Fails with `AmountOverflow` when a total does not fit in a `Decimal`.
    pub fn from_partitions(
        matched: &[MatchedPair],
        unmatched_bank: &[Transaction],
        unmatched_ledger: &[Transaction],
    ) -> ReconResult<Self> {
        Ok(Summary {
            matched_count: matched.len(),
            unmatched_bank_count: unmatched_bank.len(),
            unmatched_ledger_count: unmatched_ledger.len(),
            // bank and ledger amounts are equal for every pair
            matched_total: checked_total(
                "matchedTotal",
                matched.iter().map(|p| p.bank_transaction.amount),
            )?,
            unmatched_bank_total: checked_total(
                "unmatchedBankTotal",
                unmatched_bank.iter().map(|t| t.amount),
            )?,
            unmatched_ledger_total: checked_total(
                "unmatchedLedgerTotal",
                unmatched_ledger.iter().map(|t| t.amount),
            )?,
        })
    }
}

fn checked_total(
    total: &'static str,
    mut amounts: impl Iterator<Item = Decimal>,
) -> ReconResult<Decimal> {
    amounts.try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount)
            .ok_or(ReconcileError::AmountOverflow { total })
    })
}

/// Partition of both inputs into matched pairs and the two unmatched residues.
///
/// The summary is computed on construction and the value is read-only
/// afterwards, so it always agrees with the partitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ReconciliationReportRaw")]
pub struct ReconciliationResult {
    summary: Summary,
    matched_transactions: Vec<MatchedPair>,
    unmatched_bank_transactions: Vec<Transaction>,
    unmatched_ledger_entries: Vec<Transaction>,
}

impl ReconciliationResult {
    pub fn new(
        matched_transactions: Vec<MatchedPair>,
        unmatched_bank_transactions: Vec<Transaction>,
        unmatched_ledger_entries: Vec<Transaction>,
    ) -> ReconResult<Self> {
        let summary = Summary::from_partitions(
            &matched_transactions,
            &unmatched_bank_transactions,
            &unmatched_ledger_entries,
        )?;
        Ok(Self {
            summary,
            matched_transactions,
            unmatched_bank_transactions,
            unmatched_ledger_entries,
        })
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn matched_transactions(&self) -> &[MatchedPair] {
        &self.matched_transactions
    }

    pub fn unmatched_bank_transactions(&self) -> &[Transaction] {
        &self.unmatched_bank_transactions
    }

    pub fn unmatched_ledger_entries(&self) -> &[Transaction] {
        &self.unmatched_ledger_entries
    }

    /// True when nothing is left over on either side.
    pub fn is_balanced(&self) -> bool {
        self.unmatched_bank_transactions.is_empty() && self.unmatched_ledger_entries.is_empty()
    }

    pub fn to_json(&self) -> ReconResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> ReconResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Wire form of a report; only accepted when its summary matches the partitions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReconciliationReportRaw {
    summary: Summary,
    matched_transactions: Vec<MatchedPair>,
    unmatched_bank_transactions: Vec<Transaction>,
    unmatched_ledger_entries: Vec<Transaction>,
}

impl TryFrom<ReconciliationReportRaw> for ReconciliationResult {
    type Error = String;

    fn try_from(raw: ReconciliationReportRaw) -> Result<Self, Self::Error> {
        let result = ReconciliationResult::new(
            raw.matched_transactions,
            raw.unmatched_bank_transactions,
            raw.unmatched_ledger_entries,
        )
        .map_err(|e| e.to_string())?;
        if result.summary != raw.summary {
            return Err("summary does not match the reported transactions".to_string());
        }
        Ok(result)
    }
}

impl TryFrom<ParsedRecord> for Transaction {
    type Error = ReconcileError;

    fn try_from(parsed: ParsedRecord) -> Result<Self, Self::Error> {
        match parsed {
            ParsedRecord::Csv(csv) => csv.try_into(),
            ParsedRecord::Json(json) => json.try_into(),
        }
    }
}

impl TryFrom<CsvRecord> for Transaction {
    type Error = ReconcileError;

    fn try_from(record: CsvRecord) -> Result<Self, Self::Error> {
        transaction_from_fields(record.index, record.date, record.description, record.amount)
    }
}

impl TryFrom<JsonRecord> for Transaction {
    type Error = ReconcileError;

    fn try_from(record: JsonRecord) -> Result<Self, Self::Error> {
        transaction_from_fields(record.index, record.date, record.description, record.amount)
    }
}

/// Amounts are normalized to their magnitude; direction is not part of the matching key.
fn transaction_from_fields(
    index: usize,
    date: Option<RecordDate>,
    description: Option<String>,
    amount: Option<RecordAmount>,
) -> ReconResult<Transaction> {
    let invalid = |reason: String| ReconcileError::invalid_record(None, index, reason);

    let date = date
        .ok_or_else(|| invalid("date is missing".to_string()))
        .and_then(|d| NaiveDate::try_from(d).map_err(invalid))?;
    let description = description
        .map(|d| d.trim().to_string())
        .ok_or_else(|| invalid("description is missing".to_string()))?;
    let amount = amount
        .ok_or_else(|| invalid("amount is missing".to_string()))?
        .magnitude()
        .map_err(invalid)?;

    let transaction = Transaction::new(date, description, amount);
    transaction.validate(None, index)?;
    Ok(transaction)
}
