use std::{cmp::Ordering, collections::BTreeMap};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    config::MatchConfig,
    errors::{ReconResult, ReconcileError, Side},
    similarity::description_similarity,
    types::{MatchedPair, ReconciliationResult, Transaction},
};

/// Greedy one-to-one matcher between bank and ledger records.
///
/// A pair is eligible when the amounts are equal and the dates are within
/// `date_tolerance_days`. Eligible pairs are committed in order of description
/// similarity (highest first), then date gap (smallest first), then ledger
/// index, then bank index. A pair is skipped when either record was already
/// consumed by an earlier pair.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    bank: usize,
    ledger: usize,
    similarity: f64,
    gap_days: i64,
}

impl Candidate {
    fn preference(&self, other: &Self) -> Ordering {
        other
            .similarity
            .total_cmp(&self.similarity)
            .then(self.gap_days.cmp(&other.gap_days))
            .then(self.ledger.cmp(&other.ledger))
            .then(self.bank.cmp(&other.bank))
    }
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn reconcile(
        &self,
        bank: &[Transaction],
        ledger: &[Transaction],
    ) -> ReconResult<ReconciliationResult> {
        validate_all(Side::Bank, bank)?;
        validate_all(Side::Ledger, ledger)?;

        let buckets = bucket_by_amount(ledger);
        let required = comparison_count(bank, &buckets);
        debug!(
            bank = bank.len(),
            ledger = ledger.len(),
            amounts = buckets.len(),
            comparisons = required,
            "generating match candidates"
        );

        if let Some(budget) = self.config.max_comparisons {
            if required > budget {
                warn!(required, budget, "comparison budget exceeded");
                return Err(ReconcileError::ResourceExceeded { required, budget });
            }
        }

        let mut candidates = self.candidates(bank, ledger, &buckets);
        candidates.sort_by(Candidate::preference);
        debug!(eligible = candidates.len(), "eligible pairs");

        let mut bank_to_ledger: Vec<Option<usize>> = vec![None; bank.len()];
        let mut ledger_used = vec![false; ledger.len()];

        for c in &candidates {
            if bank_to_ledger[c.bank].is_some() || ledger_used[c.ledger] {
                continue;
            }
            bank_to_ledger[c.bank] = Some(c.ledger);
            ledger_used[c.ledger] = true;
        }

        let mut matched = Vec::new();
        let mut unmatched_bank = Vec::new();
        for (b, pairing) in bank.iter().zip(&bank_to_ledger) {
            match pairing {
                Some(li) => matched.push(MatchedPair {
                    bank_transaction: b.clone(),
                    ledger_transaction: ledger[*li].clone(),
                }),
                None => unmatched_bank.push(b.clone()),
            }
        }

        let unmatched_ledger: Vec<Transaction> = ledger
            .iter()
            .zip(&ledger_used)
            .filter(|(_, used)| !**used)
            .map(|(l, _)| l.clone())
            .collect();

        let result = ReconciliationResult::new(matched, unmatched_bank, unmatched_ledger)?;
        let summary = result.summary();
        info!(
            matched = summary.matched_count,
            unmatched_bank = summary.unmatched_bank_count,
            unmatched_ledger = summary.unmatched_ledger_count,
            "reconciliation complete"
        );

        Ok(result)
    }

    fn candidates(
        &self,
        bank: &[Transaction],
        ledger: &[Transaction],
        buckets: &BTreeMap<Decimal, Vec<usize>>,
    ) -> Vec<Candidate> {
        let tolerance = i64::from(self.config.date_tolerance_days);
        let mut candidates = Vec::new();

        for (bi, b) in bank.iter().enumerate() {
            let Some(ledger_indices) = buckets.get(&b.amount) else {
                continue;
            };
            for &li in ledger_indices {
                let l = &ledger[li];
                let gap_days = (b.date - l.date).num_days().abs();
                if gap_days > tolerance {
                    continue;
                }
                candidates.push(Candidate {
                    bank: bi,
                    ledger: li,
                    similarity: description_similarity(&b.description, &l.description),
                    gap_days,
                });
            }
        }

        candidates
    }
}

/// Reconciles with the default configuration.
pub fn reconcile(
    bank: &[Transaction],
    ledger: &[Transaction],
) -> ReconResult<ReconciliationResult> {
    Matcher::default().reconcile(bank, ledger)
}

fn validate_all(side: Side, records: &[Transaction]) -> ReconResult<()> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(i, t)| t.validate(Some(side), i))
}

/// Ledger indices grouped by amount; `Decimal` ordering treats `1.0` and `1.00` as equal.
fn bucket_by_amount(ledger: &[Transaction]) -> BTreeMap<Decimal, Vec<usize>> {
    let mut buckets: BTreeMap<Decimal, Vec<usize>> = BTreeMap::new();
    for (i, l) in ledger.iter().enumerate() {
        buckets.entry(l.amount).or_default().push(i);
    }
    buckets
}

fn comparison_count(bank: &[Transaction], buckets: &BTreeMap<Decimal, Vec<usize>>) -> u64 {
    bank.iter()
        .filter_map(|b| buckets.get(&b.amount))
        .map(|indices| indices.len() as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use std::str::FromStr;

    fn txn(date: &str, description: &str, amount: &str) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description,
            Decimal::from_str(amount).unwrap(),
        )
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_exact_scenario() {
        let bank = vec![txn("2024-01-05", "Payment A", "250.00")];
        let ledger = vec![txn("2024-01-07", "Payment A Inc", "250.00")];

        let result = reconcile(&bank, &ledger).unwrap();
        assert_eq!(result.matched_transactions().len(), 1);
        assert!(result.is_balanced());
        assert_eq!(result.summary().matched_total, dec("250.00"));
    }

    #[test]
    fn test_amount_mismatch_is_not_matched() {
        let bank = vec![txn("2024-01-05", "X", "100.00")];
        let ledger = vec![txn("2024-01-05", "X", "100.01")];

        let result = reconcile(&bank, &ledger).unwrap();
        assert!(result.matched_transactions().is_empty());
        assert_eq!(result.unmatched_bank_transactions(), bank.as_slice());
        assert_eq!(result.unmatched_ledger_entries(), ledger.as_slice());
    }

    #[test]
    fn test_amount_equality_ignores_scale() {
        let bank = vec![txn("2024-01-05", "X", "250.0")];
        let ledger = vec![txn("2024-01-05", "X", "250.00")];

        let result = reconcile(&bank, &ledger).unwrap();
        assert_eq!(result.summary().matched_count, 1);
    }

    #[test]
    fn test_tie_break_prefers_similar_description() {
        let bank = vec![txn("2024-02-01", "Office Depot", "50")];
        let ledger = vec![
            txn("2024-02-03", "Payroll Transfer", "50"),
            txn("2024-02-02", "Office Depot", "50"),
        ];

        let result = reconcile(&bank, &ledger).unwrap();
        assert_eq!(result.matched_transactions().len(), 1);
        assert_eq!(result.matched_transactions()[0].ledger_transaction, ledger[1]);
        assert_eq!(result.unmatched_ledger_entries(), &[ledger[0].clone()]);
    }

    #[test]
    fn test_tie_break_prefers_smaller_gap_then_earlier_ledger() {
        let bank = vec![txn("2024-02-01", "Fee", "5")];
        let ledger = vec![
            txn("2024-02-03", "Fee", "5"),
            txn("2024-02-02", "Fee", "5"),
            txn("2024-02-02", "Fee", "5"),
        ];

        let result = reconcile(&bank, &ledger).unwrap();
        let pair = &result.matched_transactions()[0];
        assert_eq!(pair.date_gap_days(), 1);
        assert_eq!(
            result.unmatched_ledger_entries(),
            &[ledger[0].clone(), ledger[2].clone()]
        );
    }

    #[test]
    fn test_matching_is_global_not_first_come() {
        let bank = vec![
            txn("2024-03-01", "Rent", "100"),
            txn("2024-03-02", "Utility", "100"),
        ];
        let ledger = vec![txn("2024-03-01", "Utility", "100")];

        let result = reconcile(&bank, &ledger).unwrap();
        assert_eq!(result.matched_transactions()[0].bank_transaction, bank[1]);
        assert_eq!(result.unmatched_bank_transactions(), &[bank[0].clone()]);
    }

    #[rstest]
    #[case("2024-01-01", "2024-01-04", true)]
    #[case("2024-01-04", "2024-01-01", true)]
    #[case("2024-01-01", "2024-01-05", false)]
    #[case("2024-02-28", "2024-03-02", true)]
    #[case("2023-12-30", "2024-01-02", true)]
    fn test_date_tolerance_boundary(
        #[case] bank_date: &str,
        #[case] ledger_date: &str,
        #[case] matched: bool,
    ) {
        let bank = vec![txn(bank_date, "X", "10")];
        let ledger = vec![txn(ledger_date, "X", "10")];

        let result = reconcile(&bank, &ledger).unwrap();
        assert_eq!(result.summary().matched_count == 1, matched);
    }

    #[test]
    fn test_custom_date_tolerance() {
        let bank = vec![txn("2024-01-01", "X", "10")];
        let ledger = vec![txn("2024-01-02", "X", "10")];

        let strict = Matcher::new(MatchConfig::new().date_tolerance_days(0));
        assert_eq!(strict.reconcile(&bank, &ledger).unwrap().summary().matched_count, 0);

        let lenient = Matcher::new(MatchConfig::new().date_tolerance_days(1));
        assert_eq!(lenient.reconcile(&bank, &ledger).unwrap().summary().matched_count, 1);
    }

    #[test]
    fn test_duplicates_are_distinct_units() {
        let bank = vec![txn("2024-01-05", "Coffee", "4.50"); 3];
        let ledger = vec![txn("2024-01-05", "Coffee", "4.50"); 2];

        let result = reconcile(&bank, &ledger).unwrap();
        assert_eq!(result.summary().matched_count, 2);
        assert_eq!(result.summary().unmatched_bank_count, 1);
        assert_eq!(result.summary().unmatched_ledger_count, 0);
        assert_eq!(result.summary().matched_total, dec("9.00"));
        assert_eq!(result.summary().unmatched_bank_total, dec("4.50"));
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec![txn("2024-01-01", "X", "100")], vec![])]
    #[case(vec![], vec![txn("2024-01-01", "X", "100")])]
    fn test_empty_side(#[case] bank: Vec<Transaction>, #[case] ledger: Vec<Transaction>) {
        let result = reconcile(&bank, &ledger).unwrap();
        let summary = result.summary();
        assert_eq!(summary.matched_count, 0);
        assert_eq!(summary.matched_total, Decimal::ZERO);
        assert_eq!(summary.unmatched_bank_count, bank.len());
        assert_eq!(summary.unmatched_ledger_count, ledger.len());
    }

    #[test]
    fn test_unmatched_keep_input_order() {
        let bank = vec![
            txn("2024-01-09", "C", "3"),
            txn("2024-01-01", "A", "1"),
            txn("2024-01-05", "B", "2"),
        ];
        let ledger = vec![txn("2024-01-05", "B", "2")];

        let result = reconcile(&bank, &ledger).unwrap();
        assert_eq!(
            result.unmatched_bank_transactions(),
            &[bank[0].clone(), bank[1].clone()]
        );
    }

    #[test]
    fn test_matched_pairs_follow_bank_order() {
        let bank = vec![
            txn("2024-01-09", "Second", "20"),
            txn("2024-01-01", "First", "10"),
        ];
        let ledger = vec![
            txn("2024-01-01", "First", "10"),
            txn("2024-01-09", "Second", "20"),
        ];

        let result = reconcile(&bank, &ledger).unwrap();
        let banks: Vec<_> = result
            .matched_transactions()
            .iter()
            .map(|p| p.bank_transaction.description.as_str())
            .collect();
        assert_eq!(banks, vec!["Second", "First"]);
    }

    #[rstest]
    #[case(Side::Bank)]
    #[case(Side::Ledger)]
    fn test_rejects_negative_amount(#[case] side: Side) {
        let good = vec![txn("2024-01-01", "X", "1")];
        let bad = vec![txn("2024-01-01", "X", "1"), txn("2024-01-01", "Y", "-1")];
        let result = match side {
            Side::Bank => reconcile(&bad, &good),
            Side::Ledger => reconcile(&good, &bad),
        };

        match result {
            Err(ReconcileError::InvalidRecord { location, .. }) => {
                assert_eq!(location.side, Some(side));
                assert_eq!(location.index, 1);
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_comparison_budget() {
        let bank = vec![txn("2024-01-01", "X", "10"); 3];
        let ledger = vec![
            txn("2024-01-01", "X", "10"),
            txn("2024-01-01", "X", "10"),
            txn("2024-01-01", "Y", "99"),
        ];

        let within = Matcher::new(MatchConfig::new().max_comparisons(6));
        assert!(within.reconcile(&bank, &ledger).is_ok());

        let over = Matcher::new(MatchConfig::new().max_comparisons(5));
        assert!(matches!(
            over.reconcile(&bank, &ledger),
            Err(ReconcileError::ResourceExceeded { required: 6, budget: 5 })
        ));
    }

    #[rstest]
    #[case(2, 0, "unmatchedBankTotal")]
    #[case(0, 2, "unmatchedLedgerTotal")]
    #[case(2, 2, "matchedTotal")]
    fn test_total_overflow_is_an_error(
        #[case] bank_count: usize,
        #[case] ledger_count: usize,
        #[case] expected: &str,
    ) {
        let huge = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Huge",
            Decimal::MAX,
        );
        let bank = vec![huge.clone(); bank_count];
        let ledger = vec![huge; ledger_count];

        match reconcile(&bank, &ledger) {
            Err(ReconcileError::AmountOverflow { total }) => assert_eq!(total, expected),
            other => panic!("expected AmountOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_bucket_by_amount_merges_equal_values() {
        let ledger = vec![
            txn("2024-01-01", "A", "1.0"),
            txn("2024-01-01", "B", "2"),
            txn("2024-01-01", "C", "1.00"),
        ];
        let buckets = bucket_by_amount(&ledger);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[&dec("1")], vec![0, 2]);
    }
}
