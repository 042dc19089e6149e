use bank_recon_rs::errors::ReconcileError;
use bank_recon_rs::{ParsedRecord, RecordLoader};
use chrono::NaiveDate;
use std::env;

/// Keeps the sign of the amount, which the matcher's `Transaction` drops.
#[derive(Debug)]
struct SignedEntry {
    date: NaiveDate,
    description: String,
    amount: f64,
    direction: &'static str,
}

impl TryFrom<ParsedRecord> for SignedEntry {
    type Error = ReconcileError;

    fn try_from(parsed: ParsedRecord) -> Result<Self, Self::Error> {
        let (index, date, description, amount) = match parsed {
            ParsedRecord::Csv(r) => (r.index, r.date, r.description, r.amount),
            ParsedRecord::Json(r) => (r.index, r.date, r.description, r.amount),
        };
        let invalid = |reason: String| ReconcileError::invalid_record(None, index, reason);

        let date = date.ok_or_else(|| invalid("date is missing".into()))?.parse().map_err(invalid)?;
        let amount = amount.ok_or_else(|| invalid("amount is missing".into()))?.parse().map_err(invalid)?;

        Ok(SignedEntry {
            date,
            description: description.unwrap_or_else(|| "Unknown".to_string()),
            amount: amount.to_string().parse().unwrap_or(0.0),
            direction: if amount.is_sign_negative() { "Debit" } else { "Credit" },
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Using example CSV data from demos/data/bank.csv\n");
        "demos/data/bank.csv"
    };

    let entries: Vec<SignedEntry> = RecordLoader::new().filename(file_path).load_into()?;

    println!("Found {} entries\n", entries.len());

    for (i, entry) in entries.iter().enumerate() {
        println!("Entry {}:", i + 1);
        println!("  Date: {}", entry.date);
        println!("  Description: {}", entry.description);
        println!("  Amount: {:.2}", entry.amount);
        println!("  Direction: {}", entry.direction);
        println!();
    }

    Ok(())
}
