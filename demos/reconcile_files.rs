use bank_recon_rs::{MatchConfig, Matcher, RecordLoader};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Usage: reconcile_files [bank] [ledger] [config.toml]
    let args: Vec<String> = env::args().collect();

    let (bank_path, ledger_path) = if args.len() > 2 {
        (args[1].as_str(), args[2].as_str())
    } else {
        println!("Using example data from demos/data/\n");
        ("demos/data/bank.csv", "demos/data/ledger.json")
    };

    let config = match args.get(3) {
        Some(path) => MatchConfig::from_path(path)?,
        None => MatchConfig::default(),
    };

    let bank = RecordLoader::new().filename(bank_path).load()?;
    let ledger = RecordLoader::new().filename(ledger_path).load()?;

    let report = Matcher::new(config).reconcile(&bank, &ledger)?;
    let summary = report.summary();

    println!("Matched:          {:>4}  {:>12}", summary.matched_count, summary.matched_total);
    println!(
        "Unmatched bank:   {:>4}  {:>12}",
        summary.unmatched_bank_count, summary.unmatched_bank_total
    );
    println!(
        "Unmatched ledger: {:>4}  {:>12}",
        summary.unmatched_ledger_count, summary.unmatched_ledger_total
    );
    println!();

    for pair in report.matched_transactions() {
        println!(
            "  {} {:<28} <-> {} {:<28} {:>10}",
            pair.bank_transaction.date,
            pair.bank_transaction.description,
            pair.ledger_transaction.date,
            pair.ledger_transaction.description,
            pair.bank_transaction.amount
        );
    }

    println!("\n{}", report.to_json_pretty()?);

    Ok(())
}
