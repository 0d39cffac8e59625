use std::fs::File;
use std::path::PathBuf;

use chrono::Utc;
use ledgerlens_analytics::{anchored_balance, category_breakdown, expense_stats, totals, trend_slope};
use ledgerlens_core::{filter_window, Window};
use ledgerlens_import::{
    apply_match, parse_bank_csv, parse_secondary_csv, CategoryRuleEngine, MatchEngine,
};
use ledgerlens_storage::{merge_transactions, FileStore, Snapshot, SnapshotStore};

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(bank_path) = args.next() else {
        eprintln!("usage: ledgerlens <bank.csv> [secondary.csv]");
        std::process::exit(2);
    };
    let secondary_path = args.next();

    let store = FileStore::new(snapshot_path()?);
    let now = Utc::now();
    let mut snapshot = store.load()?.unwrap_or_else(|| Snapshot::new(now));

    // ── Import ────────────────────────────────────────────────────────────────
    let imported = parse_bank_csv(File::open(&bank_path)?)?;
    let parsed = imported.len();
    let added = merge_transactions(&mut snapshot.transactions, imported);
    tracing::info!(parsed, added, "bank import complete");

    let assigned =
        CategoryRuleEngine::from_defs(&snapshot.categories).categorize(&mut snapshot.transactions);
    if assigned > 0 {
        tracing::info!(assigned, "categorized by pattern rules");
    }

    // ── Reconciliation ────────────────────────────────────────────────────────
    let today = now.date_naive();
    if let Some(path) = secondary_path {
        let records = parse_secondary_csv(File::open(&path)?, today)?;
        let matches = MatchEngine::default().find_matches(&snapshot.transactions, &records);
        for proposed in &matches {
            if let Some(tx) = snapshot
                .transactions
                .iter_mut()
                .find(|tx| tx.id == proposed.bank_id)
            {
                println!(
                    "matched {} -> {} ({:.0}%: {})",
                    proposed.secondary.name,
                    tx.description,
                    proposed.confidence * 100.0,
                    proposed.reason
                );
                apply_match(tx, proposed);
            }
        }
        tracing::info!(records = records.len(), matches = matches.len(), "reconciliation complete");
    }

    // ── Report ────────────────────────────────────────────────────────────────
    let windowed = filter_window(&snapshot.transactions, Window::All, today);
    let t = totals(&windowed);
    println!();
    println!("income      {}", t.income);
    println!("expense     {}", t.expense);
    println!("investment  {}", t.investment);
    println!("net change  {}", t.net_change);

    let stats = expense_stats(&windowed);
    println!("daily avg   ${:.2}   (stddev ${:.2})", stats.daily_average, stats.standard_deviation);
    println!("trend       {:+.2}/tx", trend_slope(&windowed));

    println!();
    for spend in category_breakdown(&windowed) {
        println!("{:<20} {}  {}", spend.name, spend.total, spend.color);
    }

    if let Some(point) = anchored_balance(&windowed, snapshot.current_balance).last() {
        println!();
        println!("balance on {}: {}", point.date, point.balance);
    }

    snapshot.last_updated = now;
    store.save(&snapshot)?;
    Ok(())
}

fn snapshot_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dirs = directories::ProjectDirs::from("io", "ledgerlens", "LedgerLens")
        .ok_or("could not determine data directory")?;
    std::fs::create_dir_all(dirs.data_dir())?;
    Ok(dirs.data_dir().join("snapshot.json"))
}
