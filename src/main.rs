use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use discipline_engine::analytics::DisciplineReport;
use discipline_engine::config::Config;
use discipline_engine::journal::{JournalStore, JsonJournal};

#[tokio::main]
async fn main() -> Result<()> {
    let mut cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // Parse CLI args or fall back to configured defaults
    let args: Vec<String> = std::env::args().collect();
    let account = args.get(1).cloned().unwrap_or_else(|| cfg.account.clone());
    if let Some(days) = args.get(2).and_then(|s| s.parse().ok()) {
        cfg.window_days = days;
    }

    let (from, reference) = cfg.window(None);

    let journal = JsonJournal::open(&cfg.journal_path)?;
    info!(
        "Analyzing '{}' as of {} ({})",
        account,
        reference,
        match cfg.window_days {
            0 => "full history".to_string(),
            n => format!("last {} days", n),
        }
    );

    let records = journal
        .fetch_sessions(&account, from, Some(reference))
        .await
        .with_context(|| format!("known accounts: {}", journal.accounts().join(", ")))?;
    let purchases = journal.fetch_purchases(&account).await?;

    let report = DisciplineReport::compute(&account, &records, &purchases, reference);
    report.print_summary();

    if cfg.export_json {
        let path = format!(
            "{}/discipline_{}_{}.json",
            cfg.report_dir,
            account,
            reference.format("%Y%m%d")
        );
        report.save_json(&path)?;
        println!("\nReport saved to: {}", path);
    }

    Ok(())
}
