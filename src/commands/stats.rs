use crate::api::HistoryClient;
use crate::config::Config;
use crate::errors::Result;
use crate::models::Transaction;
use crate::utils::history::fetch_transactions_in_window;
use crate::utils::stats::{aggregate, generate_memo_stats};
use chrono::Duration;
use console::Style;
use prettytable::{row, Table};

/// Analysis window, counted back from the most recent transaction.
const WINDOW_DAYS: i64 = 30;

/// Fetch the recent history of the configured account and print the
/// aggregate statistics.
pub async fn run(config: &Config) -> Result<()> {
    let client = HistoryClient::new(config)?;
    let transactions = fetch_transactions_in_window(&client, Duration::days(WINDOW_DAYS)).await?;
    print_statistics(&transactions);
    Ok(())
}

pub fn print_statistics(transactions: &[Transaction]) {
    let aggregates = aggregate(transactions);
    let header_style = Style::new().cyan();

    println!(
        "\n{}",
        header_style.apply_to("Transaction Summary").bold()
    );
    let mut summary = Table::new();
    summary.add_row(row!["Total Transactions", aggregates.total_txs]);
    summary.add_row(row!["Total Fees", format!("{:.2}", aggregates.total_fee)]);
    summary.add_row(row!["Total Compute Units", aggregates.total_compute_units]);
    summary.printstd();

    if !aggregates.token_stats.is_empty() {
        println!(
            "\n{}",
            header_style.apply_to("Per-token SOL Profit/Loss").bold()
        );
        let mut tokens = Table::new();
        tokens.add_row(row!["Token", "SOL Bought", "SOL Sold", "Profit/Loss"]);
        for (symbol, stats) in &aggregates.token_stats {
            tokens.add_row(row![
                symbol,
                format!("{:.8}", stats.total_bought_sol),
                format!("{:.8}", stats.total_sold_sol),
                format!("{:.8}", stats.profit()),
            ]);
        }
        tokens.printstd();
    }

    println!(
        "\n{}",
        header_style.apply_to("Memo Type Breakdown").bold()
    );
    let mut memos = Table::new();
    memos.add_row(row![
        "Memo Type",
        "Total",
        "Success",
        "Fail",
        "Success %",
        "Fail %"
    ]);
    for bucket in generate_memo_stats(transactions) {
        memos.add_row(row![
            bucket.display_name,
            bucket.total,
            bucket.success,
            bucket.fail,
            format!("{:.2}%", bucket.success_rate()),
            format!("{:.2}%", bucket.fail_rate()),
        ]);
    }
    memos.printstd();
}
