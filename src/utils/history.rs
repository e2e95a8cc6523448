// src/utils/history.rs
use crate::api::TransactionHistory;
use crate::errors::{AnalyzerError, Result};
use crate::models::{ParsedRecord, Transaction};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};

const PAGE_SIZE: usize = 100;

/// Walk the history backwards from the most recent transaction and collect
/// every transaction whose block time falls inside `(end_time - window,
/// end_time]`, where `end_time` is the block time of the anchor (most recent)
/// transaction. A zero `window` means no lower bound. The returned sequence
/// is ascending by block time.
///
/// The anchor itself seeds the `before` cursor and is therefore excluded
/// from the result.
pub async fn fetch_transactions_in_window<S: TransactionHistory>(
    source: &S,
    window: Duration,
) -> Result<Vec<Transaction>> {
    let anchor_batch = source.fetch_batch(None, 1).await?;
    let anchor = anchor_batch.first().ok_or(AnalyzerError::EmptyHistory)?;
    let mut cursor = anchor
        .signatures
        .first()
        .cloned()
        .ok_or(AnalyzerError::EmptyHistory)?;
    let end_time = anchor.raw.block_time;

    let start_time = if window.num_seconds() > 0 {
        Some(end_time - window.num_seconds())
    } else {
        None
    };
    info!(
        "Fetching transactions from {} to {}",
        start_time.map_or_else(|| "the beginning".to_string(), format_block_time),
        format_block_time(end_time)
    );

    let mut transactions: Vec<Transaction> = Vec::new();
    let mut api_calls = 0u32;
    let mut continue_fetching = true;

    while continue_fetching {
        api_calls += 1;
        debug!("API call #{}, before_tx_signature: {}", api_calls, cursor);

        let batch = source.fetch_batch(Some(cursor.as_str()), PAGE_SIZE).await?;
        if batch.is_empty() {
            debug!("No more transactions to fetch");
            break;
        }
        debug!(
            "Fetched {} transactions in this batch ({} to {})",
            batch.len(),
            format_block_time(batch[batch.len() - 1].raw.block_time),
            format_block_time(batch[0].raw.block_time)
        );

        let next_cursor = batch.last().and_then(|tx| tx.signatures.first()).cloned();

        // Batch order is newest-first; the window boundary is detected per
        // transaction, never from the batch endpoints.
        for mut tx in batch {
            let block_time = tx.raw.block_time;
            if let Some(start) = start_time {
                if block_time < start {
                    continue_fetching = false;
                    break;
                }
            }
            if block_time > end_time {
                continue;
            }
            tx.parsed_transaction = parse_transaction(&tx);
            transactions.push(tx);
        }

        if continue_fetching {
            match next_cursor {
                Some(signature) => cursor = signature,
                // The batch tail carries no signature, so the cursor cannot
                // advance any further.
                None => break,
            }
        }
    }

    // Accumulated newest-first; expose chronological order.
    transactions.reverse();

    info!("Total API calls made: {}", api_calls);
    info!("Total transactions fetched: {}", transactions.len());
    Ok(transactions)
}

/// Project a transaction envelope into its flat, display-ready record.
/// Total: missing nested fields degrade to defaults instead of failing.
pub fn parse_transaction(tx: &Transaction) -> ParsedRecord {
    let (token_in, token_out) = tx
        .actions
        .first()
        .map(|action| {
            let swapped = &action.info.tokens_swapped;
            (swapped.token_in.clone(), swapped.token_out.clone())
        })
        .unwrap_or_default();

    let memo = tx
        .raw
        .transaction
        .message
        .instructions
        .iter()
        .find_map(|instruction| instruction.parsed.as_memo())
        .unwrap_or("N/A")
        .to_string();

    ParsedRecord {
        blocktime_utc: format_block_time(tx.raw.block_time),
        status: tx.status.clone(),
        slot_str: tx.raw.slot.to_string(),
        fee_str: format!("{:.2}", tx.raw.meta.fee),
        compute_unit: tx.raw.meta.compute_units_consumed.to_string(),
        token_in,
        token_out,
        memo,
        signature: tx.canonical_signature().to_string(),
    }
}

fn format_block_time(block_time: i64) -> String {
    DateTime::<Utc>::from_timestamp(block_time, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
