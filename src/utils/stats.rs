// src/utils/stats.rs
use crate::models::Transaction;
use std::collections::{BTreeSet, HashMap};

/// Per-token profit is denominated in this asset.
pub const REFERENCE_SYMBOL: &str = "SOL";

/// Outcome of a transaction as reported by the history API. Anything other
/// than the two known literals counts toward totals but toward neither rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    Success,
    Fail,
    Other,
}

impl TxOutcome {
    pub fn classify(status: &str) -> Self {
        match status {
            "Success" => TxOutcome::Success,
            "Fail" => TxOutcome::Fail,
            _ => TxOutcome::Other,
        }
    }
}

/// SOL bought/sold totals for a single token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStats {
    pub total_bought_sol: f64,
    pub total_sold_sol: f64,
}

impl TokenStats {
    pub fn profit(&self) -> f64 {
        self.total_sold_sol - self.total_bought_sol
    }
}

/// Aggregate counters plus the per-token ledger.
#[derive(Debug, Default)]
pub struct Aggregates {
    pub total_txs: usize,
    pub total_fee: f64,
    pub total_compute_units: u64,
    pub token_stats: HashMap<String, TokenStats>,
}

/// Reduce the chronological transaction sequence into counters and the
/// per-token SOL ledger. Order-independent: all updates are commutative sums.
pub fn aggregate(transactions: &[Transaction]) -> Aggregates {
    let mut aggregates = Aggregates {
        total_txs: transactions.len(),
        ..Aggregates::default()
    };

    for tx in transactions {
        aggregates.total_fee += tx.raw.meta.fee;
        aggregates.total_compute_units += tx.raw.meta.compute_units_consumed;

        let token_in = &tx.parsed_transaction.token_in;
        let token_out = &tx.parsed_transaction.token_out;

        if token_in.symbol == REFERENCE_SYMBOL && token_out.symbol != REFERENCE_SYMBOL {
            aggregates
                .token_stats
                .entry(token_out.symbol.clone())
                .or_default()
                .total_bought_sol += token_in.amount;
        }
        if token_in.symbol != REFERENCE_SYMBOL && token_out.symbol == REFERENCE_SYMBOL {
            aggregates
                .token_stats
                .entry(token_in.symbol.clone())
                .or_default()
                .total_sold_sol += token_out.amount;
        }
    }

    aggregates
}

/// Success/fail counts for one memo bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoBucket {
    pub display_name: String,
    pub total: usize,
    pub success: usize,
    pub fail: usize,
}

impl MemoBucket {
    pub fn success_rate(&self) -> f64 {
        if self.total > 0 {
            self.success as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn fail_rate(&self) -> f64 {
        if self.total > 0 {
            self.fail as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Count records matching one memo bucket. `"TOTAL"` matches every record,
/// `"N/A"` matches records with an empty or defaulted memo, anything else
/// matches the trimmed memo verbatim. Memos not mentioning "RPC" are
/// displayed with a "(jito)" suffix.
pub fn analyze_memo_type(records: &[Transaction], memo_type: &str) -> MemoBucket {
    let mut total = 0;
    let mut success = 0;
    let mut fail = 0;

    for record in records {
        let memo = record.parsed_transaction.memo.trim();
        let matches = match memo_type {
            "TOTAL" => true,
            "N/A" => memo.is_empty() || memo == "N/A",
            other => memo == other,
        };
        if !matches {
            continue;
        }
        total += 1;
        match TxOutcome::classify(&record.status) {
            TxOutcome::Success => success += 1,
            TxOutcome::Fail => fail += 1,
            TxOutcome::Other => {}
        }
    }

    let display_name = if memo_type != "TOTAL" && memo_type != "N/A" && !memo_type.contains("RPC") {
        format!("{} (jito)", memo_type)
    } else {
        memo_type.to_string()
    };

    MemoBucket {
        display_name,
        total,
        success,
        fail,
    }
}

/// Build the full memo breakdown: TOTAL and N/A first, then one bucket per
/// observed memo with non-jito buckets before jito ones, alphabetically
/// within each group.
pub fn generate_memo_stats(records: &[Transaction]) -> Vec<MemoBucket> {
    let memo_types: BTreeSet<String> = records
        .iter()
        .map(|record| record.parsed_transaction.memo.trim())
        .filter(|memo| !memo.is_empty() && *memo != "N/A")
        .map(str::to_string)
        .collect();

    let mut buckets = vec![
        analyze_memo_type(records, "TOTAL"),
        analyze_memo_type(records, "N/A"),
    ];

    let mut rest: Vec<MemoBucket> = memo_types
        .iter()
        .map(|memo| analyze_memo_type(records, memo))
        .collect();
    rest.sort_by(|a, b| {
        let a_jito = a.display_name.contains("jito");
        let b_jito = b.display_name.contains("jito");
        a_jito
            .cmp(&b_jito)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    buckets.extend(rest);

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::{Action, Token};
    use crate::utils::history::parse_transaction;

    fn swap_tx(
        in_symbol: &str,
        in_amount: f64,
        out_symbol: &str,
        out_amount: f64,
        fee: f64,
        compute_units: u64,
    ) -> Transaction {
        let mut tx = Transaction::default();
        tx.signatures = vec![format!("{in_symbol}-{out_symbol}-{in_amount}")];
        tx.status = "Success".to_string();
        tx.raw.meta.fee = fee;
        tx.raw.meta.compute_units_consumed = compute_units;
        let mut action = Action::default();
        action.info.tokens_swapped.token_in = Token {
            symbol: in_symbol.to_string(),
            amount: in_amount,
            ..Token::default()
        };
        action.info.tokens_swapped.token_out = Token {
            symbol: out_symbol.to_string(),
            amount: out_amount,
            ..Token::default()
        };
        tx.actions.push(action);
        tx.parsed_transaction = parse_transaction(&tx);
        tx
    }

    fn memo_tx(memo: &str, status: &str) -> Transaction {
        let mut tx = Transaction::default();
        tx.status = status.to_string();
        tx.parsed_transaction.memo = memo.to_string();
        tx.parsed_transaction.status = status.to_string();
        tx
    }

    #[test]
    fn single_round_trip_swap_profit() {
        let transactions = vec![
            swap_tx("SOL", 1.0, "FOO", 100.0, 0.0005, 1000),
            swap_tx("FOO", 100.0, "SOL", 1.5, 0.0005, 2000),
        ];

        let aggregates = aggregate(&transactions);

        assert_eq!(aggregates.total_txs, 2);
        assert!((aggregates.total_fee - 0.001).abs() < 1e-12);
        assert_eq!(aggregates.total_compute_units, 3000);
        let foo = &aggregates.token_stats["FOO"];
        assert!((foo.total_bought_sol - 1.0).abs() < 1e-12);
        assert!((foo.total_sold_sol - 1.5).abs() < 1e-12);
        assert!((foo.profit() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn decoded_swap_envelopes_feed_the_ledger() {
        // Round trip from the wire format: both swap legs must survive the
        // decode for the ledger to key off the right symbols.
        let buy: Transaction = serde_json::from_str(
            r#"{
                "status": "Success",
                "signatures": ["buy-sig"],
                "actions": [{"info": {"tokens_swapped": {
                    "in": {"symbol": "SOL", "amount": 1.0},
                    "out": {"symbol": "FOO", "amount": 100.0}
                }}}],
                "raw": {"blockTime": 100, "meta": {"fee": 0.0005, "computeUnitsConsumed": 1000}}
            }"#,
        )
        .unwrap();
        let sell: Transaction = serde_json::from_str(
            r#"{
                "status": "Success",
                "signatures": ["sell-sig"],
                "actions": [{"info": {"tokens_swapped": {
                    "in": {"symbol": "FOO", "amount": 100.0},
                    "out": {"symbol": "SOL", "amount": 1.5}
                }}}],
                "raw": {"blockTime": 200, "meta": {"fee": 0.0005, "computeUnitsConsumed": 2000}}
            }"#,
        )
        .unwrap();

        let transactions: Vec<Transaction> = [buy, sell]
            .into_iter()
            .map(|mut tx| {
                tx.parsed_transaction = parse_transaction(&tx);
                tx
            })
            .collect();

        let aggregates = aggregate(&transactions);

        assert!(!aggregates.token_stats.contains_key(""));
        let foo = &aggregates.token_stats["FOO"];
        assert!((foo.total_bought_sol - 1.0).abs() < 1e-12);
        assert!((foo.total_sold_sol - 1.5).abs() < 1e-12);
        assert!((foo.profit() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn aggregation_is_permutation_invariant() {
        let mut transactions = vec![
            swap_tx("SOL", 1.0, "FOO", 100.0, 0.0005, 1000),
            swap_tx("SOL", 2.0, "BAR", 50.0, 0.0005, 2000),
            swap_tx("FOO", 100.0, "SOL", 1.5, 0.0005, 3000),
        ];
        let forward = aggregate(&transactions);
        transactions.reverse();
        let backward = aggregate(&transactions);

        assert_eq!(forward.total_txs, backward.total_txs);
        assert_eq!(forward.total_compute_units, backward.total_compute_units);
        assert!((forward.total_fee - backward.total_fee).abs() < 1e-12);
        assert_eq!(forward.token_stats, backward.token_stats);
    }

    #[test]
    fn swaps_without_exactly_one_sol_leg_do_not_touch_the_ledger() {
        let transactions = vec![
            swap_tx("SOL", 1.0, "SOL", 1.0, 0.0005, 1000),
            swap_tx("FOO", 5.0, "BAR", 10.0, 0.0005, 1000),
            Transaction::default(), // no swap pair at all
        ];

        let aggregates = aggregate(&transactions);

        assert_eq!(aggregates.total_txs, 3);
        assert!(aggregates.token_stats.is_empty());
    }

    #[test]
    fn ledger_totals_close_over_the_sol_legs() {
        let transactions = vec![
            swap_tx("SOL", 1.0, "FOO", 100.0, 0.0, 0),
            swap_tx("SOL", 2.5, "BAR", 50.0, 0.0, 0),
            swap_tx("FOO", 40.0, "SOL", 0.75, 0.0, 0),
            swap_tx("BAR", 10.0, "SOL", 3.25, 0.0, 0),
        ];

        let aggregates = aggregate(&transactions);

        let bought: f64 = aggregates
            .token_stats
            .values()
            .map(|s| s.total_bought_sol)
            .sum();
        let sold: f64 = aggregates
            .token_stats
            .values()
            .map(|s| s.total_sold_sol)
            .sum();
        // 1.0 + 2.5 bought, 0.75 + 3.25 sold.
        assert!((bought + sold - 7.5).abs() < 1e-12);
    }

    #[test]
    fn outcome_classification() {
        assert_eq!(TxOutcome::classify("Success"), TxOutcome::Success);
        assert_eq!(TxOutcome::classify("Fail"), TxOutcome::Fail);
        assert_eq!(TxOutcome::classify("Pending"), TxOutcome::Other);
        assert_eq!(TxOutcome::classify(""), TxOutcome::Other);
    }

    #[test]
    fn memo_buckets_count_and_rate() {
        let records = vec![
            memo_tx("my-RPC", "Success"),
            memo_tx("my-RPC", "Fail"),
            memo_tx("my-RPC", "Pending"),
            memo_tx("N/A", "Success"),
        ];

        let bucket = analyze_memo_type(&records, "my-RPC");
        assert_eq!(bucket.display_name, "my-RPC");
        assert_eq!(bucket.total, 3);
        assert_eq!(bucket.success, 1);
        assert_eq!(bucket.fail, 1);
        assert!((bucket.success_rate() - 33.333333333333336).abs() < 1e-9);

        let na = analyze_memo_type(&records, "N/A");
        assert_eq!(na.total, 1);

        let total = analyze_memo_type(&records, "TOTAL");
        assert_eq!(total.total, 4);
        assert_eq!(total.success, 2);
    }

    #[test]
    fn empty_bucket_has_zero_rates() {
        let bucket = analyze_memo_type(&[], "TOTAL");
        assert_eq!(bucket.total, 0);
        assert_eq!(bucket.success_rate(), 0.0);
        assert_eq!(bucket.fail_rate(), 0.0);
    }

    #[test]
    fn memo_breakdown_orders_non_jito_before_jito() {
        let records = vec![
            memo_tx("beta", "Success"),
            memo_tx("alpha", "Success"),
            memo_tx("zulu-RPC", "Success"),
            memo_tx("alpha-RPC", "Success"),
            memo_tx("N/A", "Fail"),
        ];

        let buckets = generate_memo_stats(&records);
        let names: Vec<&str> = buckets.iter().map(|b| b.display_name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "TOTAL",
                "N/A",
                "alpha-RPC",
                "zulu-RPC",
                "alpha (jito)",
                "beta (jito)",
            ]
        );
        assert_eq!(buckets[0].total, 5);
        assert_eq!(buckets[1].total, 1);
    }
}
