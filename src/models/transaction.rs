use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope returned by the transaction history API.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Vec<Transaction>,
}

/// One transaction as delivered by the history API. Most fields are kept
/// verbatim for round-trip fidelity; only a handful feed the statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub fee_payer: String,
    #[serde(default)]
    pub signers: Vec<String>,
    #[serde(default)]
    pub signatures: Vec<String>,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default, rename = "type")]
    pub tx_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub events: Vec<Value>,
    #[serde(default)]
    pub raw: RawData,
    #[serde(default)]
    pub parsed_transaction: ParsedRecord,
}

impl Transaction {
    /// Canonical signature: the first one, or "N/A" when the server sent none.
    pub fn canonical_signature(&self) -> &str {
        self.signatures.first().map_or("N/A", String::as_str)
    }
}

/// Flat, display-ready projection of a [`Transaction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedRecord {
    #[serde(default)]
    pub blocktime_utc: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub slot_str: String,
    #[serde(default)]
    pub fee_str: String,
    #[serde(default)]
    pub compute_unit: String,
    #[serde(default)]
    pub token_in: Token,
    #[serde(default)]
    pub token_out: Token,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub signature: String,
}

impl Default for ParsedRecord {
    fn default() -> Self {
        ParsedRecord {
            blocktime_utc: "N/A".to_string(),
            status: String::new(),
            slot_str: String::new(),
            fee_str: String::new(),
            compute_unit: String::new(),
            token_in: Token::default(),
            token_out: Token::default(),
            memo: "N/A".to_string(),
            signature: "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Protocol {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub info: ActionInfo,
    #[serde(default)]
    pub source_protocol: Protocol,
    #[serde(default, rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub ix_index: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionInfo {
    #[serde(default)]
    pub swapper: String,
    #[serde(default)]
    pub tokens_swapped: TokensSwapped,
    #[serde(default)]
    pub swaps: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokensSwapped {
    #[serde(default, rename = "in")]
    pub token_in: Token,
    #[serde(default, rename = "out")]
    pub token_out: Token,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub token_address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub image_uri: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub amount_raw: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawData {
    #[serde(default, rename = "blockTime")]
    pub block_time: i64,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub slot: u64,
    #[serde(default)]
    pub transaction: RawTransaction,
    #[serde(default)]
    pub version: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, rename = "computeUnitsConsumed")]
    pub compute_units_consumed: u64,
    #[serde(default)]
    pub err: Value,
    #[serde(default)]
    pub fee: f64,
    // Opaque metadata, decoded but unused by the statistics.
    #[serde(default, rename = "innerInstructions")]
    pub inner_instructions: Vec<Value>,
    #[serde(default, rename = "logMessages")]
    pub log_messages: Vec<String>,
    #[serde(default, rename = "postBalances")]
    pub post_balances: Vec<i64>,
    #[serde(default, rename = "postTokenBalances")]
    pub post_token_balances: Vec<Value>,
    #[serde(default, rename = "preBalances")]
    pub pre_balances: Vec<i64>,
    #[serde(default, rename = "preTokenBalances")]
    pub pre_token_balances: Vec<Value>,
    #[serde(default)]
    pub rewards: Vec<Value>,
    #[serde(default)]
    pub status: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub message: RawMessage,
    #[serde(default)]
    pub signatures: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(default, rename = "accountKeys")]
    pub account_keys: Vec<Value>,
    #[serde(default, rename = "addressTableLookups")]
    pub address_table_lookups: Vec<Value>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    #[serde(default, rename = "recentBlockhash")]
    pub recent_blockhash: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default)]
    pub parsed: MemoPayload,
    #[serde(default)]
    pub program: String,
    #[serde(default, rename = "programId")]
    pub program_id: String,
    #[serde(default, rename = "stackHeight")]
    pub stack_height: Value,
}

/// The `parsed` field of an instruction is polymorphic: a bare string (used
/// as a memo) or a structured object we have no interest in modelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemoPayload {
    Text(String),
    Structured(Value),
}

impl MemoPayload {
    /// Non-empty plain-string payloads are memo candidates.
    pub fn as_memo(&self) -> Option<&str> {
        match self {
            MemoPayload::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

impl Default for MemoPayload {
    fn default() -> Self {
        MemoPayload::Structured(Value::Null)
    }
}
