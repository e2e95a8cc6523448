pub mod transaction;

pub use transaction::{
    HistoryResponse, MemoPayload, ParsedRecord, Token, TokensSwapped, Transaction,
};
