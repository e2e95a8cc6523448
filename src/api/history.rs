// src/api/history.rs
use crate::config::Config;
use crate::errors::{AnalyzerError, Result};
use crate::models::{HistoryResponse, Transaction};
use log::debug;
use reqwest::Client as ReqwestClient;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Source of paginated transaction history, newest-first. Abstracted so the
/// pagination loop can be driven by an in-memory source in tests.
// Only ever used through generics, so the missing auto-Send bound is fine.
#[allow(async_fn_in_trait)]
pub trait TransactionHistory {
    /// Fetch up to `tx_num` transactions older than `before` (or the most
    /// recent ones when no cursor is given).
    async fn fetch_batch(&self, before: Option<&str>, tx_num: usize) -> Result<Vec<Transaction>>;
}

/// HTTP client for the transaction history endpoint.
pub struct HistoryClient {
    http: ReqwestClient,
    api_url: String,
    network: String,
    account: String,
    api_key: String,
}

impl HistoryClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(HistoryClient {
            http,
            api_url: config.api_url.clone(),
            network: config.network.clone(),
            account: config.account.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

impl TransactionHistory for HistoryClient {
    async fn fetch_batch(&self, before: Option<&str>, tx_num: usize) -> Result<Vec<Transaction>> {
        let tx_num = tx_num.to_string();
        let mut params = vec![
            ("network", self.network.as_str()),
            ("account", self.account.as_str()),
            ("tx_num", tx_num.as_str()),
            ("enable_raw", "true"),
            ("enable_events", "true"),
        ];
        if let Some(signature) = before {
            params.push(("before_tx_signature", signature));
        }
        debug!(
            "GET {} tx_num={} before_tx_signature={:?}",
            self.api_url, tx_num, before
        );

        // The API key travels only in the header, so the URL is safe to log.
        let response = self
            .http
            .get(&self.api_url)
            .query(&params)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AnalyzerError::Remote(format!(
                "error in API request: {} ({})",
                status.as_u16(),
                self.api_url
            )));
        }

        let body = response.text().await?;
        unpack_envelope(&body)
    }
}

/// Decode the response body and unwrap the `{success, message, result}`
/// envelope. Kept separate from the HTTP round-trip so it can be tested
/// without a server.
pub fn unpack_envelope(body: &str) -> Result<Vec<Transaction>> {
    let data: HistoryResponse = serde_json::from_str(body)?;
    if !data.success {
        return Err(AnalyzerError::Remote(format!(
            "failed to fetch transactions: {}",
            data.message
        )));
    }
    Ok(data.result)
}
