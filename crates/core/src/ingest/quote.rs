use crate::config::Settings;
use crate::domain::quote::Quote;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[async_trait::async_trait]
pub trait QuoteProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_quote(&self, ticker: &str) -> Result<Quote>;
}

#[derive(Debug, Clone)]
pub struct FinnhubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl FinnhubClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let token = settings.require_finnhub_api_key()?.to_string();

        let base_url =
            std::env::var("FINNHUB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("FINNHUB_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build quote http client")?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn url(&self) -> String {
        format!("{}/quote", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl QuoteProvider for FinnhubClient {
    fn provider_name(&self) -> &'static str {
        "finnhub"
    }

    async fn fetch_quote(&self, ticker: &str) -> Result<Quote> {
        let res = self
            .http
            .get(self.url())
            .query(&[("symbol", ticker), ("token", self.token.as_str())])
            .send()
            .await
            .context("quote request failed")?;

        let status = res.status();
        let text = res.text().await.context("failed to read quote response")?;
        if !status.is_success() {
            anyhow::bail!("quote endpoint returned HTTP {status}: {text}");
        }

        let raw = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("quote response is not valid JSON: {text}"))?;
        parse_quote(&raw)
    }
}

/// The provider's compact field names; only `c` (current price) is required.
#[derive(Debug, Deserialize)]
struct QuoteWire {
    c: Option<f64>,
    pc: Option<f64>,
    d: Option<f64>,
    dp: Option<f64>,
    h: Option<f64>,
    l: Option<f64>,
    o: Option<f64>,
}

fn parse_quote(raw: &Value) -> Result<Quote> {
    let wire = serde_json::from_value::<QuoteWire>(raw.clone())
        .context("failed to parse quote response fields")?;

    let current = wire
        .c
        .context("quote response is missing the current price field")?;

    Ok(Quote {
        current,
        previous_close: wire.pc.unwrap_or_default(),
        daily_change: wire.d.unwrap_or_default(),
        daily_change_pct: wire.dp.unwrap_or_default(),
        day_high: wire.h.unwrap_or_default(),
        day_low: wire.l.unwrap_or_default(),
        day_open: wire.o.unwrap_or_default(),
    })
}
