//! Public quote sources for market indicators
//!
//! Each indicator maps to one upstream: the Brazilian central bank SGS series for
//! USD/BRL, the ECB reference rate (inverted) for EUR/USD, CoinGecko for bitcoin and
//! Stooq CSV quotes for everything else.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::task::JoinSet;
use urlencoding::encode;

use crate::domain::entities::market::parse_quote;
use crate::domain::entities::{MarketIndicator, MarketSnapshot};
use crate::domain::ports::MarketDataSource;
use crate::error::MarketError;

const BCB_USDBRL_URL: &str =
    "https://api.bcb.gov.br/dados/serie/bcdata.sgs.3692/dados/ultimos/1?formato=json";
const ECB_USD_PER_EUR_URL: &str = "https://data-api.ecb.europa.eu/service/data/EXR/D.USD.EUR.SP00.A?lastNObservations=1&format=jsondata";
const COINGECKO_BTC_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd";
const STOOQ_BASE_URL: &str = "https://stooq.com/q/l/";

/// Column holding the close price in a Stooq quote row
/// (Symbol,Date,Time,Open,High,Low,Close,Volume)
const STOOQ_CLOSE_COLUMN: usize = 6;

/// Where an indicator's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteSource {
    CentralBankBrazil,
    EuropeanCentralBank,
    CoinGecko,
    Stooq(&'static str),
}

impl QuoteSource {
    fn for_indicator(id: &str) -> Option<Self> {
        match id {
            "usdbrl" => Some(Self::CentralBankBrazil),
            "eurusd" => Some(Self::EuropeanCentralBank),
            "bitcoin" => Some(Self::CoinGecko),
            "sp500" => Some(Self::Stooq("^spx")),
            "nasdaq" => Some(Self::Stooq("^ndq")),
            "vix" => Some(Self::Stooq("^vix")),
            "brent" => Some(Self::Stooq("cb.f")),
            "gold" => Some(Self::Stooq("xauusd")),
            "natgas" => Some(Self::Stooq("ng.f")),
            _ => None,
        }
    }
}

/// HTTP-backed implementation of MarketDataSource
pub struct HttpMarketDataSource {
    http: Client,
}

impl HttpMarketDataSource {
    /// Every upstream request is bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self, MarketError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("newsdesk-api/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    async fn fetch(http: &Client, id: &str, source: QuoteSource) -> Result<f64, MarketError> {
        let value = match source {
            QuoteSource::CentralBankBrazil => parse_bcb(&get_json(http, BCB_USDBRL_URL).await?),
            QuoteSource::EuropeanCentralBank => {
                parse_ecb(&get_json(http, ECB_USD_PER_EUR_URL).await?)
            }
            QuoteSource::CoinGecko => parse_coingecko(&get_json(http, COINGECKO_BTC_URL).await?),
            QuoteSource::Stooq(symbol) => {
                let url = format!(
                    "{}?s={}&f=sd2t2ohlcv&h&e=csv",
                    STOOQ_BASE_URL,
                    encode(symbol)
                );
                let body = http
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                parse_stooq_csv(&body)
            }
        };

        value.ok_or_else(|| MarketError::NoValue(id.to_string()))
    }
}

async fn get_json(http: &Client, url: &str) -> Result<Value, MarketError> {
    Ok(http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?)
}

#[async_trait]
impl MarketDataSource for HttpMarketDataSource {
    async fn snapshot(&self, indicators: &[MarketIndicator]) -> MarketSnapshot {
        let mut tasks = JoinSet::new();

        for indicator in indicators {
            let Some(source) = QuoteSource::for_indicator(indicator.id) else {
                tracing::debug!(indicator = indicator.id, "No quote source configured");
                continue;
            };
            let http = self.http.clone();
            let id = indicator.id;
            tasks.spawn(async move { (id, Self::fetch(&http, id, source).await) });
        }

        let mut snapshot = MarketSnapshot::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, Ok(value))) => {
                    snapshot.insert(id.to_string(), Value::from(value));
                }
                Ok((id, Err(e))) => {
                    tracing::warn!(indicator = id, error = %e, "Market quote unavailable");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Market quote task failed");
                }
            }
        }

        snapshot
    }
}

/// Last element of the SGS series, `valor` holds a comma-decimal string
fn parse_bcb(data: &Value) -> Option<f64> {
    let last = data.as_array()?.last()?;
    parse_quote(last.get("valor")?)
}

/// The ECB series is USD per EUR; invert it and keep four decimals
fn parse_ecb(data: &Value) -> Option<f64> {
    let series = data
        .get("dataSets")?
        .get(0)?
        .get("series")?
        .as_object()?
        .values()
        .next()?;
    let observations = series.get("observations")?.as_object()?;

    let latest = observations
        .iter()
        .filter_map(|(key, obs)| Some((key.parse::<u64>().ok()?, obs)))
        .max_by_key(|(key, _)| *key)
        .map(|(_, obs)| obs)?;

    let usd_per_eur = parse_quote(latest.get(0)?)?;
    if usd_per_eur <= 0.0 {
        return None;
    }

    Some(((1.0 / usd_per_eur) * 10_000.0).round() / 10_000.0)
}

fn parse_coingecko(data: &Value) -> Option<f64> {
    parse_quote(data.get("bitcoin")?.get("usd")?)
}

/// Close column of the first data row; Stooq reports `N/D` for unknown symbols
fn parse_stooq_csv(body: &str) -> Option<f64> {
    let row = body.trim().lines().nth(1)?;
    let close = row.split(',').nth(STOOQ_CLOSE_COLUMN)?;
    parse_quote(&Value::String(close.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_default_indicator_has_a_source() {
        for indicator in crate::domain::entities::default_indicators() {
            assert!(
                QuoteSource::for_indicator(indicator.id).is_some(),
                "no source for {}",
                indicator.id
            );
        }
        assert!(QuoteSource::for_indicator("dogecoin").is_none());
    }

    #[test]
    fn bcb_reads_last_valor() {
        let data = json!([{"data": "03/01/2026", "valor": "4,9512"}]);
        assert_eq!(parse_bcb(&data), Some(4.9512));
        assert_eq!(parse_bcb(&json!([])), None);
    }

    #[test]
    fn ecb_inverts_latest_observation() {
        let data = json!({
            "dataSets": [{
                "series": {
                    "0:0:0:0:0": {
                        "observations": {
                            "0": [1.05],
                            "1": [1.25]
                        }
                    }
                }
            }]
        });
        assert_eq!(parse_ecb(&data), Some(0.8));
    }

    #[test]
    fn ecb_rounds_to_four_decimals() {
        let data = json!({
            "dataSets": [{"series": {"k": {"observations": {"0": [1.0823]}}}}]
        });
        assert_eq!(parse_ecb(&data), Some(0.924));
    }

    #[test]
    fn ecb_rejects_missing_or_non_positive() {
        assert_eq!(parse_ecb(&json!({})), None);
        let zero = json!({"dataSets": [{"series": {"k": {"observations": {"0": [0.0]}}}}]});
        assert_eq!(parse_ecb(&zero), None);
    }

    #[test]
    fn coingecko_reads_usd_price() {
        assert_eq!(
            parse_coingecko(&json!({"bitcoin": {"usd": 64123.5}})),
            Some(64123.5)
        );
        assert_eq!(parse_coingecko(&json!({"ethereum": {"usd": 1.0}})), None);
    }

    #[test]
    fn stooq_reads_close_column() {
        let csv = "Symbol,Date,Time,Open,High,Low,Close,Volume\r\n^SPX,2026-01-05,22:00:00,4800,4850,4790,4812.7,0\r\n";
        assert_eq!(parse_stooq_csv(csv), Some(4812.7));
    }

    #[test]
    fn stooq_unknown_symbol_has_no_value() {
        let csv = "Symbol,Date,Time,Open,High,Low,Close,Volume\n^XYZ,N/D,N/D,N/D,N/D,N/D,N/D,N/D\n";
        assert_eq!(parse_stooq_csv(csv), None);
        assert_eq!(parse_stooq_csv("Symbol,Date"), None);
    }
}
