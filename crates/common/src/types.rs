use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// API key and secret for one exchange account.
///
/// The secret is only ever used as an HMAC key; it is never sent on the wire
/// and is redacted from `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Standard Bittrex response wrapper: `{ success, message, result }`.
///
/// The client never interprets `success`; callers decide what a failed
/// envelope means for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub result: Option<T>,
}

/// Envelope as it comes off the wire, before `result` is given a type.
#[derive(Deserialize)]
struct RawEnvelope {
    success: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    message: String,
    #[serde(default)]
    result: Value,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decode an envelope from parsed JSON.
    ///
    /// `result` must fit `T` only when `success` is true. On a failed
    /// envelope it is kept if it fits and dropped otherwise, so the exchange's
    /// failure always reaches the caller with its message.
    pub fn from_json(value: Value) -> Result<Self> {
        let raw: RawEnvelope = serde_json::from_value(value)
            .map_err(|e| Error::Protocol(format!("malformed response envelope: {e}")))?;

        let result = if raw.result.is_null() {
            None
        } else if raw.success {
            Some(
                serde_json::from_value(raw.result)
                    .map_err(|e| Error::Protocol(format!("unexpected result layout: {e}")))?,
            )
        } else {
            serde_json::from_value(raw.result).ok()
        };

        Ok(Self {
            success: raw.success,
            message: raw.message,
            result,
        })
    }
}

impl<T> ApiResponse<T> {
    /// Convert the envelope into a `Result`, turning `success: false` into
    /// `Error::Exchange` carrying the exchange's message.
    pub fn into_result(self) -> Result<T> {
        if !self.success {
            return Err(Error::Exchange(self.message));
        }
        self.result
            .ok_or_else(|| Error::Protocol("successful response without a result".into()))
    }
}

/// Candle width accepted by the `GetTicks` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TickInterval {
    OneMin,
    FiveMin,
    ThirtyMin,
    #[default]
    Hour,
    Week,
    Day,
    Month,
}

impl TickInterval {
    pub const ALL: [TickInterval; 7] = [
        TickInterval::OneMin,
        TickInterval::FiveMin,
        TickInterval::ThirtyMin,
        TickInterval::Hour,
        TickInterval::Week,
        TickInterval::Day,
        TickInterval::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TickInterval::OneMin => "oneMin",
            TickInterval::FiveMin => "fiveMin",
            TickInterval::ThirtyMin => "thirtyMin",
            TickInterval::Hour => "hour",
            TickInterval::Week => "week",
            TickInterval::Day => "day",
            TickInterval::Month => "month",
        }
    }
}

impl std::fmt::Display for TickInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TickInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TickInterval::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| Error::Config(format!("unknown tick interval '{s}'")))
    }
}

/// One historical OHLCV candle as returned by `GetTicks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    #[serde(rename = "O")]
    pub open: f64,
    #[serde(rename = "H")]
    pub high: f64,
    #[serde(rename = "L")]
    pub low: f64,
    #[serde(rename = "C")]
    pub close: f64,
    #[serde(rename = "V")]
    pub volume: f64,
    /// Volume in the base currency. Not always present.
    #[serde(rename = "BV", default)]
    pub base_volume: Option<f64>,
    /// Candle open time. Bittrex sends it without a zone; it is UTC.
    #[serde(rename = "T")]
    pub timestamp: NaiveDateTime,
}

impl Tick {
    /// Close at the high and open at the low: the candle spans its full range
    /// in the bullish direction.
    pub fn is_full_range_bullish(&self) -> bool {
        self.close == self.high && self.open == self.low
    }
}

/// Which side of the order book to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    Buy,
    Sell,
    #[default]
    Both,
}

impl std::fmt::Display for BookSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookSide::Buy => write!(f, "buy"),
            BookSide::Sell => write!(f, "sell"),
            BookSide::Both => write!(f, "both"),
        }
    }
}
