use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::Sha512;
use tracing::debug;
use url::Url;

use common::{ApiResponse, Credentials, Error, Result};

/// Ordered query parameters. Serialized in insertion order, which is also the
/// order covered by the request signature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams(Vec<(String, String)>);

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl ToString) {
        self.0.push((name.into(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Signed REST client for the Bittrex API.
///
/// Every call takes its path explicitly; the client holds no per-request
/// state besides the nonce counter, so one instance can be shared across
/// tasks behind an `Arc`.
pub struct BittrexClient {
    credentials: Credentials,
    base: Url,
    http: Client,
    last_nonce: AtomicU64,
}

impl BittrexClient {
    pub fn new(credentials: Credentials, base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            credentials,
            base,
            http,
            last_nonce: AtomicU64::new(0),
        })
    }

    /// Hex-encoded HMAC-SHA512 of the exact URL string, keyed by the API secret.
    pub fn sign(&self, url: &str) -> String {
        type HmacSha512 = Hmac<Sha512>;
        let mut mac = HmacSha512::new_from_slice(self.credentials.api_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(url.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Current time in milliseconds, bumped when needed so that no two calls
    /// on this client ever see the same value.
    pub fn next_nonce(&self) -> u64 {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut prev = self.last_nonce.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self.last_nonce.compare_exchange_weak(
                prev,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Append `apikey` and a fresh `nonce`, as every account/market call needs.
    pub fn authenticated(&self, mut params: RequestParams) -> RequestParams {
        params.push("apikey", &self.credentials.api_key);
        params.push("nonce", self.next_nonce());
        params
    }

    /// Full request URL: base, path, then the query string in parameter order.
    pub fn url_for(&self, path: &str, params: &RequestParams) -> Result<Url> {
        let mut url = self.base.join(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }

    /// Sign and GET `path` with `params`, returning the parsed JSON body.
    ///
    /// The exchange's `{ success, message, result }` envelope is returned as-is.
    pub async fn request(&self, path: &str, params: &RequestParams) -> Result<Value> {
        let url = self.url_for(path, params)?;
        let signature = self.sign(url.as_str());

        debug!(path, url_len = url.as_str().len(), "Sending signed request");
        let resp = self
            .http
            .get(url)
            .header("apisign", signature)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Network(format!("HTTP {status}: {body}")));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Protocol(format!("{path} returned non-JSON body: {e}")))
    }

    /// Like [`request`](Self::request), but decodes the `{ success, message,
    /// result }` envelope. A failed envelope is returned, not raised.
    pub async fn request_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &RequestParams,
    ) -> Result<ApiResponse<T>> {
        let value = self.request(path, params).await?;
        ApiResponse::from_json(value).map_err(|e| match e {
            Error::Protocol(msg) => Error::Protocol(format!("{path}: {msg}")),
            other => other,
        })
    }
}
