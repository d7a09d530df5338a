use std::time::{Duration, Instant};

use hmac::{Hmac, Mac};
use mockito::Matcher;
use sha2::Sha512;
use tokio::net::TcpListener;
use uuid::Uuid;

use client::{BittrexClient, RequestParams};
use common::{BookSide, Credentials, Error, TickInterval, TickSource};

const KEY: &str = "key123";
const SECRET: &str = "secret456";

fn reference_signature(secret: &str, url: &str) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(url.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn client_for(server: &mockito::ServerGuard) -> BittrexClient {
    BittrexClient::new(
        Credentials::new(KEY, SECRET),
        &server.url(),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn public_request_is_signed_over_full_url() {
    let mut server = mockito::Server::new_async().await;
    let full_url = format!(
        "{}/api/v1.1/public/getmarketsummary?market=BTC-ETH",
        server.url()
    );
    let mock = server
        .mock("GET", "/api/v1.1/public/getmarketsummary")
        .match_query(Matcher::UrlEncoded("market".into(), "BTC-ETH".into()))
        .match_header("apisign", reference_signature(SECRET, &full_url).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"message":"","result":[{"MarketName":"BTC-ETH","Last":0.07}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client.get_market_summary("BTC-ETH").await.unwrap();

    mock.assert_async().await;
    assert!(resp.success);
    let result = resp.result.unwrap();
    assert_eq!(result[0]["MarketName"], "BTC-ETH");
}

#[tokio::test]
async fn private_request_carries_apikey_and_nonce() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1.1/account/getbalance")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("currency".into(), "BTC".into()),
            Matcher::UrlEncoded("apikey".into(), KEY.into()),
            Matcher::Regex(r"nonce=\d{13,}".into()),
        ]))
        .match_header("apisign", Matcher::Regex(r"^[0-9a-f]{128}$".into()))
        .with_status(200)
        .with_body(r#"{"success":true,"message":"","result":{"Currency":"BTC","Balance":1.5}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client.get_balance("BTC").await.unwrap();

    mock.assert_async().await;
    assert_eq!(resp.result.unwrap()["Balance"], 1.5);
}

#[tokio::test]
async fn limit_orders_are_private_calls() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1.1/market/buylimit")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("market".into(), "BTC-LTC".into()),
            Matcher::UrlEncoded("quantity".into(), "1.5".into()),
            Matcher::UrlEncoded("rate".into(), "0.0125".into()),
            Matcher::UrlEncoded("apikey".into(), KEY.into()),
            Matcher::Regex(r"nonce=\d+".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"success":true,"message":"","result":{"uuid":"e606d53c-8d70-11e3-94b5-425861b86ab6"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client.buy_limit("BTC-LTC", 1.5, 0.0125).await.unwrap();

    mock.assert_async().await;
    assert!(resp.success);
}

#[tokio::test]
async fn order_book_passes_side() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1.1/public/getorderbook")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("market".into(), "BTC-ETH".into()),
            Matcher::UrlEncoded("type".into(), "sell".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"success":true,"message":"","result":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    client.get_order_book("BTC-ETH", BookSide::Sell).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn ticks_are_decoded_oldest_first() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"{"success":true,"message":"","result":[
        {"O":1.0,"H":2.0,"L":0.5,"C":1.5,"V":10.0,"T":"2017-08-01T00:00:00","BV":15.0},
        {"O":1.5,"H":2.5,"L":1.0,"C":2.0,"V":11.0,"T":"2017-08-01T01:00:00","BV":22.0}
    ]}"#;
    let mock = server
        .mock("GET", "/api/v2.0/pub/market/GetTicks")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("marketName".into(), "BTC-ETH".into()),
            Matcher::UrlEncoded("tickInterval".into(), "thirtyMin".into()),
        ]))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client
        .get_ticks("BTC-ETH", TickInterval::ThirtyMin)
        .await
        .unwrap();

    mock.assert_async().await;
    let ticks = resp.result.unwrap();
    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[0].close, 1.5);
    assert_eq!(ticks[1].close, 2.0);
    assert!(ticks[0].timestamp < ticks[1].timestamp);
}

#[tokio::test]
async fn failed_envelope_is_returned_unchanged() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v2.0/pub/market/GetTicks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":false,"message":"INVALID_MARKET","result":null}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client
        .get_ticks("BTC-NOPE", TickInterval::Hour)
        .await
        .unwrap();

    assert!(!resp.success);
    assert_eq!(resp.message, "INVALID_MARKET");
    assert!(resp.result.is_none());
}

#[tokio::test]
async fn sell_limit_is_a_private_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1.1/market/selllimit")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("market".into(), "BTC-LTC".into()),
            Matcher::UrlEncoded("quantity".into(), "2".into()),
            Matcher::UrlEncoded("rate".into(), "0.02".into()),
            Matcher::UrlEncoded("apikey".into(), KEY.into()),
            Matcher::Regex(r"nonce=\d+".into()),
        ]))
        .match_header("apisign", Matcher::Regex(r"^[0-9a-f]{128}$".into()))
        .with_status(200)
        .with_body(r#"{"success":true,"message":"","result":{"uuid":"614c34e4-8d71-11e3-94b5-425861b86ab6"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client.sell_limit("BTC-LTC", 2.0, 0.02).await.unwrap();

    mock.assert_async().await;
    assert!(resp.success);
}

#[tokio::test]
async fn cancel_sends_order_uuid() {
    let order_id = Uuid::parse_str("09aa5bb6-8232-41aa-9b78-a5a1093e0211").unwrap();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1.1/market/cancel")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("uuid".into(), order_id.to_string()),
            Matcher::UrlEncoded("apikey".into(), KEY.into()),
            Matcher::Regex(r"nonce=\d+".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"success":true,"message":"","result":null}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client.cancel(order_id).await.unwrap();

    mock.assert_async().await;
    assert!(resp.success);
    assert!(resp.result.is_none());
}

#[tokio::test]
async fn open_orders_is_a_private_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1.1/market/getopenorders")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("market".into(), "BTC-ETH".into()),
            Matcher::UrlEncoded("apikey".into(), KEY.into()),
            Matcher::Regex(r"nonce=\d+".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"success":true,"message":"","result":[]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client.get_open_orders("BTC-ETH").await.unwrap();

    mock.assert_async().await;
    assert_eq!(resp.result.unwrap(), serde_json::json!([]));
}

#[tokio::test]
async fn failed_envelope_with_null_message_is_returned() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v2.0/pub/market/GetTicks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":false,"message":null,"result":null}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client.get_ticks("BTC-ETH", TickInterval::Hour).await.unwrap();

    assert!(!resp.success);
    assert_eq!(resp.message, "");
    assert!(resp.result.is_none());
}

#[tokio::test]
async fn failed_envelope_with_non_array_result_is_returned() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v2.0/pub/market/GetTicks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":false,"message":"APIKEY_INVALID","result":""}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let resp = client.get_ticks("BTC-ETH", TickInterval::Hour).await.unwrap();

    assert!(!resp.success);
    assert_eq!(resp.message, "APIKEY_INVALID");
    assert!(resp.result.is_none());
}

#[tokio::test]
async fn slow_server_times_out_as_network_error() {
    // Accepts the connection and never answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hold = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let client = BittrexClient::new(
        Credentials::new(KEY, SECRET),
        &format!("http://{addr}"),
        Duration::from_millis(300),
    )
    .unwrap();

    let started = Instant::now();
    let err = client
        .request("/api/v1.1/public/getmarkets", &RequestParams::new())
        .await
        .unwrap_err();
    let elapsed = started.elapsed();
    hold.abort();

    assert!(matches!(err, Error::Network(_)), "got {err:?}");
    assert!(elapsed >= Duration::from_millis(250), "returned too early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(10), "timeout not applied: {elapsed:?}");
}

#[tokio::test]
async fn non_json_body_is_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1.1/public/getmarketsummary")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_market_summary("BTC-ETH").await.unwrap_err();
    assert!(matches!(err, Error::Protocol(_)), "got {err:?}");
}

#[tokio::test]
async fn http_error_status_is_network_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1.1/public/getmarketsummary")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_market_summary("BTC-ETH").await.unwrap_err();
    assert!(matches!(err, Error::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let client = BittrexClient::new(
        Credentials::new(KEY, SECRET),
        "http://127.0.0.1:1",
        Duration::from_secs(2),
    )
    .unwrap();

    let err = client
        .request("/api/v1.1/public/getmarkets", &RequestParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Network(_)), "got {err:?}");
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = BittrexClient::new(
        Credentials::new(KEY, SECRET),
        "not a url",
        Duration::from_secs(1),
    );
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}
