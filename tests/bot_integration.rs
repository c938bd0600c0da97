//! End-to-end dispatch tests with both Telegram and the geolocation API mocked
//!
//! The dispatcher talks to a real `BotApi` pointed at a wiremock server, so
//! these tests also pin the JSON the bot sends to Telegram.

use std::sync::Arc;
use std::time::Duration;

use ip_geo_bot::error_handling::ProcessingStats;
use ip_geo_bot::messages;
use ip_geo_bot::telegram::{BotApi, Chat, Message};
use ip_geo_bot::{BotToken, Dispatcher, GeoClient, SelfIpClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn sent(message_id: i64) -> Value {
    json!({
        "ok": true,
        "result": {"message_id": message_id, "date": 0, "chat": {"id": 555, "type": "private"}}
    })
}

async fn mock_telegram() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botTEST/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent(100)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/botTEST/editMessageText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent(100)))
        .mount(&server)
        .await;
    server
}

fn dispatcher(telegram: &MockServer, geo: &MockServer) -> Dispatcher<BotApi> {
    let http = Arc::new(reqwest::Client::new());
    Dispatcher::new(
        BotApi::new(Arc::clone(&http), &telegram.uri(), &BotToken::new("TEST")),
        GeoClient::new(
            Arc::clone(&http),
            format!("{}/json/", geo.uri()),
            "ru",
            Duration::from_secs(5),
        ),
        SelfIpClient::new(http, format!("{}/ip", geo.uri()), Duration::from_secs(5)),
        Arc::new(ProcessingStats::new()),
    )
}

fn incoming(text: &str) -> Message {
    Message {
        message_id: 7,
        chat: Chat { id: 555 },
        from: None,
        text: Some(text.to_string()),
    }
}

async fn telegram_calls(server: &MockServer) -> Vec<(String, Value)> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .map(|r: &Request| {
            let body: Value = serde_json::from_slice(&r.body).expect("JSON body");
            (r.url.path().rsplit('/').next().unwrap_or_default().to_string(), body)
        })
        .collect()
}

#[tokio::test]
async fn test_public_ip_flow_sends_placeholder_then_edits_it() {
    let telegram = mock_telegram().await;
    let geo = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/8.8.8.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "country": "USA",
            "city": "Mountain View",
            "regionName": "California",
            "lat": 37.4,
            "lon": -122.1
        })))
        .expect(1)
        .mount(&geo)
        .await;

    dispatcher(&telegram, &geo)
        .handle_message(&incoming("8.8.8.8"))
        .await;

    let calls = telegram_calls(&telegram).await;
    assert_eq!(calls.len(), 2);

    let (name, body) = &calls[0];
    assert_eq!(name, "sendMessage");
    assert_eq!(body["chat_id"], 555);
    assert_eq!(body["text"], messages::SEARCHING);
    assert_eq!(body["reply_parameters"]["message_id"], 7);

    let (name, body) = &calls[1];
    assert_eq!(name, "editMessageText");
    assert_eq!(body["message_id"], 100);
    assert_eq!(body["parse_mode"], "HTML");
    assert_eq!(body["link_preview_options"]["is_disabled"], true);
    let text = body["text"].as_str().expect("text");
    assert!(text.contains("<b>8.8.8.8</b>"));
    assert!(text.contains("https://maps.google.com/?q=37.4,-122.1"));
}

#[tokio::test]
async fn test_private_ip_is_rejected_without_lookup() {
    let telegram = mock_telegram().await;
    let geo = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&geo)
        .await;

    dispatcher(&telegram, &geo)
        .handle_message(&incoming("192.168.1.10"))
        .await;

    let calls = telegram_calls(&telegram).await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "sendMessage");
    assert_eq!(calls[0].1["text"], messages::PRIVATE_IPV4);
    assert!(calls[0].1.get("parse_mode").is_none());
}

#[tokio::test]
async fn test_start_sends_keyboard() {
    let telegram = mock_telegram().await;
    let geo = MockServer::start().await;

    dispatcher(&telegram, &geo)
        .handle_message(&incoming("/start"))
        .await;

    let calls = telegram_calls(&telegram).await;
    assert_eq!(calls.len(), 1);
    let body = &calls[0].1;
    assert_eq!(body["text"], messages::GREETING);
    assert!(body.get("reply_parameters").is_none());
    assert_eq!(
        body["reply_markup"]["keyboard"][0][0]["text"],
        messages::BUTTON_OWN_IP
    );
    assert_eq!(
        body["reply_markup"]["keyboard"][1][0]["text"],
        messages::BUTTON_HELP
    );
}

#[tokio::test]
async fn test_rejected_edit_falls_back_to_plain_notice() {
    let telegram = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botTEST/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent(100)))
        .mount(&telegram)
        .await;
    Mock::given(method("POST"))
        .and(path("/botTEST/editMessageText"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: can't parse entities"
        })))
        .mount(&telegram)
        .await;
    let geo = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .mount(&geo)
        .await;

    dispatcher(&telegram, &geo)
        .handle_message(&incoming("8.8.4.4"))
        .await;

    let calls = telegram_calls(&telegram).await;
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].0, "editMessageText");
    assert_eq!(calls[2].1["text"], messages::DISPLAY_FAILURE);
}
