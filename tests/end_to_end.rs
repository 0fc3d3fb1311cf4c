// tests/end_to_end.rs
//! End-to-end delivery against local webhook endpoints.

use pretty_assertions::assert_eq;
use psa::{build_announcers, configure, AnnouncementComposer, Dispatcher, FailureCause};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn discord_and_slack_receive_their_wire_formats() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/discord"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("content=release+v2+is+live"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/slack"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "text": "release v2 is live" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let discord = format!("{}/discord", server.uri());
    let slack = format!("{}/slack", server.uri());
    let config = configure(
        Some(discord.as_str()),
        Some(slack.as_str()),
        Some("{{message}}"),
    )
    .unwrap();
    let announcement = config.compose("release v2 is live").unwrap();
    let dispatcher = Dispatcher::new(build_announcers(&config, TIMEOUT).unwrap());

    let summary = dispatcher.dispatch(&announcement).await;

    assert_eq!(summary.attempted(), 2);
    assert_eq!(summary.failure_count(), 0);
    assert!(summary.is_success());

    let requests = server.received_requests().await.unwrap();
    let slack_body = requests
        .iter()
        .find(|r| r.url.path() == "/slack")
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .unwrap();
    assert_eq!(slack_body, r#"{"text":"release v2 is live"}"#);
}

#[tokio::test]
async fn error_response_is_counted_and_does_not_block_other_channels() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/discord"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/slack"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let discord = format!("{}/discord", server.uri());
    let slack = format!("{}/slack", server.uri());
    let config = configure(Some(discord.as_str()), Some(slack.as_str()), None).unwrap();
    let announcement = config.compose("maintenance tonight").unwrap();
    let dispatcher =
        Dispatcher::new(build_announcers(&config, TIMEOUT).unwrap()).verbose(true);

    let summary = dispatcher.dispatch(&announcement).await;

    assert_eq!(summary.succeeded_count(), 1);
    assert_eq!(summary.failure_count(), 1);
    let failure = &summary.failed[0];
    assert_eq!(failure.channel, "Discord Announcer");
    assert_eq!(
        failure.cause,
        FailureCause::ErrorResponse {
            status_line: "404 Not Found".to_string()
        }
    );
    assert_eq!(summary.trace.len(), 4);
}

#[tokio::test]
async fn oversized_error_body_is_not_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(10_000)))
        .mount(&server)
        .await;

    let slack = format!("{}/slack", server.uri());
    let config = configure(None, Some(slack.as_str()), None).unwrap();
    let announcement = config.compose("hello").unwrap();
    let dispatcher = Dispatcher::new(build_announcers(&config, TIMEOUT).unwrap());

    let summary = dispatcher.dispatch(&announcement).await;

    assert_eq!(summary.failure_count(), 1);
    assert!(summary.failed[0].cause.to_string().contains("500"));
}

#[tokio::test]
async fn markup_is_escaped_before_it_reaches_any_channel() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/slack"))
        .and(body_json(json!({ "text": "📣 &lt;b&gt;hi&lt;/b&gt;" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let slack = format!("{}/slack", server.uri());
    let config = configure(None, Some(slack.as_str()), None).unwrap();
    let announcement = config.compose("<b>hi</b>").unwrap();
    let dispatcher = Dispatcher::new(build_announcers(&config, TIMEOUT).unwrap());

    assert!(dispatcher.dispatch(&announcement).await.is_success());
}

#[tokio::test]
async fn unreachable_webhook_is_a_transport_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let discord = format!("http://127.0.0.1:{port}/discord");

    let config = configure(Some(discord.as_str()), None, None).unwrap();
    let announcement = config.compose("hello").unwrap();
    let dispatcher = Dispatcher::new(build_announcers(&config, TIMEOUT).unwrap());

    let summary = dispatcher.dispatch(&announcement).await;

    assert_eq!(summary.failure_count(), 1);
    assert!(matches!(summary.failed[0].cause, FailureCause::Transport(_)));
}

#[tokio::test]
async fn no_configured_channels_is_success() {
    let config = configure(None, None, None).unwrap();
    let announcement = config.compose("nobody listening").unwrap();
    let dispatcher = Dispatcher::new(build_announcers(&config, TIMEOUT).unwrap());

    let summary = dispatcher.dispatch(&announcement).await;

    assert_eq!(summary.attempted(), 0);
    assert!(summary.is_success());
}
