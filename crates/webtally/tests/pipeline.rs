//! End-to-end tests: a local HTTP server serves a fixed document and the
//! full fetch → tokenize → tally pipeline runs against it.

use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webtally::count_words;
use webtally::fetch::{FetchError, FetchSettings};
use webtally::report::{ResultLimit, rank};

/// Reference tally: the=3, fox=2, quick/brown/lazy/dog=1.
const DOC: &str = "the quick brown fox\nthe lazy dog the fox\n";

#[tokio::test]
async fn reports_top_words_of_a_fixed_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DOC))
        .mount(&server)
        .await;

    let url = format!("{}/doc.txt", server.uri());
    let tally = count_words(&url, &FetchSettings::default())
        .await
        .expect("fetch should succeed");

    assert_eq!(tally.count("the"), Some(3));
    assert_eq!(tally.count("fox"), Some(2));
    assert_eq!(tally.count("quick"), Some(1));
    assert_eq!(tally.len(), 6);

    let ranked = rank(tally.snapshot(), ResultLimit::Top(2));
    assert_eq!(ranked.len(), 2);
    assert_eq!((ranked[0].word.as_str(), ranked[0].count), ("the", 3));
    assert_eq!((ranked[1].word.as_str(), ranked[1].count), ("fox", 2));
}

#[tokio::test]
async fn sends_the_fixed_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    count_words(&server.uri(), &FetchSettings::default())
        .await
        .expect("fetch should succeed");
}

#[tokio::test]
async fn counts_lines_split_across_the_stream() {
    // A body without a trailing newline still flushes its last line.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("alpha beta\r\nbeta"))
        .mount(&server)
        .await;

    let tally = count_words(&server.uri(), &FetchSettings::default())
        .await
        .expect("fetch should succeed");

    assert_eq!(tally.count("alpha"), Some(1));
    assert_eq!(tally.count("beta"), Some(2));
    assert_eq!(tally.len(), 2);
}

#[tokio::test]
async fn non_success_status_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = count_words(&server.uri(), &FetchSettings::default())
        .await
        .expect_err("404 must fail");
    assert!(matches!(err, FetchError::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn invalid_url_is_rejected_before_any_request() {
    let err = count_words("not a url", &FetchSettings::default())
        .await
        .expect_err("malformed URL must fail");
    assert!(matches!(err, FetchError::InvalidUrl { .. }));
}

#[tokio::test]
async fn slow_server_trips_the_request_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(200),
        ..FetchSettings::default()
    };
    let err = count_words(&server.uri(), &settings)
        .await
        .expect_err("deadline must trip");
    assert!(matches!(err, FetchError::Timeout(_)));
}
