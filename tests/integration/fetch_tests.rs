use std::time::Duration;

use word_spider::config::FetcherConfig;
use word_spider::crawler::{FetchError, PageFetcher};
use word_spider::url::RequestTarget;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{dead_port, mock_target, mock_url, test_fetcher, test_fetcher_config, TEST_USER_AGENT};

#[tokio::test]
async fn test_fetch_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>hello</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch(&mock_target(&server, "/page"))
        .await
        .unwrap();
    assert_eq!(body, "<p>hello</p>");
}

#[tokio::test]
async fn test_fetch_returns_error_page_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone away"))
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch(&mock_target(&server, "/missing"))
        .await
        .unwrap();
    assert_eq!(body, "gone away");
}

#[tokio::test]
async fn test_fetch_sends_expected_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", TEST_USER_AGENT))
        .and(header("accept", "*/*"))
        .and(header("accept-encoding", "identity"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch(&mock_target(&server, "/"))
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_fetch_keeps_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(wiremock::matchers::query_param("q", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_string("results"))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch(&mock_target(&server, "/search?q=rust"))
        .await
        .unwrap();
    assert_eq!(body, "results");
}

#[tokio::test]
async fn test_follows_absolute_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", mock_url(&server, "/new").as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch(&mock_target(&server, "/old"))
        .await
        .unwrap();
    assert_eq!(body, "moved here");
}

#[tokio::test]
async fn test_follows_relative_redirect_for_every_status() {
    for status in [301, 302, 303, 307, 308] {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(status).insert_header("location", "/start"))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(200).set_body_string("landed"))
            .expect(1)
            .mount(&server)
            .await;

        let body = test_fetcher()
            .fetch(&mock_target(&server, "/"))
            .await
            .unwrap();
        assert_eq!(body, "landed", "status {}", status);
    }
}

#[tokio::test]
async fn test_redirect_without_location_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302).set_body_string("no location"))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_fetcher()
        .fetch(&mock_target(&server, "/"))
        .await
        .unwrap();
    assert_eq!(body, "no location");
}

#[tokio::test]
async fn test_redirect_loop_exhausts_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", mock_url(&server, "/loop").as_str()),
        )
        .expect(5)
        .mount(&server)
        .await;

    let result = test_fetcher().fetch(&mock_target(&server, "/loop")).await;
    assert!(matches!(result, Err(FetchError::TooManyRedirects { .. })));
}

#[tokio::test]
async fn test_redirect_chain_within_budget() {
    let server = MockServer::start().await;
    let config = FetcherConfig {
        max_redirects: 3,
        ..test_fetcher_config()
    };
    let fetcher = PageFetcher::new(&config).unwrap();

    for (from, to) in [("/r1", "/r2"), ("/r2", "/final")] {
        Mock::given(method("GET"))
            .and(path(from))
            .respond_with(
                ResponseTemplate::new(307).insert_header("location", mock_url(&server, to).as_str()),
            )
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(ResponseTemplate::new(200).set_body_string("end of chain"))
        .mount(&server)
        .await;

    let body = fetcher.fetch(&mock_target(&server, "/r1")).await.unwrap();
    assert_eq!(body, "end of chain");

    let result = fetcher
        .fetch_with_budget(&mock_target(&server, "/r1"), 2)
        .await;
    assert!(matches!(result, Err(FetchError::TooManyRedirects { .. })));
}

#[tokio::test]
async fn test_unusable_redirect_location() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "mailto:someone@example.com"))
        .mount(&server)
        .await;

    let result = test_fetcher().fetch(&mock_target(&server, "/")).await;
    assert!(matches!(result, Err(FetchError::InvalidRedirect { .. })));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    let config = FetcherConfig {
        request_timeout_secs: 1,
        ..test_fetcher_config()
    };
    let fetcher = PageFetcher::new(&config).unwrap();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let result = fetcher.fetch(&mock_target(&server, "/slow")).await;
    assert!(matches!(result, Err(FetchError::Timeout { .. })));
}

#[tokio::test]
async fn test_connection_refused_fails() {
    let target = RequestTarget::new("127.0.0.1", dead_port().to_string(), "/");

    let result = test_fetcher().fetch(&target).await;
    assert!(matches!(result, Err(FetchError::Failed { .. })));
}

#[tokio::test]
async fn test_blacklist_does_not_apply_to_plain_http() {
    let server = MockServer::start().await;
    let config = FetcherConfig {
        blacklisted_hosts: vec!["127.0.0.1".to_string()],
        ..test_fetcher_config()
    };
    let fetcher = PageFetcher::new(&config).unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain http"))
        .expect(1)
        .mount(&server)
        .await;

    let body = fetcher.fetch(&mock_target(&server, "/")).await.unwrap();
    assert_eq!(body, "plain http");
}
