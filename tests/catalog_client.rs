//! Catalog client behavior: pagination aggregation, cache freshness,
//! retry ceiling, and error normalization — all against a mock catalog.

mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use holocron::models::{Page, Person};
use holocron::HolocronError;

#[tokio::test]
async fn fetch_all_follows_next_links_in_order() {
    let server = MockServer::start().await;

    let page_two_url = format!("{}/api/people/?page=2", server.uri());
    // specific (page=2) mock first: wiremock answers with the earliest match
    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(
            3,
            None,
            vec![common::person(&server, "3", "Leia Organa")],
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(
            3,
            Some(page_two_url),
            vec![
                common::person(&server, "1", "Luke Skywalker"),
                common::person(&server, "2", "C-3PO"),
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server);
    let people: Vec<Person> = client.fetch_all("people/").await.unwrap();

    assert_eq!(
        people.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["Luke Skywalker", "C-3PO", "Leia Organa"]
    );
}

#[tokio::test]
async fn fetch_all_fails_atomically_when_a_page_errors() {
    let server = MockServer::start().await;

    let page_two_url = format!("{}/api/people/?page=2", server.uri());
    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(
            2,
            Some(page_two_url),
            vec![common::person(&server, "1", "Luke Skywalker")],
        )))
        .mount(&server)
        .await;

    let client = common::client(&server);
    let result = client.fetch_all::<Person>("people/").await;

    assert!(matches!(result, Err(HolocronError::NotFound { .. })));
}

#[tokio::test]
async fn second_fetch_within_freshness_window_hits_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/planets/1/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::planet(&server, "1", "Tatooine")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server);
    let first: Value = client.fetch("planets/1/").await.unwrap();
    let second: Value = client.fetch("planets/1/").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn fetch_after_freshness_window_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/planets/1/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::planet(&server, "1", "Tatooine")),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = common::client_with(&server, |config| {
        config.cache_ttl = Duration::from_millis(100);
    });
    client.fetch("planets/1/").await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    client.fetch("planets/1/").await.unwrap();
}

#[tokio::test]
async fn persistent_server_error_is_retried_to_the_ceiling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/starships/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4) // initial attempt + 3 retries
        .mount(&server)
        .await;

    let client = common::client(&server);
    let err = client.fetch("starships/").await.unwrap_err();

    match err {
        HolocronError::Upstream { status, url } => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/api/starships/"));
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[tokio::test]
async fn transient_rate_limit_recovers_within_the_ceiling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/films/"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/films/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(0, None, vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server);
    let page: Page<Value> = client.fetch_as("films/").await.unwrap();
    assert_eq!(page.count, 0);
}

#[tokio::test]
async fn not_found_fails_immediately_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/people/999999/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server);
    let err = client.fetch("people/999999/").await.unwrap_err();

    match err {
        HolocronError::NotFound { url } => assert!(url.ends_with("/people/999999/")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles/"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server);
    let err = client.fetch("vehicles/").await.unwrap_err();
    assert!(matches!(err, HolocronError::Upstream { status: 400, .. }));
}

#[tokio::test]
async fn search_query_is_url_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/people/"))
        .and(query_param("search", "luke skywalker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page(
            1,
            None,
            vec![common::person(&server, "1", "Luke Skywalker")],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server);
    let page: Page<Person> = client.fetch_search("people/", "luke skywalker").await.unwrap();

    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].name, "Luke Skywalker");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/species/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = common::client(&server);
    let err = client.fetch("species/").await.unwrap_err();
    assert!(matches!(err, HolocronError::Decode { .. }));
}
