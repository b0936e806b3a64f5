#![allow(clippy::unwrap_used, reason = "test code")]

use cinesync_core::MovieSnapshot;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::truncate;
use crate::{CatalogError, TmdbClient};

fn client_for(server: &MockServer) -> TmdbClient {
    TmdbClient::new("test-token".to_owned(), server.uri()).unwrap()
}

fn movie_list() -> serde_json::Value {
    json!({
        "page": 1,
        "results": [
            { "id": 27205, "title": "Inception", "poster_path": "/inception.jpg",
              "release_date": "2010-07-15", "vote_average": 8.4, "overview": "Dreams." },
            { "id": 157336, "title": "Interstellar", "poster_path": null }
        ],
        "total_results": 2
    })
}

#[tokio::test]
async fn test_search_sends_query_and_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "inception"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_list()))
        .expect(1)
        .mount(&server)
        .await;

    let movies = client_for(&server).fetch_movies("inception").await.unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Inception");
    assert_eq!(movies[0].vote_average, Some(8.4));
    assert_eq!(movies[1].poster_path, None);
}

#[tokio::test]
async fn test_blank_query_discovers_popular() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("sort_by", "popularity.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_list()))
        .expect(1)
        .mount(&server)
        .await;

    let movies = client_for(&server).fetch_movies("   ").await.unwrap();
    assert_eq!(movies.len(), 2);
}

#[tokio::test]
async fn test_movie_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/27205"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 27205,
            "title": "Inception",
            "poster_path": "/inception.jpg",
            "runtime": 148,
            "genres": [{ "id": 28, "name": "Action" }, { "id": 878, "name": "Science Fiction" }]
        })))
        .mount(&server)
        .await;

    let details = client_for(&server).movie_details(27205).await.unwrap();
    assert_eq!(details.runtime, Some(148));
    assert_eq!(details.genres.len(), 2);
    assert_eq!(details.genres[1].name, "Science Fiction");
    assert_eq!(
        MovieSnapshot::from(&details),
        MovieSnapshot::new(27205, "Inception", Some("/inception.jpg".to_owned()))
    );
}

#[tokio::test]
async fn test_unknown_movie_is_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/1"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "status_message": "not found", "status_code": 34 })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).movie_details(1).await.unwrap_err();
    match &err {
        CatalogError::HttpStatus { code, body } => {
            assert_eq!(*code, 404);
            assert!(body.contains("not found"));
        },
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_unauthorized_and_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let unauthorized = client.fetch_movies("x").await.unwrap_err();
    assert!(unauthorized.is_unauthorized());
    assert!(!unauthorized.is_transient());

    let unavailable = client.fetch_movies("").await.unwrap_err();
    assert!(unavailable.is_transient());
}

#[tokio::test]
async fn test_malformed_body_is_json_parse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_movies("x").await.unwrap_err();
    assert!(matches!(err, CatalogError::JsonParse { .. }));
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = TmdbClient::new("t".to_owned(), "http://localhost:9/3/".to_owned()).unwrap();
    assert_eq!(client.base_url(), "http://localhost:9/3");
}

#[test]
fn test_debug_redacts_token() {
    let client = TmdbClient::new("super-secret".to_owned(), "http://localhost".to_owned()).unwrap();
    let rendered = format!("{client:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("***"));
}

#[test]
fn test_truncate_respects_char_boundary() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 3), "hel");
    // 'é' is two bytes
    assert_eq!(truncate("é", 1), "");
}

#[test]
fn test_catalog_movie_snapshot_and_poster() {
    let movie: crate::CatalogMovie =
        serde_json::from_value(json!({ "id": 7, "title": "Se7en", "poster_path": "/s.jpg" }))
            .unwrap();
    assert_eq!(movie.snapshot().id, 7);
    assert_eq!(movie.poster_url(), "https://image.tmdb.org/t/p/w500/s.jpg");
}
