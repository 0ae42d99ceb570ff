#![cfg(test)]
#![allow(clippy::panic_in_result_fn, reason = "tests")]

use anyhow::Result;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::routing::post;
use axum::Router;
use protein_sparql::store::{HttpStore, TripleStore};
use protein_sparql::{extract_literals, StoreError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const RESULTS: &str = r#"{
  "head": { "vars": ["entry"] },
  "results": { "bindings": [
    { "entry": { "type": "uri", "value": "http://nextprot.org/rdf/entry/NX_P04637" } },
    { "entry": { "type": "uri", "value": "http://nextprot.org/rdf/entry/NX_Q9Y6K9" } }
  ] }
}"#;

/// Received requests, as (content type, accept, body).
type Requests = Arc<Mutex<Vec<(String, String, String)>>>;

/// Serves `body` with `status` on `/sparql` and records the requests it receives.
async fn endpoint(
    status: StatusCode,
    content_type: &'static str,
    body: &'static str,
) -> Result<(String, Requests)> {
    let requests = Requests::default();
    let recorded = Arc::clone(&requests);
    let app = Router::new().route(
        "/sparql",
        post(move |headers: HeaderMap, query: String| {
            let recorded = Arc::clone(&recorded);
            async move {
                let header = |name: HeaderName| {
                    headers
                        .get(name)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default()
                        .to_owned()
                };
                if let Ok(mut requests) = recorded.lock() {
                    requests.push((header(CONTENT_TYPE), header(ACCEPT), query));
                }
                (status, [(CONTENT_TYPE, content_type)], body)
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, app).await });
    Ok((format!("http://{address}/sparql"), requests))
}

#[tokio::test]
async fn posts_the_query_and_reads_json_results() -> Result<()> {
    let (url, requests) = endpoint(
        StatusCode::OK,
        "application/sparql-results+json; charset=utf-8",
        RESULTS,
    )
    .await?;
    let store = HttpStore::new(&url, Some(Duration::from_secs(10)))?;
    assert!(
        store.description().contains(&url),
        "description: {}",
        store.description()
    );

    let mut session = store.open().await?;
    let solutions = session.select("SELECT ?entry WHERE { ?entry a ?t }").await?;
    session.close().await?;

    assert_eq!(
        extract_literals(&solutions, "entry")?,
        ["NX_P04637", "NX_Q9Y6K9"]
    );
    let requests = requests.lock().map_err(|e| anyhow::anyhow!("{e}"))?;
    assert_eq!(requests.len(), 1);
    let (content_type, accept, query) = &requests[0];
    assert_eq!(content_type, "application/sparql-query");
    assert!(
        accept.starts_with("application/sparql-results+json"),
        "accept: {accept}"
    );
    assert_eq!(query, "SELECT ?entry WHERE { ?entry a ?t }");
    Ok(())
}

#[tokio::test]
async fn error_status_is_surfaced() -> Result<()> {
    let (url, _) = endpoint(
        StatusCode::BAD_REQUEST,
        "text/plain",
        "Parse error on line 1",
    )
    .await?;
    let store = HttpStore::new(url, None)?;
    let mut session = store.open().await?;
    let error = session.select("SELECT").await.unwrap_err();
    assert!(
        matches!(&error, StoreError::Status { status: 400, body } if body.contains("Parse error")),
        "unexpected error {error}"
    );
    Ok(())
}

#[tokio::test]
async fn unknown_media_type_is_rejected() -> Result<()> {
    let (url, _) = endpoint(StatusCode::OK, "text/html", "<html></html>").await?;
    let store = HttpStore::new(url, None)?;
    let mut session = store.open().await?;
    let error = session.select("SELECT * {}").await.unwrap_err();
    assert!(
        matches!(&error, StoreError::UnsupportedMediaType(media_type) if media_type == "text/html"),
        "unexpected error {error}"
    );
    Ok(())
}
