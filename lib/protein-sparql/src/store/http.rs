use crate::error::StoreError;
use crate::results::SolutionSet;
use crate::store::{Connection, TripleStore};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use sparesults::{QueryResultsFormat, QueryResultsParser, ReaderQueryResultsParserOutput};
use std::time::Duration;

const SPARQL_QUERY_MEDIA_TYPE: &str = "application/sparql-query";
const ACCEPTED_RESULTS: &str = "application/sparql-results+json, \
    application/sparql-results+xml;q=0.9, text/tab-separated-values;q=0.8";

/// A remote store reached through the [SPARQL 1.1 Protocol](https://www.w3.org/TR/sparql11-protocol/).
///
/// Queries are sent with `POST` and an `application/sparql-query` body.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpStore {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, StoreError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TripleStore for HttpStore {
    fn description(&self) -> String {
        match self.timeout {
            Some(timeout) => format!(
                "SPARQL endpoint {} (timeout {}s)",
                self.endpoint,
                timeout.as_secs()
            ),
            None => format!("SPARQL endpoint {}", self.endpoint),
        }
    }

    async fn connect(&self) -> Result<Box<dyn Connection>, StoreError> {
        Ok(Box::new(HttpConnection {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
        }))
    }
}

struct HttpConnection {
    client: Client,
    endpoint: String,
}

#[async_trait]
impl Connection for HttpConnection {
    async fn select(&mut self, query: &str) -> Result<SolutionSet, StoreError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SPARQL_QUERY_MEDIA_TYPE)
            .header(ACCEPT, ACCEPTED_RESULTS)
            .body(query.to_owned())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint = %self.endpoint, %status, "query rejected by the endpoint");
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let media_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/sparql-results+json")
            .to_owned();
        let format = results_format(&media_type)
            .ok_or_else(|| StoreError::UnsupportedMediaType(media_type.clone()))?;
        let body = response.bytes().await?;
        parse_solutions(format, &body)
    }
}

fn results_format(media_type: &str) -> Option<QueryResultsFormat> {
    let essence = media_type
        .split_once(';')
        .map_or(media_type, |(essence, _)| essence)
        .trim();
    QueryResultsFormat::from_media_type(essence)
}

/// Reads a SELECT results document.
pub(crate) fn parse_solutions(
    format: QueryResultsFormat,
    body: &[u8],
) -> Result<SolutionSet, StoreError> {
    match QueryResultsParser::from_format(format).for_reader(body)? {
        ReaderQueryResultsParserOutput::Solutions(solutions) => {
            let mut set = SolutionSet::new(solutions.variables().to_vec());
            for solution in solutions {
                set.push(solution?.values().to_vec());
            }
            Ok(set)
        }
        ReaderQueryResultsParserOutput::Boolean(_) => {
            Err(StoreError::UnsupportedResults("a boolean"))
        }
    }
}
