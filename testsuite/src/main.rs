#![allow(clippy::print_stdout, reason = "the report goes to stdout")]
use anyhow::{bail, Result};
use clap::Parser;
use protein_sparql::config::{
    parse_timeout, parse_variable, HarnessConfig, StoreConfig, ENDPOINT_ENV, QUERIES_ENV,
    TIMEOUT_ENV, VARIABLE_ENV,
};
use protein_sparql::harness::Harness;
use protein_sparql::report::build_report;
use protein_sparql::store;
use protein_sparql_testsuite::{queries_dir, sample_data};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
/// Runs annotated SPARQL queries and checks that the expected accessions come back
struct Args {
    /// Names of the queries to run, all of them if empty
    queries: Vec<String>,
    /// Directory of the query files
    #[arg(long = "queries", env = QUERIES_ENV, value_name = "DIR")]
    queries_dir: Option<PathBuf>,
    /// SPARQL endpoint to query
    #[arg(long, env = ENDPOINT_ENV, value_name = "URL", conflicts_with = "data")]
    endpoint: Option<String>,
    /// RDF files to load into an in-memory store
    #[arg(long, value_name = "FILE")]
    data: Vec<PathBuf>,
    /// Variable holding the accessions
    #[arg(
        long,
        env = VARIABLE_ENV,
        default_value = HarnessConfig::DEFAULT_VARIABLE,
        value_parser = variable_arg
    )]
    variable: String,
    /// Request timeout for the endpoint, in seconds
    #[arg(long, env = TIMEOUT_ENV, value_name = "SECONDS", value_parser = timeout_arg)]
    timeout: Option<Duration>,
}

fn timeout_arg(value: &str) -> Result<Duration, String> {
    parse_timeout("timeout", value).map_err(|error| error.to_string())
}

fn variable_arg(value: &str) -> Result<String, String> {
    parse_variable("variable", value).map_err(|error| error.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("protein_sparql=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = HarnessConfig::new(args.queries_dir.unwrap_or_else(queries_dir))
        .with_variable(args.variable);
    let store_config = StoreConfig::resolve(args.endpoint, args.data, args.timeout, sample_data)?;
    let store = store::from_config(&store_config)?;
    let harness = Harness::new(config);

    let results = if args.queries.is_empty() {
        harness.run_all(store.as_ref()).await?
    } else {
        harness.run(store.as_ref(), &args.queries).await
    };
    print!("{}", build_report(&results));

    let failed = results.iter().filter(|result| !result.passed()).count();
    if failed > 0 {
        bail!("{failed} of {} queries failed", results.len());
    }
    Ok(())
}
