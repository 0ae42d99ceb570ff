#![cfg(test)]

use anyhow::Result;
use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::str::contains;

fn runner() -> Result<Command> {
    let mut command = Command::cargo_bin("protein-sparql-testsuite")?;
    command
        .env_remove("PROTEIN_SPARQL_QUERIES")
        .env_remove("PROTEIN_SPARQL_ENDPOINT")
        .env_remove("PROTEIN_SPARQL_VARIABLE")
        .env_remove("PROTEIN_SPARQL_TIMEOUT")
        .env("RUST_LOG", "off");
    Ok(command)
}

#[test]
fn runs_the_bundled_corpus() -> Result<()> {
    runner()?
        .assert()
        .success()
        .stdout(contains("PASS Q1 "))
        .stdout(contains("15 queries, 15 passed, 0 failed"));
    Ok(())
}

#[test]
fn runs_selected_queries() -> Result<()> {
    runner()?
        .args(["Q47", "Q8"])
        .assert()
        .success()
        .stdout(contains("PASS Q47  rows=3 (>= 3) accessions=3 distinct=3"))
        .stdout(contains("2 queries, 2 passed, 0 failed"));
    Ok(())
}

#[test]
fn fails_on_missing_accession() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("Q1.sparql").write_str(
        "#acs:NX_P04637,NX_Q99999\n#count:1\n\
         SELECT ?entry WHERE { ?entry a <http://nextprot.org/rdf#Entry> }\n",
    )?;

    runner()?
        .arg("--queries")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(contains("FAIL Q1  Missing accessions: NX_Q99999"))
        .stdout(contains("failing: Q1"));
    Ok(())
}

#[test]
fn fails_on_unknown_query() -> Result<()> {
    runner()?
        .arg("Q999")
        .assert()
        .failure()
        .stdout(contains("FAIL Q999  Query resource 'Q999' not found"));
    Ok(())
}

#[test]
fn rejects_endpoint_with_data() -> Result<()> {
    runner()?
        .args(["--endpoint", "http://localhost:7878/query", "--data", "sample.ttl"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn reads_the_timeout_from_the_environment() -> Result<()> {
    runner()?
        .env("PROTEIN_SPARQL_TIMEOUT", "0")
        .assert()
        .failure()
        .stderr(contains("is not a positive number of seconds"));
    Ok(())
}

#[test]
fn rejects_invalid_variable_names() -> Result<()> {
    runner()?
        .args(["--variable", "a c", "Q1"])
        .assert()
        .failure()
        .stderr(contains("is not a SPARQL variable name"));
    Ok(())
}

#[test]
fn reads_queries_and_variable_from_the_environment() -> Result<()> {
    let dir = TempDir::new()?;
    dir.child("Q1.sparql").write_str(
        "#acs:TP53,CLDN1\n#count:2\n\
         SELECT ?name WHERE { ?gene <http://nextprot.org/rdf#name> ?name }\n",
    )?;

    runner()?
        .env("PROTEIN_SPARQL_QUERIES", dir.path())
        .assert()
        .failure()
        .stdout(contains("does not project ?entry"))
        .stdout(contains("1 queries, 0 passed, 1 failed"));
    runner()?
        .env("PROTEIN_SPARQL_QUERIES", dir.path())
        .env("PROTEIN_SPARQL_VARIABLE", "?name")
        .assert()
        .success()
        .stdout(contains("1 queries, 1 passed, 0 failed"));
    Ok(())
}

#[test]
fn reads_the_endpoint_from_the_environment() -> Result<()> {
    runner()?
        .env("PROTEIN_SPARQL_ENDPOINT", "ftp://localhost/sparql")
        .assert()
        .failure()
        .stderr(contains("'ftp://localhost/sparql' is not an http(s) URL"));
    Ok(())
}
