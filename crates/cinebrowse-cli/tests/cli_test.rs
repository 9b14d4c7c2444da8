#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(dir: &Path, base_url: &str) {
    std::fs::write(
        dir.join("config.toml"),
        format!("[tmdb]\nbase_url = \"{base_url}/3/\"\n"),
    )
    .unwrap();
}

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinebrowse");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("movies"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("details"));
}

#[test]
fn test_search_blank_query_fails_without_network() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinebrowse");
    cmd.env_remove("TMDB_API_KEY")
        .env_remove("TMDB_API_TOKEN")
        .arg("--dir")
        .arg(dir.path())
        .args(["search", "--query", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Movie/TV show name is required"));
}

#[test]
fn test_missing_credentials_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinebrowse");
    cmd.env_remove("TMDB_API_KEY")
        .env_remove("TMDB_API_TOKEN")
        .arg("--dir")
        .arg(dir.path())
        .args(["movies", "--category", "popular"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "TMDB_API_KEY or TMDB_API_TOKEN environment variable is required",
        ));
}

#[test]
fn test_unknown_category_rejected() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinebrowse");
    cmd.args(["movies", "--category", "trending"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown movie category 'trending'"));
}

#[test]
fn test_details_requires_type() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinebrowse");
    cmd.args(["details", "--id", "438631"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--type"));
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinebrowse");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cinebrowse"));
}

#[tokio::test]
async fn test_movies_prints_requested_page() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            include_str!("../../../fixtures/tmdb/movie_popular.json"),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server.uri());
    let dir_path = dir.path().to_path_buf();

    // Act
    let assert = tokio::task::spawn_blocking(move || {
        let mut cmd = cargo_bin_cmd!("cinebrowse");
        cmd.env("TMDB_API_KEY", "test-key")
            .env_remove("RUST_LOG")
            .arg("--dir")
            .arg(&dir_path)
            .args(["movies", "--category", "popular", "--page", "2"])
            .assert()
    })
    .await
    .unwrap();

    // Assert
    assert
        .success()
        .stdout(predicate::str::contains("Kung Fu Panda 4"))
        .stdout(predicate::str::contains("Godzilla Minus One"))
        .stdout(predicate::str::contains("Interstellar").not())
        .stdout(predicate::str::contains("Page 2/2 (12 results)"));
}

#[tokio::test]
async fn test_details_prints_footer() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/438631"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            include_str!("../../../fixtures/tmdb/movie_details_438631.json"),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server.uri());
    let dir_path = dir.path().to_path_buf();

    // Act
    let assert = tokio::task::spawn_blocking(move || {
        let mut cmd = cargo_bin_cmd!("cinebrowse");
        cmd.env("TMDB_API_KEY", "test-key")
            .env_remove("RUST_LOG")
            .arg("--dir")
            .arg(&dir_path)
            .args(["details", "--id", "438631", "--type", "movie"])
            .assert()
    })
    .await
    .unwrap();

    // Assert
    assert
        .success()
        .stdout(predicate::str::contains("Title: Dune"))
        .stdout(predicate::str::contains("Tagline: It begins."))
        .stdout(predicate::str::contains(
            "Popularity: 83.456 | Release Date: 2021-09-15",
        ));
}

#[tokio::test]
async fn test_search_without_results_reports_none() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "zzzz"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            include_str!("../../../fixtures/tmdb/search_empty.json"),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &server.uri());
    let dir_path = dir.path().to_path_buf();

    // Act
    let assert = tokio::task::spawn_blocking(move || {
        let mut cmd = cargo_bin_cmd!("cinebrowse");
        cmd.env("TMDB_API_KEY", "test-key")
            .env_remove("RUST_LOG")
            .arg("--dir")
            .arg(&dir_path)
            .args(["search", "--query", "zzzz", "--type", "movie"])
            .assert()
    })
    .await
    .unwrap();

    // Assert
    assert
        .success()
        .stdout(predicate::str::contains("No results found"));
}
