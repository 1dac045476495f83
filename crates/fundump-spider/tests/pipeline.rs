mod common;

use chrono::NaiveDate;
use common::{MockBrowser, MockLauncher};
use fundump_spider::browser::RetryPolicy;
use fundump_spider::config::Config;
use fundump_spider::fs::{read_json, record_path};
use fundump_spider::pipeline;
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

async fn remote() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fundamentals/MSFT.US"))
        .and(query_param("api_token", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "General": { "Code": "MSFT", "Exchange": "NASDAQ" },
            "Price": 1.0
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/fundamentals/BRK.B.US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "General": {} })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/screener"))
        .and(query_param("s", "MSFT"))
        .and(query_param("fd", "90"))
        .respond_with(ResponseTemplate::new(200).set_body_string(common::INSIDER_PAGE))
        .mount(&server)
        .await;

    server
}

fn config(server: &MockServer, output: &TempDir) -> Config {
    Config {
        output_dir: output.path().to_path_buf(),
        api_key: "demo".to_string(),
        symbols_path: output.path().join("symbols.json"),
        api_url: format!("{}/api/fundamentals", server.uri()),
        yahoo_url: "https://finance.example".to_string(),
        insider_url: format!("{}/screener", server.uri()),
        retry: RetryPolicy {
            attempts: 4,
            idle_timeout: Duration::from_secs(1),
            backoff: Duration::ZERO,
        },
    }
}

#[tokio::test]
async fn collects_and_persists_a_record() {
    let server = remote().await;
    let output = tempfile::tempdir().unwrap();
    let config = config(&server, &output);
    let launcher = MockLauncher {
        template: common::full_browser(),
    };
    let http_client = reqwest::Client::new();

    let report = pipeline::scrape(
        &config,
        &launcher,
        &http_client,
        vec!["MSFT".to_string()],
        date(),
        false,
    )
    .await
    .unwrap();

    let expected = record_path(output.path(), "MSFT", date());
    assert!(expected.ends_with("MSFT/statistics/2024.03.01.json"));
    assert_eq!(report.persisted, vec![expected.clone()]);
    assert!(report.failed.is_empty());
    assert_eq!(launcher.closed(), 1);

    let doc: Value = read_json(&expected).await.unwrap();
    assert_eq!(doc["Symbol"], json!("MSFT"));
    assert_eq!(doc["Date"], json!("2024-03-01"));
    assert_eq!(doc["Price"], json!(1_234.56));
    assert_eq!(doc["Total Cash (mrq)"], json!(1_200_000_000.0));
    assert_eq!(doc["FreeCashFlowAverage"], json!(90_000_000.0));
    assert_eq!(doc["Growth"], json!("43%"));
    assert_eq!(doc["Growth Next 5 Years (per annum)"], json!("12.50%"));
    assert_eq!(doc["InsiderBuys90Days"], json!(7));
    assert_eq!(doc["Api"]["General"]["Code"], json!("MSFT"));
    assert_eq!(doc["Api"]["Price"], json!(1.0));
}

#[tokio::test]
async fn identical_runs_write_identical_bytes() {
    let server = remote().await;
    let output = tempfile::tempdir().unwrap();
    let config = config(&server, &output);
    let launcher = MockLauncher {
        template: common::full_browser(),
    };
    let http_client = reqwest::Client::new();
    let symbols = vec!["MSFT".to_string()];

    let path = record_path(output.path(), "MSFT", date());
    pipeline::scrape(&config, &launcher, &http_client, symbols.clone(), date(), false)
        .await
        .unwrap();
    let first = tokio::fs::read(&path).await.unwrap();

    pipeline::scrape(&config, &launcher, &http_client, symbols, date(), false)
        .await
        .unwrap();
    let second = tokio::fs::read(&path).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn optional_sources_degrade() {
    let server = remote().await;
    let output = tempfile::tempdir().unwrap();
    let config = config(&server, &output);
    // no analysis page; the screener has no mock for BRK-B
    let launcher = MockLauncher {
        template: MockBrowser::new()
            .page("/key-statistics", common::STATISTICS_PAGE)
            .page("/cash-flow", common::CASH_FLOW_PAGE),
    };
    let http_client = reqwest::Client::new();

    let record = pipeline::collect(&config, &launcher, &http_client, "BRK-B", date())
        .await
        .unwrap();

    assert_eq!(record.growth_consensus, "unavailable");
    assert_eq!(record.insider_buys, 0);
    assert_eq!(record.api, json!({ "General": {} }));
    assert_eq!(launcher.closed(), 1);
}

#[tokio::test]
async fn blank_oldest_cash_flow_keeps_the_record() {
    let server = remote().await;
    let output = tempfile::tempdir().unwrap();
    let config = config(&server, &output);
    let launcher = MockLauncher {
        template: MockBrowser::new()
            .page("/key-statistics", common::STATISTICS_PAGE)
            .page("/cash-flow", common::CASH_FLOW_PAGE_WITH_BLANK)
            .page("/analysis", common::analysis_page()),
    };
    let http_client = reqwest::Client::new();

    let record = pipeline::collect(&config, &launcher, &http_client, "MSFT", date())
        .await
        .unwrap();

    assert_eq!(record.free_cash_flow.average, 90_000_000.0);
    assert_eq!(record.free_cash_flow.growth_rate, "unavailable");
    assert_eq!(record.growth_consensus, "12.50%");
}

#[tokio::test]
async fn failing_symbols_are_skipped() {
    let server = remote().await;
    let output = tempfile::tempdir().unwrap();
    let config = config(&server, &output);
    // the cash flow page never loads
    let launcher = MockLauncher {
        template: MockBrowser::new()
            .page("/key-statistics", common::STATISTICS_PAGE)
            .page("/analysis", common::analysis_page()),
    };
    let http_client = reqwest::Client::new();

    let report = pipeline::scrape(
        &config,
        &launcher,
        &http_client,
        vec!["MSFT".to_string(), "BRK-B".to_string()],
        date(),
        false,
    )
    .await
    .unwrap();

    assert!(report.persisted.is_empty());
    let failed: Vec<&str> = report.failed.iter().map(|(symbol, _)| symbol.as_str()).collect();
    assert_eq!(failed, vec!["MSFT", "BRK-B"]);
    assert!(report.failed[0].1.contains("cash-flow"));
    // both sessions closed, despite the failures
    assert_eq!(launcher.closed(), 2);
}

#[tokio::test]
async fn consent_is_dismissed_once_per_statistics_page() {
    let server = remote().await;
    let output = tempfile::tempdir().unwrap();
    let config = config(&server, &output);
    let http_client = reqwest::Client::new();
    let mut browser = common::full_browser();

    pipeline::collect_with(&mut browser, &config, &http_client, "MSFT", date())
        .await
        .unwrap();

    assert_eq!(browser.clicks, 1);
    assert_eq!(
        browser.visits,
        vec![
            "https://finance.example/quote/MSFT/key-statistics?p=MSFT",
            "https://finance.example/quote/MSFT/cash-flow?p=MSFT",
            "https://finance.example/quote/MSFT/analysis?p=MSFT",
        ]
    );
}

#[tokio::test]
async fn api_failure_skips_the_symbol() {
    let server = remote().await;
    let output = tempfile::tempdir().unwrap();
    let config = config(&server, &output);
    let launcher = MockLauncher {
        template: common::full_browser(),
    };
    let http_client = reqwest::Client::new();

    // no fundamentals mock for AAPL.US, so the API answers 404
    let result = pipeline::collect(&config, &launcher, &http_client, "AAPL", date()).await;
    assert!(result.is_err());
    assert_eq!(launcher.closed(), 1);
}
