use extractor_client::{ApiClient, ClientSettings, FailureKind, ReqwestApiClient};
use extractor_core::ScrapeRequest;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    }
}

fn sample_request() -> ScrapeRequest {
    ScrapeRequest {
        city: "Surat".to_string(),
        areas: vec!["Adajan".to_string(), "Vesu".to_string()],
        category: "it".to_string(),
        custom_query: String::new(),
    }
}

#[tokio::test]
async fn scrape_submission_posts_full_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .and(body_json(json!({
            "city": "Surat",
            "areas": ["Adajan", "Vesu"],
            "category": "it",
            "custom_query": "",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Scraper started",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestApiClient::new(settings_for(&server)).expect("client");
    client
        .start_scrape(&sample_request())
        .await
        .expect("submission accepted");
}

#[tokio::test]
async fn rejected_submission_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "Scraper is already running",
        })))
        .mount(&server)
        .await;

    let client = ReqwestApiClient::new(settings_for(&server)).expect("client");
    let err = client.start_scrape(&sample_request()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "Scraper is already running");
}

#[tokio::test]
async fn submission_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ReqwestApiClient::new(settings_for(&server)).expect("client");
    let err = client.start_scrape(&sample_request()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn status_fetch_parses_report_and_sends_cache_buster() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_scraping": true,
            "latest_file": null,
            "progress": {
                "total": 8,
                "processed": 3,
                "current_area": "Adajan",
                "log": ["Processing Adajan"],
                "status": "Scraping",
            },
        })))
        .mount(&server)
        .await;

    let client = ReqwestApiClient::new(settings_for(&server)).expect("client");
    let report = client.fetch_status().await.expect("status");

    assert!(report.is_scraping);
    assert_eq!(report.latest_file, None);
    assert_eq!(report.progress.processed, 3);
    assert_eq!(report.progress.current_area, "Adajan");

    let requests = server.received_requests().await.expect("recorded requests");
    let query = requests[0].url.query().unwrap_or_default();
    assert!(query.starts_with("t="), "missing cache-buster in {query:?}");
}

#[tokio::test]
async fn sparse_status_body_parses_with_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_scraping": false,
        })))
        .mount(&server)
        .await;

    let client = ReqwestApiClient::new(settings_for(&server)).expect("client");
    let report = client.fetch_status().await.expect("status");

    assert!(!report.is_scraping);
    assert_eq!(report.progress.total, 0);
    assert!(report.progress.log.is_empty());
}

#[tokio::test]
async fn malformed_status_body_is_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ReqwestApiClient::new(settings_for(&server)).expect("client");
    let err = client.fetch_status().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn unreachable_server_maps_to_network_failure() {
    let settings = ClientSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        ..ClientSettings::default()
    };
    let client = ReqwestApiClient::new(settings).expect("client");

    let err = client.fetch_status().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn preview_fetch_returns_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/view/results.xlsx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [
                {"Company Name": "Acme", "Area": "Adajan"},
                {"Company Name": "Globex", "Area": "Vesu"},
            ],
        })))
        .mount(&server)
        .await;

    let client = ReqwestApiClient::new(settings_for(&server)).expect("client");
    let records = client.fetch_preview("results.xlsx").await.expect("records");

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].get("Company Name"),
        Some(&serde_json::Value::String("Acme".to_string()))
    );
}

#[tokio::test]
async fn rejected_preview_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/view/gone.xlsx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "File not found",
        })))
        .mount(&server)
        .await;

    let client = ReqwestApiClient::new(settings_for(&server)).expect("client");
    let err = client.fetch_preview("gone.xlsx").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "File not found");
}

#[test]
fn download_url_encodes_the_filename() {
    let settings = ClientSettings {
        base_url: "http://127.0.0.1:5000".to_string(),
        ..ClientSettings::default()
    };

    let url = settings
        .download_url("surat data 2025.xlsx")
        .expect("download url");
    assert_eq!(
        url,
        "http://127.0.0.1:5000/api/download/surat%20data%202025.xlsx"
    );
}
