use std::time::Instant;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sauna_places::VenueType;

use super::*;

const LOCATION: &str = "Berlin, Germany";

const SUMMARY_ONLY: RecordShape = RecordShape {
    enrich: false,
    derive_type: true,
};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 5, "sauna-test/0.1", base_url)
        .expect("failed to build test PlacesClient")
        .with_page_delay(Duration::ZERO)
}

fn queries(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| (*t).to_owned()).collect()
}

fn place(name: &str) -> Value {
    json!({
        "name": name,
        "formatted_address": format!("{name}, Berlin"),
        "rating": 4.2,
        "user_ratings_total": 10,
        "geometry": { "location": { "lat": 52.5, "lng": 13.4 } },
        "place_id": name.to_lowercase()
    })
}

/// Mounts the first page for `term`, optionally pointing at a continuation.
async fn mount_first_page(
    server: &MockServer,
    term: &str,
    results: &[Value],
    next_page_token: Option<&str>,
    expected: u64,
) {
    let mut body = json!({ "status": "OK", "results": results });
    if let Some(token) = next_page_token {
        body["next_page_token"] = json!(token);
    }
    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", format!("{term} in {LOCATION}")))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

fn names(records: &[PlaceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.base.name.clone().unwrap_or_default())
        .collect()
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sauna-collect-{}-{name}", uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn queries_run_in_order_and_results_concatenate() {
    let server = MockServer::start().await;
    mount_first_page(&server, "sauna", &[place("A"), place("B")], None, 1).await;
    mount_first_page(&server, "therme", &[place("C")], None, 1).await;

    let client = test_client(&server.uri());
    let collection = collect(
        &client,
        &queries(&["sauna", "therme"]),
        LOCATION,
        SUMMARY_ONLY,
        Duration::ZERO,
    )
    .await
    .expect("collect should succeed");

    assert_eq!(names(&collection.records), vec!["A", "B", "C"]);
    let types: Vec<Option<VenueType>> = collection.records.iter().map(|r| r.venue_type).collect();
    assert_eq!(
        types,
        vec![
            Some(VenueType::Sauna),
            Some(VenueType::Sauna),
            Some(VenueType::Therme)
        ]
    );
    assert_eq!(collection.failed_queries, 0);
}

#[tokio::test]
async fn same_place_from_two_queries_is_kept_twice() {
    let server = MockServer::start().await;
    mount_first_page(&server, "sauna", &[place("Vabali")], None, 1).await;
    mount_first_page(&server, "therme", &[place("Vabali")], None, 1).await;

    let client = test_client(&server.uri());
    let collection = collect(
        &client,
        &queries(&["sauna", "therme"]),
        LOCATION,
        SUMMARY_ONLY,
        Duration::ZERO,
    )
    .await
    .unwrap();

    assert_eq!(names(&collection.records), vec!["Vabali", "Vabali"]);
}

#[tokio::test]
async fn failed_pagination_keeps_partial_results_and_next_query_runs() {
    let server = MockServer::start().await;
    mount_first_page(&server, "sauna", &[place("A")], Some("tok-1"), 1).await;
    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("pagetoken", "tok-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_first_page(&server, "therme", &[place("C")], None, 1).await;

    let client = test_client(&server.uri());
    let collection = collect(
        &client,
        &queries(&["sauna", "therme"]),
        LOCATION,
        SUMMARY_ONLY,
        Duration::ZERO,
    )
    .await
    .expect("a failed query must not abort the run");

    assert_eq!(names(&collection.records), vec!["A", "C"]);
    assert_eq!(collection.failed_queries, 1);
}

#[tokio::test]
async fn missing_coordinates_aborts_remaining_queries() {
    let server = MockServer::start().await;
    let broken = json!({ "name": "Ghost Spa", "place_id": "ghost" });
    mount_first_page(&server, "sauna", &[broken], None, 1).await;
    mount_first_page(&server, "therme", &[place("C")], None, 0).await;

    let client = test_client(&server.uri());
    let result = collect(
        &client,
        &queries(&["sauna", "therme"]),
        LOCATION,
        SUMMARY_ONLY,
        Duration::ZERO,
    )
    .await;

    assert!(
        matches!(result, Err(PlacesError::MissingCoordinates { .. })),
        "expected MissingCoordinates"
    );
}

#[tokio::test]
async fn query_delay_separates_consecutive_queries() {
    let server = MockServer::start().await;
    mount_first_page(&server, "sauna", &[place("A")], None, 1).await;
    mount_first_page(&server, "therme", &[place("B")], None, 1).await;
    mount_first_page(&server, "hamam", &[place("C")], None, 1).await;

    let delay = Duration::from_millis(150);
    let client = test_client(&server.uri());

    let started = Instant::now();
    collect(
        &client,
        &queries(&["sauna", "therme", "hamam"]),
        LOCATION,
        SUMMARY_ONLY,
        delay,
    )
    .await
    .unwrap();
    let elapsed = started.elapsed();

    assert!(
        elapsed >= delay * 2,
        "three queries need two waits of {delay:?}, took {elapsed:?}"
    );
}

#[tokio::test]
async fn single_query_does_not_wait() {
    let server = MockServer::start().await;
    mount_first_page(&server, "sauna", &[place("A")], None, 1).await;

    let client = test_client(&server.uri());
    let collection = tokio::time::timeout(
        Duration::from_secs(5),
        collect(
            &client,
            &queries(&["sauna"]),
            LOCATION,
            SUMMARY_ONLY,
            Duration::from_secs(30),
        ),
    )
    .await
    .expect("no delay after the last query")
    .unwrap();

    assert_eq!(collection.records.len(), 1);
}

#[tokio::test]
async fn run_writes_every_record_to_csv() {
    let server = MockServer::start().await;
    mount_first_page(&server, "sauna", &[place("A"), place("B")], None, 1).await;
    mount_first_page(&server, "therme", &[place("C")], None, 1).await;

    let output = scratch_path("run.csv");
    let client = test_client(&server.uri());
    let summary = run(
        &client,
        &queries(&["sauna", "therme"]),
        LOCATION,
        SUMMARY_ONLY,
        Duration::ZERO,
        &output,
    )
    .await
    .expect("run should succeed");

    assert_eq!(summary.records, 3);
    assert_eq!(summary.failed_queries, 0);
    assert_eq!(summary.output, output);

    let contents = std::fs::read_to_string(&output).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("name,address,rating,review_count,latitude,longitude,type")
    );
    assert_eq!(lines.next(), Some("A,\"A, Berlin\",4.2,10,52.5,13.4,sauna"));
    assert_eq!(lines.count(), 2);

    std::fs::remove_file(&output).ok();
}

#[tokio::test]
async fn run_with_fatal_error_writes_nothing() {
    let server = MockServer::start().await;
    let broken = json!({ "name": "Ghost Spa", "geometry": {} });
    mount_first_page(&server, "sauna", &[broken], None, 1).await;

    let output = scratch_path("fatal.csv");
    let client = test_client(&server.uri());
    let result = run(
        &client,
        &queries(&["sauna"]),
        LOCATION,
        SUMMARY_ONLY,
        Duration::ZERO,
        &output,
    )
    .await;

    assert!(result.is_err());
    assert!(!output.exists(), "no file should be written on a fatal error");
}
