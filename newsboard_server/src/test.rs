use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;

use std::path::Path;

use newsboard_core::CachedDataStore;

use crate::{error::handle_panic, router, state::AppState};

fn dataset() -> Value {
    json!({
        "yearlyStats": {
            "years": [2019, 2020, 2021],
            "postCounts": [1000, 2500, 1800],
            "avgScores": [120.5, 340.25, 98.0],
            "avgComments": [45.0, 80.5, 30.75]
        },
        "majorEvents": [{
            "name": "2020 COVID-19 Pandemic",
            "period": "2020-2021",
            "stats": { "totalPosts": 900, "avgScore": 410.2, "avgComments": 95.1, "percentageOfPeriod": 20.93 },
            "topKeywords": ["covid", "coronavirus", "pandemic", "vaccine", "lockdown"]
        }],
        "summary": {
            "totalPosts": 5300,
            "avgScore": "210.4",
            "avgComments": "55.2",
            "dateRange": { "start": 2019, "end": 2021 },
            "topPosts": [{ "title": "Vaccine approved", "score": 98000, "comments": 12000, "date": "2020-12-11" }]
        },
        "topWords": {
            "words": ["covid", "trump", "police", "china", "vaccine"],
            "frequencies": [420, 300, 250, 180, 90]
        }
    })
}

fn app(temp_dir: &TempDir, data: Option<&Value>) -> Router {
    let path = temp_dir.path().join("processed_data.json");
    if let Some(data) = data {
        std::fs::write(&path, data.to_string()).unwrap();
    }
    let public_dir = temp_dir.path().join("public");
    std::fs::create_dir_all(&public_dir).unwrap();
    std::fs::write(public_dir.join("index.html"), "<h1>r/news dashboard</h1>").unwrap();
    router::app(AppState::new(CachedDataStore::open(path)), &public_dir)
}

async fn send(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_views() {
    let temp_dir = TempDir::new().unwrap();
    let data = dataset();
    let app = app(&temp_dir, Some(&data));

    let (status, body) = get_json(&app, "/api/yearly-stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, data["yearlyStats"]);

    let (status, body) = get_json(&app, "/api/major-events").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, data["majorEvents"]);

    let (status, body) = get_json(&app, "/api/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, data["summary"]);
}

#[tokio::test]
async fn test_sections_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let mut data = dataset();
    data["summary"]["generatedAt"] = json!("2024-05-01T00:00:00Z");
    data["summary"]["topPosts"][0]["score"] = json!(98000.0);
    data["majorEvents"] = json!([{ "stats": { "totalPosts": 1 } }]);
    let app = app(&temp_dir, Some(&data));

    let (_, body) = get_json(&app, "/api/summary").await;
    assert_eq!(body, data["summary"]);

    let (_, body) = get_json(&app, "/api/yearly-stats").await;
    assert_eq!(body, data["yearlyStats"]);

    let (_, body) = get_json(&app, "/api/major-events").await;
    assert_eq!(body, data["majorEvents"]);
}

#[tokio::test]
async fn test_top_words_limit() {
    let temp_dir = TempDir::new().unwrap();
    let app = app(&temp_dir, Some(&dataset()));

    let (_, body) = get_json(&app, "/api/top-words?limit=2").await;
    assert_eq!(body, json!({ "words": ["covid", "trump"], "frequencies": [420, 300] }));

    let (_, body) = get_json(&app, "/api/top-words?limit=100").await;
    assert_eq!(body, dataset()["topWords"]);

    let (_, body) = get_json(&app, "/api/top-words?limit=0").await;
    assert_eq!(body, json!({ "words": [], "frequencies": [] }));

    for uri in ["/api/top-words", "/api/top-words?limit=abc", "/api/top-words?limit=-4"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["words"].as_array().unwrap().len(), 5);
        assert_eq!(body["frequencies"].as_array().unwrap().len(), 5);
    }
}

#[tokio::test]
async fn test_missing_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let app = app(&temp_dir, None);

    let (status, body) = get_json(&app, "/api/yearly-stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "years": [], "postCounts": [], "avgScores": [], "avgComments": [] }));

    let (status, body) = get_json(&app, "/api/major-events").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = get_json(&app, "/api/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "totalPosts": 0,
            "avgScore": "0",
            "avgComments": "0",
            "dateRange": { "start": 2008, "end": 2024 },
            "topPosts": []
        })
    );

    let (status, body) = get_json(&app, "/api/top-words?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "words": [], "frequencies": [] }));

    // The dataset shows up as soon as it is produced
    let data = dataset();
    std::fs::write(temp_dir.path().join("processed_data.json"), data.to_string()).unwrap();
    let (_, body) = get_json(&app, "/api/summary").await;
    assert_eq!(body, data["summary"]);
}

#[tokio::test]
async fn test_health() {
    let temp_dir = TempDir::new().unwrap();
    let app = app(&temp_dir, None);

    let (status, body) = get_json(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_static_files() {
    let temp_dir = TempDir::new().unwrap();
    let app = app(&temp_dir, None);

    let (status, body) = send(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>r/news dashboard</h1>");

    let (status, _) = send(&app, "/js/app.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_panic_becomes_error_response() {
    let app: Router = Router::new()
        .route("/api/summary", get(|| async { panic!("store unavailable") as () }))
        .layer(CatchPanicLayer::custom(handle_panic));

    let (status, body) = get_json(&app, "/api/summary").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "store unavailable" }));
}

#[test]
fn test_public_dir_is_not_required() {
    // Serving starts even before the dashboard assets exist
    let temp_dir = TempDir::new().unwrap();
    let store = CachedDataStore::open(temp_dir.path().join("processed_data.json"));
    let _app = router::app(AppState::new(store), Path::new("does-not-exist"));
}
