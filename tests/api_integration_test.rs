use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use sigmoid_api::{create_router, AppState, InMemoryStore, JsonFileStore, SigmoidService};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn create_test_app() -> axum::Router {
    let service = SigmoidService::new(Arc::new(InMemoryStore::new()));
    create_router(AppState::new(service))
}

/// 送出請求並把回應解析成 JSON
async fn request_json(
    app: axum::Router,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request_builder = Request::builder()
        .uri(path)
        .method(method)
        .header("content-type", "application/json");

    let request = match body {
        Some(body_json) => request_builder
            .body(Body::from(serde_json::to_vec(&body_json).unwrap()))
            .unwrap(),
        None => request_builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        json!(null)
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!(null))
    };

    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, response) = request_json(create_test_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["status"], "ok");
}

#[tokio::test]
async fn test_calculate_with_defaults() {
    let app = create_test_app();

    let (status, response) = request_json(app, "POST", "/api/calculate/", None).await;

    assert_eq!(status, StatusCode::OK, "response: {}", response);
    assert_eq!(response["parameters"]["id"], 1);
    assert_eq!(response["parameters"]["x_shift"], 0.0);
    assert_eq!(response["parameters"]["steepness"], 1.0);
    assert_eq!(response["parameters"]["x_range"], json!([-10.0, 10.0]));
    assert_eq!(response["parameters"]["num_points"], 100);

    let data = response["data"].as_array().unwrap();
    assert_eq!(data.len(), 100);
    assert_eq!(data[0]["x"], -10.0);
    assert_eq!(data[99]["x"], 10.0);
}

#[tokio::test]
async fn test_calculate_custom_parameters() {
    let app = create_test_app();

    let (status, response) = request_json(
        app,
        "POST",
        "/api/calculate/",
        Some(json!({
            "x_shift": 2.0,
            "steepness": -1.5,
            "x_range_start": 0.0,
            "x_range_end": 4.0,
            "num_points": 5
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = response["data"].as_array().unwrap();
    assert_eq!(data.len(), 5);
    assert_eq!(data[2]["x"], 2.0);
    assert_eq!(data[2]["y"], 0.5);
    // 負斜率：y 隨 x 遞減
    assert!(data[0]["y"].as_f64().unwrap() > data[4]["y"].as_f64().unwrap());
}

#[tokio::test]
async fn test_calculate_rejects_invalid_input() {
    let service = Arc::new(SigmoidService::new(Arc::new(InMemoryStore::new())));
    let state = AppState {
        service: service.clone(),
    };

    let (status, response) = request_json(
        create_router(state.clone()),
        "POST",
        "/api/calculate/",
        Some(json!({ "num_points": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("num_points"));

    let (status, response) = request_json(
        create_router(state.clone()),
        "POST",
        "/api/calculate/",
        Some(json!({ "steepness": "steep" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].is_string());

    // 失敗的計算不應寫入任何紀錄
    assert!(service.list_parameters().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_calculate_rejects_oversized_point_count() {
    let service = Arc::new(SigmoidService::new(Arc::new(InMemoryStore::new())));
    let state = AppState {
        service: service.clone(),
    };

    for too_many in [json!(9223372036854775807_i64), json!(100_001)] {
        let (status, response) = request_json(
            create_router(state.clone()),
            "POST",
            "/api/calculate/",
            Some(json!({ "num_points": too_many })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].as_str().unwrap().contains("num_points"));
    }

    assert!(service.list_parameters().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_sigmoid_data_after_calculate() {
    let state = AppState::new(SigmoidService::new(Arc::new(InMemoryStore::new())));

    let (_, created) = request_json(
        create_router(state.clone()),
        "POST",
        "/api/calculate/",
        Some(json!({ "x_shift": 1.0, "steepness": 3.0, "num_points": 10 })),
    )
    .await;
    let id = created["parameters"]["id"].as_u64().unwrap();

    let (status, response) = request_json(
        create_router(state),
        "GET",
        &format!("/api/data/{}/", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["parameters"]["id"], id);
    assert_eq!(response["parameters"]["x_shift"], 1.0);
    assert_eq!(response["parameters"]["steepness"], 3.0);
    assert!(response["parameters"]["created_at"].is_string());
    assert_eq!(response["data"].as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_get_sigmoid_data_not_found() {
    let (status, response) =
        request_json(create_test_app(), "GET", "/api/data/42/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "Parameters not found");

    let (status, _) = request_json(create_test_app(), "GET", "/api/data/abc/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_nonlinear_separability_demo() {
    let (status, response) = request_json(
        create_test_app(),
        "GET",
        "/api/demo/nonlinear-separability/",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["decision_boundary"], 3.5);
    assert_eq!(response["steepness"], 2.0);
    assert_eq!(response["seed"], 42);
    assert!(response["explanation"].is_string());

    let accuracy = response["accuracy"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&accuracy));

    let original = response["original_data"].as_array().unwrap();
    let predictions = response["predictions"].as_array().unwrap();
    assert_eq!(original.len(), 200);
    assert_eq!(predictions.len(), 200);
    assert!(original[..100].iter().all(|p| p["class"] == 0));
    assert!(original[100..].iter().all(|p| p["class"] == 1));
    assert!(predictions[0]["predicted_class"].is_u64());
}

#[tokio::test]
async fn test_demo_is_deterministic_and_seedable() {
    let (_, first) = request_json(
        create_test_app(),
        "GET",
        "/api/demo/nonlinear-separability/",
        None,
    )
    .await;
    let (_, second) = request_json(
        create_test_app(),
        "GET",
        "/api/demo/nonlinear-separability/?seed=42",
        None,
    )
    .await;
    assert_eq!(first, second);

    let (_, other) = request_json(
        create_test_app(),
        "GET",
        "/api/demo/nonlinear-separability/?seed=7",
        None,
    )
    .await;
    assert_eq!(other["seed"], 7);
    assert_ne!(first["original_data"], other["original_data"]);

    let (status, _) = request_json(
        create_test_app(),
        "GET",
        "/api/demo/nonlinear-separability/?seed=-1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_parameters_resource_crud() {
    let state = AppState::new(SigmoidService::new(Arc::new(InMemoryStore::new())));

    let (status, created) = request_json(
        create_router(state.clone()),
        "POST",
        "/api/parameters/",
        Some(json!({ "x_shift": 1.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["x_shift"], 1.5);
    assert_eq!(created["steepness"], 1.0);
    let id = created["id"].as_u64().unwrap();

    request_json(
        create_router(state.clone()),
        "POST",
        "/api/parameters/",
        Some(json!({ "steepness": 4.0 })),
    )
    .await;

    let (status, listed) =
        request_json(create_router(state.clone()), "GET", "/api/parameters/", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["steepness"], 4.0);

    let (status, patched) = request_json(
        create_router(state.clone()),
        "PATCH",
        &format!("/api/parameters/{}/", id),
        Some(json!({ "steepness": -2.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["x_shift"], 1.5);
    assert_eq!(patched["steepness"], -2.0);
    assert_eq!(patched["created_at"], created["created_at"]);

    let (status, _) = request_json(
        create_router(state.clone()),
        "DELETE",
        &format!("/api/parameters/{}/", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request_json(
        create_router(state),
        "GET",
        &format!("/api/parameters/{}/", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let (status, response) = request_json(create_test_app(), "GET", "/api/nope/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(response["error"].is_string());
}

#[tokio::test]
async fn test_file_backed_app_persists_across_restarts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("parameters.json");

    {
        let store = JsonFileStore::open(&path).await.unwrap();
        let app = create_router(AppState::new(SigmoidService::new(Arc::new(store))));
        let (status, _) = request_json(
            app,
            "POST",
            "/api/calculate/",
            Some(json!({ "x_shift": 0.25, "steepness": 8.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let store = JsonFileStore::open(&path).await.unwrap();
    let app = create_router(AppState::new(SigmoidService::new(Arc::new(store))));
    let (status, response) = request_json(app, "GET", "/api/data/1/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["parameters"]["x_shift"], 0.25);
    assert_eq!(response["parameters"]["steepness"], 8.0);
}
