use std::path::PathBuf;

use anyhow::Result;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use sensorflow_fault_gbt::{load_model, routes, AppState};

#[derive(Debug, Deserialize)]
struct PredictResponse {
    status: String,
    prediction_level: i64,
    confidence_scores: Option<Vec<f64>>,
    timestamp: String,
}

/// Serve `state` on an ephemeral local port and return its base URL.
async fn spawn_server(state: AppState) -> Result<String> {
    // ---
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move { axum::serve(listener, routes::router(state)).await });

    Ok(format!("http://{}", addr))
}

fn sample_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models/fault_gbt_model.json")
}

#[tokio::test]
async fn predict_endpoint_serves_levels() -> Result<()> {
    // ---
    let base = spawn_server(load_model(&sample_model_path())).await?;
    let client = Client::new();

    let body = serde_json::json!({
        "Engine_load": 50,
        "MAP": 30,
        "Engine_RPM": 2000,
        "MAF": 15,
        "Catalyst_temp": 550,
        "Intake_air_temp": 25,
        "Throttle_pos": 40,
        "Coolant_temp": 90
    });

    let response = client
        .post(format!("{}/predict", base))
        .json(&body)
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*",
        "CORS origin header missing"
    );

    let prediction: PredictResponse = response.json().await?;
    assert_eq!(prediction.status, "success");
    assert!(
        [0, 1, 2, 3].contains(&prediction.prediction_level),
        "Unknown level {}",
        prediction.prediction_level
    );
    assert_eq!(prediction.confidence_scores.map(|s| s.len()), Some(4));
    assert!(!prediction.timestamp.is_empty());

    Ok(())
}

#[tokio::test]
async fn preflight_and_health_without_model() -> Result<()> {
    // ---
    let base = spawn_server(load_model(&PathBuf::from("/nonexistent/model.json"))).await?;
    let client = Client::new();

    // Service is up even though the model failed to load
    let health = client.get(format!("{}/health", base)).send().await?;
    assert_eq!(health.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(health.headers()["access-control-allow-origin"], "*");

    let preflight = client
        .request(Method::OPTIONS, format!("{}/predict", base))
        .header("Origin", "http://dashboard.local")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await?;
    assert!(preflight.status().is_success());
    assert_eq!(preflight.headers()["access-control-allow-origin"], "*");

    let thresholds: serde_json::Value = client
        .get(format!("{}/sensors/thresholds", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(thresholds.as_object().map(|o| o.len()), Some(8));

    Ok(())
}
