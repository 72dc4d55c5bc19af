//! Failure logging: every failed request produces exactly one log line.
//!
//! Captures formatted subscriber output with the service's default filter
//! and counts lines per level for 500 and 503 responses.

use std::io;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use sensorflow_fault_gbt::{
    classifier::{Classifier, ModelError},
    routes, AppState, FeatureVector,
};
use tower::ServiceExt;
use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

// ---

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn lines_at(&self, level: &str) -> Vec<String> {
        // ---
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|line| line.contains(level))
            .map(String::from)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn classes(&self) -> &[i64] {
        &[0, 1]
    }

    fn classify(&self, _features: &FeatureVector) -> Result<i64, ModelError> {
        Err(ModelError::NonFiniteScore(0))
    }
}

/// Same filter `init_tracing` installs by default.
fn capture() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    // ---
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_env_filter(EnvFilter::new("debug,tower_http=info"))
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

fn predict_request() -> Request<Body> {
    // ---
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

    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn internal_error_logged_once() {
    // ---
    let (logs, _guard) = capture();
    let app = routes::router(AppState::with_model(FailingClassifier));

    let response = app.oneshot(predict_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let errors = logs.lines_at("ERROR");
    assert_eq!(errors.len(), 1, "expected one ERROR line, got {errors:#?}");
    assert!(errors[0].contains("Internal error"));
}

#[tokio::test]
async fn unavailable_model_logged_once() {
    // ---
    let (logs, _guard) = capture();
    let app = routes::router(AppState::unavailable());

    let response = app.clone().oneshot(predict_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let health = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(health).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    assert!(logs.lines_at("ERROR").is_empty(), "{:#?}", logs.lines_at("ERROR"));
    assert_eq!(logs.lines_at("WARN").len(), 2);
}
