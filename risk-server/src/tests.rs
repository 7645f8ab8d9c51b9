//! Route tests: the router driven in-process with stand-in classifier and
//! recommendation sources.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use dropout_core::logic::recommend::rules;
use dropout_core::{
    InferenceError, LabelEncoder, Predictor, RecommendError, RecommendationSource, Recommender,
    RiskClassifier, StudentObservation,
};
use dropout_core::logic::features::FEATURE_COUNT;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::{create_router, config::Config, AppState};

// ============================================================================
// STAND-INS
// ============================================================================

/// Risk driven by attendance alone; classes sorted High, Low, Medium
struct AttendanceClassifier;

impl RiskClassifier for AttendanceClassifier {
    fn predict_proba(&self, f: &[f64; FEATURE_COUNT]) -> Result<Vec<f64>, InferenceError> {
        Ok(match f[0] {
            a if a < 60.0 => vec![0.8, 0.05, 0.15],
            a if a < 75.0 => vec![0.2, 0.2, 0.6],
            _ => vec![0.05, 0.9, 0.05],
        })
    }
}

/// All mass on the class indexed by the encoded fee
struct FeeEcho;

impl RiskClassifier for FeeEcho {
    fn predict_proba(&self, f: &[f64; FEATURE_COUNT]) -> Result<Vec<f64>, InferenceError> {
        let mut proba = vec![0.0; 3];
        proba[f[2] as usize] = 1.0;
        Ok(proba)
    }
}

struct Scripted {
    reply: Option<Vec<String>>,
    calls: AtomicUsize,
    last_label: Mutex<Option<String>>,
}

impl Scripted {
    fn with_reply(reply: Option<Vec<String>>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_label: Mutex::new(None),
        })
    }

    fn ok(lines: &[&str]) -> Arc<Self> {
        Self::with_reply(Some(lines.iter().map(|s| s.to_string()).collect()))
    }

    fn failing() -> Arc<Self> {
        Self::with_reply(None)
    }
}

#[async_trait]
impl RecommendationSource for Scripted {
    async fn generate(
        &self,
        _obs: &StudentObservation,
        risk_label: &str,
    ) -> Result<Vec<String>, RecommendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_label.lock().unwrap() = Some(risk_label.to_string());
        self.reply
            .clone()
            .ok_or_else(|| RecommendError::Network("connection refused".into()))
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn test_config() -> Config {
    Config {
        port: 0,
        model_path: "unused.bundle".into(),
        gemini_api_key: None,
        gemini_model: "test-model".into(),
        gemini_api_base: "http://127.0.0.1:9".into(),
        environment: "test".into(),
    }
}

fn app_with(classifier: Arc<dyn RiskClassifier>, recommender: Recommender) -> axum::Router {
    let predictor = Predictor::new(
        classifier,
        LabelEncoder::fit(["Paid", "Pending", "Partial", "Overdue"]),
        LabelEncoder::fit(["Low", "Medium", "High"]),
    );
    create_router(AppState {
        predictor,
        recommender,
        config: test_config(),
    })
}

fn app() -> axum::Router {
    app_with(Arc::new(AttendanceClassifier), Recommender::rules_only())
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[tokio::test]
async fn test_root_liveness() {
    let resp = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert!(body["message"].as_str().unwrap().contains("running"));
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn test_health_reports_model() {
    let resp = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["environment"], "test");
    assert_eq!(body["model"]["classes"], json!(["High", "Low", "Medium"]));
    assert_eq!(
        body["model"]["fee_classes"],
        json!(["Overdue", "Paid", "Partial", "Pending"])
    );
    assert_eq!(body["model"]["llm_enabled"], false);
}

#[tokio::test]
async fn test_predict_envelope() {
    let resp = app()
        .oneshot(post(
            "/predict",
            json!({"attendance": 50, "backlogs": 4, "fee_status": "overdue"}).to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["success"], true);

    let prediction = &body["data"]["prediction"];
    assert_eq!(prediction["risk_level"], "High");
    assert_eq!(prediction["confidence"], 0.8);
    let proba: Vec<f64> = prediction["proba"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);

    assert_eq!(
        body["data"]["explanation"],
        json!({"attendance": 50.0, "backlogs": 4, "fee_status": "Overdue"})
    );
    assert_eq!(
        strings(&body["data"]["recommendations"]),
        rules::generate(&StudentObservation::new(50.0, 4, "Overdue"))
    );
}

#[tokio::test]
async fn test_predict_empty_body_defaults() {
    let resp = app().oneshot(post("/predict", Body::empty())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(
        body["data"]["explanation"],
        json!({"attendance": 0.0, "backlogs": 0, "fee_status": "Paid"})
    );
    assert_eq!(body["data"]["prediction"]["risk_level"], "High");
    assert!(!strings(&body["data"]["recommendations"]).is_empty());
}

#[tokio::test]
async fn test_predict_numeric_strings() {
    let resp = app()
        .oneshot(post(
            "/predict",
            json!({"attendance": "92.5", "backlogs": "1", "fee_status": null}).to_string(),
        ))
        .await
        .unwrap();
    let body = json_body(resp).await;

    assert_eq!(body["data"]["prediction"]["risk_level"], "Low");
    assert_eq!(body["data"]["explanation"]["attendance"], 92.5);
    assert_eq!(body["data"]["explanation"]["backlogs"], 1);
    assert_eq!(body["data"]["explanation"]["fee_status"], "Paid");
}

#[tokio::test]
async fn test_predict_unknown_fee_matches_first_class() {
    let app = app_with(Arc::new(FeeEcho), Recommender::rules_only());

    let unknown = json_body(
        app.clone()
            .oneshot(post("/predict", json!({"fee_status": "Waived"}).to_string()))
            .await
            .unwrap(),
    )
    .await;
    let first = json_body(
        app.oneshot(post("/predict", json!({"fee_status": "Overdue"}).to_string()))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(unknown["data"]["prediction"], first["data"]["prediction"]);
    assert_eq!(unknown["data"]["explanation"]["fee_status"], "Waived");
}

#[tokio::test]
async fn test_predict_invalid_json() {
    let resp = app().oneshot(post("/predict", "{not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = json_body(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_predict_uses_llm_with_predicted_label() {
    let source = Scripted::ok(&["Meet the mentor weekly.", "Clear one backlog per month."]);
    let app = app_with(
        Arc::new(AttendanceClassifier),
        Recommender::with_source(source.clone()),
    );

    let body = json_body(
        app.oneshot(post("/predict", json!({"attendance": 70}).to_string()))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(
        strings(&body["data"]["recommendations"]),
        vec!["Meet the mentor weekly.", "Clear one backlog per month."]
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(source.last_label.lock().unwrap().as_deref(), Some("Medium"));
}

#[tokio::test]
async fn test_predict_llm_failure_falls_back() {
    let source = Scripted::failing();
    let app = app_with(
        Arc::new(AttendanceClassifier),
        Recommender::with_source(source.clone()),
    );

    let resp = app
        .oneshot(post("/predict", json!({"attendance": 90}).to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(
        strings(&body["data"]["recommendations"]),
        rules::generate(&StudentObservation::new(90.0, 0, "Paid"))
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_recommend_rules() {
    let resp = app()
        .oneshot(post(
            "/recommend",
            json!({"attendance": 90, "backlogs": 0, "fee_status": "Paid"}).to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(
        strings(&body["data"]["recommendations"]),
        vec![rules::MSG_MAINTAIN_ATTENDANCE, rules::MSG_MONITOR]
    );
}

#[tokio::test]
async fn test_recommend_default_risk_label() {
    let source = Scripted::ok(&["Keep it up."]);
    let app = app_with(
        Arc::new(AttendanceClassifier),
        Recommender::with_source(source.clone()),
    );

    let body = json_body(app.oneshot(post("/recommend", Body::empty())).await.unwrap()).await;
    assert_eq!(strings(&body["data"]["recommendations"]), vec!["Keep it up."]);
    assert_eq!(source.last_label.lock().unwrap().as_deref(), Some("Unknown"));
}

#[tokio::test]
async fn test_recommend_invalid_json() {
    let resp = app().oneshot(post("/recommend", "[1,")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["success"], false);
}
