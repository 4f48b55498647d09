//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{FACTOR_SOURCE, FACTOR_SOURCE_URL, METHODOLOGY_URL};
use crate::domain::{EmissionFactor, OperationContext};
use crate::error::{AppError, AppResult};
use crate::export::{to_csv_bytes, EXPORT_FILE_NAME};
use crate::handlers::{EventSummaryResult, SubmitTripCommand, SubmitTripResult};
use crate::store::StoredSubmission;

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitTripRequest {
    pub mode: String,
    /// Absent or `null` when the form field was left blank
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub extra_passengers: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModesResponse {
    pub modes: Vec<EmissionFactor>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionsResponse {
    pub submissions: Vec<StoredSubmission>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub source: &'static str,
    pub source_url: &'static str,
    pub methodology_url: &'static str,
    pub notes: Vec<&'static str>,
    pub factors: Vec<EmissionFactor>,
}

const METHODOLOGY_NOTES: [&str; 6] = [
    "Les transports émettent 1/3 des gaz à effet de serre de la France.",
    "Les facteurs d'émission sont exprimés en kg CO₂e par km et par passager.",
    "Sont pris en compte : la fabrication, la maintenance, l'usage et la fin de vie des modes de transport.",
    "La construction des infrastructures (routes, rails, aéroports...) n'est pas incluse.",
    "Hypothèses ADEME : 1 seul passager pour une voiture (thermique ou électrique), une moyenne des taux d'occupation pour les autres modes (bus : 10 personnes).",
    "Vélo mécanique : durée de vie de 12 ans et distance parcourue de 30 000 km.",
];

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/modes", get(list_modes))
        .route("/submissions", post(submit_trip).get(list_submissions))
        .route("/submissions/export.csv", get(export_submissions))
        .route("/summary", get(event_summary))
        .route("/info", get(methodology_info))
}

fn request_context(context: Option<Extension<OperationContext>>) -> OperationContext {
    context.map(|Extension(c)| c).unwrap_or_default()
}

// =========================================================================
// GET /modes
// =========================================================================

/// Modes offered in the form, with the fields each one collects
async fn list_modes(State(state): State<AppState>) -> Json<ModesResponse> {
    Json(ModesResponse {
        modes: state.catalog().modes().cloned().collect(),
    })
}

// =========================================================================
// POST /submissions
// =========================================================================

/// Record a participant's trip
async fn submit_trip(
    State(state): State<AppState>,
    context: Option<Extension<OperationContext>>,
    Json(request): Json<SubmitTripRequest>,
) -> AppResult<(StatusCode, Json<SubmitTripResult>)> {
    let context = request_context(context);

    // A blank distance goes through validation like a zero one
    let command = SubmitTripCommand::new(request.mode, request.distance.unwrap_or(0.0))
        .with_extra_passengers(request.extra_passengers);
    let command = if let Some(reason) = request.reason {
        command.with_reason(reason)
    } else {
        command
    };

    let result = state.submit_handler().execute(command, &context).await?;

    let status = if result.saved {
        StatusCode::CREATED
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((status, Json(result)))
}

// =========================================================================
// GET /submissions
// =========================================================================

/// Every stored submission, newest first
async fn list_submissions(
    State(state): State<AppState>,
) -> AppResult<Json<SubmissionsResponse>> {
    let submissions = state.store.fetch_all().await?;

    Ok(Json(SubmissionsResponse {
        total: submissions.len(),
        submissions,
    }))
}

// =========================================================================
// GET /submissions/export.csv
// =========================================================================

/// Download every stored submission as CSV
async fn export_submissions(State(state): State<AppState>) -> AppResult<Response> {
    let submissions = state.store.fetch_all().await?;
    let body = to_csv_bytes(&submissions).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response())
}

// =========================================================================
// GET /summary
// =========================================================================

/// Event-wide totals
async fn event_summary(
    State(state): State<AppState>,
    context: Option<Extension<OperationContext>>,
) -> AppResult<Json<EventSummaryResult>> {
    let context = request_context(context);
    let result = state.summary_handler().execute(&context).await?;
    Ok(Json(result))
}

// =========================================================================
// GET /info
// =========================================================================

/// How the impact is calculated
async fn methodology_info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        source: FACTOR_SOURCE,
        source_url: FACTOR_SOURCE_URL,
        methodology_url: METHODOLOGY_URL,
        notes: METHODOLOGY_NOTES.to_vec(),
        factors: state.catalog().modes().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmissionCatalog;
    use crate::store::{MemorySubmissionStore, SubmissionStore};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn app(store: Arc<MemorySubmissionStore>) -> Router {
        create_router().with_state(AppState::new(Arc::new(EmissionCatalog::ademe()), store))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_submit_request_defaults() {
        let request: SubmitTripRequest = serde_json::from_str(r#"{"mode": "Marche"}"#).unwrap();
        assert_eq!(request.distance, None);
        assert_eq!(request.extra_passengers, 0);
        assert!(request.reason.is_none());
    }

    #[tokio::test]
    async fn test_list_modes() {
        let response = app(Arc::new(MemorySubmissionStore::new()))
            .oneshot(get("/modes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let modes = json["modes"].as_array().unwrap();
        assert_eq!(modes.len(), 11);
        assert_eq!(modes[0]["mode"], "Marche");
        assert_eq!(modes[10]["mode"], "Voiture thermique");
        assert_eq!(modes[10]["factor"], 0.218);
        assert_eq!(modes[10]["shares_vehicle"], true);
    }

    #[tokio::test]
    async fn test_submit_created() {
        let store = Arc::new(MemorySubmissionStore::new());
        let response = app(store.clone())
            .oneshot(post_json(
                "/submissions",
                serde_json::json!({
                    "mode": "Voiture thermique",
                    "distance": 100.0,
                    "extra_passengers": 3
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        assert_eq!(json["saved"], true);
        assert!((json["impact"].as_f64().unwrap() - 5.45).abs() < 1e-9);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_submit_zero_distance_rejected() {
        let store = Arc::new(MemorySubmissionStore::new());
        let response = app(store.clone())
            .oneshot(post_json(
                "/submissions",
                serde_json::json!({ "mode": "Voiture thermique", "distance": 0 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert_eq!(json["error_code"], "validation_error");
        assert_eq!(json["details"], "Merci de rentrer la distance parcourue en km.");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_submit_null_distance_rejected() {
        let store = Arc::new(MemorySubmissionStore::new());
        let response = app(store.clone())
            .oneshot(post_json(
                "/submissions",
                serde_json::json!({ "mode": "Marche", "distance": null }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert_eq!(json["error_code"], "validation_error");
        assert_eq!(json["details"], "Merci de rentrer la distance parcourue en km.");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_submit_huge_distance_rejected() {
        let store = Arc::new(MemorySubmissionStore::new());
        let app = app(store.clone());

        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(post_json(
                    "/submissions",
                    serde_json::json!({ "mode": "Voiture thermique", "distance": 1e308 }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(response).await["error_code"], "validation_error");
        }
        assert!(store.is_empty().await);

        let response = app.oneshot(get("/summary")).await.unwrap();
        assert_eq!(json_body(response).await["status"], "no_data");
    }

    #[tokio::test]
    async fn test_summary_overflowing_rows_is_internal_error() {
        let store = Arc::new(MemorySubmissionStore::new());
        for _ in 0..2 {
            store
                .insert(crate::store::NewSubmission {
                    mode: "Voiture thermique".to_string(),
                    distance: 1.0,
                    extra_passengers: 0,
                    impact: f64::MAX,
                    reason: None,
                })
                .await
                .unwrap();
        }

        let response = app(store).oneshot(get("/summary")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error_code"], "internal_error");
    }

    #[tokio::test]
    async fn test_submit_passengers_on_tram_rejected() {
        let response = app(Arc::new(MemorySubmissionStore::new()))
            .oneshot(post_json(
                "/submissions",
                serde_json::json!({ "mode": "Tramway", "distance": 3, "extra_passengers": 2 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_store_down_reports_impact() {
        let store = Arc::new(MemorySubmissionStore::new());
        store.set_unavailable(true);

        let response = app(store)
            .oneshot(post_json(
                "/submissions",
                serde_json::json!({ "mode": "Voiture thermique", "distance": 100 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let json = json_body(response).await;
        assert_eq!(json["saved"], false);
        assert!((json["impact"].as_f64().unwrap() - 21.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_summary_no_data_then_totals() {
        let store = Arc::new(MemorySubmissionStore::new());
        let app = app(store.clone());

        let response = app.clone().oneshot(get("/summary")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "no_data");

        for (distance, passengers) in [(100.0, 0), (100.0, 3)] {
            let response = app
                .clone()
                .oneshot(post_json(
                    "/submissions",
                    serde_json::json!({
                        "mode": "Voiture thermique",
                        "distance": distance,
                        "extra_passengers": passengers
                    }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let json = json_body(app.oneshot(get("/summary")).await.unwrap()).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["total_participants"], 5);
        assert!((json["total_impact"].as_f64().unwrap() - 27.25).abs() < 1e-9);
        assert!((json["average_impact_per_person"].as_f64().unwrap() - 5.45).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_summary_store_down() {
        let store = Arc::new(MemorySubmissionStore::new());
        store.set_unavailable(true);
        let response = app(store).oneshot(get("/summary")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_export_csv() {
        let store = Arc::new(MemorySubmissionStore::new());
        store
            .insert(crate::store::NewSubmission {
                mode: "Tramway".to_string(),
                distance: 4.0,
                extra_passengers: 0,
                impact: 0.01712,
                reason: None,
            })
            .await
            .unwrap();

        let response = app(store)
            .oneshot(get("/submissions/export.csv"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("participations.csv"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(body.to_vec()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,mode,distance,nbpassager,impact,raison,created_at")
        );
        assert!(lines.next().unwrap().starts_with("1,Tramway,4,0,0.01712,,"));
        assert!(lines.next().is_none());
    }

    #[tokio::test]
    async fn test_list_submissions() {
        let store = Arc::new(MemorySubmissionStore::new());
        let app = app(store);
        for mode in ["Marche", "Tramway"] {
            app.clone()
                .oneshot(post_json(
                    "/submissions",
                    serde_json::json!({ "mode": mode, "distance": 2 }),
                ))
                .await
                .unwrap();
        }

        let json = json_body(app.oneshot(get("/submissions")).await.unwrap()).await;
        assert_eq!(json["total"], 2);
        assert_eq!(json["submissions"][0]["mode"], "Tramway");
        assert_eq!(json["submissions"][1]["mode"], "Marche");
    }

    #[tokio::test]
    async fn test_info() {
        let json = json_body(
            app(Arc::new(MemorySubmissionStore::new()))
                .oneshot(get("/info"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(json["source"], FACTOR_SOURCE);
        assert_eq!(json["factors"].as_array().unwrap().len(), 11);
    }
}
