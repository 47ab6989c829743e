// rest_api/src/lib.rs

//! HTTP binding of the medications subgraph.

use std::future::Future;

use anyhow::Context;
use async_graphql::http::GraphiQLSource;
use async_graphql::{BatchRequest, BatchResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{debug, info};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use medications::config::ServerConfig;
use medications::MedicationsSchema;

pub const GRAPHQL_PATH: &str = "/graphql";
pub const SERVICE_NAME: &str = "medications";

#[derive(Debug, Error)]
pub enum RestApiError {
    #[error("Invalid request body: {0}")]
    InvalidInput(String),
    #[error("No route for {0}")]
    NotFound(String),
}

impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let status = match self {
            RestApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RestApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

// Shared state for the Axum application
#[derive(Clone)]
struct AppState {
    schema: MedicationsSchema,
}

/// Executes a single GraphQL request or a batch of them.
async fn graphql_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>, RestApiError> {
    let Json(batch) = payload.map_err(|e| RestApiError::InvalidInput(e.body_text()))?;
    debug!("Executing GraphQL request");
    Ok(Json(state.schema.execute_batch(batch).await))
}

async fn graphiql_handler() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "service": SERVICE_NAME })))
}

async fn version_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "service": SERVICE_NAME, "version": env!("CARGO_PKG_VERSION") })),
    )
}

async fn fallback_handler(uri: Uri) -> RestApiError {
    RestApiError::NotFound(uri.path().to_string())
}

/// Routes of the subgraph. `GET /graphql` serves GraphiQL only when
/// `graphiql` is set.
pub fn router(schema: MedicationsSchema, graphiql: bool) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    let graphql_route = if graphiql {
        get(graphiql_handler).post(graphql_handler)
    } else {
        post(graphql_handler)
    };

    Router::new()
        .route(GRAPHQL_PATH, graphql_route)
        .route("/health", get(health_check_handler))
        .route("/api/v1/version", get(version_handler))
        .fallback(fallback_handler)
        .with_state(AppState { schema })
        .layer(cors)
}

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn start_server<F>(
    config: &ServerConfig,
    schema: MedicationsSchema,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;

    serve(listener, router(schema, config.graphiql), shutdown).await
}

/// Serves `app` on an already bound listener with graceful shutdown.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Medications subgraph listening on http://{}{}", addr, GRAPHQL_PATH);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .context("GraphQL server failed to start or run")?;

    info!("Medications subgraph stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use medications::{build_schema, Database, PrescriptionService, StorageConfig};
    use std::sync::Arc;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    struct TestServer {
        base_url: String,
        shutdown_tx: oneshot::Sender<()>,
        handle: JoinHandle<anyhow::Result<()>>,
    }

    async fn spawn_server(graphiql: bool) -> TestServer {
        let database = Database::new(&StorageConfig::in_memory()).await.unwrap();
        let schema = build_schema(PrescriptionService::new(Arc::new(database)));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, router(schema, graphiql), async move {
            let _ = shutdown_rx.await;
        }));

        TestServer { base_url, shutdown_tx, handle }
    }

    async fn post_graphql(server: &TestServer, body: Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}{}", server.base_url, GRAPHQL_PATH))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    fn create_body() -> Value {
        json!({
            "query": "mutation Create($input: CreatePrescriptionInput!) { createPrescription(input: $input) { id status refillsRemaining } }",
            "variables": {
                "input": {
                    "memberId": "0b6a2f4e-3c1d-4e5f-8a9b-1c2d3e4f5a6b",
                    "providerId": "7d8e9f0a-1b2c-4d3e-9f4a-5b6c7d8e9f0a",
                    "medicationName": "Ibuprofen",
                    "dosage": "200mg",
                    "frequency": "daily",
                    "startDate": "2024-01-01"
                }
            }
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = spawn_server(true).await;
        let response = reqwest::get(format!("{}/health", server.base_url)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "status": "ok", "service": "medications" }));
    }

    #[tokio::test]
    async fn version_reports_crate_version() {
        let server = spawn_server(true).await;
        let body: Value = reqwest::get(format!("{}/api/v1/version", server.base_url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn graphql_executes_mutations_and_queries() {
        let server = spawn_server(true).await;
        let created: Value = post_graphql(&server, create_body()).await.json().await.unwrap();
        let prescription = &created["data"]["createPrescription"];
        assert_eq!(prescription["status"], "ACTIVE");
        assert_eq!(prescription["refillsRemaining"], 3);

        let id = prescription["id"].as_str().unwrap();
        let fetched: Value = post_graphql(
            &server,
            json!({
                "query": "query One($id: ID!) { prescription(id: $id) { medicationName } }",
                "variables": { "id": id }
            }),
        )
        .await
        .json()
        .await
        .unwrap();
        assert_eq!(fetched["data"]["prescription"]["medicationName"], "Ibuprofen");
    }

    #[tokio::test]
    async fn graphql_accepts_batches() {
        let server = spawn_server(true).await;
        let batch = json!([create_body(), { "query": "{ prescriptions { id } }" }]);
        let responses: Value = post_graphql(&server, batch).await.json().await.unwrap();

        let responses = responses.as_array().unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[1]["data"]["prescriptions"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let server = spawn_server(true).await;
        let response = reqwest::Client::new()
            .post(format!("{}{}", server.base_url, GRAPHQL_PATH))
            .header("content-type", "application/json")
            .body("{ not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn graphiql_is_served_only_when_enabled() {
        let enabled = spawn_server(true).await;
        let response = reqwest::get(format!("{}{}", enabled.base_url, GRAPHQL_PATH)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert!(response.text().await.unwrap().to_lowercase().contains("graphiql"));

        let disabled = spawn_server(false).await;
        let response = reqwest::get(format!("{}{}", disabled.base_url, GRAPHQL_PATH)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_routes_are_json_not_found() {
        let server = spawn_server(true).await;
        let response = reqwest::get(format!("{}/api/v1/formulary", server.base_url)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "No route for /api/v1/formulary");
    }

    #[tokio::test]
    async fn shutdown_signal_stops_the_server() {
        let server = spawn_server(true).await;
        server.shutdown_tx.send(()).unwrap();
        server.handle.await.unwrap().unwrap();
    }
}
