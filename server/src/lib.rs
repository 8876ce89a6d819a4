use axum::{extract::{Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use parking_lot::RwLock;
use search_core::loader::{ingest, InputDoc};
use search_core::{DocId, Document, DocumentStatus, SearchError, SearchServer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<Document>,
}

#[derive(Deserialize)]
pub struct MatchParams {
    pub q: String,
    pub id: DocId,
}

#[derive(Serialize, Deserialize)]
pub struct MatchResponse {
    pub id: DocId,
    pub words: Vec<String>,
    pub status: DocumentStatus,
}

#[derive(Serialize, Deserialize)]
pub struct StopWordsRequest {
    pub text: String,
}

/// One engine per process behind a single reader-writer lock: adding
/// documents and stop words write, everything else reads, so IDF always sees
/// a consistent document count.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<SearchServer>>,
    /// When set, write endpoints require a matching `X-ADMIN-TOKEN` header.
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(engine: SearchServer, admin_token: Option<String>) -> Self {
        Self { engine: Arc::new(RwLock::new(engine)), admin_token }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/match", get(match_handler))
        .route("/documents/count", get(count_handler))
        .route("/documents", post(add_documents))
        .route("/stop-words", post(set_stop_words))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

// CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
fn cors_layer() -> CorsLayer {
    let origins: Vec<_> = std::env::var("CORS_ALLOW_ORIGIN")
        .map(|val| val.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

fn error_response(err: SearchError) -> (StatusCode, String) {
    let status = match err {
        SearchError::DuplicateId(_) => StatusCode::CONFLICT,
        SearchError::NotFound(_) => StatusCode::NOT_FOUND,
        SearchError::UnknownStatus(_) => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult<SearchResponse> {
    let start = std::time::Instant::now();
    let status = match params.status.as_deref() {
        Some(s) => s.parse().map_err(error_response)?,
        None => DocumentStatus::Actual,
    };
    let results = state.engine.read().find_top_documents_by_status(&params.q, status);
    let took_s = start.elapsed().as_secs_f64();
    Ok(Json(SearchResponse { query: params.q, took_s, results }))
}

pub async fn match_handler(State(state): State<AppState>, Query(params): Query<MatchParams>) -> ApiResult<MatchResponse> {
    let (words, status) = state.engine.read().match_document(&params.q, params.id).map_err(error_response)?;
    Ok(Json(MatchResponse { id: params.id, words, status }))
}

async fn count_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let document_count = state.engine.read().document_count();
    Json(serde_json::json!({ "document_count": document_count }))
}

/// Adds the whole batch or nothing: ids are checked against the index and
/// each other before anything is written.
async fn add_documents(State(state): State<AppState>, headers: HeaderMap, Json(docs): Json<Vec<InputDoc>>) -> ApiResult<serde_json::Value> {
    authorize(&state, &headers)?;
    let mut engine = state.engine.write();
    let mut seen = HashSet::new();
    for doc in &docs {
        if !seen.insert(doc.id) || engine.contains_document(doc.id) {
            return Err(error_response(SearchError::DuplicateId(doc.id)));
        }
    }
    let added = ingest(&mut engine, docs).map_err(error_response)?;
    tracing::info!(added, total = engine.document_count(), "documents added");
    Ok(Json(serde_json::json!({ "added": added, "document_count": engine.document_count() })))
}

async fn set_stop_words(State(state): State<AppState>, headers: HeaderMap, Json(req): Json<StopWordsRequest>) -> ApiResult<serde_json::Value> {
    authorize(&state, &headers)?;
    let mut engine = state.engine.write();
    engine.set_stop_words(&req.text);
    Ok(Json(serde_json::json!({ "stop_words": engine.stop_words().len() })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let Some(required) = &state.admin_token else { return Ok(()) };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
