//! HTTP API
//!
//! - GET  /api/assignments?fio=...&debug=1
//! - GET  /api/text?partner=...&method=...
//! - GET  /health
//! - POST /api/refresh-cache
//! - GET  /api/debug/source

use crate::cache::DatasetCache;
use crate::error::{LookupError, Result};
use crate::status::TracingStatus;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tester_lookup_common::{find_assignment_indices, AssignmentRow, StatusSink, TextResolution, WaveSpec};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

type ApiResponse = (StatusCode, Json<Value>);

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DatasetCache>,
    pub wave: WaveSpec,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentsQuery {
    #[serde(default)]
    pub fio: String,
    pub debug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TextQuery {
    #[serde(default)]
    pub partner: String,
    #[serde(default)]
    pub method: String,
}

/// 検索結果1件（行の全フィールド + 添字 + 表示文字列）
#[derive(Debug, Serialize)]
pub struct AssignmentItem<'a> {
    pub id: usize,
    #[serde(flatten)]
    pub row: &'a AssignmentRow,
    pub display: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/assignments", get(assignments))
        .route("/api/text", get(text))
        .route("/api/refresh-cache", post(refresh_cache))
        .route("/api/debug/source", get(debug_source))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 指定ポートで待ち受ける
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting server on {}", addr);
    serve_with_listener(listener, state).await
}

pub async fn serve_with_listener(listener: tokio::net::TcpListener, state: AppState) -> Result<()> {
    let refresher = spawn_refresh_loop(Arc::clone(&state.cache));
    let app = create_router(state);

    let served = axum::serve(listener, app)
        .await
        .map_err(|e| LookupError::Server(e.to_string()));

    if let Some(handle) = refresher {
        handle.abort();
    }
    served
}

/// TTLごとにデータを読み込み直す（TTLが0なら何もしない）
pub fn spawn_refresh_loop(cache: Arc<DatasetCache>) -> Option<tokio::task::JoinHandle<()>> {
    let ttl = cache.ttl();
    if ttl.is_zero() {
        return None;
    }

    Some(tokio::spawn(async move {
        let status = TracingStatus;
        let mut interval = tokio::time::interval(ttl);
        // 初回の tick は即時なので読み飛ばす
        interval.tick().await;

        loop {
            interval.tick().await;
            let cache = Arc::clone(&cache);
            match tokio::task::spawn_blocking(move || cache.refresh()).await {
                Ok(Ok(_)) => status.success("Кеш обновлен успешно"),
                Ok(Err(e)) => status.error(&format!("Ошибка обновления кеша: {}", e)),
                Err(e) => status.error(&format!("Ошибка обновления кеша: {}", e)),
            }
        }
    }))
}

async fn health() -> ApiResponse {
    (StatusCode::OK, Json(json!({ "ok": true })))
}

async fn assignments(State(state): State<AppState>, Query(query): Query<AssignmentsQuery>) -> ApiResponse {
    let fio = query.fio.trim().to_string();
    if fio.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "fio is required" })));
    }

    let cache = Arc::clone(&state.cache);
    let dataset = match tokio::task::spawn_blocking(move || cache.get()).await {
        Ok(Ok(dataset)) => dataset,
        Ok(Err(e)) => return read_failed(&e.to_string()),
        Err(e) => return read_failed(&e.to_string()),
    };

    let snapshot = &dataset.assignments;
    let items: Vec<AssignmentItem> = find_assignment_indices(&fio, snapshot, &state.wave)
        .into_iter()
        .map(|id| {
            let row = &snapshot.rows()[id];
            AssignmentItem { id, row, display: row.display() }
        })
        .collect();

    let mut body = json!({ "fio": fio, "items": items });

    let debug_requested = query.debug.as_deref() == Some("1");
    if items.is_empty() || debug_requested {
        let diagnostics = dataset.explain_assignments(&fio, &state.wave);
        body["debug"] = json!(diagnostics);
    }

    (StatusCode::OK, Json(body))
}

async fn text(State(state): State<AppState>, Query(query): Query<TextQuery>) -> ApiResponse {
    let partner = query.partner.trim().to_string();
    let method = query.method.trim().to_string();
    if partner.is_empty() || method.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "partner and method are required" })),
        );
    }

    let cache = Arc::clone(&state.cache);
    let dataset = match tokio::task::spawn_blocking(move || cache.get()).await {
        Ok(Ok(dataset)) => dataset,
        Ok(Err(e)) => return read_failed(&e.to_string()),
        Err(e) => return read_failed(&e.to_string()),
    };

    let key = format!("{} {}", partner, method);
    let general = dataset.texts.general_text().unwrap_or_default().to_string();

    match dataset.resolve_text(&partner, &method) {
        TextResolution::Found { column, text } => (
            StatusCode::OK,
            Json(json!({ "key": key, "text": text, "general": general, "column": column })),
        ),
        TextResolution::Fallback { text } => (
            StatusCode::OK,
            Json(json!({ "key": key, "text": text, "general": general, "column": null })),
        ),
        TextResolution::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "text not found", "key": key })),
        ),
        TextResolution::InvalidStructure { rows } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Texts sheet structure invalid", "rows": rows })),
        ),
    }
}

async fn refresh_cache(State(state): State<AppState>) -> ApiResponse {
    let cache = Arc::clone(&state.cache);
    let refreshed = tokio::task::spawn_blocking(move || cache.refresh()).await;
    let timestamp = chrono::Local::now().to_rfc3339();

    match refreshed {
        Ok(Ok(_)) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Кеш обновлен успешно",
                "timestamp": timestamp,
            })),
        ),
        Ok(Err(e)) => refresh_failed(&e.to_string(), &timestamp),
        Err(e) => refresh_failed(&e.to_string(), &timestamp),
    }
}

async fn debug_source(State(state): State<AppState>) -> ApiResponse {
    let cache = Arc::clone(&state.cache);
    match tokio::task::spawn_blocking(move || cache.source().inspect()).await {
        Ok(Ok(report)) => (StatusCode::OK, Json(json!({ "status": "success", "source": report }))),
        Ok(Err(e)) => read_failed(&e.to_string()),
        Err(e) => read_failed(&e.to_string()),
    }
}

fn read_failed(message: &str) -> ApiResponse {
    tracing::warn!(%message, "データ読み込みに失敗");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "read_failed",
            "message": format!("Нет доступа к таблице или лист не найден. Детали: {}", message),
        })),
    )
}

fn refresh_failed(message: &str, timestamp: &str) -> ApiResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "error", "message": message, "timestamp": timestamp })),
    )
}
