//! 健康检查 API
//!
//! GET /health，无需认证

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use super::contact;
use crate::config::env::constants::{SERVICE_NAME, VERSION};
use crate::state::AppState;

/// 健康检查响应
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    provider: &'static str,
    started_at: String,
    timestamp: String,
}

/// 创建健康检查路由
///
/// 非 GET 请求交给 relay 的方法分发（OPTIONS 204，其它 405 JSON）
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check).fallback(contact::handle))
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: VERSION,
        provider: state.relay.provider(),
        started_at: state.started_at.to_rfc3339(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
