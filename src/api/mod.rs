//! API 模块
//!
//! HTTP handlers 和路由组装

pub mod contact;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::env::constants::MAX_BODY_BYTES;
use crate::error::RelayError;
use crate::middleware::apply_cors_headers;
use crate::state::AppState;

/// 构建完整的 API 路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .merge(health::router())
        // Contact relay
        .merge(contact::router())
        .fallback(contact::handle)
        // Middleware（后加的在外层）
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::map_response(apply_cors_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// handler panic 时返回通用 500 响应
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    RelayError::internal(format!("handler panicked: {}", detail)).into_response()
}
