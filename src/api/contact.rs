//! 联系表单 relay API
//!
//! 包含 `/` 和 `/api/contact` 端点，未匹配的路径也由这里处理

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use std::sync::Arc;

use crate::domain::{ContactForm, RelayResponse};
use crate::error::{messages, RelayError, RelayResult};
use crate::state::AppState;

/// 创建 relay 路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", any(handle))
        .route("/api/contact", any(handle))
}

/// 按请求方法分发
///
/// - OPTIONS: CORS 预检，204 无 body
/// - POST: 校验并转发
/// - 其它: 405
pub async fn handle(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match method {
        Method::OPTIONS => StatusCode::NO_CONTENT.into_response(),
        Method::POST => match submit(&state, body).await {
            Ok(response) => (StatusCode::OK, Json(response)).into_response(),
            Err(e) => e.into_response(),
        },
        _ => RelayError::MethodNotAllowed.into_response(),
    }
}

/// POST 处理
///
/// 请求体无法读取或不是合法 JSON 对象时按内部错误处理
async fn submit(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> RelayResult<RelayResponse> {
    let body = body.map_err(|e| RelayError::internal(format!("failed to read body: {}", e)))?;
    let form: ContactForm = serde_json::from_slice(&body)
        .map_err(|e| RelayError::internal(format!("invalid JSON body: {}", e)))?;

    state.relay.relay(form).await?;
    Ok(RelayResponse::ok(messages::SENT))
}
