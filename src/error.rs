//! 统一错误处理
//!
//! 提供 `RelayError` 枚举实现 `IntoResponse`，所有错误统一为 `{success:false, message}` 响应体

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::{RelayResponse, ValidationError};

/// 对外暴露的错误消息
pub mod messages {
    pub const SENT: &str = "Email sent successfully";
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
    pub const MISSING_FIELDS: &str = "Missing required fields";
    pub const INVALID_EMAIL: &str = "Invalid email format";
    pub const SEND_FAILED: &str = "Failed to send email";
    pub const INTERNAL: &str = "Internal server error";
}

/// Relay 错误类型
///
/// `Provider` 和 `Internal` 携带的详情只用于日志，响应中只返回通用消息
#[derive(Debug)]
pub enum RelayError {
    /// 400 - 表单校验失败
    Validation(ValidationError),
    /// 405 - 非 POST/OPTIONS 请求
    MethodNotAllowed,
    /// 500 - 邮件服务商调用失败
    Provider(String),
    /// 500 - 其它内部错误
    Internal(String),
}

impl RelayError {
    pub fn provider(detail: impl Into<String>) -> Self {
        Self::Provider(detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::Provider(_) | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给调用方的消息
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::Validation(ValidationError::MissingFields) => messages::MISSING_FIELDS,
            RelayError::Validation(ValidationError::InvalidEmail) => messages::INVALID_EMAIL,
            RelayError::MethodNotAllowed => messages::METHOD_NOT_ALLOWED,
            RelayError::Provider(_) => messages::SEND_FAILED,
            RelayError::Internal(_) => messages::INTERNAL,
        }
    }
}

impl From<ValidationError> for RelayError {
    fn from(err: ValidationError) -> Self {
        RelayError::Validation(err)
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match &self {
            RelayError::Provider(detail) => {
                tracing::error!(error = %detail, "Email provider call failed");
            }
            RelayError::Internal(detail) => {
                tracing::error!(error = %detail, "Error processing request");
            }
            RelayError::Validation(err) => {
                tracing::debug!(reason = %err, "Rejected contact submission");
            }
            RelayError::MethodNotAllowed => {}
        }

        let body = RelayResponse::failure(self.public_message());
        (self.status(), Json(body)).into_response()
    }
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::Validation(e) => write!(f, "Validation error: {}", e),
            RelayError::MethodNotAllowed => write!(f, "Method not allowed"),
            RelayError::Provider(m) => write!(f, "Provider error: {}", m),
            RelayError::Internal(m) => write!(f, "Internal error: {}", m),
        }
    }
}

impl std::error::Error for RelayError {}

/// 便捷类型别名
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            RelayError::from(ValidationError::MissingFields).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(RelayError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            RelayError::provider("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_hides_detail() {
        let err = RelayError::provider("MailChannels 401: invalid dkim key");
        assert_eq!(err.public_message(), "Failed to send email");
        assert!(err.to_string().contains("invalid dkim key"));

        let err = RelayError::internal("expected value at line 1 column 1");
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            RelayError::from(ValidationError::InvalidEmail).public_message(),
            "Invalid email format"
        );
        assert_eq!(
            RelayError::from(ValidationError::MissingFields).public_message(),
            "Missing required fields"
        );
    }
}
