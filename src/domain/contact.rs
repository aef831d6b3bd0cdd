//! 联系表单领域模型
//!
//! 纯数据类型与校验规则，无 tokio/axum 依赖

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

/// 表单原始请求体
///
/// 所有字段都可能缺失，校验后得到 [`ContactSubmission`]。
/// 非字符串的值（数字、对象、null 等）按缺失处理
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub message: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// 校验通过的联系表单提交
///
/// 不变式：三个字段均非空，`email` 满足 [`is_valid_email`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: String,
    message: String,
}

/// 校验错误（客户端错误，400）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    /// 是否有必填字段缺失或为空
    pub fn has_missing_fields(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .any(|field| field.as_deref().map_or(true, str::is_empty))
    }

    /// 校验并转换为 [`ContactSubmission`]
    ///
    /// 先检查必填字段，再检查邮箱格式
    pub fn validate(self) -> Result<ContactSubmission, ValidationError> {
        if self.has_missing_fields() {
            return Err(ValidationError::MissingFields);
        }

        let (name, email, message) = match (self.name, self.email, self.message) {
            (Some(name), Some(email), Some(message)) => (name, email, message),
            _ => return Err(ValidationError::MissingFields),
        };

        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(ContactSubmission {
            name,
            email,
            message,
        })
    }
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// 与浏览器端 JavaScript `\s` 相同的空白字符集
const JS_WHITESPACE: &str = r"\t\n\x0B\x0C\r \x{00A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        let part = format!("[^@{}]+", JS_WHITESPACE);
        Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("email pattern is valid")
    })
}

/// 简单邮箱格式检查：`^[^\s@]+@[^\s@]+\.[^\s@]+$`
///
/// `\s` 取 JavaScript 的定义（含 U+FEFF，不含 U+0085），与表单端校验保持一致
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// 统一响应体 `{success, message}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    pub message: String,
}

impl RelayResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
