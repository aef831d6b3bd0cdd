//! 联系表单提交状态机（浏览器端模型）
//!
//! 每个表单实例一个状态机：
//! - `Idle → Sending → Success → Idle`（成功后定时复位）
//! - `Idle/Error → Error`（邮箱格式错误，或 relay 返回非 2xx / 请求失败）
//!
//! `Sending` 期间提交按钮禁用，同一时间最多一个请求在途

use std::time::Duration;

use super::contact::{is_valid_email, ContactForm};

/// 成功状态自动复位为 Idle 的延迟
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(3);

/// 表单状态
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Sending => "sending",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        }
    }
}

/// 一次提交尝试的结果
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// 有必填字段为空（交给浏览器原生校验），或已有请求在途
    Ignored,
    /// 邮箱格式错误，状态进入 Error
    InvalidEmail,
    /// 状态进入 Sending，调用方应把表单发给 relay
    Send(ContactForm),
}

/// 表单实例
#[derive(Clone, Debug, Default)]
pub struct SubmissionForm {
    name: String,
    email: String,
    message: String,
    status: SubmissionStatus,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        self.status != SubmissionStatus::Sending
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn fields(&self) -> (&str, &str, &str) {
        (&self.name, &self.email, &self.message)
    }

    /// 用户点击提交
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if !self.can_submit() {
            return SubmitAttempt::Ignored;
        }

        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return SubmitAttempt::Ignored;
        }

        if !is_valid_email(&self.email) {
            self.status = SubmissionStatus::Error;
            return SubmitAttempt::InvalidEmail;
        }

        self.status = SubmissionStatus::Sending;
        SubmitAttempt::Send(ContactForm::new(
            self.name.clone(),
            self.email.clone(),
            self.message.clone(),
        ))
    }

    /// relay 请求结束
    ///
    /// `delivered` 为 false 表示 relay 返回非 2xx 或请求本身失败
    pub fn complete(&mut self, delivered: bool) {
        if self.status != SubmissionStatus::Sending {
            return;
        }

        if delivered {
            self.status = SubmissionStatus::Success;
            self.name.clear();
            self.email.clear();
            self.message.clear();
        } else {
            self.status = SubmissionStatus::Error;
        }
    }

    /// 成功提示到期，回到 Idle
    pub fn reset_after_success(&mut self) {
        if self.status == SubmissionStatus::Success {
            self.status = SubmissionStatus::Idle;
        }
    }
}
