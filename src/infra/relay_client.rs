//! Relay HTTP Client
//!
//! 表单端调用 relay 的客户端，以及驱动 [`SubmissionForm`] 状态机的辅助函数

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{
    ContactForm, RelayResponse, SubmissionForm, SubmissionStatus, SubmitAttempt,
    SUCCESS_RESET_DELAY,
};

/// Relay 调用失败
#[derive(Debug, Error)]
pub enum RelayClientError {
    #[error("Relay request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// relay 返回非 2xx，或返回 `success: false`
    #[error("Relay returned {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Relay 客户端
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 提交表单
    pub async fn submit(&self, form: &ContactForm) -> Result<RelayResponse, RelayClientError> {
        let response = self.client.post(&self.endpoint).json(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<RelayResponse>()
                .await
                .map(|r| r.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(RelayClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: RelayResponse = response.json().await?;
        if !body.success {
            return Err(RelayClientError::Rejected {
                status: status.as_u16(),
                message: body.message,
            });
        }
        Ok(body)
    }
}

/// 驱动一次提交：`begin_submit` → 调用 relay → `complete`
///
/// 返回提交后的状态
pub async fn submit_form(form: &mut SubmissionForm, client: &RelayClient) -> SubmissionStatus {
    let payload = match form.begin_submit() {
        SubmitAttempt::Send(payload) => payload,
        SubmitAttempt::Ignored | SubmitAttempt::InvalidEmail => return form.status(),
    };

    let delivered = match client.submit(&payload).await {
        Ok(response) => {
            info!(message = %response.message, "Contact form submitted");
            true
        }
        Err(e) => {
            warn!(error = %e, "Contact form submission failed");
            false
        }
    };

    form.complete(delivered);
    form.status()
}

/// 成功提示展示 [`SUCCESS_RESET_DELAY`] 后回到 Idle
pub async fn settle(form: &mut SubmissionForm) {
    if form.status() == SubmissionStatus::Success {
        tokio::time::sleep(SUCCESS_RESET_DELAY).await;
        form.reset_after_success();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use crate::config::EnvConfig;
    use crate::services::relay::testing::StubSender;
    use crate::state::AppState;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    async fn spawn_relay(sender: Arc<StubSender>) -> RelayClient {
        let config = EnvConfig::from_lookup(|_| None).unwrap();
        let app = api::router(AppState::with_sender(&config.mail, sender));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RelayClient::new(
            format!("http://{}/api/contact", addr),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn filled(email: &str) -> SubmissionForm {
        let mut form = SubmissionForm::new();
        form.set_name("Jane");
        form.set_email(email);
        form.set_message("Hi");
        form
    }

    #[tokio::test]
    async fn test_submit_success() {
        let sender = StubSender::succeeding();
        let client = spawn_relay(sender.clone()).await;

        let mut form = filled("jane@example.com");
        assert_eq!(submit_form(&mut form, &client).await, SubmissionStatus::Success);
        assert_eq!(form.fields(), ("", "", ""));
        assert_eq!(sender.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_moves_form_to_error() {
        let client = spawn_relay(StubSender::failing()).await;

        let mut form = filled("jane@example.com");
        assert_eq!(submit_form(&mut form, &client).await, SubmissionStatus::Error);
        assert_eq!(form.fields().0, "Jane");
    }

    #[tokio::test]
    async fn test_rejected_carries_relay_message() {
        let client = spawn_relay(StubSender::failing()).await;

        let err = client
            .submit(&ContactForm::new("Jane", "jane@example.com", "Hi"))
            .await
            .unwrap_err();
        match err {
            RelayClientError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to send email");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_email_never_hits_relay() {
        let sender = StubSender::succeeding();
        let client = spawn_relay(sender.clone()).await;

        let mut form = filled("a@b");
        assert_eq!(submit_form(&mut form, &client).await, SubmissionStatus::Error);
        assert_eq!(sender.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_relay_moves_form_to_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = RelayClient::new(format!("http://{}/", addr), Duration::from_secs(5)).unwrap();
        let mut form = filled("jane@example.com");
        assert_eq!(submit_form(&mut form, &client).await, SubmissionStatus::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_resets_success_after_delay() {
        let mut form = filled("jane@example.com");
        form.begin_submit();
        form.complete(true);

        let started = tokio::time::Instant::now();
        settle(&mut form).await;
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert!(started.elapsed() >= SUCCESS_RESET_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_leaves_error_alone() {
        let mut form = filled("a@b");
        form.begin_submit();

        settle(&mut form).await;
        assert_eq!(form.status(), SubmissionStatus::Error);
    }
}
