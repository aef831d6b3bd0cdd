//! Resend 发送实现（Bearer API Key）

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::domain::OutboundEmail;
use crate::infra::mailer::{check_response, EmailSender, SendError};

pub struct ResendSender {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ResendSender {
    pub fn new(client: Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl EmailSender for ResendSender {
    fn provider(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), SendError> {
        let body = SendRequest {
            from: email.from.formatted(),
            to: [email.to.email.as_str()],
            reply_to: &email.reply_to.email,
            subject: &email.subject,
            text: &email.text,
            html: &email.html,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        debug!(status = %response.status(), "Resend responded");
        check_response(response).await
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: String,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mailbox;
    use crate::infra::mailer::{http_client, testing::spawn_provider};
    use axum::http::StatusCode;
    use std::time::Duration;

    fn email() -> OutboundEmail {
        OutboundEmail {
            to: Mailbox::new("owner@example.com", "Owner"),
            from: Mailbox::new("noreply@example.com", "Portfolio Contact Form"),
            reply_to: Mailbox::new("jane@example.com", "Jane"),
            subject: "Portfolio Contact: Message from Jane".to_string(),
            text: "plain".to_string(),
            html: "line1<br>line2".to_string(),
        }
    }

    fn sender(api_url: String) -> ResendSender {
        ResendSender::new(
            http_client(Duration::from_secs(5)).unwrap(),
            api_url,
            "re_secret".to_string(),
        )
    }

    #[tokio::test]
    async fn test_send_uses_bearer_auth() {
        let (url, captured) = spawn_provider(StatusCode::OK).await;
        sender(url).send(&email()).await.unwrap();

        let captured = captured.lock().unwrap();
        let request = &captured[0];
        assert_eq!(
            request.headers.get("authorization").unwrap(),
            "Bearer re_secret"
        );
        assert_eq!(
            request.body["from"],
            "Portfolio Contact Form <noreply@example.com>"
        );
        assert_eq!(request.body["to"], serde_json::json!(["owner@example.com"]));
        assert_eq!(request.body["reply_to"], "jane@example.com");
        assert_eq!(request.body["html"], "line1<br>line2");
    }

    #[tokio::test]
    async fn test_send_rejected_keeps_detail_for_logs() {
        let (url, _) = spawn_provider(StatusCode::UNPROCESSABLE_ENTITY).await;
        let err = sender(url).send(&email()).await.unwrap_err();
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("provider detail"));
    }
}
