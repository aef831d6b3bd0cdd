//! MailChannels 发送实现
//!
//! 通过 DKIM 域名签名认证，可选 `X-Api-Key`

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Mailbox, OutboundEmail};
use crate::infra::mailer::{check_response, EmailSender, SendError};

/// MailChannels 客户端
pub struct MailChannelsSender {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    dkim_domain: String,
    dkim_selector: String,
    dkim_private_key: Option<String>,
}

impl MailChannelsSender {
    pub fn new(
        client: Client,
        api_url: String,
        api_key: Option<String>,
        dkim_domain: String,
        dkim_selector: String,
        dkim_private_key: Option<String>,
    ) -> Self {
        Self {
            client,
            api_url,
            api_key,
            dkim_domain,
            dkim_selector,
            dkim_private_key,
        }
    }

    fn payload<'a>(&'a self, email: &'a OutboundEmail) -> SendRequest<'a> {
        SendRequest {
            personalizations: vec![Personalization {
                to: vec![&email.to],
                dkim_domain: &self.dkim_domain,
                dkim_selector: &self.dkim_selector,
                dkim_private_key: self.dkim_private_key.as_deref(),
            }],
            from: &email.from,
            reply_to: &email.reply_to,
            subject: &email.subject,
            content: vec![
                Content {
                    kind: "text/plain",
                    value: &email.text,
                },
                Content {
                    kind: "text/html",
                    value: &email.html,
                },
            ],
        }
    }
}

#[async_trait]
impl EmailSender for MailChannelsSender {
    fn provider(&self) -> &'static str {
        "mailchannels"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), SendError> {
        let mut request = self.client.post(&self.api_url).json(&self.payload(email));
        if let Some(ref key) = self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await?;
        debug!(status = %response.status(), "MailChannels responded");
        check_response(response).await
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: &'a Mailbox,
    reply_to: &'a Mailbox,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<&'a Mailbox>,
    dkim_domain: &'a str,
    dkim_selector: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dkim_private_key: Option<&'a str>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
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
            html: "<p>html</p>".to_string(),
        }
    }

    fn sender(api_url: String, api_key: Option<&str>) -> MailChannelsSender {
        MailChannelsSender::new(
            http_client(Duration::from_secs(5)).unwrap(),
            api_url,
            api_key.map(str::to_string),
            "example.com".to_string(),
            "mailchannels".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_send_payload_shape() {
        let (url, captured) = spawn_provider(StatusCode::ACCEPTED).await;
        sender(url, Some("mc-key")).send(&email()).await.unwrap();

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let request = &captured[0];
        assert_eq!(request.headers.get("x-api-key").unwrap(), "mc-key");

        let body = &request.body;
        let personalization = &body["personalizations"][0];
        assert_eq!(personalization["to"][0]["email"], "owner@example.com");
        assert_eq!(personalization["dkim_domain"], "example.com");
        assert_eq!(personalization["dkim_selector"], "mailchannels");
        assert!(personalization.get("dkim_private_key").is_none());
        assert_eq!(body["from"]["name"], "Portfolio Contact Form");
        assert_eq!(body["reply_to"]["email"], "jane@example.com");
        assert_eq!(body["subject"], "Portfolio Contact: Message from Jane");
        assert_eq!(body["content"][0]["type"], "text/plain");
        assert_eq!(body["content"][1]["type"], "text/html");
        assert_eq!(body["content"][1]["value"], "<p>html</p>");
    }

    #[tokio::test]
    async fn test_send_without_api_key() {
        let (url, captured) = spawn_provider(StatusCode::OK).await;
        sender(url, None).send(&email()).await.unwrap();

        let captured = captured.lock().unwrap();
        assert!(captured[0].headers.get("x-api-key").is_none());
    }

    #[tokio::test]
    async fn test_send_rejected() {
        let (url, _) = spawn_provider(StatusCode::FORBIDDEN).await;
        let err = sender(url, None).send(&email()).await.unwrap_err();

        match err {
            SendError::Rejected { status, body } => {
                assert_eq!(status.as_u16(), 403);
                assert!(body.contains("provider detail"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_send_network_error() {
        // 绑定后立即释放端口，保证无服务监听
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = sender(format!("http://{}/send", addr), None)
            .send(&email())
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::Network(_)));
    }
}
