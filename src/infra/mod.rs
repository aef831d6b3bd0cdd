//! 基础设施模块
//!
//! 封装外部依赖（邮件服务商 HTTP API、relay 客户端）

pub mod mailchannels;
pub mod mailer;
pub mod relay_client;
pub mod resend;

pub use mailer::{build_sender, EmailSender, SendError};
pub use relay_client::{RelayClient, RelayClientError};
