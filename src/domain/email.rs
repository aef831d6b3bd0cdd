//! 外发邮件模型与正文渲染

use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;

use super::contact::ContactSubmission;

/// 邮件地址 + 显示名
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Mailbox {
    pub email: String,
    pub name: String,
}

impl Mailbox {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    /// `Name <email>` 形式
    pub fn formatted(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

/// 待发送的邮件
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: Mailbox,
    pub from: Mailbox,
    /// 回复地址为表单提交者
    pub reply_to: Mailbox,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl OutboundEmail {
    /// 根据一次表单提交构造邮件
    pub fn compose(
        submission: &ContactSubmission,
        to: &Mailbox,
        from: &Mailbox,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            to: to.clone(),
            from: from.clone(),
            reply_to: Mailbox::new(submission.email(), submission.name()),
            subject: format!("Portfolio Contact: Message from {}", submission.name()),
            text: render_text(submission),
            html: render_html(submission, sent_at).into_string(),
        }
    }
}

fn render_text(submission: &ContactSubmission) -> String {
    format!(
        "You have received a new message from your portfolio contact form.\n\n\
         Name: {}\n\
         Email: {}\n\
         Message:\n{}\n\n\
         ---\n\
         Sent via Portfolio Contact Form",
        submission.name(),
        submission.email(),
        submission.message()
    )
}

const EMAIL_CSS: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
.container { max-width: 600px; margin: 0 auto; padding: 20px; }
.header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 20px; border-radius: 8px 8px 0 0; }
.content { background: #f9fafb; padding: 30px; border-radius: 0 0 8px 8px; }
.field { margin-bottom: 20px; }
.field-label { font-weight: bold; color: #667eea; margin-bottom: 5px; }
.field-value { background: white; padding: 10px; border-radius: 4px; border-left: 3px solid #667eea; }
.footer { text-align: center; margin-top: 20px; color: #666; font-size: 12px; }
";

/// 渲染 HTML 正文
///
/// 提交内容全部转义，消息中的换行渲染为 `<br>`
fn render_html(submission: &ContactSubmission, sent_at: DateTime<Utc>) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                style { (PreEscaped(EMAIL_CSS)) }
            }
            body {
                div.container {
                    div.header {
                        h2 style="margin: 0;" { "📧 New Contact Form Message" }
                    }
                    div.content {
                        p { "You have received a new message from your portfolio contact form." }
                        div.field {
                            div.field-label { "👤 Name:" }
                            div.field-value { (submission.name()) }
                        }
                        div.field {
                            div.field-label { "✉️ Email:" }
                            div.field-value {
                                a href={ "mailto:" (submission.email()) } { (submission.email()) }
                            }
                        }
                        div.field {
                            div.field-label { "💬 Message:" }
                            div.field-value { (with_line_breaks(submission.message())) }
                        }
                        div.footer {
                            p {
                                "Sent via Portfolio Contact Form • "
                                (sent_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                            }
                        }
                    }
                }
            }
        }
    }
}

fn with_line_breaks(text: &str) -> Markup {
    html! {
        @for (i, line) in text.split('\n').enumerate() {
            @if i > 0 { br; }
            (line)
        }
    }
}
