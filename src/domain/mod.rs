//! 领域模型模块
//!
//! 纯数据结构，不依赖 axum/tokio

pub mod contact;
pub mod email;
pub mod submission;

// Re-exports for convenience
pub use contact::{is_valid_email, ContactForm, ContactSubmission, RelayResponse, ValidationError};
pub use email::{Mailbox, OutboundEmail};
pub use submission::{SubmissionForm, SubmissionStatus, SubmitAttempt, SUCCESS_RESET_DELAY};
