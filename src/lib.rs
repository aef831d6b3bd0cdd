//! Contact Relay - 作品集网站联系表单转发服务
//!
//! 接收 `{name, email, message}`，校验后通过邮件服务商（MailChannels / Resend）转发

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod middleware;
pub mod services;
pub mod state;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::env::constants::VERSION;
use crate::config::EnvConfig;
use crate::state::AppState;

/// 命令行传入的运行时配置
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    /// 覆盖 PORT 环境变量
    pub port_override: Option<u16>,
}

/// 初始化日志
///
/// `RUST_LOG` 优先，默认 `contact_relay=info,tower_http=info`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("contact_relay=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// 加载配置并启动 HTTP 服务，直到收到 Ctrl+C
pub async fn init_and_run_with_config(runtime: RuntimeConfig) -> anyhow::Result<()> {
    init_tracing();

    let mut config = EnvConfig::from_env().context("invalid configuration")?;
    if let Some(port) = runtime.port_override {
        config.port = port;
    }

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let provider = config.mail.provider.name();
    let state = AppState::new(&config.mail).context("failed to build HTTP client")?;
    let app = api::router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(
        version = VERSION,
        addr = %addr,
        provider = provider,
        "Contact relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Contact relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
