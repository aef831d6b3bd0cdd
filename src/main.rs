//! Contact Relay - 作品集联系表单转发服务
//!
//! Usage:
//! - Normal mode: `contact-relay`
//! - With custom port: `contact-relay --port 8080`

use contact_relay::RuntimeConfig;

/// 解析命令行参数
fn parse_args() -> RuntimeConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = RuntimeConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" if i + 1 < args.len() => {
                config.port_override = args[i + 1].parse().ok();
                i += 2;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    config
}

fn print_help() {
    println!("Contact Relay - portfolio contact form relay");
    println!();
    println!("USAGE:");
    println!("    contact-relay [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --port <PORT>    Override the listening port");
    println!("    -h, --help       Print help information");
    println!();
    println!("ENVIRONMENT:");
    println!("    MAIL_PROVIDER    mailchannels (default) or resend");
    println!("    RESEND_API_KEY   required when MAIL_PROVIDER=resend");
    println!("    DKIM_DOMAIN      MailChannels signing domain");
    println!("    PORT             listening port (default 8787)");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = parse_args();
    contact_relay::init_and_run_with_config(config).await
}
