use std::io;
use std::time::Duration;

use clap::Parser;

use brevity_server::logging::init_logging;
use brevity_server::server::run_server_with_config;

#[derive(Parser, Debug, Clone)]
#[command(name = "brevity-server")]
#[command(about = "Brevity summarization HTTP server")]
#[command(version)]
struct Cli {
    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Full endpoint URL of the hosted summarization model
    #[arg(
        long,
        env = "BYTEZ_MODEL_URL",
        default_value = "https://api.bytez.com/models/v2/facebook/bart-large-cnn"
    )]
    model_url: String,

    /// Provider API key, sent verbatim in the Authorization header
    #[arg(long, env = "BYTEZ_API_KEY", default_value = "")]
    api_key: String,

    /// Outbound request timeout in seconds
    #[arg(long, env = "PROVIDER_TIMEOUT_SECS", default_value = "60")]
    timeout_secs: u64,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if cli.log_level.is_some() {
        env_logger::init();
    } else {
        init_logging(cli.debug);
    }

    log::info!("Starting Brevity Server on port {}", cli.port);
    log::info!("Provider configuration:");
    log::info!("  Model URL: {}", cli.model_url);
    log::info!("  Timeout: {}s", cli.timeout_secs);
    if cli.api_key.is_empty() {
        log::warn!("No API key configured; Authorization header will be omitted");
    }

    run_server_with_config(
        cli.port,
        cli.model_url,
        cli.api_key,
        Duration::from_secs(cli.timeout_secs),
    )
    .await
}
