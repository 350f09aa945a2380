use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vx_cli::commands;
use vx_cli::context::CliContext;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vx_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = CliContext::from_env();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let code = commands::run(&ctx, &args, &mut std::io::stdout(), &mut std::io::stderr()).await;
    ExitCode::from(code)
}
