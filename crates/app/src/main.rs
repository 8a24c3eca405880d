// CLI modules
mod args;
mod op;
mod ops;
mod state;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Init, Ls, Version};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

command_enum! {
    (Init, Init),
    (Ls, Ls),
    (Version, Version),
}

/// Log to stderr so listings on stdout stay clean.
/// The returned guard flushes pending lines when dropped.
fn init_logging(log_level: &str) -> WorkerGuard {
    let (stderr_writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let log_level: tracing::Level = log_level.parse().unwrap_or(tracing::Level::WARN);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stderr_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();

    guard
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Explicit flag > config file > warn
    let log_level = args
        .log_level
        .clone()
        .or_else(|| {
            state::AppState::load(args.config_path.clone())
                .ok()
                .map(|state| state.config.log_level)
        })
        .unwrap_or_else(|| "warn".to_string());
    let guard = init_logging(&log_level);

    let ctx = op::OpContext::new(args.config_path.clone());

    let code = match args.command.execute(&ctx).await {
        Ok(output) => {
            // rendered listings carry their own trailing newline
            let output = output.to_string();
            if !output.is_empty() {
                println!("{}", output.strip_suffix('\n').unwrap_or(&output));
            }
            0
        }
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            eprintln!("Error: {}", e);
            1
        }
    };

    drop(guard);
    std::process::exit(code);
}
