use clap::Parser;
use messenger::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "messenger", about = "Terminal message thread client")]
struct Args {
    /// Conversation partner to open
    username: Option<String>,

    /// GraphQL endpoint URL
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Identifier to send messages as
    #[arg(short, long)]
    actor: Option<String>,

    /// Use the in-memory backend instead of a server
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to messenger.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("messenger.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        eprintln!("warning: {e}, using defaults");
        Default::default()
    });

    let cli = CliOverrides {
        username: args.username.as_deref(),
        endpoint: args.endpoint.as_deref(),
        actor: args.actor.as_deref(),
        offline: args.offline,
    };
    let resolved = match config::resolve(&file_config, &cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    log::info!(
        "Messenger starting up: actor={}, partner={}, offline={}",
        resolved.actor,
        resolved.username,
        resolved.offline
    );

    messenger::tui::run(resolved)
}
