use agixt_chat::core::config::{self, CliOverrides};
use agixt_chat::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "agixt-chat", about = "Terminal chat client for an AGiXT server")]
struct Args {
    /// Server base URI (e.g. http://localhost:7437)
    #[arg(short, long)]
    base_uri: Option<String>,
    /// API key sent with every request
    #[arg(short = 'k', long)]
    api_key: Option<String>,
    /// Agent to talk to
    #[arg(short, long)]
    agent: Option<String>,
    /// Conversation to read and append to
    #[arg(short, long)]
    conversation: Option<String>,
    /// Check the connection on startup
    #[arg(long)]
    connect: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to agixt-chat.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("agixt-chat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, falling back to defaults", e);
        config::ChatConfig::default()
    });
    let cli = CliOverrides {
        base_uri: args.base_uri,
        api_key: args.api_key,
        agent_name: args.agent,
        conversation_name: args.conversation,
        connect: args.connect,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "agixt-chat starting up: base_uri={}, agent={}, conversation={}",
        resolved.base_uri,
        resolved.agent_name,
        resolved.conversation_name
    );

    tui::run(resolved)
}
