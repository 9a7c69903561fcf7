use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod repl;
mod roots;

use commands::{Command, GlobalArgs, Session};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Command to run; starts the interactive prompt when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.global.load_config()?;
    init_tracing(&config.log_level);
    tracing::debug!("Loaded configuration: {:?}", config);

    let session = Session::new(config);
    match cli.command {
        Some(command) => command.execute(&session),
        None => repl::run(&session),
    }
}
