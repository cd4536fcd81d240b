//! Persona CLI
//!
//! Main entry point for the persona command-line tool.
//! Turns persona files into system prompts, message lists and request bodies.

mod commands;

use clap::{Parser, Subcommand};
use commands::{InspectCommand, ListCommand, MessagesCommand, RenderCommand, RequestCommand};
use persona_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Persona CLI - build chat prompts from persona files
#[derive(Parser, Debug)]
#[command(name = "persona")]
#[command(about = "Build chat prompts from persona files", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "PERSONA_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "PERSONA_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the persona spec (default: Persona/Memory.yaml)
    #[arg(short, long, global = true, env = "PERSONA_SPEC")]
    spec: Option<PathBuf>,

    /// Model identifier for request bodies
    #[arg(short, long, global = true, env = "PERSONA_MODEL")]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the system prompt
    Render(RenderCommand),

    /// Print the message sequence for a transcript
    Messages(MessagesCommand),

    /// Print the chat-completion request body for a transcript
    Request(RequestCommand),

    /// Show the parsed persona spec
    Inspect(InspectCommand),

    /// List available persona files
    List(ListCommand),
}

fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.workspace.clone(), cli.config.clone())?;

    let config = config.with_overrides(
        cli.workspace,
        cli.spec,
        cli.model,
        None,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Spec: {:?}", config.spec_path());
    tracing::debug!("Model: {}", config.model);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Render(_) => "render",
        Commands::Messages(_) => "messages",
        Commands::Request(_) => "request",
        Commands::Inspect(_) => "inspect",
        Commands::List(_) => "list",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Render(cmd) => cmd.execute(&config),
        Commands::Messages(cmd) => cmd.execute(&config),
        Commands::Request(cmd) => cmd.execute(&config),
        Commands::Inspect(cmd) => cmd.execute(&config),
        Commands::List(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::debug!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
