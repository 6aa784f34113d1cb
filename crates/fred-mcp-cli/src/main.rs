// crates/fred-mcp-cli/src/main.rs
// ============================================================================
// Module: fred-mcp CLI Entry Point
// Description: Command dispatcher for the fred-mcp server and tool catalog.
// Purpose: Provide a small CLI for serving MCP and inspecting tool contracts.
// Dependencies: clap, fred-mcp, fred-mcp-core, tokio
// ============================================================================

//! ## Overview
//! The fred-mcp CLI runs the MCP server (`serve`) and prints the static tool
//! catalog (`tools`). Configuration comes from an optional TOML file with
//! flag overrides for the transport and bind address; the upstream
//! credential always comes from the `FRED_API_KEY` environment variable and
//! its absence is detected lazily on the first tool invocation, not here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use fred_mcp::FredMcpConfig;
use fred_mcp::McpServer;
use fred_mcp::ServerTransport;
use fred_mcp_core::tool_contracts;
use fred_mcp_core::tool_definitions;
use fred_mcp_core::tooling_markdown;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exit code returned for configuration errors.
const EXIT_CONFIG: u8 = 2;

// ============================================================================
// SECTION: Command Line
// ============================================================================

/// Command-line interface for the fred-mcp server.
#[derive(Debug, Parser)]
#[command(name = "fred-mcp", version, about = "MCP server for FRED macroeconomic data")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the MCP server.
    Serve(ServeArgs),
    /// Print the static tool catalog.
    Tools(ToolsArgs),
}

/// Arguments for the serve subcommand.
#[derive(Debug, Args)]
struct ServeArgs {
    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Transport override.
    #[arg(long, value_enum)]
    transport: Option<TransportArg>,
    /// Bind address override for the HTTP transport.
    #[arg(long)]
    bind: Option<String>,
}

/// Transport selection flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransportArg {
    /// Framed JSON-RPC over stdin/stdout.
    Stdio,
    /// JSON-RPC over HTTP POST.
    Http,
}

impl From<TransportArg> for ServerTransport {
    fn from(value: TransportArg) -> Self {
        match value {
            TransportArg::Stdio => Self::Stdio,
            TransportArg::Http => Self::Http,
        }
    }
}

/// Arguments for the tools subcommand.
#[derive(Debug, Args)]
struct ToolsArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = ToolsFormat::Markdown)]
    format: ToolsFormat,
}

/// Tool catalog output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ToolsFormat {
    /// Human-readable tool reference.
    Markdown,
    /// Raw MCP tool definitions.
    Json,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Entry point dispatching CLI subcommands.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Tools(args) => run_tools(&args),
    }
}

/// Runs the MCP server with flag overrides applied.
async fn run_serve(args: ServeArgs) -> ExitCode {
    let mut config = match FredMcpConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fail(EXIT_CONFIG, &format!("configuration error: {err}")),
    };
    if let Some(transport) = args.transport {
        config.server.transport = transport.into();
    }
    if let Some(bind) = args.bind {
        config.server.bind = Some(bind);
    }
    let server = match McpServer::from_config(config) {
        Ok(server) => server,
        Err(err) => return fail(EXIT_CONFIG, &format!("configuration error: {err}")),
    };
    match server.serve().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(1, &format!("server error: {err}")),
    }
}

/// Prints the tool catalog in the requested format.
fn run_tools(args: &ToolsArgs) -> ExitCode {
    let rendered = match args.format {
        ToolsFormat::Markdown => tooling_markdown(&tool_contracts()),
        ToolsFormat::Json => match serde_json::to_string_pretty(&tool_definitions()) {
            Ok(json) => json,
            Err(err) => return fail(1, &format!("serialization error: {err}")),
        },
    };
    let mut stdout = std::io::stdout();
    if writeln!(stdout, "{rendered}").is_err() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Writes an error line to stderr and maps it to an exit code.
fn fail(code: u8, message: &str) -> ExitCode {
    let _ = writeln!(std::io::stderr(), "fred-mcp: {message}");
    ExitCode::from(code)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
