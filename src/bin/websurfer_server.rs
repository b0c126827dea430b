use anyhow::Result;
use clap::Parser;
use mcp_registry::cli::CommonArgs;
use mcp_registry::config::{ServerConfig, WEB_SERVER_PORT};
use mcp_registry::mcp::{McpServer, ToolRegistry};
use mcp_registry::web::WebResearch;
use std::sync::Arc;

/// Web research MCP server (general_intelligence)
#[derive(Parser, Debug)]
#[command(name = "websurfer-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Port to listen on
    #[arg(default_value_t = WEB_SERVER_PORT)]
    port: u16,

    #[command(flatten)]
    common: CommonArgs,
}

async fn run(cli: Cli) -> Result<()> {
    let file = cli.common.load_file()?;

    let mut server_config = ServerConfig::new(cli.port);
    if let Some(host) = cli.common.resolve_host(&file) {
        server_config = server_config.host(host);
    }

    // Provider keys are resolved per call, not here.
    let research = WebResearch::new()?.file_overrides(file.web);
    let server = McpServer::new("Web Searcher", ToolRegistry::for_web(Arc::new(research)))?;

    tracing::info!("Starting websurfer server on port {}", server_config.port);
    server.serve(&server_config).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.common.init_tracing();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
