use anyhow::Result;
use clap::Parser;
use mcp_registry::cli::CommonArgs;
use mcp_registry::config::{PaperRegistryConfig, ServerConfig, PAPER_SERVER_PORT};
use mcp_registry::mcp::{McpServer, ToolRegistry};
use mcp_registry::papers::PaperRegistry;
use std::sync::Arc;

/// arXiv paper registry MCP server (search_papers, extract_info)
#[derive(Parser, Debug)]
#[command(name = "arxiv-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Port to listen on
    #[arg(default_value_t = PAPER_SERVER_PORT)]
    port: u16,

    #[command(flatten)]
    common: CommonArgs,
}

async fn run(cli: Cli) -> Result<()> {
    let file = cli.common.load_file()?;

    let mut papers = PaperRegistryConfig::default();
    if let Some(dir) = file.papers.paper_dir.clone() {
        papers.paper_dir = dir;
    }

    let mut server_config = ServerConfig::new(cli.port);
    if let Some(host) = cli.common.resolve_host(&file) {
        server_config = server_config.host(host);
    }

    let registry = PaperRegistry::from_config(&papers)?;
    registry.store().initialize()?;

    let server = McpServer::new("arxiv", ToolRegistry::for_papers(Arc::new(registry)))?;

    tracing::info!(
        "Starting arxiv server on port {} (papers in {})",
        server_config.port,
        papers.paper_dir.display()
    );
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
