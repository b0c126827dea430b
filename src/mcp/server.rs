//! MCP server implementation using pmcp (Pragmatic AI's rust-mcp-sdk).
//!
//! Each binary builds one [`McpServer`] from a [`ToolRegistry`] and serves
//! it over pmcp's streamable HTTP transport on the port given in its
//! [`ServerConfig`].

use crate::config::ServerConfig;
use crate::mcp::tools::ToolRegistry;
use crate::utils::check_bind;
use async_trait::async_trait;
use pmcp::{
    server::streamable_http_server::StreamableHttpServer, Error, RequestHandlerExtra, Server,
    ServerCapabilities, ToolHandler, ToolInfo,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Startup failures. Both binaries exit with status 1 on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Port {port} is already in use. Please specify a different port.")]
    PortInUse { port: u16 },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<pmcp::Error> for ServerError {
    fn from(err: pmcp::Error) -> Self {
        ServerError::Transport(err.to_string())
    }
}

/// An MCP tool server
#[derive(Debug, Clone)]
pub struct McpServer {
    name: String,
    server: Arc<Mutex<Server>>,
}

impl McpServer {
    /// Create a server exposing every tool in `tools`
    pub fn new(name: &str, tools: ToolRegistry) -> Result<Self, ServerError> {
        let server = Self::build_server_impl(name, tools)?;
        Ok(Self {
            name: name.to_string(),
            server: Arc::new(Mutex::new(server)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the pmcp server with tool handlers
    fn build_server_impl(name: &str, tools: ToolRegistry) -> Result<Server, pmcp::Error> {
        let mut builder = Server::builder()
            .name(name)
            .version(env!("CARGO_PKG_VERSION"))
            .capabilities(ServerCapabilities::default());

        for tool in tools.all() {
            let tool_handler = ToolWrapper {
                name: tool.name.clone(),
                description: Some(tool.description.clone()),
                input_schema: tool.input_schema.clone(),
                handler: tool.handler.clone(),
            };
            builder = builder.tool(tool_handler.name.clone(), tool_handler);
        }

        builder.build()
    }

    /// Start the HTTP transport and return the bound address and its task.
    ///
    /// Fails with [`ServerError::PortInUse`] before touching the transport
    /// when the port is already taken.
    pub async fn start(
        &self,
        config: &ServerConfig,
    ) -> Result<(SocketAddr, JoinHandle<()>), ServerError> {
        let socket_addr = resolve_addr(config).await?;
        ensure_port_available(socket_addr)?;

        tracing::info!("Starting {} MCP server on {}", self.name, socket_addr);

        let http_server = StreamableHttpServer::new(socket_addr, self.server.clone());
        Ok(http_server.start().await?)
    }

    /// Start the transport and serve until the task ends
    pub async fn serve(&self, config: &ServerConfig) -> Result<(), ServerError> {
        let (bound_addr, handle) = self.start(config).await?;
        tracing::info!("MCP server listening on {}", bound_addr);

        handle
            .await
            .map_err(|e| ServerError::Transport(format!("Server task failed: {}", e)))
    }
}

/// Resolve `host:port`, preferring an IPv4 address when the host has several
pub async fn resolve_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
    let addr = config.bind_addr();
    let candidates: Vec<SocketAddr> = tokio::net::lookup_host(&addr)
        .await
        .map_err(|e| ServerError::InvalidAddress(format!("{}: {}", addr, e)))?
        .collect();

    candidates
        .iter()
        .find(|a| a.is_ipv4())
        .or_else(|| candidates.first())
        .copied()
        .ok_or_else(|| ServerError::InvalidAddress(format!("{}: no addresses found", addr)))
}

/// Refuse to start when another process already holds the port
pub fn ensure_port_available(addr: SocketAddr) -> Result<(), ServerError> {
    match check_bind(addr) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            tracing::debug!("Port {} is not available: {}", addr.port(), e);
            Err(ServerError::PortInUse { port: addr.port() })
        }
        Err(e) => Err(ServerError::Transport(format!("Cannot bind {}: {}", addr, e))),
    }
}

/// Wrapper for adapting our Tool to pmcp's ToolHandler
#[derive(Clone)]
struct ToolWrapper {
    name: String,
    description: Option<String>,
    input_schema: Value,
    handler: Arc<dyn crate::mcp::tools::ToolHandler>,
}

#[async_trait]
impl ToolHandler for ToolWrapper {
    async fn handle(&self, args: Value, _extra: RequestHandlerExtra) -> Result<Value, Error> {
        tracing::debug!("Tool call: {}", self.name);
        self.handler
            .execute(args)
            .await
            .map_err(|e| Error::internal(&e))
    }

    fn metadata(&self) -> Option<ToolInfo> {
        Some(ToolInfo::new(
            self.name.clone(),
            self.description.clone(),
            self.input_schema.clone(),
        ))
    }
}
