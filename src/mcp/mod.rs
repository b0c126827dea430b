//! MCP (Model Context Protocol) implementation.

mod paper_tools;
pub mod server;
mod tools;
mod web_tools;

pub use server::{ensure_port_available, resolve_addr, McpServer, ServerError};
pub use tools::{Tool, ToolHandler, ToolRegistry};
