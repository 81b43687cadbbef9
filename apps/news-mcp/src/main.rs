//! News MCP Server - Entry Point
//!
//! JSON-RPC on stdin/stdout, logs on stderr.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    news_mcp_server::run().await
}
