//! Line-delimited stdio transport
//!
//! One JSON-RPC message per line. Requests are handled sequentially in
//! arrival order; EOF on the reader ends the loop.

use crate::error::Result;
use crate::mcp::McpHandler;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// Serve requests from `reader`, writing one response line per request.
///
/// Lines are read as bytes; a line that is not valid UTF-8 gets a parse
/// error reply like any other unparsable input.
pub async fn serve<R, W>(handler: &McpHandler, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(bytes = line.len(), "Request received");

        if let Some(response) = handler.handle_json(line).await {
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    info!("Input closed");
    Ok(())
}

/// Serve over the process's stdin and stdout
pub async fn serve_stdio(handler: &McpHandler) -> Result<()> {
    info!(server = handler.server_name(), "Serving MCP over stdio");
    serve(handler, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
