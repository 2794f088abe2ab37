// ABOUTME: Newline-delimited JSON-RPC transport over stdin/stdout for MCP clients
// ABOUTME: Reads one request per line, answers in arrival order, and reports malformed lines
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use whoop_core::errors::{AppError, AppResult};

use super::mcp_request_processor::McpRequestProcessor;
use super::protocol::{McpError, McpRequest, McpResponse};

/// Handles stdio transport for MCP communication
pub struct StdioTransport {
    processor: McpRequestProcessor,
}

impl StdioTransport {
    /// Creates a new stdio transport instance
    #[must_use]
    pub const fn new(processor: McpRequestProcessor) -> Self {
        Self { processor }
    }

    /// Serve the process's stdin/stdout until stdin closes
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read or stdout cannot be written
    pub async fn run(&self) -> AppResult<()> {
        info!("MCP stdio transport ready");
        let reader = BufReader::new(io::stdin());
        let mut writer = io::stdout();
        self.serve(reader, &mut writer).await
    }

    /// Serve any line-oriented reader/writer pair until the reader is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails
    pub async fn serve<R, W>(&self, reader: R, writer: &mut W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read from stdin: {e}")))?
        {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(response) = self.process_line(line).await {
                let json = serde_json::to_string(&response)?;
                write_line(writer, &json).await?;
            }
        }
        info!("stdin closed, MCP stdio transport stopping");
        Ok(())
    }

    /// Answer one line of input; `None` for notifications
    pub async fn process_line(&self, line: &str) -> Option<McpResponse> {
        let message: serde_json::Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Failed to parse MCP message: {e}");
                return Some(McpResponse::error(None, McpError::parse_error()));
            }
        };

        let id = message.get("id").cloned();
        match serde_json::from_value::<McpRequest>(message) {
            Ok(request) => self.processor.handle_request(request).await,
            Err(e) => {
                debug!("Message is not an MCP request: {e}");
                Some(McpResponse::error(
                    id,
                    McpError::invalid_request(format!("Invalid request: {e}")),
                ))
            }
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, json: &str) -> AppResult<()> {
    let write = async {
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await
    };
    write
        .await
        .map_err(|e| AppError::internal(format!("Failed to write to stdout: {e}")))
}
