//! MCP server for WCAG documentation.
//!
//! This server resolves and serves WCAG guidelines, success criteria,
//! understanding documents and techniques as markdown using the Model
//! Context Protocol (MCP).

mod server;
mod state;
mod tools;

use std::path::PathBuf;

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use server::WcagMcpServer;
use state::ServerState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is reserved for JSON-RPC)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load the corpus location from environment variables
    let corpus_root =
        std::env::var("WCAG_ROOT").context("WCAG_ROOT environment variable required")?;
    let root = PathBuf::from(corpus_root);
    if !root.is_dir() {
        anyhow::bail!("WCAG_ROOT '{}' is not a directory", root.display());
    }

    let canonical_root = root
        .canonicalize()
        .with_context(|| format!("failed to canonicalize {}", root.display()))?;

    let index_path = std::env::var("WCAG_CRITERIA_INDEX")
        .map_or_else(|_| canonical_root.join("criteria-index.json"), PathBuf::from);

    tracing::info!("Serving WCAG corpus from {}", canonical_root.display());
    let state = ServerState::new(&canonical_root, &index_path);
    let server = WcagMcpServer::new(state);

    tracing::info!("Starting MCP server over stdio");
    let service = server.serve(stdio()).await?;
    let quit_reason = service.waiting().await?;
    tracing::info!("Server stopped: {:?}", quit_reason);

    Ok(())
}
