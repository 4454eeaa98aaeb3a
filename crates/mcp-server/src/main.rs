//! MCP server entry point for shadcn-vue UI generation.
//!
//! Serves the tools over stdio. Configuration comes from the environment:
//! `OPENROUTER_API_KEY` and `OPENROUTER_MODEL_ID` are required.
//!
//! # Usage
//!
//! ```bash
//! OPENROUTER_API_KEY=sk-or-... OPENROUTER_MODEL_ID=anthropic/claude-3.5-sonnet shadcn-mcp
//! ```
//!
//! Or configure in an MCP client:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "shadcn-ui": {
//!       "command": "shadcn-mcp",
//!       "env": {
//!         "OPENROUTER_API_KEY": "sk-or-...",
//!         "OPENROUTER_MODEL_ID": "anthropic/claude-3.5-sonnet"
//!       }
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use shadcn_mcp_core::ServerConfig;
use shadcn_mcp_server::ShadcnUiService;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,shadcn_mcp_server=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let pid = std::process::id();
    tracing::info!(pid, "Starting shadcn-mcp v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env().context("invalid configuration")?;
    let service = ShadcnUiService::new(&config)
        .context("failed to initialize service")?
        .serve(stdio())
        .await?;

    tokio::select! {
        result = service.waiting() => {
            result?;
            tracing::info!(pid, "Transport closed");
        }
        () = shutdown_signal() => {
            tracing::info!(pid, "Shutdown signal received");
        }
    }

    tracing::info!(pid, "Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
