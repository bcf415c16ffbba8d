//! desktop-automation-mcp - mouse and keyboard automation MCP server
//!
//! Serves the automation tools over stdio. All logging goes to stderr.

use desktop_automation::backend::create_backend;
use desktop_automation::server::DesktopAutomationServer;
use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr to keep stdout clean for MCP protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting desktop automation MCP server");

    let server = DesktopAutomationServer::new(create_backend()?);

    let transport = stdio();

    tracing::info!("Desktop automation MCP server ready, listening on stdio");

    let service = server.serve(transport).await?;

    // Wait for graceful shutdown
    service.waiting().await?;

    tracing::info!("Desktop automation MCP server shutting down");
    Ok(())
}
