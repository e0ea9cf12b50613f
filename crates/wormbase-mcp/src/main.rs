//! WormBase MCP Server binary.
//!
//! Speaks the Model Context Protocol over stdio, allowing Claude Desktop,
//! Cursor, or any MCP client to query the WormBase database.
//!
//! Usage:
//!   wormbase-mcp [--base-url http://rest.wormbase.org]
//!
//! Claude Desktop config example:
//! ```json
//! {
//!   "mcpServers": {
//!     "wormbase": {
//!       "command": "wormbase-mcp"
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use wormbase_client::WormBaseClient;
use wormbase_mcp::tools::WormBaseTools;

#[derive(Parser)]
#[command(name = "wormbase-mcp")]
#[command(about = "WormBase MCP Server: biological database lookups for AI agents")]
struct Args {
    /// Override the REST base origin. Takes precedence over the
    /// WORMBASE_BASE_URL environment variable.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Stdout carries the MCP transport; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let client = match args.base_url {
        Some(ref base) => WormBaseClient::new().with_base_url(base),
        None => WormBaseClient::from_env(),
    };
    let tools = WormBaseTools::new(client);

    let service = tools.serve(stdio()).await?;
    tracing::info!("WormBase MCP server running on stdio");
    service.waiting().await?;

    Ok(())
}
