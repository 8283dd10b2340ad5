//! End-to-end toolset assembly demo
//!
//! Assembles an agent toolset against a live RAG server and/or MCP server:
//!
//! ```sh
//! RAG_URL=http://localhost:8080 RAG_COLLECTION=docs \
//! MCP_URL=http://localhost:8005 IDENTITY_TOKEN=... \
//! cargo run --example toolkit_demo
//! ```
//!
//! Providers without configuration are simply skipped.

use std::sync::Arc;

use relay_agent_sdk::agent::{AgentBuilder, AgentConfig};
use relay_agent_sdk::auth::{CredentialBroker, MemoryCredentialStore, TokenExchanger};
use relay_agent_sdk::core::SessionContext;
use relay_agent_sdk::mcp::MCPConfig;
use relay_agent_sdk::rag::RagConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    relay_agent_sdk::logging::init();

    let mut config = AgentConfig::new().with_system_prompt("You are a helpful assistant");

    if let (Ok(rag_url), Ok(collection)) =
        (std::env::var("RAG_URL"), std::env::var("RAG_COLLECTION"))
    {
        config = config.with_rag(RagConfig::new(rag_url, collection));
    }

    if let Ok(mcp_url) = std::env::var("MCP_URL") {
        config = config.with_mcp(MCPConfig::new(mcp_url));
    }

    let mut ctx = SessionContext::new()
        .with_principal("demo-user")
        .with_session(uuid::Uuid::new_v4().to_string());
    if let Ok(token) = std::env::var("IDENTITY_TOKEN") {
        ctx = ctx.with_identity_token(token);
    }

    let broker = CredentialBroker::new(
        Arc::new(MemoryCredentialStore::new()),
        Arc::new(TokenExchanger::new()),
    );
    let builder = AgentBuilder::new(Arc::new(broker));

    let assembled = builder.assemble(config, &ctx).await?;

    println!("model: {}", assembled.config.model_name);
    println!("tools ({}):", assembled.registry.len());
    for name in assembled.tool_names() {
        println!("  - {name}");
    }

    Ok(())
}
