//! Carfinder JSON-RPC server
//!
//! Exposes the chat endpoint and the car-search tools over stdio so any
//! front-end or agent host can drive the assistant.

mod protocol;
mod server;
mod tools;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolDescriptor};
pub use server::RpcServer;

use anyhow::Result;
use carfinder_core::{Catalog, LLMClient};

/// Start the stdio JSON-RPC server, blocking until stdin closes.
pub async fn start_server(catalog: &Catalog, llm: Option<&dyn LLMClient>) -> Result<()> {
    tracing::info!(cars = catalog.len(), "starting carfinder RPC server");
    RpcServer::new(catalog, llm).run().await
}
