//! RPC server command

use anyhow::Result;
use carfinder_core::{Catalog, Config, LLMClient, OpenAiClient};

pub async fn run(catalog: &Catalog, config: &Config) -> Result<()> {
    let client = if config.llm_service.has_credentials() {
        Some(OpenAiClient::new(config.llm_service.clone())?)
    } else {
        None
    };
    let llm: Option<&dyn LLMClient> = client.as_ref().map(|c| c as &dyn LLMClient);
    carfinder_rpc::start_server(catalog, llm).await
}
