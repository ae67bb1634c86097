//! Chat command

use crate::app::{ChatArgs, OutputFormat};
use crate::output::format_cars;
use anyhow::{Context, Result};
use carfinder_core::{
    handle_chat, Catalog, ChatRequest, Config, ConversationTurn, LLMClient, OpenAiClient,
};

pub async fn run(
    args: ChatArgs,
    catalog: &Catalog,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let message = args.message.join(" ");

    let history: Vec<ConversationTurn> = match args.history {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read history file {:?}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("invalid history JSON in {:?}", path))?
        }
        None => Vec::new(),
    };

    let client = if config.llm_service.has_credentials() {
        Some(OpenAiClient::new(config.llm_service.clone())?)
    } else {
        None
    };
    let llm: Option<&dyn LLMClient> = client.as_ref().map(|c| c as &dyn LLMClient);

    let request = ChatRequest { message, history };
    let reply = handle_chat(catalog, llm, &request).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        OutputFormat::Cli => {
            println!("{}", reply.message);
            if !reply.cars.is_empty() {
                println!();
                print!("{}", format_cars(&reply.cars, format));
            }
        }
    }
    Ok(())
}
