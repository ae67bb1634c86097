//! Status command

use crate::app::OutputFormat;
use anyhow::Result;
use carfinder_core::{Catalog, Config};

pub fn run(catalog: &Catalog, config: &Config, format: OutputFormat) -> Result<()> {
    let llm_configured = config.llm_service.has_credentials();
    match format {
        OutputFormat::Json => {
            let status = serde_json::json!({
                "status": "ok",
                "cars": catalog.len(),
                "brands": catalog.brands().len(),
                "models": catalog.models().len(),
                "llmConfigured": llm_configured,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Cli => {
            println!("Catalog: {} cars", catalog.len());
            println!("Brands:  {}", catalog.brands().len());
            println!("Models:  {}", catalog.models().len());
            println!(
                "LLM:     {}",
                if llm_configured {
                    "configured"
                } else {
                    "not configured (local heuristics only)"
                }
            );
        }
    }
    Ok(())
}
