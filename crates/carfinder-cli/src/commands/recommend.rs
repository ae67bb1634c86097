//! Recommend command

use crate::app::{OutputFormat, RecommendArgs};
use anyhow::Result;
use carfinder_core::compose::format_brl;
use carfinder_core::{rank_candidates, Catalog, RecommendProfile};

pub fn run(args: RecommendArgs, catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let profile = RecommendProfile {
        budget: args.budget,
        location: args.location,
        usage: args.usage.map(Into::into),
        family_size: args.family_size,
        prefer_suv: args.prefer_suv,
        prefer_ev: args.prefer_ev,
        wants_tech: args.wants_tech,
        needs_cargo: args.needs_cargo,
        limit: args.limit,
    };

    let ranked = rank_candidates(catalog, &profile);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
        OutputFormat::Cli => {
            if ranked.is_empty() {
                println!("Nenhum carro recomendado para esse perfil.");
                return Ok(());
            }
            for candidate in &ranked {
                println!(
                    "{:>5.1}  {} {} — R$ {} — {}",
                    candidate.score,
                    candidate.car.name,
                    candidate.car.model,
                    format_brl(candidate.car.price),
                    candidate.car.location
                );
                for reason in &candidate.reasons {
                    println!("       - {}", reason);
                }
            }
        }
    }
    Ok(())
}
