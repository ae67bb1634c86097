//! Search command

use crate::app::{OutputFormat, SearchArgs};
use crate::output::format_cars;
use anyhow::Result;
use carfinder_core::{search_cars, Catalog, SearchCriteria};

pub fn run(args: SearchArgs, catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let criteria = SearchCriteria {
        name: args.name,
        model: args.model,
        location: args.location,
        powertrain: args.powertrain,
        body: args.body,
        min_seats: args.min_seats,
        min_price: args.min_price,
        max_price: args.max_price,
        tags: if args.tags.is_empty() {
            None
        } else {
            Some(args.tags)
        },
        limit: args.limit,
    };

    let outcome = search_cars(catalog, &criteria);
    if format == OutputFormat::Cli && outcome.count == 0 {
        println!("Nenhum carro encontrado.");
        return Ok(());
    }
    print!("{}", format_cars(&outcome.results, format));
    Ok(())
}
