//! Catalog listing command

use crate::app::OutputFormat;
use crate::output::format_cars;
use anyhow::Result;
use carfinder_core::Catalog;

pub fn run(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    print!("{}", format_cars(catalog.cars(), format));
    Ok(())
}
