//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use carfinder_core::CarRecord;

/// Format a car list for display
pub fn format_cars(cars: &[CarRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_cars(cars),
        OutputFormat::Cli => terminal::format_cars(cars),
    }
}
