//! JSON output formatter

use carfinder_core::CarRecord;

pub fn format_cars(cars: &[CarRecord]) -> String {
    serde_json::to_string_pretty(cars).unwrap_or_else(|_| "[]".to_string()) + "\n"
}
