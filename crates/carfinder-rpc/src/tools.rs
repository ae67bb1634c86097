//! Tool listing and dispatch

use crate::protocol::ToolDescriptor;
use anyhow::Result;
use carfinder_core::{
    recommend_cars, search_cars, Catalog, RecommendProfile, SearchCriteria,
};
use serde_json::Value;

/// Tools exposed over `tools/list`, mirroring the LLM tool contract.
pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    carfinder_core::tool_definitions()
        .into_iter()
        .map(|def| ToolDescriptor {
            name: def.function.name,
            description: def.function.description,
            input_schema: def.function.parameters,
        })
        .collect()
}

pub fn handle_search(catalog: &Catalog, arguments: Value) -> Result<Value> {
    let criteria: SearchCriteria = serde_json::from_value(arguments)?;
    let outcome = search_cars(catalog, &criteria);
    Ok(serde_json::to_value(outcome)?)
}

pub fn handle_recommend(catalog: &Catalog, arguments: Value) -> Result<Value> {
    let profile: RecommendProfile = serde_json::from_value(arguments)?;
    let outcome = recommend_cars(catalog, &profile);
    Ok(serde_json::to_value(outcome)?)
}

/// Catalog and service status summary.
pub fn handle_status(catalog: &Catalog, llm_configured: bool) -> Value {
    serde_json::json!({
        "status": "ok",
        "cars": catalog.len(),
        "brands": catalog.brands().len(),
        "models": catalog.models().len(),
        "llmConfigured": llm_configured,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use carfinder_core::{CarImages, CarRecord};

    fn catalog() -> Catalog {
        Catalog::from_records(vec![CarRecord {
            name: "Honda".to_string(),
            model: "Civic".to_string(),
            images: CarImages {
                quarter: String::new(),
                side: String::new(),
                back: String::new(),
                interior: String::new(),
            },
            price: 129_900,
            location: "São Paulo".to_string(),
            powertrain: None,
            body: None,
            seats: Some(5),
            trunk_liters: None,
            tags: Vec::new(),
        }])
    }

    #[test]
    fn descriptors_expose_both_tools() {
        let descriptors = tool_descriptors();
        let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["search_cars", "recommend_cars"]);
        assert!(descriptors[0].input_schema["properties"]["maxPrice"].is_object());
    }

    #[test]
    fn search_handler_round_trips_json() {
        let result =
            handle_search(&catalog(), serde_json::json!({"location": "sp"})).unwrap();
        assert_eq!(result["count"], 1);
        assert_eq!(result["results"][0]["Model"], "Civic");
    }

    #[test]
    fn recommend_handler_rejects_bad_arguments() {
        let err = handle_recommend(&catalog(), serde_json::json!({"usage": "flying"}));
        assert!(err.is_err());
    }

    #[test]
    fn status_reports_counts() {
        let status = handle_status(&catalog(), false);
        assert_eq!(status["cars"], 1);
        assert_eq!(status["llmConfigured"], false);
    }
}
