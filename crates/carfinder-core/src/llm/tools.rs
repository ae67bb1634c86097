//! Callable tool definitions and local execution
//!
//! The two tools the model can invoke, with their JSON schemas, and the
//! dispatcher that runs them against the catalog. Malformed arguments and
//! unknown tool names become structured error payloads fed back to the
//! model instead of aborting the conversation.

use crate::catalog::{CarRecord, Catalog};
use crate::llm::client::ToolDefinition;
use crate::recommend::{recommend_cars, RecommendProfile};
use crate::search::{search_cars, SearchCriteria};

pub fn search_tool_definition() -> ToolDefinition {
    ToolDefinition::function(
        "search_cars",
        "Busca carros no dataset local por marca, modelo, localização, powertrain (ex: electric), \
         carroceria (ex: suv) e faixa de preço. Use quando precisar listar opções ou validar disponibilidade.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Marca do carro (ex: Honda, BYD)" },
                "model": { "type": "string", "description": "Modelo do carro (ex: Civic, Dolphin)" },
                "location": { "type": "string", "description": "Cidade ou estado (ex: São Paulo, SP)" },
                "minPrice": { "type": "number", "description": "Preço mínimo em BRL" },
                "maxPrice": { "type": "number", "description": "Preço máximo em BRL" },
                "powertrain": {
                    "type": "string",
                    "enum": ["electric", "hybrid", "flex", "gasoline", "diesel"],
                    "description": "Tipo de motorização"
                },
                "body": {
                    "type": "string",
                    "enum": ["hatch", "sedan", "suv"],
                    "description": "Tipo de carroceria"
                },
                "minSeats": { "type": "number", "description": "Número mínimo de assentos" },
                "tags": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Tags desejadas (ex: family, city, economy, tech)"
                },
                "limit": { "type": "integer", "minimum": 1, "maximum": 12, "description": "Limite de resultados" }
            },
            "additionalProperties": false
        }),
    )
}

pub fn recommend_tool_definition() -> ToolDefinition {
    ToolDefinition::function(
        "recommend_cars",
        "Recomenda carros com base no perfil do usuário (uso, orçamento, família, preferências \
         EV/tecnologia). Use quando o usuário pedir sugestão ou melhor opção para o perfil.",
        serde_json::json!({
            "type": "object",
            "properties": {
                "budget": { "type": "number", "description": "Orçamento máximo em BRL" },
                "location": { "type": "string", "description": "Cidade ou estado (ex: São Paulo, SP)" },
                "usage": {
                    "type": "string",
                    "enum": ["city", "highway", "mixed"],
                    "description": "Uso principal"
                },
                "familySize": { "type": "number", "description": "Número de pessoas na família" },
                "preferSUV": { "type": "boolean", "description": "Prefere SUV" },
                "preferEV": { "type": "boolean", "description": "Prefere carro elétrico" },
                "wantsTech": { "type": "boolean", "description": "Valoriza tecnologia" },
                "needsCargo": { "type": "boolean", "description": "Precisa de bom porta-malas" },
                "limit": { "type": "integer", "minimum": 1, "maximum": 12, "description": "Limite de resultados" }
            },
            "additionalProperties": false
        }),
    )
}

/// Both callable tools, in the order they are advertised.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![search_tool_definition(), recommend_tool_definition()]
}

/// Outcome of one local tool execution.
#[derive(Debug)]
pub struct ToolExecution {
    /// JSON payload sent back to the model
    pub payload: String,
    /// The result car list, when the tool succeeded
    pub results: Option<Vec<CarRecord>>,
}

fn error_payload(error: &str, details: Option<String>) -> String {
    let mut payload = serde_json::json!({ "error": error });
    if let Some(details) = details {
        payload["details"] = serde_json::Value::String(details);
    }
    payload.to_string()
}

/// Execute a named tool against its raw JSON arguments.
pub fn execute_tool(catalog: &Catalog, name: &str, arguments: &str) -> ToolExecution {
    tracing::debug!(tool = name, "executing tool call");
    match name {
        "search_cars" => match serde_json::from_str::<SearchCriteria>(arguments) {
            Ok(criteria) => {
                let outcome = search_cars(catalog, &criteria);
                let results = outcome.results.clone();
                match serde_json::to_string(&outcome) {
                    Ok(payload) => ToolExecution {
                        payload,
                        results: Some(results),
                    },
                    Err(e) => ToolExecution {
                        payload: error_payload("Falha ao buscar carros", Some(e.to_string())),
                        results: None,
                    },
                }
            }
            Err(e) => ToolExecution {
                payload: error_payload("Falha ao buscar carros", Some(e.to_string())),
                results: None,
            },
        },
        "recommend_cars" => match serde_json::from_str::<RecommendProfile>(arguments) {
            Ok(profile) => {
                let outcome = recommend_cars(catalog, &profile);
                let results = outcome.results.clone();
                match serde_json::to_string(&outcome) {
                    Ok(payload) => ToolExecution {
                        payload,
                        results: Some(results),
                    },
                    Err(e) => ToolExecution {
                        payload: error_payload("Falha ao recomendar carros", Some(e.to_string())),
                        results: None,
                    },
                }
            }
            Err(e) => ToolExecution {
                payload: error_payload("Falha ao recomendar carros", Some(e.to_string())),
                results: None,
            },
        },
        other => ToolExecution {
            payload: error_payload(&format!("Ferramenta desconhecida: {}", other), None),
            results: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CarImages, Catalog};

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
    fn search_tool_returns_count_and_results() {
        let execution = execute_tool(&catalog(), "search_cars", r#"{"name":"Honda"}"#);
        let payload: serde_json::Value = serde_json::from_str(&execution.payload).unwrap();
        assert_eq!(payload["count"], 1);
        assert_eq!(payload["results"][0]["Name"], "Honda");
        assert_eq!(execution.results.unwrap().len(), 1);
    }

    #[test]
    fn malformed_arguments_produce_error_payload() {
        let execution = execute_tool(&catalog(), "search_cars", "not json");
        let payload: serde_json::Value = serde_json::from_str(&execution.payload).unwrap();
        assert_eq!(payload["error"], "Falha ao buscar carros");
        assert!(payload["details"].is_string());
        assert!(execution.results.is_none());
    }

    #[test]
    fn unknown_tool_produces_error_payload() {
        let execution = execute_tool(&catalog(), "paint_car", "{}");
        let payload: serde_json::Value = serde_json::from_str(&execution.payload).unwrap();
        assert_eq!(payload["error"], "Ferramenta desconhecida: paint_car");
    }

    #[test]
    fn recommend_tool_accepts_profile_arguments() {
        let execution = execute_tool(
            &catalog(),
            "recommend_cars",
            r#"{"budget":150000,"usage":"city"}"#,
        );
        let payload: serde_json::Value = serde_json::from_str(&execution.payload).unwrap();
        assert_eq!(payload["count"], 1);
        assert!(execution.results.is_some());
    }
}
