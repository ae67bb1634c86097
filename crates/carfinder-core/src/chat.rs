//! Chat entry point
//!
//! One request/response cycle: validate, extract intent, try the
//! rule-based modes, degrade to local search without an LLM credential,
//! otherwise delegate to the tool-calling loop.

use crate::catalog::{CarRecord, Catalog};
use crate::compose;
use crate::error::{CarFinderError, Result};
use crate::intent::ExtractedIntent;
use crate::llm::{run_tool_loop, LLMClient};
use crate::HISTORY_WINDOW;
use serde::{Deserialize, Serialize};

/// Conversation participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior conversation turn, most-recent-last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Incoming chat request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

/// Outgoing chat reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub cars: Vec<CarRecord>,
    pub success: bool,
}

/// Handle one chat request end to end.
///
/// `llm` is the optional LLM collaborator; without it the handler never
/// errors on that account, it degrades to the local heuristic pass.
pub async fn handle_chat(
    catalog: &Catalog,
    llm: Option<&dyn LLMClient>,
    request: &ChatRequest,
) -> Result<ChatReply> {
    if request.message.trim().is_empty() {
        return Err(CarFinderError::InvalidInput(
            "Mensagem é obrigatória".to_string(),
        ));
    }

    let skip = request.history.len().saturating_sub(HISTORY_WINDOW);
    let history = &request.history[skip..];
    let intent = ExtractedIntent::extract(&request.message, history, catalog);

    if let Some(reply) = compose::rule_based_reply(catalog, &intent) {
        return Ok(reply);
    }

    match llm {
        None => Ok(compose::offline_reply(catalog, &intent)),
        Some(client) => run_tool_loop(client, catalog, &intent, history, &request.message).await,
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

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let request = ChatRequest {
            message: "   ".to_string(),
            history: Vec::new(),
        };
        let err = handle_chat(&catalog(), None, &request).await.unwrap_err();
        assert!(matches!(err, CarFinderError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn request_deserializes_without_history() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"message":"quero um honda civic"}"#).unwrap();
        let reply = handle_chat(&catalog(), None, &request).await.unwrap();
        assert!(reply.success);
        assert_eq!(reply.cars.len(), 1);
    }
}
