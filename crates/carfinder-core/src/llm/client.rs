//! HTTP client for external LLM services (OpenAI, vLLM, etc.)

use crate::config::LLMServiceConfig;
use crate::error::{CarFinderError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Trait for LLM chat services with tool support
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// One chat completion round; the model may answer with text, tool
    /// calls, or both.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Assistant message echoing a full turn (content and tool calls) back
    /// into the conversation for the next round.
    pub fn from_turn(turn: &AssistantTurn) -> Self {
        Self {
            role: "assistant".to_string(),
            content: if turn.content.is_empty() {
                None
            } else {
                Some(turn.content.clone())
            },
            tool_calls: if turn.tool_calls.is_empty() {
                None
            } else {
                Some(turn.tool_calls.clone())
            },
            tool_call_id: None,
        }
    }

    /// Tool-result message answering one tool call.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionCall,
}

/// Named function with raw JSON arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments, parsed by the executor
    pub arguments: String,
}

/// Callable tool advertised to the model
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolFunction,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn function(name: &str, description: &str, parameters: Value) -> Self {
        Self {
            kind: "function".to_string(),
            function: ToolFunction {
                name: name.to_string(),
                description: description.to_string(),
                parameters,
            },
        }
    }
}

/// One assistant response: final text, tool calls, or both
#[derive(Debug, Clone, Default)]
pub struct AssistantTurn {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

/// OpenAI-compatible chat client
pub struct OpenAiClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
}

impl OpenAiClient {
    /// Create new client from configuration
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(CarFinderError::Http)?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LLMServiceConfig::default())
    }
}

#[async_trait]
impl LLMClient for OpenAiClient {
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn> {
        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage>,
            temperature: f32,
            #[serde(skip_serializing_if = "<[_]>::is_empty")]
            tools: &'a [ToolDefinition],
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChoiceMessage,
        }

        #[derive(Deserialize)]
        struct ChoiceMessage {
            content: Option<String>,
            #[serde(default)]
            tool_calls: Vec<ToolCall>,
        }

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            tools,
        };

        let url = format!("{}/v1/chat/completions", self.config.url);
        let mut req = self.http_client.post(&url).json(&request);
        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await.map_err(CarFinderError::Http)?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CarFinderError::ExternalError(format!(
                "LLM service error (HTTP {}): {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(CarFinderError::Http)?;
        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CarFinderError::Llm("No response from LLM".to_string()))?;

        Ok(AssistantTurn {
            content: choice.message.content.unwrap_or_default(),
            tool_calls: choice.message.tool_calls,
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_messages_serialize_with_call_id() {
        let message = ChatMessage::tool("call_1", r#"{"count":0,"results":[]}"#);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["tool_call_id"], "call_1");
        assert!(json.get("tool_calls").is_none());
    }

    #[test]
    fn assistant_turn_roundtrips_tool_calls() {
        let turn = AssistantTurn {
            content: String::new(),
            tool_calls: vec![ToolCall {
                id: "call_1".to_string(),
                kind: "function".to_string(),
                function: FunctionCall {
                    name: "search_cars".to_string(),
                    arguments: r#"{"name":"Honda"}"#.to_string(),
                },
            }],
        };
        let message = ChatMessage::from_turn(&turn);
        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("content").is_none());
        assert_eq!(json["tool_calls"][0]["function"]["name"], "search_cars");
    }
}
