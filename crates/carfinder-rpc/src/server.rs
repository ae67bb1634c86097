//! JSON-RPC server over stdio
//!
//! Newline-delimited requests on stdin, one response per line on stdout.
//! All handler failures become structured error responses; the loop only
//! ends when stdin closes.

use crate::protocol::{error_codes, JsonRpcRequest, JsonRpcResponse};
use crate::tools;
use anyhow::Result;
use carfinder_core::{handle_chat, CarFinderError, Catalog, ChatRequest, LLMClient};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

pub struct RpcServer<'a> {
    catalog: &'a Catalog,
    llm: Option<&'a dyn LLMClient>,
}

impl<'a> RpcServer<'a> {
    pub fn new(catalog: &'a Catalog, llm: Option<&'a dyn LLMClient>) -> Self {
        Self { catalog, llm }
    }

    pub async fn run(&self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();

        let mut reader = BufReader::new(stdin);
        let mut writer = BufWriter::new(stdout);
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    let response = JsonRpcResponse::error(
                        None,
                        error_codes::PARSE_ERROR,
                        &format!("Parse error: {}", e),
                    );
                    self.write_response(&mut writer, &response).await?;
                    continue;
                }
            };

            let response = self.handle_request(&request).await;
            self.write_response(&mut writer, &response).await?;
        }

        Ok(())
    }

    async fn write_response<W: AsyncWriteExt + Unpin>(
        &self,
        writer: &mut W,
        response: &JsonRpcResponse,
    ) -> Result<()> {
        let json = serde_json::to_string(response)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    async fn handle_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            "chat" => self.handle_chat(request).await,
            "status" => JsonRpcResponse::success(
                request.id.clone(),
                tools::handle_status(self.catalog, self.llm.is_some()),
            ),
            _ => JsonRpcResponse::error(
                request.id.clone(),
                error_codes::METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let result = serde_json::json!({
            "serverInfo": {
                "name": "carfinder",
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {
                "tools": {},
                "chat": {}
            }
        });
        JsonRpcResponse::success(request.id.clone(), result)
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id.clone(),
            serde_json::json!({ "tools": tools::tool_descriptors() }),
        )
    }

    fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let name = request
            .params
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let arguments = request
            .params
            .get("arguments")
            .cloned()
            .unwrap_or(serde_json::json!({}));

        let result = match name {
            "search_cars" => tools::handle_search(self.catalog, arguments),
            "recommend_cars" => tools::handle_recommend(self.catalog, arguments),
            _ => Err(anyhow::anyhow!("Unknown tool: {}", name)),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(request.id.clone(), value),
            Err(e) => JsonRpcResponse::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                &format!("Tool call failed: {}", e),
            ),
        }
    }

    async fn handle_chat(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let chat_request: ChatRequest = match serde_json::from_value(request.params.clone()) {
            Ok(r) => r,
            Err(e) => {
                return JsonRpcResponse::error_with_data(
                    request.id.clone(),
                    error_codes::INVALID_PARAMS,
                    "Mensagem é obrigatória",
                    Some(serde_json::json!({ "details": e.to_string() })),
                );
            }
        };

        match handle_chat(self.catalog, self.llm, &chat_request).await {
            Ok(reply) => match serde_json::to_value(&reply) {
                Ok(value) => JsonRpcResponse::success(request.id.clone(), value),
                Err(e) => JsonRpcResponse::error(
                    request.id.clone(),
                    error_codes::INTERNAL_ERROR,
                    &format!("Erro interno do servidor: {}", e),
                ),
            },
            Err(CarFinderError::InvalidInput(message)) => JsonRpcResponse::error(
                request.id.clone(),
                error_codes::INVALID_PARAMS,
                &message,
            ),
            Err(e) => {
                tracing::error!("chat request failed: {}", e);
                JsonRpcResponse::error_with_data(
                    request.id.clone(),
                    error_codes::INTERNAL_ERROR,
                    "Erro interno do servidor",
                    Some(serde_json::json!({ "details": e.to_string() })),
                )
            }
        }
    }
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

    fn request(method: &str, params: serde_json::Value) -> JsonRpcRequest {
        serde_json::from_value(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn chat_method_answers_rule_based_queries() {
        let catalog = catalog();
        let server = RpcServer::new(&catalog, None);
        let response = server
            .handle_request(&request("chat", serde_json::json!({"message": "honda civic"})))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["cars"][0]["Model"], "Civic");
    }

    #[tokio::test]
    async fn missing_message_yields_invalid_params() {
        let catalog = catalog();
        let server = RpcServer::new(&catalog, None);
        let response = server
            .handle_request(&request("chat", serde_json::json!({"message": ""})))
            .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert_eq!(error.message, "Mensagem é obrigatória");
    }

    #[tokio::test]
    async fn unknown_method_is_reported() {
        let catalog = catalog();
        let server = RpcServer::new(&catalog, None);
        let response = server
            .handle_request(&request("paint", serde_json::json!({})))
            .await;
        assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn tools_call_dispatches_search() {
        let catalog = catalog();
        let server = RpcServer::new(&catalog, None);
        let response = server
            .handle_request(&request(
                "tools/call",
                serde_json::json!({"name": "search_cars", "arguments": {"name": "Honda"}}),
            ))
            .await;
        assert_eq!(response.result.unwrap()["count"], 1);
    }
}
