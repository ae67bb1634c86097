//! LLM integration
//!
//! Provides:
//! - OpenAI-compatible chat client with tool support
//! - The `search_cars`/`recommend_cars` tool contract and local executor
//! - The bounded tool-calling orchestration loop

mod client;
mod orchestrator;
mod tools;

pub use client::{
    AssistantTurn, ChatMessage, FunctionCall, LLMClient, OpenAiClient, ToolCall, ToolDefinition,
    ToolFunction,
};
pub use orchestrator::{run_tool_loop, MAX_TOOL_ROUNDS};
pub use tools::{
    execute_tool, recommend_tool_definition, search_tool_definition, tool_definitions,
    ToolExecution,
};
