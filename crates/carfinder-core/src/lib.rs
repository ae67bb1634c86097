//! Carfinder Core Library
//!
//! Core functionality for the carfinder conversational car-search assistant.
//!
//! # Features
//! - In-memory car catalog with derived brand/model vocabularies
//! - Diacritic-insensitive text matching with typo-tolerant fuzzy lookup
//! - Rule-based intent extraction (budget, region, brand, model)
//! - Criteria search and profile-based recommendation scoring
//! - Salesman-style response composition with tiered fallbacks
//! - Tool-calling orchestration against OpenAI-compatible LLM services

pub mod catalog;
pub mod chat;
pub mod compose;
pub mod config;
pub mod error;
pub mod intent;
pub mod llm;
pub mod recommend;
pub mod search;
pub mod text;

pub use catalog::{Body, CarImages, CarRecord, Catalog, Powertrain};
pub use chat::{handle_chat, ChatReply, ChatRequest, ConversationTurn, Role};
pub use config::{CatalogConfig, Config, LLMServiceConfig};
pub use error::{CarFinderError, Error, Result};
pub use intent::ExtractedIntent;
pub use llm::{
    tool_definitions, AssistantTurn, ChatMessage, LLMClient, OpenAiClient, ToolCall,
    ToolDefinition,
};
pub use recommend::{
    rank_candidates, recommend_cars, RecommendOutcome, RecommendProfile, ScoredCandidate, Usage,
};
pub use search::{search_cars, SearchCriteria, SearchOutcome};

/// Number of conversation turns kept as context for intent extraction
/// and LLM prompts.
pub const HISTORY_WINDOW: usize = 12;

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "carfinder";
