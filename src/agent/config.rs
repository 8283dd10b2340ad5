//! Agent configuration
//!
//! The per-request configuration the hosting server hands in: model choice
//! and sampling settings for the external agent framework, plus the two
//! optional capability-provider sections (MCP, RAG).

use serde::{Deserialize, Serialize};

use crate::mcp::MCPConfig;
use crate::rag::RagConfig;

fn default_model_name() -> String {
    "anthropic:claude-3-7-sonnet-latest".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4000
}

/// Configuration for an assembled agent
///
/// Use the builder pattern to configure the agent:
///
/// ```ignore
/// let config = AgentConfig::new()
///     .with_model("openai:gpt-4o")
///     .with_system_prompt("You are a helpful assistant")
///     .with_mcp(MCPConfig::new("https://mcp.example.com/mcp"))
///     .with_rag(RagConfig::new("https://rag.example.com", "docs"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model to use in all generations
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Controls randomness (0 = deterministic, 2 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// System prompt to use in all generations
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// MCP capability provider
    #[serde(default)]
    pub mcp: Option<MCPConfig>,

    /// RAG capability provider
    #[serde(default)]
    pub rag: Option<RagConfig>,
}

impl AgentConfig {
    /// Model choices offered to hosts building selection UIs, as
    /// (label, value) pairs
    pub const MODEL_OPTIONS: [(&'static str, &'static str); 5] = [
        ("Claude 3.7 Sonnet", "anthropic:claude-3-7-sonnet-latest"),
        ("Claude 3.5 Sonnet", "anthropic:claude-3-5-sonnet-latest"),
        ("GPT 4o", "openai:gpt-4o"),
        ("GPT 4o mini", "openai:gpt-4o-mini"),
        ("GPT 4.1", "openai:gpt-4.1"),
    ];

    /// Create a configuration with default model settings and no
    /// capability providers
    pub fn new() -> Self {
        Self {
            model_name: default_model_name(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            system_prompt: None,
            mcp: None,
            rag: None,
        }
    }

    /// Set the model
    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the generation token limit
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Enable the MCP capability provider
    pub fn with_mcp(mut self, mcp: MCPConfig) -> Self {
        self.mcp = Some(mcp);
        self
    }

    /// Enable the RAG capability provider
    pub fn with_rag(mut self, rag: RagConfig) -> Self {
        self.rag = Some(rag);
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
