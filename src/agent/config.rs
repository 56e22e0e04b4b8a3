use serde::Serialize;

use crate::HolocronError;

pub const DEFAULT_MODEL: &str = "claude-opus-5";
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Hard cap on Planning↔ToolExecuting cycles per turn. Reaching it is a
/// fairness guarantee, not an error.
pub const DEFAULT_MAX_STEPS: usize = 5;

/// Model-access configuration for the agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub model: String,
    pub max_tokens: u32,
    /// Only serialized when set; current Anthropic models reject
    /// sampling parameters.
    pub temperature: Option<f32>,
    pub max_steps: usize,
    pub api_key: Option<String>,
    pub api_base: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            max_steps: DEFAULT_MAX_STEPS,
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl AgentConfig {
    /// Read credentials and overrides from the environment
    /// (`ANTHROPIC_API_KEY`, `ANTHROPIC_MODEL`, `ANTHROPIC_BASE_URL`).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var("ANTHROPIC_MODEL") {
            if !model.is_empty() {
                config.model = model;
            }
        }
        if let Ok(base) = std::env::var("ANTHROPIC_BASE_URL") {
            if !base.is_empty() {
                config.api_base = base;
            }
        }
        config
    }

    /// Fails fast, before any network call, when the turn cannot start.
    pub fn validate(&self) -> Result<(), HolocronError> {
        if self.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(HolocronError::Configuration(
                "ANTHROPIC_API_KEY is not configured; set it in the environment or .env".to_string(),
            ));
        }
        if self.max_steps == 0 {
            return Err(HolocronError::Configuration(
                "max_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Caller-facing configuration check result.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigStatus {
    pub is_valid: bool,
    pub error: Option<String>,
}

/// Check that required model-access credentials are present before any
/// turn is attempted.
pub fn validate_configuration(config: &AgentConfig) -> ConfigStatus {
    match config.validate() {
        Ok(()) => ConfigStatus {
            is_valid: true,
            error: None,
        },
        Err(err) => ConfigStatus {
            is_valid: false,
            error: Some(err.to_string()),
        },
    }
}

/// Base persona and tool-usage guidance for the agent. Prompt wording
/// is configuration, not contract.
pub const SYSTEM_PROMPT: &str = "\
You are an enthusiastic Star Wars expert with live access to the full \
galactic catalog: characters, planets, starships, vehicles, films and \
species.

Always answer from tool results rather than prior knowledge. Search \
first when the user names an entity, then fetch its details by id. For \
comparisons, fetch every entity involved. For counts and rankings, use \
getGalaxyStatistics. If a search comes back empty, say so and suggest \
an alternative spelling.

Be conversational and concise, use in-universe terminology naturally, \
include units with technical figures, and format longer answers with \
markdown where it helps.";

/// System prompt, optionally augmented with what the user is currently
/// looking at.
pub fn context_aware_prompt(page_context: Option<&str>) -> String {
    match page_context {
        Some(context) if !context.trim().is_empty() => format!(
            "{SYSTEM_PROMPT}\n\nThe user is currently viewing: {context}. You may \
             reference this context directly and suggest related entities."
        ),
        _ => SYSTEM_PROMPT.to_string(),
    }
}
