pub mod config;
pub mod llm;
pub mod orchestrator;
pub mod stream;
pub mod tools;

pub use config::{validate_configuration, AgentConfig, ConfigStatus};
pub use llm::{AnthropicClient, LlmClient, ToolCall};
pub use orchestrator::{AgentOrchestrator, AgentReply};
pub use stream::{collect_text, AnswerEvent, AnswerStream};
pub use tools::ToolRegistry;

use serde::{Deserialize, Serialize};

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// One turn of the conversation, held in volatile memory only. The
/// orchestrator treats the history as an opaque ordered list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}
