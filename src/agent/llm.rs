//! Wire types and transport for the model API.
//!
//! The orchestrator talks to the model through the [`LlmClient`] trait;
//! [`AnthropicClient`] is the production implementation over the
//! Messages API, with plain JSON for planning turns and SSE for the
//! streamed final answer. Tests substitute a scripted implementation.

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::agent::config::AgentConfig;
use crate::HolocronError;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A tool as presented to the model's planner.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// One content block of a model-visible message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
    /// Reasoning block; echoed back unchanged on multi-turn requests.
    Thinking {
        #[serde(default)]
        thinking: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signature: Option<String>,
    },
}

/// One model-visible message, always in block form.
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

impl WireMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Self {
            role: "assistant".to_string(),
            content,
        }
    }

    /// Tool results ride back to the model as a user message.
    pub fn tool_results(content: Vec<ContentBlock>) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

/// Whether the model may plan tool calls on this request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolChoice {
    Auto,
    None,
}

impl ToolChoice {
    fn as_wire(self) -> Value {
        match self {
            ToolChoice::Auto => json!({ "type": "auto" }),
            ToolChoice::None => json!({ "type": "none" }),
        }
    }
}

/// Everything one model request needs beyond the client's own settings.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub system: String,
    pub messages: Vec<WireMessage>,
    pub tools: Vec<ToolDefinition>,
    pub tool_choice: ToolChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    ToolUse,
    PauseTurn,
    Refusal,
    #[serde(other)]
    Other,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// The model's reply to one planning request.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelTurn {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
}

impl ModelTurn {
    /// Tool invocations requested in this turn, in content order.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolCall {
                    id: id.clone(),
                    name: name.clone(),
                    arguments: input.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Concatenated text blocks.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.content {
            if let ContentBlock::Text { text } = block {
                out.push_str(text);
            }
        }
        out
    }
}

/// Incremental text fragments of a streamed answer.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, HolocronError>> + Send>>;

/// Seam between the orchestrator and the model transport.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One non-streaming planning request.
    async fn complete(&self, exchange: ChatExchange) -> Result<ModelTurn, HolocronError>;

    /// One streaming request whose text deltas are surfaced as they
    /// arrive. Callers disable tool use via the exchange's tool choice.
    async fn stream_text(&self, exchange: ChatExchange) -> Result<TextStream, HolocronError>;
}

/// Messages-API client over reqwest.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
}

impl AnthropicClient {
    pub fn new(config: &AgentConfig) -> Result<Self, HolocronError> {
        config.validate()?;
        Ok(Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone().unwrap_or_default(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }

    fn request_body(&self, exchange: &ChatExchange, stream: bool) -> Value {
        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": exchange.system,
            "messages": exchange.messages,
        });
        if !exchange.tools.is_empty() {
            body["tools"] = json!(exchange.tools);
            body["tool_choice"] = exchange.tool_choice.as_wire();
        }
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }
        if stream {
            body["stream"] = json!(true);
        }
        body
    }

    async fn post(
        &self,
        exchange: &ChatExchange,
        stream: bool,
    ) -> Result<reqwest::Response, HolocronError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&self.request_body(exchange, stream))
            .send()
            .await
            .map_err(|err| HolocronError::Orchestrator(format!("model request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are not assumed well-formed
            let body = response.text().await.unwrap_or_default();
            return Err(HolocronError::Orchestrator(format!(
                "model API error {status}: {body}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, exchange: ChatExchange) -> Result<ModelTurn, HolocronError> {
        let response = self.post(&exchange, false).await?;
        response
            .json::<ModelTurn>()
            .await
            .map_err(|err| HolocronError::Orchestrator(format!("malformed model response: {err}")))
    }

    async fn stream_text(&self, exchange: ChatExchange) -> Result<TextStream, HolocronError> {
        let response = self.post(&exchange, true).await?;
        let mut bytes = response.bytes_stream();

        let stream = async_stream::try_stream! {
            let mut buffer = String::new();
            while let Some(chunk) = bytes.next().await {
                let chunk = chunk.map_err(|err| {
                    HolocronError::Orchestrator(format!("model stream failed: {err}"))
                })?;
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // SSE events are separated by a blank line
                while let Some(split) = buffer.find("\n\n") {
                    let event = buffer[..split].to_string();
                    buffer.drain(..split + 2);
                    for line in event.lines() {
                        let Some(data) = line.strip_prefix("data: ") else {
                            continue;
                        };
                        let Ok(payload) = serde_json::from_str::<Value>(data) else {
                            continue;
                        };
                        match payload["type"].as_str() {
                            Some("content_block_delta") => {
                                if let Some(text) = payload["delta"]["text"].as_str() {
                                    if !text.is_empty() {
                                        yield text.to_string();
                                    }
                                }
                            }
                            Some("error") => {
                                let message = payload["error"]["message"]
                                    .as_str()
                                    .unwrap_or("unknown stream error")
                                    .to_string();
                                Err(HolocronError::Orchestrator(format!(
                                    "model stream error: {message}"
                                )))?;
                            }
                            _ => {}
                        }
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AgentConfig {
        AgentConfig {
            api_key: Some("sk-test".to_string()),
            ..AgentConfig::default()
        }
    }

    fn empty_exchange() -> ChatExchange {
        ChatExchange {
            system: "prompt".to_string(),
            messages: vec![WireMessage::user("hi")],
            tools: vec![],
            tool_choice: ToolChoice::Auto,
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        assert!(AnthropicClient::new(&AgentConfig::default()).is_err());
        assert!(AnthropicClient::new(&test_config()).is_ok());
    }

    #[test]
    fn test_endpoint_joins_base() {
        let client = AnthropicClient::new(&test_config()).unwrap();
        assert_eq!(client.endpoint(), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn test_request_body_omits_tools_and_temperature_when_unset() {
        let client = AnthropicClient::new(&test_config()).unwrap();
        let body = client.request_body(&empty_exchange(), false);
        assert!(body.get("tools").is_none());
        assert!(body.get("temperature").is_none());
        assert!(body.get("stream").is_none());
        assert_eq!(body["model"], json!(crate::agent::config::DEFAULT_MODEL));
    }

    #[test]
    fn test_request_body_carries_tool_choice() {
        let client = AnthropicClient::new(&test_config()).unwrap();
        let mut exchange = empty_exchange();
        exchange.tools = vec![ToolDefinition {
            name: "searchCharacters".to_string(),
            description: "search".to_string(),
            input_schema: json!({ "type": "object" }),
        }];
        exchange.tool_choice = ToolChoice::None;
        let body = client.request_body(&exchange, true);
        assert_eq!(body["tool_choice"]["type"], "none");
        assert_eq!(body["stream"], json!(true));
    }

    #[test]
    fn test_model_turn_extracts_tool_calls() {
        let turn: ModelTurn = serde_json::from_value(json!({
            "content": [
                { "type": "text", "text": "Let me look." },
                { "type": "tool_use", "id": "tu_1", "name": "searchCharacters",
                  "input": { "query": "luke" } }
            ],
            "stop_reason": "tool_use"
        }))
        .unwrap();
        let calls = turn.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "searchCharacters");
        assert_eq!(turn.stop_reason, Some(StopReason::ToolUse));
        assert_eq!(turn.text(), "Let me look.");
    }
}
