//! The bounded tool-calling loop behind every conversation turn.
//!
//! States per turn: Planning → ToolExecuting → Planning (looped, capped
//! at `max_steps`) → Responding → Done, with Failed reachable from any
//! state. A single failing tool call never aborts the turn — it is fed
//! back to the model as an error tool result so the model can adapt.
//! Only orchestrator-level failures (model unreachable, invalid
//! configuration) fail the turn as a whole.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, warn};

use crate::agent::config::{context_aware_prompt, AgentConfig};
use crate::agent::llm::{
    ChatExchange, ContentBlock, LlmClient, ToolCall, ToolChoice, WireMessage,
};
use crate::agent::stream::{answer_channel, AnswerSink, AnswerStream};
use crate::agent::tools::ToolRegistry;
use crate::agent::{ChatRole, ChatTurn};
use crate::HolocronError;

const ANSWER_BUFFER: usize = 32;

/// Caller-facing result of starting a turn: a structured
/// success/error shape, never a raw panic.
pub struct AgentReply {
    pub success: bool,
    pub output: Option<AnswerStream>,
    pub error: Option<String>,
}

pub struct AgentOrchestrator {
    llm: Arc<dyn LlmClient>,
    registry: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl AgentOrchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, registry: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        Self {
            llm,
            registry,
            config,
        }
    }

    /// Start one conversation turn. Fails fast on configuration
    /// problems; everything after that is reported through the
    /// stream's terminal marker. The turn runs to completion even if
    /// the caller stops consuming the stream.
    pub fn ask(
        &self,
        history: Vec<ChatTurn>,
        page_context: Option<&str>,
    ) -> Result<AnswerStream, HolocronError> {
        self.config.validate()?;

        let mut system = context_aware_prompt(page_context);
        let mut messages = Vec::with_capacity(history.len());
        for turn in history {
            match turn.role {
                // system turns fold into the system prompt
                ChatRole::System => {
                    system.push_str("\n\n");
                    system.push_str(&turn.content);
                }
                ChatRole::User => messages.push(WireMessage::user(turn.content)),
                ChatRole::Assistant => messages.push(WireMessage::assistant(vec![
                    ContentBlock::Text { text: turn.content },
                ])),
            }
        }

        let (sink, stream) = answer_channel(ANSWER_BUFFER);
        let driver = TurnDriver {
            llm: self.llm.clone(),
            registry: self.registry.clone(),
            max_steps: self.config.max_steps,
            system,
            messages,
        };
        tokio::spawn(async move {
            driver.run(sink).await;
        });
        Ok(stream)
    }

    /// `ask` wrapped into the structured `{ success, output, error }`
    /// shape consumed by UI layers.
    pub fn ask_agent(&self, history: Vec<ChatTurn>, page_context: Option<&str>) -> AgentReply {
        match self.ask(history, page_context) {
            Ok(stream) => AgentReply {
                success: true,
                output: Some(stream),
                error: None,
            },
            Err(err) => AgentReply {
                success: false,
                output: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// One in-flight turn: the model-visible history plus the loop state.
struct TurnDriver {
    llm: Arc<dyn LlmClient>,
    registry: Arc<ToolRegistry>,
    max_steps: usize,
    system: String,
    messages: Vec<WireMessage>,
}

impl TurnDriver {
    async fn run(mut self, sink: AnswerSink) {
        match self.drive(&sink).await {
            Ok(()) => sink.done().await,
            Err(err) => {
                warn!(error = %err, "agent turn failed");
                sink.failed(err.to_string()).await;
            }
        }
    }

    async fn drive(&mut self, sink: &AnswerSink) -> Result<(), HolocronError> {
        for step in 1..=self.max_steps {
            let turn = self.llm.complete(self.exchange(ToolChoice::Auto)).await?;
            let calls = turn.tool_calls();

            if calls.is_empty() {
                // Responding: the planning turn's text is the answer
                for block in &turn.content {
                    if let ContentBlock::Text { text } = block {
                        if !text.is_empty() {
                            sink.fragment(text.clone()).await;
                        }
                    }
                }
                return Ok(());
            }

            debug!(step, calls = calls.len(), "executing requested tool calls");
            self.messages.push(WireMessage::assistant(turn.content));
            let results = self.execute_calls(calls).await;
            self.messages.push(WireMessage::tool_results(results));
        }

        // Cap reached without a final answer: force a streamed,
        // text-only wrap-up from whatever the model has so far.
        warn!(max_steps = self.max_steps, "tool-call cap reached, forcing final answer");
        let mut text = self.llm.stream_text(self.exchange(ToolChoice::None)).await?;
        while let Some(fragment) = text.next().await {
            sink.fragment(fragment?).await;
        }
        Ok(())
    }

    fn exchange(&self, tool_choice: ToolChoice) -> ChatExchange {
        ChatExchange {
            system: self.system.clone(),
            messages: self.messages.clone(),
            tools: self.registry.definitions(),
            tool_choice,
        }
    }

    /// Run every requested call concurrently; results come back in
    /// request order. Failures become model-visible error results, not
    /// turn failures.
    async fn execute_calls(&self, calls: Vec<ToolCall>) -> Vec<ContentBlock> {
        let executions = calls.into_iter().map(|call| {
            let registry = self.registry.clone();
            async move {
                match registry.execute(&call.name, call.arguments).await {
                    Ok(value) => ContentBlock::ToolResult {
                        tool_use_id: call.id,
                        content: value.to_string(),
                        is_error: None,
                    },
                    Err(err) => {
                        warn!(tool = %call.name, error = %err, "tool call failed");
                        ContentBlock::ToolResult {
                            tool_use_id: call.id,
                            content: err.to_string(),
                            is_error: Some(true),
                        }
                    }
                }
            }
        });
        futures::future::join_all(executions).await
    }
}
