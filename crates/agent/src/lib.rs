//! The orchestration loop between the chat model and the weather tools.
//!
//! One `run` drives a bounded number of model↔tool round-trips over a
//! caller-supplied conversation: the model either answers directly or
//! requests tool calls, each dispatched result is appended as a tool message,
//! and the loop re-invokes the model until it produces a final text answer.
//! Exceeding the round cap is a terminal error, never a silent truncation.

use std::sync::Arc;

use skybrief_core::error::{Error, Result};
use skybrief_core::{
    Artifact, Conversation, Message, Provider, ProviderRequest, ReportDescriptor, Role, ToolCall,
    ToolDispatcher, WeatherAnalysis, WeatherReport,
};
use tracing::{debug, info, warn};

const DEFAULT_MAX_ROUNDS: u32 = 8;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful weather assistant. \
You have three tools: get_weather fetches current weather for a city, \
analyze_weather generates clothing/activity/health recommendations from \
weather data, and save_weather_report writes a report file and returns a \
download link. Chain them in that order when the user asks for advice or a \
report. Answer in the user's language.";

/// Structured results accumulated over one run. At most one artifact of each
/// kind; a later one of the same kind replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct RunArtifacts {
    pub weather: Option<WeatherReport>,
    pub analysis: Option<WeatherAnalysis>,
    pub report: Option<ReportDescriptor>,
}

impl RunArtifacts {
    fn record(&mut self, artifact: Artifact) {
        match artifact {
            Artifact::Weather(weather) => self.weather = Some(weather),
            Artifact::Analysis(analysis) => self.analysis = Some(analysis),
            Artifact::Report(report) => self.report = Some(report),
        }
    }
}

/// The outcome of one orchestration run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The model's final text answer.
    pub reply: String,

    /// Structured artifacts the tools produced along the way.
    pub artifacts: RunArtifacts,
}

/// Drives the model↔tool loop. Both collaborators are injected explicitly.
pub struct Orchestrator {
    provider: Arc<dyn Provider>,
    tools: Arc<dyn ToolDispatcher>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    max_rounds: u32,
    system_prompt: String,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn Provider>,
        tools: Arc<dyn ToolDispatcher>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            tools,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
            max_rounds: DEFAULT_MAX_ROUNDS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Cap on model↔tool round-trips per run (default 8).
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Run the loop over a conversation that already contains the new user
    /// message. Appends every model and tool message it produces; history
    /// persistence across runs stays with the caller.
    pub async fn run(&self, conversation: &mut Conversation) -> Result<RunOutcome> {
        self.ensure_system_prompt(conversation);

        let mut artifacts = RunArtifacts::default();

        for round in 0..self.max_rounds {
            debug!(round, "Requesting completion");

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: conversation.messages.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: self.tools.definitions(),
            };

            let response = self.provider.complete(request).await?;
            let message = response.message;
            conversation.push(message.clone());

            // The returned tool-call list is authoritative for termination:
            // no requested calls means the model is done.
            if message.tool_calls.is_empty() {
                info!(round, "Run complete");
                return Ok(RunOutcome {
                    reply: message.content,
                    artifacts,
                });
            }

            for tc in &message.tool_calls {
                let arguments: serde_json::Value =
                    serde_json::from_str(&tc.arguments).unwrap_or(serde_json::Value::Null);
                let call = ToolCall {
                    id: tc.id.clone(),
                    name: tc.name.clone(),
                    arguments,
                };

                let dispatch = self.tools.dispatch(&call).await?;
                if !dispatch.result.success {
                    warn!(tool = %call.name, "Tool returned an error result");
                }

                conversation.push(Message::tool_result(
                    dispatch.result.call_id.clone(),
                    dispatch.result.output.clone(),
                ));

                if let Some(artifact) = dispatch.artifact {
                    artifacts.record(artifact);
                }
            }
        }

        warn!(rounds = self.max_rounds, "Tool loop cap exceeded");
        Err(Error::ToolLoopExceeded {
            rounds: self.max_rounds,
        })
    }

    fn ensure_system_prompt(&self, conversation: &mut Conversation) {
        let has_system = conversation
            .messages
            .first()
            .is_some_and(|m| m.role == Role::System);
        if !has_system {
            conversation
                .messages
                .insert(0, Message::system(self.system_prompt.clone()));
        }
    }
}
