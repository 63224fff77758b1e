//! Coach service: LLM-backed replies with a static fallback.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::LlmError;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

use super::fallback::fallback_response;
use super::model::{CoachRequest, CoachResponse};
use super::prompts::{context_block, parse_reply, system_prompt};

/// Most recent history turns sent to the model.
const MAX_HISTORY: usize = 12;

/// Answers coach messages. Provider failures never reach the caller; they
/// are logged and replaced by the fallback reply.
pub struct Coach {
    llm: Option<Arc<dyn LlmProvider>>,
}

impl Coach {
    pub fn new(llm: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { llm }
    }

    /// A coach with no provider; every reply is a fallback.
    pub fn offline() -> Self {
        Self { llm: None }
    }

    pub fn is_online(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn respond(&self, request: &CoachRequest) -> CoachResponse {
        let Some(llm) = &self.llm else {
            debug!(goal = %request.goal_type, "No LLM configured, using fallback");
            return fallback_response(request);
        };
        match self.ask(llm.as_ref(), request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(goal = %request.goal_type, error = %e, "Coach LLM call failed, using fallback");
                fallback_response(request)
            }
        }
    }

    async fn ask(
        &self,
        llm: &dyn LlmProvider,
        request: &CoachRequest,
    ) -> Result<CoachResponse, LlmError> {
        let mut messages = vec![ChatMessage::system(system_prompt(request.goal_type))];
        let skip = request.history.len().saturating_sub(MAX_HISTORY);
        messages.extend(request.history.iter().skip(skip).cloned());
        messages.push(ChatMessage::user(format!(
            "{}\n\n{}",
            context_block(request),
            request.message
        )));

        let completion = CompletionRequest::new(messages)
            .with_max_tokens(600)
            .with_temperature(0.7);
        let response = llm.complete(completion).await?;
        debug!(
            model = llm.model_name(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Coach reply received"
        );
        parse_reply(&response.content)
    }
}
