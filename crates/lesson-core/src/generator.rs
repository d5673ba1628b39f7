use crate::error::GenerationError;
use crate::plan::LessonPlan;
use crate::prompt::LESSON_WRITER_SYSTEM;
use crate::sanitize::sanitize_response;
use chat_client::{ChatClient, ChatError, ChatMessage, ChatRequest, ResponseFormat};

// ---------------------------------------------------------------------------
// Completion boundary
// ---------------------------------------------------------------------------

/// One request to the completion boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    /// Ask the provider for a JSON object rather than free text.
    pub json: bool,
}

/// Anything that turns a system + user prompt into completion text.
pub trait CompletionBackend {
    fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ChatError>;
}

/// [`CompletionBackend`] backed by a chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatBackend {
    client: ChatClient,
    model: String,
}

impl ChatBackend {
    pub fn new(client: ChatClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

impl CompletionBackend for ChatBackend {
    fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ChatError> {
        let mut chat = ChatRequest::new(&self.model)
            .message(ChatMessage::system(request.system))
            .message(ChatMessage::user(request.prompt));
        if request.json {
            chat = chat.response_format(ResponseFormat::JsonObject);
        }
        self.client.complete(&chat)
    }
}

// ---------------------------------------------------------------------------
// LessonPlanGenerator
// ---------------------------------------------------------------------------

/// Sends prompts to a [`CompletionBackend`] and decodes what comes back.
///
/// Never panics and never retries: every call returns either usable output
/// or a [`GenerationError`]. Reporting and exit codes belong to the caller.
pub struct LessonPlanGenerator<'a> {
    backend: &'a dyn CompletionBackend,
}

impl<'a> LessonPlanGenerator<'a> {
    pub fn new(backend: &'a dyn CompletionBackend) -> Self {
        Self { backend }
    }

    /// Request a lesson plan for `prompt` and decode it.
    pub fn generate(&self, prompt: &str) -> Result<LessonPlan, GenerationError> {
        let raw = self.call(&CompletionRequest {
            system: LESSON_WRITER_SYSTEM,
            prompt,
            json: true,
        })?;
        let cleaned = sanitize_response(&raw);
        if cleaned.is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }
        let plan = LessonPlan::from_json(cleaned).map_err(|e| {
            tracing::warn!(error = %e, "completion is not a lesson plan");
            GenerationError::Decode(e)
        })?;
        tracing::info!(steps = plan.steps.len(), "decoded lesson plan");
        Ok(plan)
    }

    /// Free-text completion with fences stripped. Empty output is an error.
    pub fn generate_text(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        let raw = self.call(&CompletionRequest {
            system,
            prompt,
            json: false,
        })?;
        let cleaned = sanitize_response(&raw);
        if cleaned.is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }
        Ok(cleaned.to_string())
    }

    fn call(&self, request: &CompletionRequest<'_>) -> Result<String, GenerationError> {
        self.backend.complete(request).map_err(|e| {
            tracing::warn!(error = %e, "completion request failed");
            GenerationError::Provider(e)
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
