//! Prompt assembly for wellness conversations.

use aura_types::llm::{CompletionRequest, Message};

/// System persona for every generation call.
pub const WELLNESS_PERSONA: &str = "You are a compassionate AI wellness assistant.

Guidelines:
- Provide supportive, empathetic responses focused on mental wellness
- Never give medical advice or diagnoses
- Use evidence-based approaches like mindfulness, CBT techniques, and stress management
- Be warm, encouraging, and validate user emotions
- Ask thoughtful follow-up questions to understand better
- Suggest practical coping strategies when appropriate
- Recognize when professional help may be needed

Knowledge areas: mindfulness, anxiety management, stress reduction, sleep hygiene, emotional regulation, healthy relationships, self-care practices.

Always prioritize user safety and well-being.";

/// Builds completion requests from persona, history, and retrieved context.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    model: String,
    persona: String,
    temperature: f64,
    max_tokens: u32,
    history_window: usize,
}

impl PromptBuilder {
    /// Builder with the wellness persona and default generation parameters.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            persona: WELLNESS_PERSONA.to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            history_window: 6,
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Assemble a request: persona plus any retrieved context as the system
    /// prompt, the last `history_window` stored messages, then the new user
    /// message.
    ///
    /// `retrieved` arrives pre-formatted (with its own leading separator)
    /// or empty; it is appended to the system prompt verbatim.
    pub fn build(&self, history: &[Message], retrieved: &str, user_message: &str) -> CompletionRequest {
        let mut system = self.persona.clone();
        if !retrieved.is_empty() {
            system.push_str(retrieved);
        }

        let start = history.len().saturating_sub(self.history_window);
        let mut messages = history[start..].to_vec();
        messages.push(Message::user(user_message));

        CompletionRequest {
            model: self.model.clone(),
            messages,
            system: Some(system),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
        }
    }
}
