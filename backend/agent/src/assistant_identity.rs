//! Assistant persona.
//!
//! The model's tone is fixed by a shared persona paragraph followed by one of
//! two mode instructions: use the recent messages, or draw the user out.

pub const DEFAULT_PERSONA: &str = "You are a friendly journal buddy 📔✨. Keep the conversation light and match the user's tone, including using emojis when they do 😊.";

pub const CONTEXT_INSTRUCTION: &str =
    "Use their recent messages as context to provide personalized responses.";

pub const ELICIT_INSTRUCTION: &str = "Encourage the user to share more about their day by asking open-ended questions and showing interest in their experiences.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantIdentity {
    pub persona: String,
    pub context_instruction: String,
    pub elicit_instruction: String,
}

impl Default for AssistantIdentity {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.into(),
            context_instruction: CONTEXT_INSTRUCTION.into(),
            elicit_instruction: ELICIT_INSTRUCTION.into(),
        }
    }
}

impl AssistantIdentity {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            ..Default::default()
        }
    }

    /// System prompt for a model that is given the chat's recent messages.
    pub fn with_context(&self) -> String {
        format!("{} {}", self.persona, self.context_instruction)
    }

    /// System prompt for a model that sees only the current message.
    pub fn without_context(&self) -> String {
        format!("{} {}", self.persona, self.elicit_instruction)
    }
}
