//! Prompt composition.
//!
//! A pure function of the current message, the history window, and the mode.

use crate::assistant_identity::AssistantIdentity;

/// Whether the history window is embedded in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptMode {
    #[default]
    WithContext,
    WithoutContext,
}

impl PromptMode {
    pub fn from_flag(with_context: bool) -> Self {
        if with_context {
            Self::WithContext
        } else {
            Self::WithoutContext
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub system_prompt: String,
    pub user_prompt: String,
}

#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    identity: AssistantIdentity,
}

impl PromptComposer {
    pub fn new(identity: AssistantIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &AssistantIdentity {
        &self.identity
    }

    /// Build the system and user prompts for one message.
    ///
    /// `history` is oldest first and is only read in [`PromptMode::WithContext`].
    pub fn compose(&self, message: &str, history: &[String], mode: PromptMode) -> ComposedPrompt {
        match mode {
            PromptMode::WithContext => ComposedPrompt {
                system_prompt: self.identity.with_context(),
                user_prompt: format!(
                    "Recent user messages:\n\n{}\n\nUser message to answer:\n\n{}",
                    history.join("\n"),
                    message
                ),
            },
            PromptMode::WithoutContext => ComposedPrompt {
                system_prompt: self.identity.without_context(),
                user_prompt: message.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant_identity::{CONTEXT_INSTRUCTION, ELICIT_INSTRUCTION};

    fn history(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn embeds_history_oldest_first() {
        let prompt = PromptComposer::default().compose(
            "great day",
            &history(&["hi", "how are you"]),
            PromptMode::WithContext,
        );
        assert_eq!(
            prompt.user_prompt,
            "Recent user messages:\n\nhi\nhow are you\n\nUser message to answer:\n\ngreat day"
        );
        assert!(prompt.system_prompt.contains(CONTEXT_INSTRUCTION));
        assert!(!prompt.system_prompt.contains(ELICIT_INSTRUCTION));
    }

    #[test]
    fn empty_history_leaves_empty_section() {
        let prompt = PromptComposer::default().compose("hello", &[], PromptMode::WithContext);
        assert_eq!(
            prompt.user_prompt,
            "Recent user messages:\n\n\n\nUser message to answer:\n\nhello"
        );
    }

    #[test]
    fn context_free_prompt_is_the_message_verbatim() {
        let prompt = PromptComposer::default().compose(
            "  what should I write about?  ",
            &history(&["secret earlier message"]),
            PromptMode::WithoutContext,
        );
        assert_eq!(prompt.user_prompt, "  what should I write about?  ");
        assert!(!prompt.system_prompt.contains("secret"));
        assert!(prompt.system_prompt.contains(ELICIT_INSTRUCTION));
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(PromptMode::from_flag(true), PromptMode::WithContext);
        assert_eq!(PromptMode::from_flag(false), PromptMode::WithoutContext);
        assert_eq!(PromptMode::default(), PromptMode::WithContext);
    }
}
