//! chatrelay agent
//!
//! Turns one inbound chat message into one outbound reply: history window,
//! persona-driven prompt, completion call, and guarded delivery.

pub mod assistant_identity;
pub mod relay;
pub mod reply_dispatcher;
pub mod system_prompt;

#[cfg(test)]
pub(crate) mod test_support;

pub use assistant_identity::AssistantIdentity;
pub use relay::{ChatRelay, GREETING};
pub use reply_dispatcher::{Delivery, ReplyDispatcher, FALLBACK_MESSAGE};
pub use system_prompt::{ComposedPrompt, PromptComposer, PromptMode};
