pub mod error;
pub mod message;
pub mod traits;
pub mod types;

pub use error::RelayError;
pub use message::InboundEvent;
pub use traits::{LlmProvider, LlmRequest, LlmResponse, ReplySink};
pub use types::{ChatId, DecodingParams};
