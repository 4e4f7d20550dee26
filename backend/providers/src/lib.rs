pub mod gateway;
pub mod mock;
pub mod openai_compat;

pub use gateway::{CompletionGateway, DEFAULT_TIMEOUT};
pub use mock::MockProvider;
pub use openai_compat::{OpenAiCompatProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
