//! LLM access for AI-generated insights

pub mod client;
pub mod prompts;

pub use client::LlmProvider;
pub use client::LlmService;
pub use prompts::InsightPrompts;
pub use prompts::PromptTemplate;
