// LLM Adapters
// Chat-completion provider implementations of LLMPort

mod openai;

pub use openai::*;
