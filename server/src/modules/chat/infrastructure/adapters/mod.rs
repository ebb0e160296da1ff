// Provider adapters

pub mod llm;
