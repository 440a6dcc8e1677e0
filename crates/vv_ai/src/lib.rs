pub mod analysis;
pub mod config;
pub mod fetch;
pub mod gemini;
pub mod llm;
pub mod resolve;
pub mod service;
