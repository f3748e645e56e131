//! Email classifier: LLM-backed classification and reply dispatch.

pub mod config;
pub mod error;
pub mod io;
pub mod llm;
pub mod pipeline;
