// Resume text generation.
// All LLM calls go through llm_client; nothing here talks to the Anthropic API directly.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod tone;
