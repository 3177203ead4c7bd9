//! Resume structuring: upload → PDF text → Gemini → validated JSON record.
//! All model calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod schema;
