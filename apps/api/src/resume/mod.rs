// Resume analysis: structured parsing of resume text and the free-form AI endpoints.
// All model calls go through llm_client::AiGateway.

pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
