// Adapters layer: concrete implementations for external systems (inference APIs,
// sub-service HTTP, chat completion) and the local heuristic backends.

pub mod azure_openai;
pub mod inference;
pub mod lexicon;
pub mod model_loader;
pub mod nlp_client;
