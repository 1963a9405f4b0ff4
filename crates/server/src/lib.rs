pub mod error;
pub mod routes;

use std::sync::Arc;

use services::services::gemini::GeminiClient;
use services::services::generation::PageGenerator;
use services::services::store::InMemoryPageStore;

/// Concrete generator wiring used by this binary.
pub type GeneratorImpl = PageGenerator<InMemoryPageStore, GeminiClient>;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<GeneratorImpl>,
}
