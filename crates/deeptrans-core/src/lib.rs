pub mod history;
pub mod in_flight;
pub mod language;
pub mod providers;
pub mod service;
pub mod state;

pub use history::TranslationHistory;
pub use language::{LanguageDetector, ScriptDetector, resolve_languages};
pub use providers::{ProviderStore, StoreError};
pub use service::TranslationService;
pub use state::AppState;

#[cfg(test)]
mod tests;
