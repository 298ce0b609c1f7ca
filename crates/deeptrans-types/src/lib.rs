pub mod language;
pub mod types;

pub use language::{AUTO_CODE, Language};
pub use types::TranslationResult;
