use deeptrans_config::Provider;
use deeptrans_types::Language;

/// Everything an adapter needs for one translation call
#[derive(Debug, Clone, Copy)]
pub struct TranslationRequest<'a> {
    pub text: &'a str,
    pub source: &'a Language,
    pub target: &'a Language,
    pub provider: &'a Provider,
}

impl<'a> TranslationRequest<'a> {
    pub fn new(
        text: &'a str,
        source: &'a Language,
        target: &'a Language,
        provider: &'a Provider,
    ) -> Self {
        Self {
            text,
            source,
            target,
            provider,
        }
    }

    /// Name used in error messages and logs
    pub fn provider_name(&self) -> &'a str {
        &self.provider.name
    }
}
