use deeptrans_config::Provider;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No provider named or numbered '{0}'")]
    UnknownProvider(String),

    #[error("Provider index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot remove the last provider")]
    LastProvider,
}

/// Configured providers and which one is active.
///
/// Never empty: an empty list is replaced by the stock roster and the last
/// provider cannot be removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredProviders")]
pub struct ProviderStore {
    providers: Vec<Provider>,
    active: usize,
}

#[derive(Deserialize)]
struct StoredProviders {
    #[serde(default)]
    providers: Vec<Provider>,
    #[serde(default)]
    active: usize,
}

impl From<StoredProviders> for ProviderStore {
    fn from(stored: StoredProviders) -> Self {
        Self::new(stored.providers, stored.active)
    }
}

impl ProviderStore {
    pub fn new(providers: Vec<Provider>, active: usize) -> Self {
        let providers = if providers.is_empty() {
            Provider::defaults()
        } else {
            providers
        };
        Self { providers, active }
    }

    /// The active provider; an out-of-range selection falls back to the first
    pub fn active(&self) -> &Provider {
        self.providers
            .get(self.active)
            .unwrap_or(&self.providers[0])
    }

    pub fn active_index(&self) -> usize {
        if self.active < self.providers.len() {
            self.active
        } else {
            0
        }
    }

    pub fn set_active(&mut self, index: usize) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.active = index;
        Ok(())
    }

    /// Resolve a provider by 1-based number, id or case-insensitive name
    pub fn position(&self, needle: &str) -> Result<usize, StoreError> {
        let needle = needle.trim();

        if let Ok(n) = needle.parse::<usize>() {
            if (1..=self.providers.len()).contains(&n) {
                return Ok(n - 1);
            }
        }

        self.providers
            .iter()
            .position(|p| p.id.to_string() == needle || p.name.eq_ignore_ascii_case(needle))
            .ok_or_else(|| StoreError::UnknownProvider(needle.to_string()))
    }

    pub fn get(&self, index: usize) -> Option<&Provider> {
        self.providers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Provider> {
        self.providers.get_mut(index)
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn add(&mut self, provider: Provider) -> usize {
        self.providers.push(provider);
        self.providers.len() - 1
    }

    /// Replace the provider with the same id
    pub fn update(&mut self, provider: Provider) -> Result<(), StoreError> {
        let slot = self
            .providers
            .iter_mut()
            .find(|p| p.id == provider.id)
            .ok_or_else(|| StoreError::UnknownProvider(provider.id.to_string()))?;
        *slot = provider;
        Ok(())
    }

    /// Remove a provider, keeping the selection on the same provider when it
    /// survives and resetting to the first one when it was removed.
    pub fn remove(&mut self, index: usize) -> Result<Provider, StoreError> {
        self.check_index(index)?;
        if self.providers.len() == 1 {
            return Err(StoreError::LastProvider);
        }

        let removed = self.providers.remove(index);
        if index == self.active {
            self.active = 0;
        } else if index < self.active {
            self.active -= 1;
        }
        Ok(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Provider> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.providers.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.providers.len(),
            })
        }
    }
}

impl Default for ProviderStore {
    fn default() -> Self {
        Self::new(Provider::defaults(), 0)
    }
}
