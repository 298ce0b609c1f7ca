use deeptrans_types::TranslationResult;
use uuid::Uuid;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Translation history, newest first, bounded
#[derive(Debug, Clone)]
pub struct TranslationHistory {
    entries: Vec<TranslationResult>,
    limit: usize,
}

impl TranslationHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Restore persisted entries, assumed newest first
    pub fn with_entries(mut entries: Vec<TranslationResult>, limit: usize) -> Self {
        let limit = limit.max(1);
        entries.truncate(limit);
        Self { entries, limit }
    }

    /// Insert at the front. Returns the evicted oldest entry, if any.
    pub fn push(&mut self, result: TranslationResult) -> Option<TranslationResult> {
        self.entries.insert(0, result);
        if self.entries.len() > self.limit {
            self.entries.pop()
        } else {
            None
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<TranslationResult> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: Uuid) -> Option<&TranslationResult> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Lookup by a unique id prefix, as typed on a command line
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&TranslationResult> {
        let prefix = prefix.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self
            .entries
            .iter()
            .filter(|e| e.id.to_string().starts_with(&prefix));
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    pub fn latest(&self) -> Option<&TranslationResult> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationResult> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[TranslationResult] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TranslationResult> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for TranslationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deeptrans_types::Language;
    use pretty_assertions::assert_eq;

    fn entry(n: usize) -> TranslationResult {
        TranslationResult::new(
            format!("text {n}"),
            format!("texte {n}"),
            Language::find("en").unwrap(),
            Language::find("fr").unwrap(),
            "OpenAI",
        )
    }

    #[test]
    fn hundred_and_first_entry_evicts_the_oldest() {
        let mut history = TranslationHistory::default();
        for n in 0..100 {
            assert!(history.push(entry(n)).is_none());
        }

        let evicted = history.push(entry(100)).expect("oldest evicted");

        assert_eq!(evicted.source_text, "text 0");
        assert_eq!(history.len(), 100);
        assert_eq!(history.latest().map(|e| e.source_text.as_str()), Some("text 100"));
        assert_eq!(history.entries()[99].source_text, "text 1");

        let order: Vec<_> = history.iter().take(3).map(|e| e.source_text.clone()).collect();
        assert_eq!(order, vec!["text 100", "text 99", "text 98"]);
    }

    #[test]
    fn remove_and_clear() {
        let mut history = TranslationHistory::new(10);
        let keep = entry(1);
        let drop_me = entry(2);
        let drop_id = drop_me.id;
        history.push(keep.clone());
        history.push(drop_me);

        assert_eq!(history.remove(drop_id).map(|e| e.id), Some(drop_id));
        assert!(history.remove(drop_id).is_none());
        assert_eq!(history.get(keep.id).map(|e| e.id), Some(keep.id));

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn restored_entries_respect_limit() {
        let entries: Vec<_> = (0..5).map(entry).collect();
        let history = TranslationHistory::with_entries(entries, 3);
        assert_eq!(history.len(), 3);
        assert_eq!(history.latest().map(|e| e.source_text.as_str()), Some("text 0"));
    }

    #[test]
    fn prefix_lookup_requires_uniqueness() {
        let mut history = TranslationHistory::new(10);
        let e = entry(1);
        let id = e.id.to_string();
        history.push(e);

        assert!(history.find_by_prefix(&id[..8]).is_some());
        assert!(history.find_by_prefix("").is_none());
    }
}
