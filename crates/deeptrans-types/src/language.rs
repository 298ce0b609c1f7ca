use serde::{Deserialize, Serialize};

/// Code of the detect-at-translate-time pseudo language
pub const AUTO_CODE: &str = "auto";

const CATALOG: &[(&str, &str, &str)] = &[
    ("简体中文", "zh-CN", "🇨🇳"),
    ("English", "en", "🇺🇸"),
    ("日本語", "ja", "🇯🇵"),
    ("Español", "es", "🇪🇸"),
    ("Français", "fr", "🇫🇷"),
    ("Deutsch", "de", "🇩🇪"),
    ("Italiano", "it", "🇮🇹"),
    ("한국어", "ko", "🇰🇷"),
    ("Русский", "ru", "🇷🇺"),
    ("Português", "pt", "🇵🇹"),
    ("العربية", "ar", "🇸🇦"),
    ("हिन्दी", "hi", "🇮🇳"),
    ("Türkçe", "tr", "🇹🇷"),
    ("Tiếng Việt", "vi", "🇻🇳"),
    ("Nederlands", "nl", "🇳🇱"),
];

/// Catalog entry for a supported language
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub code: String,
    pub flag: String,
}

impl Language {
    pub fn new(name: impl Into<String>, code: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            flag: flag.into(),
        }
    }

    /// All concrete languages, in display order
    pub fn supported() -> Vec<Language> {
        CATALOG
            .iter()
            .map(|(name, code, flag)| Language::new(*name, *code, *flag))
            .collect()
    }

    /// The `auto` sentinel. Must be resolved before it reaches a provider.
    pub fn auto() -> Self {
        Language::new("Auto Detect", AUTO_CODE, "✨")
    }

    pub fn is_auto(&self) -> bool {
        self.code == AUTO_CODE
    }

    /// Find a catalog language by code.
    ///
    /// Besides exact codes, a bare base code finds its regional entry
    /// (`zh` finds `zh-CN`) and a regional code finds its base entry
    /// (`pt-BR` finds `pt`). Fragments shorter than a base code never match.
    pub fn find(code: &str) -> Option<Language> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        if code.eq_ignore_ascii_case(AUTO_CODE) {
            return Some(Language::auto());
        }

        let wanted = code.to_ascii_lowercase().replace('_', "-");
        let wanted_base = base_code(&wanted);
        if wanted_base.len() < 2 {
            return None;
        }

        let entry = |(name, code, flag): &(&str, &str, &str)| Language::new(*name, *code, *flag);

        if let Some(exact) = CATALOG.iter().find(|(_, c, _)| c.eq_ignore_ascii_case(&wanted)) {
            return Some(entry(exact));
        }

        CATALOG
            .iter()
            .find(|(_, c, _)| base_code(&c.to_ascii_lowercase()) == wanted_base)
            .map(entry)
    }

    /// Human readable name for a code, falling back to the code itself
    pub fn display_name(code: &str) -> String {
        Language::find(code)
            .map(|l| l.name)
            .unwrap_or_else(|| code.to_string())
    }
}

/// `zh` for `zh-cn`
fn base_code(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.flag, self.name, self.code)
    }
}
