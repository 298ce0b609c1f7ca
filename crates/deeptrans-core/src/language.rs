use deeptrans_types::Language;

/// Guesses the language of a piece of text
pub trait LanguageDetector: Send + Sync {
    /// Language code of the dominant language, `None` when unsure
    fn detect(&self, text: &str) -> Option<String>;
}

/// Offline detection by Unicode script.
///
/// Non-Latin scripts map straight to a language. Latin text is told apart
/// by common words and letters; short or ambiguous input yields `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptDetector;

#[derive(Default)]
struct ScriptCounts {
    kana: usize,
    han: usize,
    hangul: usize,
    arabic: usize,
    cyrillic: usize,
    devanagari: usize,
    latin: usize,
}

impl ScriptCounts {
    fn tally(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars() {
            match c as u32 {
                0x3040..=0x30FF => counts.kana += 1,
                0x4E00..=0x9FFF | 0x3400..=0x4DBF => counts.han += 1,
                0xAC00..=0xD7AF | 0x1100..=0x11FF => counts.hangul += 1,
                0x0600..=0x06FF => counts.arabic += 1,
                0x0400..=0x04FF => counts.cyrillic += 1,
                0x0900..=0x097F => counts.devanagari += 1,
                _ if c.is_ascii_alphabetic() => counts.latin += 1,
                0x00C0..=0x024F | 0x1EA0..=0x1EFF => counts.latin += 1,
                _ => {}
            }
        }
        counts
    }
}

/// Frequent words per Latin-script catalog language
const LATIN_WORDS: &[(&str, &[&str])] = &[
    ("en", &[
        "the", "and", "is", "are", "of", "to", "you", "this", "that", "with", "it", "what", "how",
        "hello", "world", "good", "morning", "night", "thank", "please", "have", "not",
    ]),
    ("es", &[
        "el", "los", "las", "que", "y", "por", "con", "una", "hola", "mundo", "cómo", "estás",
        "qué", "muy", "buenos", "días", "gracias", "está", "pero", "del",
    ]),
    ("fr", &[
        "le", "les", "et", "est", "une", "je", "vous", "bonjour", "monde", "pas", "pour", "dans",
        "merci", "bonsoir", "avec", "nous", "ce", "du",
    ]),
    ("de", &[
        "der", "die", "das", "und", "ist", "ich", "nicht", "ein", "eine", "guten", "morgen", "mit",
        "zu", "wir", "danke", "hallo", "welt", "auf",
    ]),
    ("it", &[
        "il", "lo", "di", "che", "è", "ciao", "sono", "per", "non", "come", "buongiorno", "grazie",
        "della", "questo", "mondo",
    ]),
    ("pt", &[
        "os", "um", "uma", "não", "olá", "obrigado", "obrigada", "você", "bom", "dia", "mundo",
        "tudo", "bem", "isso", "muito",
    ]),
    ("nl", &[
        "het", "een", "niet", "ik", "je", "goedemorgen", "hallo", "van", "dat", "wij", "dank",
        "wereld", "goede", "zijn",
    ]),
    ("tr", &[
        "bir", "ve", "bu", "merhaba", "nasılsın", "için", "çok", "evet", "hayır", "teşekkürler",
        "günaydın", "dünya",
    ]),
    ("vi", &["xin", "chào", "không", "và", "là", "của", "cảm", "ơn", "tôi", "bạn"]),
];

/// Letters that only a few Latin-script catalog languages use
const LATIN_LETTERS: &[(char, &str)] = &[
    ('ñ', "es"),
    ('¿', "es"),
    ('¡', "es"),
    ('ß', "de"),
    ('ä', "de"),
    ('ã', "pt"),
    ('õ', "pt"),
    ('œ', "fr"),
    ('ğ', "tr"),
    ('ş', "tr"),
    ('ı', "tr"),
    ('đ', "vi"),
    ('ơ', "vi"),
    ('ư', "vi"),
];

fn detect_latin(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    let mut scores = vec![0usize; LATIN_WORDS.len()];

    for word in lowered.split(|c: char| !c.is_alphabetic()).filter(|w| !w.is_empty()) {
        for (i, (_, words)) in LATIN_WORDS.iter().enumerate() {
            if words.contains(&word) {
                scores[i] += 1;
            }
        }
    }

    for c in lowered.chars() {
        if let Some((_, code)) = LATIN_LETTERS.iter().find(|(l, _)| *l == c) {
            if let Some(i) = LATIN_WORDS.iter().position(|(lang, _)| lang == code) {
                scores[i] += 2;
            }
        }
    }

    let best = *scores.iter().max()?;
    if best == 0 || scores.iter().filter(|s| **s == best).count() > 1 {
        return None;
    }
    let index = scores.iter().position(|s| *s == best)?;
    Some(LATIN_WORDS[index].0)
}

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let counts = ScriptCounts::tally(text);

        // Japanese mixes kana with Han, so any kana wins
        if counts.kana > 0 {
            return Some("ja".into());
        }

        let ranked = [
            (counts.han, "zh-CN"),
            (counts.hangul, "ko"),
            (counts.arabic, "ar"),
            (counts.cyrillic, "ru"),
            (counts.devanagari, "hi"),
            (counts.latin, "latin"),
        ];

        let (_, script) = ranked.into_iter().filter(|(n, _)| *n > 0).max_by_key(|(n, _)| *n)?;
        match script {
            "latin" => detect_latin(text).map(str::to_string),
            code => Some(code.to_string()),
        }
    }
}

/// Language paired with `lang` when text is already in the target language
fn counterpart(lang: &Language) -> Option<Language> {
    let code = if lang.code == "en" { "zh-CN" } else { "en" };
    Language::find(code)
}

/// Concrete `(source, target)` pair for a request.
///
/// An `auto` source becomes the detected language; `None` when nothing can
/// be detected. Text already in the target language swaps the pair: an
/// explicit source becomes the new target, an `auto` one is replaced by
/// the counterpart of the target (English, or Chinese for English).
pub fn resolve_languages(
    source: &Language,
    target: &Language,
    text: &str,
    detector: &dyn LanguageDetector,
) -> Option<(Language, Language)> {
    let detected = detector
        .detect(text)
        .and_then(|code| Language::find(&code))
        .filter(|lang| !lang.is_auto());

    if let Some(lang) = &detected {
        tracing::debug!(code = %lang.code, "detected source language");
    }

    let in_target = detected.as_ref().is_some_and(|d| d.code == target.code);

    if source.is_auto() {
        let Some(detected) = detected else {
            tracing::debug!("source language detection failed");
            return None;
        };
        if in_target {
            let other = counterpart(target)?;
            return Some((detected, other));
        }
        return Some((detected, target.clone()));
    }

    if in_target && source.code != target.code {
        tracing::debug!(from = %source.code, to = %target.code, "text is in the target language, swapping");
        return Some((target.clone(), source.clone()));
    }

    Some((source.clone(), target.clone()))
}
