use deeptrans_types::Language;

/// System message for vendors that take one
pub const SYSTEM_PROMPT: &str =
    "You are a professional translator. Just provide the accurate translation, no extra content.";

/// Instruction sent as the user turn. `text` is embedded verbatim.
pub fn build_prompt(text: &str, source: &Language, target: &Language) -> String {
    format!(
        "Please translate the following {source} text to {target}:\n\n{text}\n\nReturn only the translated text, no extra content.",
        source = source.name,
        target = target.name,
    )
}
