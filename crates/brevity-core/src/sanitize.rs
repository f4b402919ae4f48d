/// The provider runs a fixed-size compute path; anything past this many
/// characters is dropped before the payload is built.
pub const MAX_INPUT_CHARS: usize = 3000;

/// Strips control characters and truncates to [`MAX_INPUT_CHARS`].
///
/// Tab, newline and carriage return survive: they are meaningful article
/// whitespace. Truncation counts characters, not bytes, so multi-byte input
/// is never split mid-character.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .take(MAX_INPUT_CHARS)
        .collect()
}
