//! Text exchanged with the downstream word-explanation generator.

use crate::keywords::KeywordEntry;

const WORD_LINE_PREFIX: &str = "单词：";
const PITCH_MARKS: [char; 5] = ['①', '②', '③', '④', '⑤'];

/// One `word(reading)` per line, the list format the generator expects.
pub fn format_word_list(entries: &[KeywordEntry]) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Appends a default pitch-accent mark (` ①`) to every word line of an
/// explanation that came back without one.
pub fn ensure_pitch_marks(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim_end();
            let is_word_line =
                trimmed.starts_with(WORD_LINE_PREFIX) && trimmed.contains('(') && trimmed.contains(')');
            if !is_word_line || trimmed.ends_with(PITCH_MARKS) {
                line.to_string()
            } else {
                format!("{} ①", trimmed)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
