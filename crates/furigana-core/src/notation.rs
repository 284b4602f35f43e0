//! Scanner for the analyzer's `BASE(READING)` furigana notation.

use crate::kana::is_ruby_base_char;

/// One piece of annotated text. Concatenating every `Plain` text and `Ruby`
/// base in order gives back the text without its readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Ruby { base: &'a str, reading: &'a str },
}

/// Splits furigana notation into segments.
///
/// The base of a group is only the run of kanji directly in front of `(`,
/// so `日本語(にほんご)を勉強(べんきょう)` keeps `を` as plain text. A `(` with
/// no kanji before it, an empty reading, or no matching `)` stays plain.
pub fn parse_notation(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = input[cursor..].find('(') {
        let open = cursor + offset;
        let reading_start = open + 1;
        cursor = reading_start;

        let close = match input[reading_start..].find(['(', ')']) {
            Some(i) if input[reading_start + i..].starts_with(')') => reading_start + i,
            _ => continue,
        };
        let reading = &input[reading_start..close];
        let base_start = plain_start + ruby_base_start(&input[plain_start..open]);
        if reading.trim().is_empty() || base_start == open {
            continue;
        }

        if plain_start < base_start {
            segments.push(Segment::Plain(&input[plain_start..base_start]));
        }
        segments.push(Segment::Ruby {
            base: &input[base_start..open],
            reading,
        });
        cursor = close + 1;
        plain_start = cursor;
    }

    if plain_start < input.len() {
        segments.push(Segment::Plain(&input[plain_start..]));
    }
    segments
}

fn ruby_base_start(s: &str) -> usize {
    s.char_indices()
        .rev()
        .take_while(|(_, c)| is_ruby_base_char(*c))
        .last()
        .map_or(s.len(), |(i, _)| i)
}
