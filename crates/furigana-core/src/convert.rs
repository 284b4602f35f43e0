//! Turns a segmented sentence into the analyzer's textual output modes.

use std::ops::Range;

use crate::analyzer::{ConvertOptions, Mode, Script};
use crate::kana::{hiragana_to_katakana, is_ruby_base_char, katakana_to_hiragana};
use crate::token::Token;

/// A token together with the byte range it covers in the analyzed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    pub range: Range<usize>,
    pub token: Token,
}

pub fn to_script(s: &str, script: Script) -> String {
    match script {
        Script::Hiragana => katakana_to_hiragana(s),
        Script::Katakana => hiragana_to_katakana(s),
    }
}

/// Renders `morphemes` (in text order) according to `options`.
///
/// Text not covered by any morpheme is copied through unchanged, so the
/// `Furigana` output always contains the full input.
pub fn convert_morphemes(text: &str, morphemes: &[Morpheme], options: &ConvertOptions) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut cursor = 0;

    for morpheme in morphemes {
        let (start, end) = (morpheme.range.start, morpheme.range.end);
        if start < cursor || end > text.len() {
            log::warn!("Skipping morpheme with range {:?} outside of text", morpheme.range);
            continue;
        }
        if let Some(gap) = text.get(cursor..start) {
            out.push_str(gap);
        }

        let token = &morpheme.token;
        match options.mode {
            Mode::Furigana => write_furigana(&mut out, &token.surface, token.reading(), options.to),
            Mode::Normal | Mode::Spaced => {
                if options.mode == Mode::Spaced && !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
                out.push_str(&to_script(token.reading().unwrap_or(&token.surface), options.to));
            }
        }
        cursor = end;
    }

    if let Some(rest) = text.get(cursor..) {
        out.push_str(rest);
    }
    out
}

/// Writes `surface` with a `BASE(READING)` group after each kanji run.
///
/// `感じ` read `カンジ` becomes `感(かん)じ`. A reading that cannot be lined up
/// with the kana in the surface is dropped and the surface is written plain.
///
/// A group is only written where the scanner will take exactly that kanji run
/// as its base: a kanji run that directly follows unannotated kanji in `out`
/// stays plain.
pub fn write_furigana(out: &mut String, surface: &str, reading: Option<&str>, script: Script) {
    let reading = match reading {
        Some(r) if surface.chars().any(is_ruby_base_char) && !r.contains(['(', ')']) => r,
        _ => {
            out.push_str(surface);
            return;
        }
    };
    let reading = to_script(reading, script);
    let runs = split_runs(surface);
    let mut after_bare_base = out.chars().next_back().is_some_and(is_ruby_base_char);

    let mut parts = Vec::with_capacity(runs.len());
    if !assign_readings(&runs, &reading, &mut parts) {
        out.push_str(surface);
        return;
    }
    for (run, part) in runs.iter().zip(parts) {
        out.push_str(run.text);
        if run.base && !after_bare_base {
            out.push('(');
            out.push_str(part);
            out.push(')');
        }
        after_bare_base = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run<'a> {
    text: &'a str,
    base: bool,
}

fn split_runs(surface: &str) -> Vec<Run<'_>> {
    let mut runs: Vec<Run<'_>> = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (i, c) in surface.char_indices() {
        let base = is_ruby_base_char(c);
        match current {
            Some(kind) if kind != base => {
                runs.push(Run {
                    text: &surface[start..i],
                    base: kind,
                });
                start = i;
            }
            _ => {}
        }
        current = Some(base);
    }
    if let Some(kind) = current {
        runs.push(Run {
            text: &surface[start..],
            base: kind,
        });
    }
    runs
}

// Backtracking match: kana runs must appear literally in the reading,
// kanji runs take the shortest non-empty span that lets the rest match.
fn assign_readings<'r>(runs: &[Run<'_>], reading: &'r str, parts: &mut Vec<&'r str>) -> bool {
    let Some((run, rest)) = runs.split_first() else {
        return reading.is_empty();
    };

    if run.base {
        for (i, c) in reading.char_indices() {
            let end = i + c.len_utf8();
            parts.push(&reading[..end]);
            if assign_readings(rest, &reading[end..], parts) {
                return true;
            }
            parts.pop();
        }
        false
    } else {
        match kana_prefix_len(run.text, reading) {
            Some(len) => {
                parts.push(&reading[..len]);
                if assign_readings(rest, &reading[len..], parts) {
                    return true;
                }
                parts.pop();
                false
            }
            None => false,
        }
    }
}

/// Byte length of the prefix of `reading` that spells `kana`, ignoring hiragana/katakana differences.
fn kana_prefix_len(kana: &str, reading: &str) -> Option<usize> {
    let mut len = 0;
    let mut reading_chars = reading.chars();
    for expected in kana.chars() {
        let actual = reading_chars.next()?;
        if fold_kana(expected) != fold_kana(actual) {
            return None;
        }
        len += actual.len_utf8();
    }
    Some(len)
}

fn fold_kana(c: char) -> char {
    if ('\u{30A1}'..='\u{30F6}').contains(&c) {
        char::from_u32(c as u32 - 0x60).unwrap_or(c)
    } else {
        c
    }
}
