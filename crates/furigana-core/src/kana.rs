//! Script classification and kana transliteration.

/// Distance between a katakana code point and its hiragana counterpart.
const KANA_OFFSET: u32 = 0x60;

fn is_convertible_katakana(c: char) -> bool {
    ('\u{30A1}'..='\u{30F6}').contains(&c)
}

fn is_convertible_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c)
}

fn shift(c: char, up: bool) -> char {
    let code = if up {
        c as u32 + KANA_OFFSET
    } else {
        c as u32 - KANA_OFFSET
    };
    char::from_u32(code).unwrap_or(c)
}

/// Converts every katakana letter (ァ..ヶ) to hiragana. Anything else passes through.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if is_convertible_katakana(c) {
                shift(c, false)
            } else {
                c
            }
        })
        .collect()
}

/// Inverse of [`katakana_to_hiragana`] over ぁ..ゖ.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if is_convertible_hiragana(c) {
                shift(c, true)
            } else {
                c
            }
        })
        .collect()
}

/// CJK unified ideographs, extension A and compatibility ideographs.
pub fn is_kanji(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FCF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}')
}

pub fn contains_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

/// Characters that may sit under a ruby reading: kanji, the iteration mark and the small ke counters.
pub fn is_ruby_base_char(c: char) -> bool {
    is_kanji(c) || matches!(c, '々' | 'ヶ' | 'ヵ' | '〆')
}
