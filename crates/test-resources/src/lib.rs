//! Locates the compiled dictionary used by the dictionary-backed tests and demos.

use std::path::PathBuf;

pub fn dict_path() -> PathBuf {
    std::env::var("FURIGANA_DICT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("../../output/system.dic.zst"))
}

/// `None` when no dictionary has been built; tests skip in that case.
pub fn available_dict_path() -> Option<PathBuf> {
    let path = dict_path();
    if path.exists() {
        Some(path)
    } else {
        eprintln!(
            "Skipping: dictionary {:?} not found. Set FURIGANA_DICT_PATH to a compiled vibrato dictionary.",
            path
        );
        None
    }
}
