use serde::{Deserialize, Serialize};

/// One morpheme as produced by the analyzer.
///
/// Every field defaults to an empty string so partially filled tokens
/// (from a fixture or another analyzer) still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Token {
    pub surface: String,
    pub basic_form: String,
    pub part_of_speech: String,
    /// Reading in katakana. Empty for symbols and unknown words.
    pub reading: String,
}

impl Token {
    pub fn new(
        surface: impl Into<String>,
        basic_form: impl Into<String>,
        part_of_speech: impl Into<String>,
        reading: impl Into<String>,
    ) -> Self {
        Self {
            surface: surface.into(),
            basic_form: basic_form.into(),
            part_of_speech: part_of_speech.into(),
            reading: reading.into(),
        }
    }

    /// Dictionary form, falling back to the surface when the analyzer gave none.
    pub fn basic_form(&self) -> &str {
        if self.basic_form.is_empty() {
            &self.surface
        } else {
            &self.basic_form
        }
    }

    pub fn reading(&self) -> Option<&str> {
        if self.reading.is_empty() {
            None
        } else {
            Some(&self.reading)
        }
    }
}
