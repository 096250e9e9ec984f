use std::collections::{BTreeMap, HashMap};
use std::fmt;

use icu_normalizer::ComposingNormalizerBorrowed;
use serde::{Deserialize, Serialize};

/// One row as delivered by a word-list reader: column header -> cell text.
pub type RawRecord = HashMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    Turkish,
    English,
    Ukrainian,
    Arabic,
    Farsi,
    Kurdish,
}

pub const ALL_LANGUAGES: &[TargetLanguage] = &[
    TargetLanguage::Turkish,
    TargetLanguage::English,
    TargetLanguage::Ukrainian,
    TargetLanguage::Arabic,
    TargetLanguage::Farsi,
    TargetLanguage::Kurdish,
];

impl TargetLanguage {
    pub fn code(self) -> &'static str {
        match self {
            TargetLanguage::Turkish => "tr",
            TargetLanguage::English => "en",
            TargetLanguage::Ukrainian => "uk",
            TargetLanguage::Arabic => "ar",
            TargetLanguage::Farsi => "fa",
            TargetLanguage::Kurdish => "ku",
        }
    }

    /// Column header used for this language in the word list.
    pub fn column(self) -> &'static str {
        match self {
            TargetLanguage::Turkish => "Turkisch",
            TargetLanguage::English => "Englisch",
            TargetLanguage::Ukrainian => "Ukrainisch (Українська)",
            TargetLanguage::Arabic => "Arabisch (العربية)",
            TargetLanguage::Farsi => "Farsi (فارسی)",
            TargetLanguage::Kurdish => "Kurdisch (Kurmancî)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        ALL_LANGUAGES
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        ALL_LANGUAGES[(idx + 1) % ALL_LANGUAGES.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        let prev = if idx == 0 { ALL_LANGUAGES.len() - 1 } else { idx - 1 };
        ALL_LANGUAGES[prev]
    }

    fn index(self) -> usize {
        ALL_LANGUAGES
            .iter()
            .position(|&lang| lang == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Headers of the non-translation columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    #[serde(default = "default_unit_column")]
    pub unit: String,
    #[serde(default = "default_term_column")]
    pub term: String,
    #[serde(default = "default_example_column")]
    pub example: String,
}

fn default_unit_column() -> String {
    "Lektion".to_string()
}
fn default_term_column() -> String {
    "Deutsch".to_string()
}
fn default_example_column() -> String {
    "Beispiel Satz".to_string()
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            unit: default_unit_column(),
            term: default_term_column(),
            example: default_example_column(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VocabRecord {
    pub unit: Option<u32>,
    pub term: String,
    pub example: String,
    pub translations: BTreeMap<TargetLanguage, String>,
}

impl VocabRecord {
    pub fn new(unit: Option<u32>, term: &str, example: &str) -> Self {
        Self {
            unit,
            term: term.to_string(),
            example: example.to_string(),
            translations: BTreeMap::new(),
        }
    }

    pub fn with_translation(mut self, language: TargetLanguage, text: &str) -> Self {
        let text = clean_text(text);
        if !text.is_empty() {
            self.translations.insert(language, text);
        }
        self
    }

    /// Normalize a raw row. Returns `None` when the term or example is missing.
    pub fn from_raw(raw: &RawRecord, columns: &ColumnNames) -> Option<Self> {
        let term = field(raw, &columns.term).map(clean_text).unwrap_or_default();
        let example = field(raw, &columns.example)
            .map(clean_text)
            .unwrap_or_default();
        if term.is_empty() || example.is_empty() {
            return None;
        }

        let unit = field(raw, &columns.unit).and_then(parse_unit);

        let translations = ALL_LANGUAGES
            .iter()
            .filter_map(|&lang| {
                let text = clean_text(field(raw, lang.column())?);
                (!text.is_empty()).then_some((lang, text))
            })
            .collect();

        Some(Self {
            unit,
            term,
            example,
            translations,
        })
    }

    pub fn translation(&self, language: TargetLanguage) -> Option<&str> {
        self.translations.get(&language).map(String::as_str)
    }
}

/// Header lookup tolerant of stray whitespace around header names. An exact
/// header wins; among padded ones the smallest key is taken.
fn field<'a>(raw: &'a RawRecord, name: &str) -> Option<&'a str> {
    if let Some(value) = raw.get(name) {
        return Some(value.as_str());
    }
    raw.iter()
        .filter(|(key, _)| key.trim() == name)
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, value)| value.as_str())
}

/// Trim, turn non-breaking spaces into plain spaces and compose to NFC.
pub fn clean_text(raw: &str) -> String {
    let replaced = raw.replace('\u{00A0}', " ");
    let nfc = ComposingNormalizerBorrowed::new_nfc();
    nfc.normalize(replaced.trim()).into_owned()
}

/// Leading-digit integer parse: "12" and "12b" give 12, "", "x" and "-3" give `None`.
pub fn parse_unit(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: &str = match trimmed.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &trimmed[..end],
        None => trimmed,
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
