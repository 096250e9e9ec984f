use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::distractor::DEFAULT_OPTION_COUNT;
use crate::engine::trainer::TrainerSettings;
use crate::vocab::record::{ColumnNames, TargetLanguage};

const MIN_OPTION_COUNT: usize = 2;
const MAX_OPTION_COUNT: usize = 8;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub word_list: Option<String>,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub start_in_quiz: bool,
    #[serde(default = "default_option_count")]
    pub option_count: usize,
    #[serde(default = "default_correct_delay_ms")]
    pub correct_delay_ms: u64,
    #[serde(default = "default_wrong_delay_ms")]
    pub wrong_delay_ms: u64,
    #[serde(default)]
    pub columns: ColumnNames,
}

fn default_target_language() -> String {
    TargetLanguage::Turkish.code().to_string()
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_option_count() -> usize {
    DEFAULT_OPTION_COUNT
}
fn default_correct_delay_ms() -> u64 {
    450
}
fn default_wrong_delay_ms() -> u64 {
    650
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_list: None,
            target_language: default_target_language(),
            theme: default_theme(),
            start_in_quiz: false,
            option_count: default_option_count(),
            correct_delay_ms: default_correct_delay_ms(),
            wrong_delay_ms: default_wrong_delay_ms(),
            columns: ColumnNames::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocabdr")
            .join("config.toml")
    }

    /// Reset values a hand-edited file may have broken.
    pub fn normalize(&mut self) {
        if TargetLanguage::from_code(&self.target_language).is_none() {
            self.target_language = default_target_language();
        }
        self.option_count = self.option_count.clamp(MIN_OPTION_COUNT, MAX_OPTION_COUNT);
    }

    pub fn language(&self) -> TargetLanguage {
        TargetLanguage::from_code(&self.target_language).unwrap_or(TargetLanguage::Turkish)
    }

    pub fn trainer_settings(&self) -> TrainerSettings {
        TrainerSettings {
            language: self.language(),
            option_count: self.option_count.clamp(MIN_OPTION_COUNT, MAX_OPTION_COUNT),
            correct_delay: Duration::from_millis(self.correct_delay_ms),
            wrong_delay: Duration::from_millis(self.wrong_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.word_list, None);
        assert_eq!(config.target_language, "tr");
        assert_eq!(config.option_count, 4);
        assert_eq!(config.correct_delay_ms, 450);
        assert_eq!(config.wrong_delay_ms, 650);
        assert_eq!(config.columns, ColumnNames::default());
        assert!(!config.start_in_quiz);
    }

    #[test]
    fn test_config_partial_columns_keep_defaults() {
        let toml_str = r#"
target_language = "en"
word_list = "~/vokabeln.csv"

[columns]
term = "Wort"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.language(), TargetLanguage::English);
        assert_eq!(config.word_list.as_deref(), Some("~/vokabeln.csv"));
        assert_eq!(config.columns.term, "Wort");
        assert_eq!(config.columns.unit, "Lektion");
        assert_eq!(config.columns.example, "Beispiel Satz");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.word_list = Some("words.csv".to_string());
        config.start_in_quiz = true;
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.word_list, deserialized.word_list);
        assert_eq!(config.start_in_quiz, deserialized.start_in_quiz);
        assert_eq!(config.columns, deserialized.columns);
    }

    #[test]
    fn test_normalize_resets_unknown_language_and_clamps_options() {
        let mut config = Config::default();
        config.target_language = "klingon".to_string();
        config.option_count = 40;
        config.normalize();
        assert_eq!(config.target_language, "tr");
        assert_eq!(config.option_count, 8);

        config.option_count = 0;
        config.normalize();
        assert_eq!(config.option_count, 2);
    }

    #[test]
    fn test_trainer_settings_from_config() {
        let mut config = Config::default();
        config.target_language = "fa".to_string();
        config.correct_delay_ms = 100;
        let settings = config.trainer_settings();
        assert_eq!(settings.language, TargetLanguage::Farsi);
        assert_eq!(settings.correct_delay, Duration::from_millis(100));
        assert_eq!(settings.wrong_delay, Duration::from_millis(650));
    }
}
