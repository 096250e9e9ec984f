use log::debug;
use rand::Rng;

use crate::engine::shuffle::shuffle;
use crate::vocab::record::{TargetLanguage, VocabRecord};
use crate::vocab::store::VocabularyStore;

pub const DEFAULT_OPTION_COUNT: usize = 4;

/// Shown in place of a missing translation.
pub const NO_TRANSLATION: &str = "(keine Übersetzung)";

/// Fills the option list when the store has too few distinct translations.
pub const NO_OPTION: &str = "(keine Option)";

/// Upper bound on store samples per option set; small stores would otherwise loop forever.
const MAX_SAMPLING_ATTEMPTS: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Correct,
    Distractor,
    Padding,
}

/// Multiple-choice options with the correct answer tracked by position, not by text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionSet {
    options: Vec<String>,
    correct_index: usize,
}

impl OptionSet {
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Builds `option_count` answer candidates for `correct_item`, sampling wrong answers
/// from the whole store and padding with [`NO_OPTION`] when it runs dry.
pub fn build_options<R: Rng + ?Sized>(
    store: &VocabularyStore,
    correct_item: &VocabRecord,
    language: TargetLanguage,
    option_count: usize,
    rng: &mut R,
) -> OptionSet {
    let option_count = option_count.max(1);
    let correct = correct_item
        .translation(language)
        .unwrap_or(NO_TRANSLATION);

    let mut slots: Vec<(Slot, String)> = Vec::with_capacity(option_count);
    slots.push((Slot::Correct, correct.to_string()));

    let records = store.records();
    let mut attempts = 0;
    while slots.len() < option_count && attempts < MAX_SAMPLING_ATTEMPTS && !records.is_empty() {
        attempts += 1;
        let candidate = &records[rng.gen_range(0..records.len())];
        let Some(value) = candidate.translation(language) else {
            continue;
        };
        if slots.iter().any(|(_, label)| label == value) {
            continue;
        }
        slots.push((Slot::Distractor, value.to_string()));
    }

    if slots.len() < option_count {
        debug!(
            "only {} distinct {} answers for {:?}; padding to {}",
            slots.len(),
            language.code(),
            correct_item.term,
            option_count
        );
    }
    while slots.len() < option_count {
        slots.push((Slot::Padding, NO_OPTION.to_string()));
    }

    shuffle(&mut slots, rng);

    // The correct slot was seeded first and shuffling only moves it.
    let correct_index = slots
        .iter()
        .position(|(slot, _)| *slot == Slot::Correct)
        .unwrap_or_default();

    OptionSet {
        options: slots.into_iter().map(|(_, label)| label).collect(),
        correct_index,
    }
}
