use std::collections::BTreeSet;

use log::{debug, info};

use crate::error::LoadError;
use crate::vocab::record::{ColumnNames, RawRecord, TargetLanguage, VocabRecord};

/// Immutable word list plus the sorted distinct unit ids found in it.
#[derive(Clone, Debug)]
pub struct VocabularyStore {
    records: Vec<VocabRecord>,
    units: Vec<u32>,
}

impl VocabularyStore {
    pub fn load<I>(rows: I, columns: &ColumnNames) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut dropped = 0usize;
        let mut records = Vec::new();
        for (idx, raw) in rows.into_iter().enumerate() {
            match VocabRecord::from_raw(&raw, columns) {
                Some(record) => records.push(record),
                None => {
                    dropped += 1;
                    debug!("dropping row {}: missing term or example", idx + 1);
                }
            }
        }

        let store = Self::from_records(records)?;
        info!(
            "loaded {} words in {} units ({} rows dropped)",
            store.len(),
            store.units.len(),
            dropped
        );
        Ok(store)
    }

    pub fn from_records(records: Vec<VocabRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }
        let units: BTreeSet<u32> = records.iter().filter_map(|r| r.unit).collect();
        Ok(Self {
            records,
            units: units.into_iter().collect(),
        })
    }

    pub fn records(&self) -> &[VocabRecord] {
        &self.records
    }

    pub fn units(&self) -> &[u32] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count_in_unit(&self, unit: u32) -> usize {
        self.records
            .iter()
            .filter(|r| r.unit == Some(unit))
            .count()
    }

    pub fn translated_count(&self, language: TargetLanguage) -> usize {
        self.records
            .iter()
            .filter(|r| r.translation(language).is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(unit: &str, term: &str, example: &str) -> RawRecord {
        [("Lektion", unit), ("Deutsch", term), ("Beispiel Satz", example)]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_drops_incomplete_rows() {
        let rows = vec![
            row("1", "Haus", "Das ist mein Haus."),
            row("1", "", "Ohne Wort."),
            row("2", "Auto", ""),
            row("", "Baum", "Der Baum ist alt."),
        ];
        let store = VocabularyStore::load(rows, &ColumnNames::default()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(
            store
                .records()
                .iter()
                .all(|r| !r.term.is_empty() && !r.example.is_empty())
        );
    }

    #[test]
    fn test_load_fails_when_nothing_survives() {
        let rows = vec![row("1", "", ""), row("2", "Haus", "")];
        let err = VocabularyStore::load(rows, &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn test_units_sorted_distinct_from_valid_rows_only() {
        let rows = vec![
            row("3", "a", "a."),
            row("1", "b", "b."),
            row("3", "c", "c."),
            row("x", "d", "d."),
            row("7", "", "dropped, so unit 7 never appears"),
            row("2", "e", "e."),
        ];
        let store = VocabularyStore::load(rows, &ColumnNames::default()).unwrap();
        assert_eq!(store.units(), &[1, 2, 3]);
        assert_eq!(store.count_in_unit(3), 2);
        assert_eq!(store.count_in_unit(7), 0);
    }

    #[test]
    fn test_translated_count() {
        let store = VocabularyStore::from_records(vec![
            VocabRecord::new(Some(1), "Haus", "Das ist mein Haus.")
                .with_translation(TargetLanguage::English, "house"),
            VocabRecord::new(Some(1), "Auto", "Das Auto ist neu."),
        ])
        .unwrap();
        assert_eq!(store.translated_count(TargetLanguage::English), 1);
        assert_eq!(store.translated_count(TargetLanguage::Farsi), 0);
    }
}
