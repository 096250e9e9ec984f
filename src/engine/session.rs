use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::info;
use rand::Rng;

use crate::engine::shuffle::shuffle;
use crate::error::{InvalidUnitFilter, SessionError};
use crate::vocab::record::VocabRecord;
use crate::vocab::store::VocabularyStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnitFilter {
    #[default]
    All,
    Unit(u32),
}

impl UnitFilter {
    pub fn matches(self, record: &VocabRecord) -> bool {
        match self {
            UnitFilter::All => true,
            UnitFilter::Unit(unit) => record.unit == Some(unit),
        }
    }
}

impl FromStr for UnitFilter {
    type Err = InvalidUnitFilter;

    /// Numbers compare by value, so "02" selects unit 2.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(UnitFilter::All);
        }
        trimmed
            .parse::<u32>()
            .map(UnitFilter::Unit)
            .map_err(|_| InvalidUnitFilter(s.to_string()))
    }
}

impl fmt::Display for UnitFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitFilter::All => f.write_str("all units"),
            UnitFilter::Unit(unit) => write!(f, "unit {unit}"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub wrong: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub correct: usize,
    pub wrong: usize,
    pub total: usize,
}

impl SessionSummary {
    /// Share of quiz answers that were right; `None` if nothing was answered.
    pub fn accuracy(&self) -> Option<f64> {
        let answered = self.correct + self.wrong;
        if answered == 0 {
            return None;
        }
        Some(self.correct as f64 / answered as f64 * 100.0)
    }
}

/// A shuffled pass over (part of) a vocabulary store.
pub struct Session {
    store: Arc<VocabularyStore>,
    filter: UnitFilter,
    order: Vec<usize>,
    cursor: usize,
    score: Score,
}

impl Session {
    pub fn start<R: Rng + ?Sized>(
        store: Arc<VocabularyStore>,
        filter: UnitFilter,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let mut order: Vec<usize> = store
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| filter.matches(record))
            .map(|(idx, _)| idx)
            .collect();

        if order.is_empty() {
            return Err(SessionError::Empty { filter });
        }

        shuffle(&mut order, rng);
        info!("session started: {} words from {}", order.len(), filter);

        Ok(Self {
            store,
            filter,
            order,
            cursor: 0,
            score: Score::default(),
        })
    }

    pub fn current(&self) -> Option<&VocabRecord> {
        let idx = *self.order.get(self.cursor)?;
        self.store.records().get(idx)
    }

    pub fn advance(&mut self) {
        if self.cursor < self.order.len() {
            self.cursor += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.order.len()
    }

    pub fn record_correct(&mut self) {
        self.score.correct += 1;
    }

    pub fn record_wrong(&mut self) {
        self.score.wrong += 1;
    }

    /// Percent of items already passed: 0 on the first item, 100 only once finished.
    pub fn progress_percent(&self) -> u8 {
        if self.order.is_empty() {
            return 0;
        }
        (self.cursor * 100 / self.order.len()) as u8
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 1-based number of the item on screen.
    pub fn position(&self) -> usize {
        (self.cursor + 1).min(self.order.len())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn filter(&self) -> UnitFilter {
        self.filter
    }

    pub fn store(&self) -> &VocabularyStore {
        &self.store
    }

    pub fn store_handle(&self) -> Arc<VocabularyStore> {
        Arc::clone(&self.store)
    }

    /// Records in practice order.
    pub fn records(&self) -> impl Iterator<Item = &VocabRecord> {
        self.order
            .iter()
            .filter_map(|&idx| self.store.records().get(idx))
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            correct: self.score.correct,
            wrong: self.score.wrong,
            total: self.order.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn store() -> Arc<VocabularyStore> {
        let records = (0..12)
            .map(|i| {
                let unit = if i % 4 == 3 { None } else { Some(i % 3 + 1) };
                VocabRecord::new(unit, &format!("Wort{i}"), &format!("Satz {i}."))
            })
            .collect();
        Arc::new(VocabularyStore::from_records(records).unwrap())
    }

    fn terms<'a>(records: impl Iterator<Item = &'a VocabRecord>) -> Vec<String> {
        let mut terms: Vec<String> = records.map(|r| r.term.clone()).collect();
        terms.sort();
        terms
    }

    #[test]
    fn test_all_is_permutation_of_store() {
        let store = store();
        let mut rng = SmallRng::seed_from_u64(3);
        let session = Session::start(Arc::clone(&store), UnitFilter::All, &mut rng).unwrap();
        assert_eq!(session.len(), store.len());
        assert_eq!(terms(session.records()), terms(store.records().iter()));
    }

    #[test]
    fn test_unit_filter_selects_exactly_that_unit() {
        let store = store();
        let mut rng = SmallRng::seed_from_u64(4);
        let session = Session::start(Arc::clone(&store), UnitFilter::Unit(2), &mut rng).unwrap();
        assert_eq!(session.len(), store.count_in_unit(2));
        assert!(session.records().all(|r| r.unit == Some(2)));
    }

    #[test]
    fn test_unmatched_filter_is_empty_session() {
        let mut rng = SmallRng::seed_from_u64(5);
        let err = Session::start(store(), UnitFilter::Unit(9), &mut rng)
            .err()
            .unwrap();
        assert_eq!(
            err,
            SessionError::Empty {
                filter: UnitFilter::Unit(9)
            }
        );
    }

    #[test]
    fn test_session_does_not_reorder_store() {
        let store = store();
        let before = terms(store.records().iter());
        let original_first = store.records()[0].term.clone();
        let mut rng = SmallRng::seed_from_u64(6);
        let _session = Session::start(Arc::clone(&store), UnitFilter::All, &mut rng).unwrap();
        assert_eq!(store.records()[0].term, original_first);
        assert_eq!(terms(store.records().iter()), before);
    }

    #[test]
    fn test_cursor_progress_and_finish() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut session = Session::start(store(), UnitFilter::Unit(1), &mut rng).unwrap();
        let len = session.len();
        assert_eq!(session.progress_percent(), 0);
        assert_eq!(session.position(), 1);
        assert!(session.current().is_some());

        for _ in 0..len {
            assert!(session.progress_percent() < 100);
            session.advance();
        }
        assert!(session.is_finished());
        assert!(session.current().is_none());
        assert_eq!(session.progress_percent(), 100);

        session.advance();
        assert_eq!(session.cursor(), len);
    }

    #[test]
    fn test_progress_percent_floors() {
        let records = (0..3)
            .map(|i| VocabRecord::new(None, &format!("w{i}"), "s."))
            .collect();
        let store = Arc::new(VocabularyStore::from_records(records).unwrap());
        let mut rng = SmallRng::seed_from_u64(9);
        let mut session = Session::start(store, UnitFilter::All, &mut rng).unwrap();
        session.advance();
        assert_eq!(session.progress_percent(), 33);
        session.advance();
        assert_eq!(session.progress_percent(), 66);
    }

    #[test]
    fn test_unit_filter_parsing() {
        assert_eq!("all".parse::<UnitFilter>().unwrap(), UnitFilter::All);
        assert_eq!(" ALL ".parse::<UnitFilter>().unwrap(), UnitFilter::All);
        assert_eq!("02".parse::<UnitFilter>().unwrap(), UnitFilter::Unit(2));
        assert!("two".parse::<UnitFilter>().is_err());
    }

    #[test]
    fn test_summary_accuracy() {
        let summary = SessionSummary {
            correct: 3,
            wrong: 1,
            total: 4,
        };
        assert_eq!(summary.accuracy(), Some(75.0));
        let untouched = SessionSummary {
            correct: 0,
            wrong: 0,
            total: 4,
        };
        assert_eq!(untouched.accuracy(), None);
    }
}
