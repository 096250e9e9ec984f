use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use vocabdr::engine::session::{SessionSummary, UnitFilter};
use vocabdr::engine::trainer::{AnswerOutcome, PromptView, Trainer, TrainerMode, TrainerSettings, TrainerState};
use vocabdr::error::{LoadError, SessionError};
use vocabdr::vocab::loader::{WordListSource, load_store};
use vocabdr::vocab::record::{ColumnNames, TargetLanguage, VocabRecord};
use vocabdr::vocab::store::VocabularyStore;

fn haus_auto_store() -> Arc<VocabularyStore> {
    let records = vec![
        VocabRecord::new(Some(1), "Haus", "Das ist mein Haus.")
            .with_translation(TargetLanguage::English, "house"),
        VocabRecord::new(Some(1), "Auto", "Das Auto ist neu.")
            .with_translation(TargetLanguage::English, "car"),
    ];
    Arc::new(VocabularyStore::from_records(records).expect("store"))
}

fn quiz_trainer(seed: u64) -> Trainer {
    let settings = TrainerSettings {
        language: TargetLanguage::English,
        ..TrainerSettings::default()
    };
    let mut trainer = Trainer::with_rng(settings, SmallRng::seed_from_u64(seed));
    trainer.set_mode(TrainerMode::Quiz);
    trainer
}

fn correct_slot(trainer: &Trainer) -> (usize, usize) {
    let Some(PromptView::Quiz(view)) = trainer.present() else {
        panic!("expected a quiz prompt");
    };
    let answer = match view.term.as_str() {
        "Haus" => "house",
        "Auto" => "car",
        other => panic!("unexpected term {other}"),
    };
    let right = view
        .options
        .iter()
        .position(|o| o.label == answer)
        .expect("correct answer offered");
    let wrong = (0..view.options.len()).find(|&i| i != right).expect("a wrong slot");
    (right, wrong)
}

#[test]
fn one_right_one_wrong_finishes_with_summary() {
    let mut trainer = quiz_trainer(7);
    trainer
        .enter_practice(haus_auto_store(), UnitFilter::All)
        .expect("session starts");

    let mut now = Instant::now();

    let (right, _) = correct_slot(&trainer);
    assert_eq!(trainer.submit_answer_at(right, now), AnswerOutcome::Correct);
    now += Duration::from_secs(1);
    assert!(trainer.tick_at(now));

    let (right, wrong) = correct_slot(&trainer);
    assert_eq!(
        trainer.submit_answer_at(wrong, now),
        AnswerOutcome::Wrong {
            correct_index: right
        }
    );
    let progress = trainer.progress().expect("progress");
    assert_eq!((progress.correct, progress.wrong), (1, 1));

    now += Duration::from_secs(1);
    assert!(trainer.tick_at(now));
    assert_eq!(
        trainer.state(),
        &TrainerState::Finished(SessionSummary {
            correct: 1,
            wrong: 1,
            total: 2,
        })
    );
    assert_eq!(trainer.progress().map(|p| p.percent), Some(100));
}

#[test]
fn unit_without_words_is_rejected() {
    let mut trainer = quiz_trainer(1);
    let err = trainer
        .enter_practice(haus_auto_store(), UnitFilter::Unit(2))
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::Empty {
            filter: UnitFilter::Unit(2)
        }
    );
    assert_eq!(trainer.state(), &TrainerState::Idle);
}

#[test]
fn restart_does_not_inherit_pending_advance() {
    let mut trainer = quiz_trainer(3);
    trainer
        .enter_practice(haus_auto_store(), UnitFilter::All)
        .expect("session starts");
    let now = Instant::now();
    trainer.submit_answer_at(0, now);
    trainer.restart().expect("restart");

    assert!(!trainer.tick_at(now + Duration::from_secs(5)));
    assert_eq!(trainer.progress().map(|p| p.position), Some(1));
    assert!(!trainer.is_locked());
}

#[test]
fn csv_file_on_disk_loads_into_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("words.csv");
    fs::write(
        &path,
        "\u{feff}Lektion, Deutsch ,Beispiel Satz,Turkisch,Englisch\n\
         1,Haus,Das ist mein Haus.,ev,house\n\
         1,Auto,,araba,car\n\
         3,Baum,Der Baum ist hoch.,ağaç,\n\
         ,,,,\n",
    )
    .expect("write csv");

    let store = load_store(&WordListSource::File(path), &ColumnNames::default()).expect("load");
    assert_eq!(store.len(), 2);
    assert_eq!(store.units(), &[1, 3]);
    assert_eq!(store.translated_count(TargetLanguage::English), 1);
    assert_eq!(store.translated_count(TargetLanguage::Turkish), 2);
}

#[test]
fn json_file_on_disk_loads_into_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("words.json");
    fs::write(
        &path,
        r#"[
            {"Lektion": "2", "Deutsch": "Hund", "Beispiel Satz": "Der Hund bellt.", "Englisch": "dog"},
            {"Lektion": "2", "Deutsch": "", "Beispiel Satz": "Leer."}
        ]"#,
    )
    .expect("write json");

    let store = load_store(&WordListSource::File(path), &ColumnNames::default()).expect("load");
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].translation(TargetLanguage::English), Some("dog"));
}

#[test]
fn word_list_without_valid_rows_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.csv");
    fs::write(&path, "Lektion,Deutsch,Beispiel Satz\n1,,\n").expect("write csv");

    let err = load_store(&WordListSource::File(path), &ColumnNames::default()).unwrap_err();
    assert!(matches!(err, LoadError::Empty));
}
