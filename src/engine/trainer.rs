use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::engine::distractor::{DEFAULT_OPTION_COUNT, NO_TRANSLATION, OptionSet, build_options};
use crate::engine::pending::PendingAdvance;
use crate::engine::session::{Session, SessionSummary, UnitFilter};
use crate::error::SessionError;
use crate::vocab::record::TargetLanguage;
use crate::vocab::store::VocabularyStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrainerMode {
    #[default]
    Flashcard,
    Quiz,
}

impl TrainerMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TrainerMode::Flashcard => "flashcard",
            TrainerMode::Quiz => "quiz",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TrainerMode::Flashcard => TrainerMode::Quiz,
            TrainerMode::Quiz => TrainerMode::Flashcard,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrainerState {
    Idle,
    Practicing,
    Finished(SessionSummary),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct,
    Wrong,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView {
    pub label: String,
    pub mark: OptionMark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardView {
    pub term: String,
    pub translation: String,
    pub example: String,
    pub revealed: bool,
    pub position: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizView {
    pub term: String,
    pub options: Vec<OptionView>,
    pub locked: bool,
    pub position: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptView {
    Flashcard(FlashcardView),
    Quiz(QuizView),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressView {
    pub correct: usize,
    pub wrong: usize,
    pub percent: u8,
    pub position: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong { correct_index: usize },
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrainerSettings {
    pub language: TargetLanguage,
    pub option_count: usize,
    pub correct_delay: Duration,
    pub wrong_delay: Duration,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            language: TargetLanguage::Turkish,
            option_count: DEFAULT_OPTION_COUNT,
            correct_delay: Duration::from_millis(450),
            wrong_delay: Duration::from_millis(650),
        }
    }
}

/// Options for the item on screen and the learner's pick, once made.
struct QuizPrompt {
    options: OptionSet,
    chosen: Option<usize>,
}

/// Drives one practice session at a time: prompt assembly, answer scoring and the
/// delayed advance that follows a quiz answer.
pub struct Trainer {
    state: TrainerState,
    mode: TrainerMode,
    settings: TrainerSettings,
    session: Option<Session>,
    quiz: Option<QuizPrompt>,
    revealed: bool,
    pending: Option<PendingAdvance>,
    generation: u64,
    rng: SmallRng,
}

impl Trainer {
    pub fn new(settings: TrainerSettings) -> Self {
        Self::with_rng(settings, SmallRng::from_entropy())
    }

    pub fn with_rng(settings: TrainerSettings, rng: SmallRng) -> Self {
        Self {
            state: TrainerState::Idle,
            mode: TrainerMode::default(),
            settings,
            session: None,
            quiz: None,
            revealed: false,
            pending: None,
            generation: 0,
            rng,
        }
    }

    pub fn state(&self) -> &TrainerState {
        &self.state
    }

    pub fn is_practicing(&self) -> bool {
        self.state == TrainerState::Practicing
    }

    pub fn mode(&self) -> TrainerMode {
        self.mode
    }

    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    pub fn language(&self) -> TargetLanguage {
        self.settings.language
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.quiz.as_ref().is_some_and(|q| q.chosen.is_some())
    }

    pub fn pending_remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|p| p.remaining(now))
    }

    /// Starts a fresh session. On error the trainer keeps its previous state.
    pub fn enter_practice(
        &mut self,
        store: Arc<VocabularyStore>,
        filter: UnitFilter,
    ) -> Result<(), SessionError> {
        let session = Session::start(store, filter, &mut self.rng)?;
        self.generation += 1;
        self.pending = None;
        self.session = Some(session);
        self.state = TrainerState::Practicing;
        self.refresh_prompt();
        Ok(())
    }

    /// Runs the current (or just finished) session's unit again.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        let store = session.store_handle();
        let filter = session.filter();
        self.enter_practice(store, filter)
    }

    pub fn exit(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.session = None;
        self.quiz = None;
        self.revealed = false;
        self.state = TrainerState::Idle;
    }

    pub fn set_mode(&mut self, mode: TrainerMode) {
        if self.mode != mode {
            self.toggle_mode();
        }
    }

    /// Flips flashcard/quiz without moving the cursor. An answered quiz prompt is
    /// kept as is, so its pending advance still fires on the next due tick and the
    /// prompt cannot be scored again after toggling back.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        if !self.is_practicing() {
            return;
        }
        if self.is_locked() {
            self.revealed = false;
        } else {
            self.refresh_prompt();
        }
    }

    pub fn set_language(&mut self, language: TargetLanguage) {
        self.settings.language = language;
        if self.is_practicing() && !self.is_locked() {
            self.refresh_prompt();
        }
    }

    pub fn present(&self) -> Option<PromptView> {
        if !self.is_practicing() {
            return None;
        }
        let session = self.session.as_ref()?;
        let record = session.current()?;

        match self.mode {
            TrainerMode::Flashcard => Some(PromptView::Flashcard(FlashcardView {
                term: record.term.clone(),
                translation: record
                    .translation(self.settings.language)
                    .unwrap_or(NO_TRANSLATION)
                    .to_string(),
                example: record.example.clone(),
                revealed: self.revealed,
                position: session.position(),
                total: session.len(),
            })),
            TrainerMode::Quiz => {
                let quiz = self.quiz.as_ref()?;
                let correct = quiz.options.correct_index();
                let options = quiz
                    .options
                    .options()
                    .iter()
                    .enumerate()
                    .map(|(idx, label)| {
                        let mark = match quiz.chosen {
                            Some(_) if idx == correct => OptionMark::Correct,
                            Some(chosen) if idx == chosen => OptionMark::Wrong,
                            _ => OptionMark::Neutral,
                        };
                        OptionView {
                            label: label.clone(),
                            mark,
                        }
                    })
                    .collect();
                Some(PromptView::Quiz(QuizView {
                    term: record.term.clone(),
                    options,
                    locked: quiz.chosen.is_some(),
                    position: session.position(),
                    total: session.len(),
                }))
            }
        }
    }

    pub fn progress(&self) -> Option<ProgressView> {
        let session = self.session.as_ref()?;
        let score = session.score();
        Some(ProgressView {
            correct: score.correct,
            wrong: score.wrong,
            percent: session.progress_percent(),
            position: session.position(),
            total: session.len(),
        })
    }

    /// Flashcards only: flips between the term and the translation side.
    pub fn reveal(&mut self) {
        if self.is_practicing() && self.mode == TrainerMode::Flashcard {
            self.revealed = !self.revealed;
        }
    }

    /// Flashcards only: moves on to the next card. A quiz answer still waiting for
    /// its advance is settled instead, so the item moves on exactly once.
    pub fn next(&mut self) {
        if self.is_practicing() && self.mode == TrainerMode::Flashcard && !self.settle_pending() {
            self.advance_and_present();
        }
    }

    pub fn submit_answer(&mut self, choice: usize) -> AnswerOutcome {
        self.submit_answer_at(choice, Instant::now())
    }

    pub fn submit_answer_at(&mut self, choice: usize, now: Instant) -> AnswerOutcome {
        if !self.is_practicing() || self.mode != TrainerMode::Quiz {
            debug!("answer {choice} ignored: not quizzing");
            return AnswerOutcome::Ignored;
        }
        let (Some(quiz), Some(session)) = (self.quiz.as_mut(), self.session.as_mut()) else {
            return AnswerOutcome::Ignored;
        };
        if quiz.chosen.is_some() || choice >= quiz.options.len() {
            debug!("answer {choice} ignored: prompt locked or out of range");
            return AnswerOutcome::Ignored;
        }

        quiz.chosen = Some(choice);
        let (outcome, delay) = if quiz.options.is_correct(choice) {
            session.record_correct();
            (AnswerOutcome::Correct, self.settings.correct_delay)
        } else {
            session.record_wrong();
            (
                AnswerOutcome::Wrong {
                    correct_index: quiz.options.correct_index(),
                },
                self.settings.wrong_delay,
            )
        };

        self.pending = Some(PendingAdvance::new(self.generation, now + delay));
        outcome
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Fires the scheduled advance once it is due. Returns whether it fired.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if !pending.belongs_to(self.generation) {
            self.pending = None;
            return false;
        }
        if !pending.is_due(now) {
            return false;
        }
        self.pending = None;
        self.advance_and_present();
        true
    }

    /// Fires a scheduled advance right away, skipping the rest of its delay.
    pub fn settle_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) if pending.belongs_to(self.generation) => {
                self.advance_and_present();
                true
            }
            _ => false,
        }
    }

    pub fn advance_and_present(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.advance();
        if session.is_finished() {
            let summary = session.summary();
            info!(
                "session finished: {} correct, {} wrong, {} words",
                summary.correct, summary.wrong, summary.total
            );
            self.quiz = None;
            self.pending = None;
            self.state = TrainerState::Finished(summary);
        } else {
            self.refresh_prompt();
        }
    }

    fn refresh_prompt(&mut self) {
        self.revealed = false;
        self.quiz = None;
        if self.mode != TrainerMode::Quiz {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(record) = session.current() else {
            return;
        };
        let options = build_options(
            session.store(),
            record,
            self.settings.language,
            self.settings.option_count,
            &mut self.rng,
        );
        self.quiz = Some(QuizPrompt {
            options,
            chosen: None,
        });
    }
}
