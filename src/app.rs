use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use crate::config::Config;
use crate::engine::session::{SessionSummary, UnitFilter};
use crate::engine::trainer::{AnswerOutcome, PromptView, Trainer, TrainerMode, TrainerState};
use crate::error::SessionError;
use crate::ui::components::menu::{MENU_ENTRIES, MenuEntry, MenuStatus};
use crate::ui::theme::Theme;
use crate::vocab::loader::{WordListSource, load_store};
use crate::vocab::record::TargetLanguage;
use crate::vocab::store::VocabularyStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Practice,
    Summary,
}

/// Command-line choices that apply to this run only and are never written back.
#[derive(Clone, Debug, Default)]
pub struct RunOverrides {
    pub language: Option<TargetLanguage>,
    pub theme: Option<String>,
    pub unit: Option<UnitFilter>,
    pub quiz: bool,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: Theme,
    pub source: WordListSource,
    pub store: Option<Arc<VocabularyStore>>,
    pub load_error: Option<String>,
    pub status: Option<String>,
    pub trainer: Trainer,
    pub unit_filter: UnitFilter,
    pub menu_selected: usize,
    pub quiz_selected: usize,
    pub should_quit: bool,
    persist_config: bool,
    shown_position: Option<usize>,
}

impl App {
    pub fn new(config: Config, source: WordListSource, overrides: RunOverrides) -> Self {
        let theme_name = overrides.theme.as_deref().unwrap_or(&config.theme);
        let theme = Theme::load(theme_name).unwrap_or_else(|| {
            warn!("theme {theme_name} not found, using default");
            Theme::default()
        });

        let mut settings = config.trainer_settings();
        if let Some(language) = overrides.language {
            settings.language = language;
        }
        let mut trainer = Trainer::new(settings);
        if config.start_in_quiz || overrides.quiz {
            trainer.set_mode(TrainerMode::Quiz);
        }

        let mut app = Self {
            screen: AppScreen::Menu,
            config,
            theme,
            source,
            store: None,
            load_error: None,
            status: None,
            trainer,
            unit_filter: UnitFilter::All,
            menu_selected: 0,
            quiz_selected: 0,
            should_quit: false,
            persist_config: false,
            shown_position: None,
        };
        app.reload();
        // A requested unit is tried as given; one missing from the list leaves the
        // app in the menu with the empty-unit message.
        if let Some(unit) = overrides.unit {
            app.unit_filter = unit;
            app.start_practice();
        }
        app
    }

    /// Write menu changes back to the config file.
    pub fn with_persistence(mut self) -> Self {
        self.persist_config = true;
        self
    }

    /// Reads the word list again from its source, dropping any running session.
    pub fn reload(&mut self) {
        self.trainer.exit();
        self.screen = AppScreen::Menu;
        self.status = None;

        match load_store(&self.source, &self.config.columns) {
            Ok(store) => {
                info!(
                    "loaded {} words in {} units from {}",
                    store.len(),
                    store.units().len(),
                    self.source
                );
                if let UnitFilter::Unit(unit) = self.unit_filter {
                    if !store.units().contains(&unit) {
                        self.unit_filter = UnitFilter::All;
                    }
                }
                self.store = Some(Arc::new(store));
                self.load_error = None;
            }
            Err(err) => {
                warn!("failed to load word list from {}: {err}", self.source);
                self.store = None;
                self.load_error = Some(err.to_string());
            }
        }
    }

    pub fn start_practice(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };
        match self.trainer.enter_practice(store, self.unit_filter) {
            Ok(()) => {
                self.status = None;
                self.quiz_selected = 0;
                self.sync_screen();
            }
            Err(SessionError::Empty { filter }) => {
                self.status = Some(format!("No words in {filter}. Pick another unit."));
                self.screen = AppScreen::Menu;
            }
        }
    }

    pub fn restart(&mut self) {
        match self.trainer.restart() {
            Ok(()) => {
                self.quiz_selected = 0;
                self.sync_screen();
            }
            Err(err) => {
                self.status = Some(err.to_string());
                self.go_to_menu();
            }
        }
    }

    pub fn go_to_menu(&mut self) {
        self.trainer.exit();
        self.screen = AppScreen::Menu;
        self.shown_position = None;
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        match self.trainer.state() {
            TrainerState::Finished(summary) => Some(summary),
            _ => None,
        }
    }

    // --- Menu ---

    pub fn menu_next(&mut self) {
        self.menu_selected = (self.menu_selected + 1) % MENU_ENTRIES.len();
    }

    pub fn menu_prev(&mut self) {
        self.menu_selected = if self.menu_selected == 0 {
            MENU_ENTRIES.len() - 1
        } else {
            self.menu_selected - 1
        };
    }

    pub fn selected_entry(&self) -> MenuEntry {
        MENU_ENTRIES[self.menu_selected.min(MENU_ENTRIES.len() - 1)]
    }

    pub fn activate(&mut self, entry: MenuEntry) {
        match entry {
            MenuEntry::Start => self.start_practice(),
            MenuEntry::Quit => self.should_quit = true,
            other => self.cycle(other, true),
        }
    }

    /// Steps the value of a choice entry forwards or backwards.
    pub fn cycle(&mut self, entry: MenuEntry, forward: bool) {
        match entry {
            MenuEntry::Unit => self.cycle_unit(forward),
            MenuEntry::Language => {
                let current = self.trainer.language();
                let language = if forward { current.next() } else { current.prev() };
                self.trainer.set_language(language);
                self.config.target_language = language.code().to_string();
                self.save_config();
            }
            MenuEntry::Mode => {
                self.trainer.toggle_mode();
                self.config.start_in_quiz = self.trainer.mode() == TrainerMode::Quiz;
                self.save_config();
            }
            MenuEntry::Theme => self.cycle_theme(forward),
            MenuEntry::Start | MenuEntry::Quit => {}
        }
    }

    fn unit_choices(&self) -> Vec<UnitFilter> {
        let mut choices = vec![UnitFilter::All];
        if let Some(store) = &self.store {
            choices.extend(store.units().iter().map(|&u| UnitFilter::Unit(u)));
        }
        choices
    }

    fn cycle_unit(&mut self, forward: bool) {
        let choices = self.unit_choices();
        let idx = choices
            .iter()
            .position(|&f| f == self.unit_filter)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % choices.len()
        } else if idx == 0 {
            choices.len() - 1
        } else {
            idx - 1
        };
        self.unit_filter = choices[next];
        self.status = None;
    }

    fn cycle_theme(&mut self, forward: bool) {
        let themes = Theme::available_themes();
        if themes.is_empty() {
            return;
        }
        let idx = themes
            .iter()
            .position(|t| *t == self.theme.name)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % themes.len()
        } else if idx == 0 {
            themes.len() - 1
        } else {
            idx - 1
        };
        if let Some(theme) = Theme::load(&themes[next]) {
            self.config.theme = themes[next].clone();
            self.theme = theme;
            self.save_config();
        }
    }

    pub fn menu_values(&self) -> Vec<Option<String>> {
        MENU_ENTRIES
            .iter()
            .map(|entry| match entry {
                MenuEntry::Unit => Some(self.unit_filter.to_string()),
                MenuEntry::Language => Some(self.trainer.language().to_string()),
                MenuEntry::Mode => Some(self.trainer.mode().as_str().to_string()),
                MenuEntry::Theme => Some(self.theme.name.clone()),
                MenuEntry::Start | MenuEntry::Quit => None,
            })
            .collect()
    }

    pub fn menu_status(&self) -> MenuStatus {
        if let Some(err) = &self.load_error {
            return MenuStatus::Error(format!("Could not load word list: {err}  [r] reload"));
        }
        if let Some(status) = &self.status {
            return MenuStatus::Warning(status.clone());
        }
        match &self.store {
            Some(store) => {
                let language = self.trainer.language();
                MenuStatus::Ready(format!(
                    "{} words from {} ({} with {language} translation)",
                    store.len(),
                    self.source,
                    store.translated_count(language)
                ))
            }
            None => MenuStatus::Warning("No word list loaded".to_string()),
        }
    }

    fn save_config(&self) {
        if !self.persist_config {
            return;
        }
        if let Err(err) = self.config.save() {
            warn!("could not save config: {err:#}");
        }
    }

    // --- Practice ---

    pub fn toggle_mode(&mut self) {
        self.trainer.toggle_mode();
        self.quiz_selected = 0;
        self.sync_screen();
    }

    pub fn reveal(&mut self) {
        self.trainer.reveal();
    }

    pub fn next_card(&mut self) {
        self.trainer.next();
        self.sync_screen();
    }

    pub fn option_count(&self) -> usize {
        match self.trainer.present() {
            Some(PromptView::Quiz(view)) => view.options.len(),
            _ => 0,
        }
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 && !self.trainer.is_locked() {
            self.quiz_selected = (self.quiz_selected + 1) % count;
        }
    }

    pub fn select_prev_option(&mut self) {
        let count = self.option_count();
        if count > 0 && !self.trainer.is_locked() {
            self.quiz_selected = if self.quiz_selected == 0 {
                count - 1
            } else {
                self.quiz_selected - 1
            };
        }
    }

    pub fn answer(&mut self, choice: usize) -> AnswerOutcome {
        let outcome = self.trainer.submit_answer(choice);
        if outcome != AnswerOutcome::Ignored {
            self.quiz_selected = choice;
        }
        outcome
    }

    /// Enter in quiz mode: answer with the highlighted option, or skip the wait
    /// once the prompt is locked.
    pub fn confirm(&mut self) {
        if self.trainer.is_locked() {
            self.trainer.settle_pending();
            self.sync_screen();
        } else {
            self.answer(self.quiz_selected);
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if self.trainer.tick_at(now) {
            self.sync_screen();
        }
    }

    /// Follows the trainer onto the summary screen and resets the option cursor
    /// whenever a new word is shown.
    fn sync_screen(&mut self) {
        match self.trainer.state() {
            TrainerState::Practicing => self.screen = AppScreen::Practice,
            TrainerState::Finished(_) => self.screen = AppScreen::Summary,
            TrainerState::Idle => self.screen = AppScreen::Menu,
        }
        let position = self.trainer.progress().map(|p| p.position);
        if position != self.shown_position {
            self.shown_position = position;
            self.quiz_selected = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn app(overrides: RunOverrides) -> App {
        App::new(Config::default(), WordListSource::Bundled, overrides)
    }

    #[test]
    fn test_bundled_list_loads_into_menu() {
        let app = app(RunOverrides::default());
        assert_eq!(app.screen, AppScreen::Menu);
        assert!(app.store.is_some());
        assert!(app.load_error.is_none());
        assert!(matches!(app.menu_status(), MenuStatus::Ready(_)));
    }

    #[test]
    fn test_missing_file_reports_load_error() {
        let app = App::new(
            Config::default(),
            WordListSource::File("/nonexistent/words.csv".into()),
            RunOverrides::default(),
        );
        assert!(app.store.is_none());
        assert!(matches!(app.menu_status(), MenuStatus::Error(_)));

        let mut app = app;
        app.start_practice();
        assert_eq!(app.screen, AppScreen::Menu);
    }

    #[test]
    fn test_empty_unit_stays_in_menu_with_message() {
        let mut app = app(RunOverrides::default());
        app.unit_filter = UnitFilter::Unit(999);
        app.start_practice();
        assert_eq!(app.screen, AppScreen::Menu);
        assert!(matches!(app.menu_status(), MenuStatus::Warning(_)));
    }

    #[test]
    fn test_unit_override_starts_practice() {
        let app = app(RunOverrides {
            unit: Some(UnitFilter::Unit(1)),
            quiz: true,
            ..RunOverrides::default()
        });
        assert_eq!(app.screen, AppScreen::Practice);
        assert_eq!(app.trainer.mode(), TrainerMode::Quiz);
    }

    #[test]
    fn test_unknown_unit_override_stays_in_menu() {
        let app = app(RunOverrides {
            unit: Some(UnitFilter::Unit(999)),
            ..RunOverrides::default()
        });
        assert_eq!(app.screen, AppScreen::Menu);
        assert_eq!(app.unit_filter, UnitFilter::Unit(999));
        assert!(!app.trainer.is_practicing());
        assert!(app.trainer.progress().is_none());
        assert!(matches!(app.menu_status(), MenuStatus::Warning(msg) if msg.contains("unit 999")));
    }

    #[test]
    fn test_reload_resets_unit_missing_from_list() {
        let mut app = app(RunOverrides::default());
        app.unit_filter = UnitFilter::Unit(999);
        app.reload();
        assert_eq!(app.unit_filter, UnitFilter::All);
    }

    #[test]
    fn test_cycle_unit_wraps_through_all() {
        let mut app = app(RunOverrides::default());
        let units = app.store.as_ref().map(|s| s.units().len()).unwrap_or(0);
        for _ in 0..=units {
            app.cycle(MenuEntry::Unit, true);
        }
        assert_eq!(app.unit_filter, UnitFilter::All);
        app.cycle(MenuEntry::Unit, false);
        assert_ne!(app.unit_filter, UnitFilter::All);
    }

    #[test]
    fn test_quiz_runs_to_summary() {
        let mut app = app(RunOverrides {
            unit: Some(UnitFilter::Unit(1)),
            quiz: true,
            ..RunOverrides::default()
        });
        let total = app.trainer.progress().map(|p| p.total).unwrap_or(0);
        assert!(total > 0);

        let mut now = Instant::now();
        for _ in 0..total {
            assert_ne!(app.answer(0), AnswerOutcome::Ignored);
            now += Duration::from_secs(1);
            app.tick_at(now);
        }
        assert_eq!(app.screen, AppScreen::Summary);
        let summary = app.summary().copied();
        assert_eq!(summary.map(|s| s.total), Some(total));
        assert_eq!(summary.map(|s| s.correct + s.wrong), Some(total));

        app.restart();
        assert_eq!(app.screen, AppScreen::Practice);
    }

    #[test]
    fn test_confirm_while_locked_skips_delay() {
        let mut app = app(RunOverrides {
            unit: Some(UnitFilter::Unit(1)),
            quiz: true,
            ..RunOverrides::default()
        });
        app.select_next_option();
        app.confirm();
        assert!(app.trainer.is_locked());
        app.confirm();
        assert!(!app.trainer.is_locked() || app.screen == AppScreen::Summary);
        assert_eq!(app.quiz_selected, 0);
    }
}
