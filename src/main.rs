use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use vocabdr::app::{App, AppScreen, RunOverrides};
use vocabdr::config::Config;
use vocabdr::engine::session::UnitFilter;
use vocabdr::engine::trainer::{PromptView, TrainerMode};
use vocabdr::event::{AppEvent, EventHandler};
use vocabdr::ui::components::flashcard::Flashcard;
use vocabdr::ui::components::menu::{Menu, MenuEntry};
use vocabdr::ui::components::progress_bar::ProgressBar;
use vocabdr::ui::components::quiz_card::QuizCard;
use vocabdr::ui::components::score_panel::ScorePanel;
use vocabdr::ui::components::summary::Summary;
use vocabdr::ui::layout::{PracticeLayout, centered_rect, pack_hint_lines};
use vocabdr::vocab::loader::{WordListSource, load_store};
use vocabdr::vocab::record::{ALL_LANGUAGES, TargetLanguage};

const TICK_RATE: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "vocabdr", version, about = "Terminal vocabulary trainer with flashcards and quizzes")]
struct Cli {
    #[arg(short, long, help = "Word list file (.csv, .tsv, .json) or http(s) URL")]
    words: Option<String>,

    #[arg(short, long, help = "Target language code (tr, en, uk, ar, fa, ku)")]
    lang: Option<String>,

    #[arg(short, long, help = "Start right away with this unit number or \"all\"")]
    unit: Option<UnitFilter>,

    #[arg(short, long, help = "Start in quiz mode")]
    quiz: bool,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Write log output to this file")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Print the unit numbers of the word list and exit")]
    list_units: bool,

    #[arg(long, help = "Load the word list, print a report and exit")]
    check: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let interactive = !cli.list_units && !cli.check;
    init_logging(cli.log_file.as_ref(), interactive)?;

    let config = Config::load().unwrap_or_else(|err| {
        log::warn!("could not read config, using defaults: {err:#}");
        Config::default()
    });

    let source = WordListSource::from_setting(cli.words.as_deref().or(config.word_list.as_deref()));

    let language = match cli.lang.as_deref() {
        Some(code) => match TargetLanguage::from_code(code) {
            Some(lang) => Some(lang),
            None => bail!("unknown language code {code:?}"),
        },
        None => None,
    };

    if cli.list_units {
        return list_units(&source, &config);
    }
    if cli.check {
        return check(&source, &config);
    }

    let overrides = RunOverrides {
        language,
        theme: cli.theme,
        unit: cli.unit,
        quiz: cli.quiz,
    };
    let mut app = App::new(config, source, overrides).with_persistence();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// The terminal UI only logs when a file is given; anything on stderr would
/// tear the alternate screen.
fn init_logging(log_file: Option<&PathBuf>, interactive: bool) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if interactive => return Ok(()),
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }
    builder.init();
    Ok(())
}

fn list_units(source: &WordListSource, config: &Config) -> Result<()> {
    let store = load_store(source, &config.columns)
        .with_context(|| format!("could not load word list from {source}"))?;
    for unit in store.units() {
        println!("{unit}");
    }
    Ok(())
}

fn check(source: &WordListSource, config: &Config) -> Result<()> {
    let store = load_store(source, &config.columns)
        .with_context(|| format!("could not load word list from {source}"))?;

    println!("source:  {source}");
    println!("records: {}", store.len());
    let units: Vec<String> = store.units().iter().map(u32::to_string).collect();
    println!(
        "units:   {}",
        if units.is_empty() {
            "-".to_string()
        } else {
            units.join(", ")
        }
    );
    for unit in store.units() {
        println!("  unit {unit}: {} words", store.count_in_unit(*unit));
    }
    println!("translations:");
    for &language in ALL_LANGUAGES {
        println!(
            "  {:<3} {:<28} {}",
            language.code(),
            language.column(),
            store.translated_count(language)
        );
    }
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Practice => handle_practice_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('u') => app.cycle(MenuEntry::Unit, true),
        KeyCode::Char('l') => app.cycle(MenuEntry::Language, true),
        KeyCode::Char('m') => app.cycle(MenuEntry::Mode, true),
        KeyCode::Char('t') => app.cycle(MenuEntry::Theme, true),
        KeyCode::Up | KeyCode::Char('k') => app.menu_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu_next(),
        KeyCode::Left | KeyCode::Char('h') => {
            let entry = app.selected_entry();
            if entry.is_choice() {
                app.cycle(entry, false);
            }
        }
        KeyCode::Right => {
            let entry = app.selected_entry();
            if entry.is_choice() {
                app.cycle(entry, true);
            }
        }
        KeyCode::Enter => {
            let entry = app.selected_entry();
            app.activate(entry);
        }
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.go_to_menu();
            return;
        }
        KeyCode::Tab => {
            app.toggle_mode();
            return;
        }
        _ => {}
    }

    match app.trainer.mode() {
        TrainerMode::Flashcard => match key.code {
            KeyCode::Char(' ') => app.reveal(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('n') => app.next_card(),
            _ => {}
        },
        TrainerMode::Quiz => match key.code {
            KeyCode::Char(ch @ '1'..='9') => {
                let choice = ch as usize - '1' as usize;
                app.answer(choice);
            }
            KeyCode::Up | KeyCode::Char('k') => app.select_prev_option(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
            KeyCode::Enter => app.confirm(),
            _ => {}
        },
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.restart(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Practice => render_practice(frame, app),
        AppScreen::Summary => render_summary(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let popup = centered_rect(60, 80, area);
    let menu = Menu::new(
        app.menu_values(),
        app.menu_selected,
        app.menu_status(),
        &app.theme,
    );
    frame.render_widget(menu, popup);

    let hints = pack_hint_lines(
        &[
            "[\u{2191}\u{2193}] Select",
            "[\u{2190}\u{2192}] Change",
            "[Enter] Start",
            "[r] Reload",
            "[q] Quit",
        ],
        area.width as usize,
    );
    let height = hints.len() as u16;
    if height < area.height {
        let footer = Rect::new(area.x, area.bottom() - height, area.width, height);
        let lines: Vec<Line> = hints
            .into_iter()
            .map(|h| Line::from(Span::styled(h, Style::default().fg(colors.muted()))))
            .collect();
        frame.render_widget(Paragraph::new(lines), footer);
    }
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let layout = PracticeLayout::new(area);

    let Some(prompt) = app.trainer.present() else {
        return;
    };
    let progress = app.trainer.progress();
    let unit = app
        .trainer
        .session()
        .map(|s| s.filter().to_string())
        .unwrap_or_default();
    let language = app.trainer.language().to_string();

    let mut header_spans = vec![
        Span::styled(
            " vocabdr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} | {unit} ", app.trainer.mode().as_str()),
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ];
    if !layout.tier.show_sidebar() {
        if let Some(p) = &progress {
            header_spans.push(Span::styled(
                format!("| \u{2713}{} \u{2717}{} | {}% ", p.correct, p.wrong, p.percent),
                Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
            ));
        }
    }
    let header = Paragraph::new(Line::from(header_spans))
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    match &prompt {
        PromptView::Flashcard(view) => {
            frame.render_widget(Flashcard::new(view, &language, &app.theme), layout.main);
        }
        PromptView::Quiz(view) => {
            frame.render_widget(
                QuizCard::new(view, app.quiz_selected, &language, &app.theme),
                layout.main,
            );
        }
    }

    if let (Some(sidebar), Some(p)) = (layout.sidebar, &progress) {
        frame.render_widget(ScorePanel::new(p, &unit, &language, &app.theme), sidebar);
    } else if let Some(p) = &progress {
        if layout.tier.show_progress_bar(area.height) && layout.main.height > 3 {
            let bar_area = Rect::new(
                layout.main.x,
                layout.main.bottom() - 3,
                layout.main.width,
                3,
            );
            frame.render_widget(ProgressBar::new("Progress", p.percent, &app.theme), bar_area);
        }
    }

    let wait_hint;
    let hints: Vec<&str> = match &prompt {
        PromptView::Flashcard(_) => vec![
            "[Space] Reveal",
            "[Enter/\u{2192}/n] Next",
            "[Tab] Quiz",
            "[Esc] Menu",
        ],
        PromptView::Quiz(view) if view.locked => {
            let remaining = app
                .trainer
                .pending_remaining(Instant::now())
                .map(|d| d.as_millis())
                .unwrap_or(0);
            wait_hint = format!("next in {remaining}ms");
            vec![
                wait_hint.as_str(),
                "[Enter] Skip",
                "[Tab] Flashcards",
                "[Esc] Menu",
            ]
        }
        PromptView::Quiz(_) => vec![
            "[1-9] Answer",
            "[\u{2191}\u{2193}+Enter] Choose",
            "[Tab] Flashcards",
            "[Esc] Menu",
        ],
    };
    let lines: Vec<Line> = pack_hint_lines(&hints, layout.footer.width as usize)
        .into_iter()
        .take(layout.footer.height as usize)
        .map(|h| Line::from(Span::styled(h, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), layout.footer);
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let Some(summary) = app.summary() else {
        return;
    };
    let unit = app
        .trainer
        .session()
        .map(|s| s.filter().to_string())
        .unwrap_or_default();
    let popup = centered_rect(50, 60, frame.area());
    frame.render_widget(Summary::new(summary, &unit, &app.theme), popup);
}
