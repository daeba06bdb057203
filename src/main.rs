mod ui;

use clap::{builder::NonEmptyStringValueParser, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use taja::{
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    content::{ContentPack, Difficulty, DrillLevel, Language, PracticeMode, TextPicker},
    drill::PositionDrill,
    logging::init_file_logging,
    runtime::{CrosstermEventSource, FixedTicker, KeyInput, Runner, TutorEvent},
    session::PracticeSession,
};
use tracing::{info, warn};

/// korean and english typing tutor with stroke-aware speed and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing tutor for Korean and English: finger-placement drills plus word, sentence and paragraph tests scored by keystrokes, so a composed Hangul syllable counts every key that built it."
)]
pub struct Cli {
    /// language to practice
    #[clap(short = 'l', long, value_enum)]
    language: Option<Language>,

    /// practice mode
    #[clap(short = 'm', long, value_enum)]
    mode: Option<PracticeMode>,

    /// difficulty for word and sentence tests
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// key set for the position drill
    #[clap(long, value_enum)]
    level: Option<DrillLevel>,

    /// custom text to type instead of the built-in pools
    #[clap(short = 'p', long, value_parser = NonEmptyStringValueParser::new())]
    prompt: Option<String>,

    /// write a log file to the state directory (filter with TAJA_LOG)
    #[clap(long)]
    log: bool,

    /// remember the chosen language, mode, difficulty and level
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line flags win over the stored config
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(level) = self.level {
            config.drill_level = level;
        }
        if self.prompt.is_some() && config.mode == PracticeMode::Position {
            config.mode = PracticeMode::Sentence;
        }
        config
    }
}

#[derive(Debug)]
pub enum Screen {
    Drill(PositionDrill<SystemClock>),
    Practice(PracticeSession<SystemClock>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub screen: Screen,
    pack: ContentPack,
    picker: TextPicker,
    custom_prompt: Option<String>,
}

impl App {
    pub fn new(config: Config, custom_prompt: Option<String>) -> Result<Self, Box<dyn Error>> {
        let pack = ContentPack::load(config.language)?;
        let mut picker = TextPicker::new();
        let screen = Self::make_screen(&config, &pack, &mut picker, custom_prompt.as_deref());
        Ok(Self {
            config,
            screen,
            pack,
            picker,
            custom_prompt,
        })
    }

    fn make_screen(
        config: &Config,
        pack: &ContentPack,
        picker: &mut TextPicker,
        custom_prompt: Option<&str>,
    ) -> Screen {
        if config.mode == PracticeMode::Position {
            let keys = pack.drill_keys(config.drill_level).to_vec();
            return Screen::Drill(PositionDrill::new(
                keys,
                SystemClock,
                Duration::from_millis(config.advance_delay_ms),
            ));
        }

        let text = Self::pick_text(config, pack, picker, custom_prompt);
        Screen::Practice(PracticeSession::new(
            text,
            config.mode,
            SystemClock,
            Duration::from_millis(config.refresh_ms),
        ))
    }

    fn pick_text(
        config: &Config,
        pack: &ContentPack,
        picker: &mut TextPicker,
        custom_prompt: Option<&str>,
    ) -> String {
        match custom_prompt {
            Some(prompt) => prompt.to_string(),
            None => picker
                .pick(pack, config.mode, config.difficulty)
                .unwrap_or_default(),
        }
    }

    fn rebuild_screen(&mut self) {
        self.screen = Self::make_screen(
            &self.config,
            &self.pack,
            &mut self.picker,
            self.custom_prompt.as_deref(),
        );
    }

    /// New text for a test, or a new key for the drill
    fn regenerate(&mut self) {
        if let Screen::Drill(drill) = &mut self.screen {
            drill.skip();
            return;
        }
        let text = Self::pick_text(
            &self.config,
            &self.pack,
            &mut self.picker,
            self.custom_prompt.as_deref(),
        );
        if let Screen::Practice(session) = &mut self.screen {
            session.restart(text);
        }
    }

    fn cycle_mode(&mut self) {
        self.config.mode = self.config.mode.next();
        if self.config.mode == PracticeMode::Position {
            // a custom prompt only makes sense for typing tests
            self.custom_prompt = None;
        }
        self.rebuild_screen();
    }

    fn toggle_language(&mut self) {
        let language = self.config.language.toggle();
        match ContentPack::load(language) {
            Ok(pack) => {
                self.config.language = language;
                self.pack = pack;
                self.picker = TextPicker::new();
                self.rebuild_screen();
            }
            Err(err) => warn!(%language, error = %err, "could not switch language"),
        }
    }

    /// Difficulty for tests, key set for the drill
    fn cycle_tier(&mut self) {
        if self.config.mode == PracticeMode::Position {
            self.config.drill_level = self.config.drill_level.next();
            let keys = self.pack.drill_keys(self.config.drill_level).to_vec();
            if let Screen::Drill(drill) = &mut self.screen {
                drill.set_keys(keys);
            }
        } else if self.config.mode.uses_difficulty() {
            self.config.difficulty = self.config.difficulty.next();
            self.regenerate();
        }
    }

    /// True when something changed on screen
    fn on_tick(&mut self) -> bool {
        match &mut self.screen {
            Screen::Drill(drill) => drill.on_tick(),
            Screen::Practice(session) => session.on_tick(),
        }
    }

    fn on_key(&mut self, key: KeyInput) -> Control {
        match key {
            KeyInput::Control('c') => return Control::Quit,
            KeyInput::Control('r') => self.regenerate(),
            KeyInput::Control('l') => self.toggle_language(),
            KeyInput::Control('d') => self.cycle_tier(),
            KeyInput::Tab => self.cycle_mode(),
            _ => return self.on_screen_key(key),
        }
        Control::Continue
    }

    fn on_screen_key(&mut self, key: KeyInput) -> Control {
        let completed = matches!(&self.screen, Screen::Practice(s) if s.is_completed());
        if completed {
            match key {
                KeyInput::Escape => return Control::Quit,
                KeyInput::Enter => self.regenerate(),
                _ => {}
            }
            return Control::Continue;
        }

        match &mut self.screen {
            Screen::Drill(drill) => match key {
                KeyInput::Escape => drill.skip(),
                KeyInput::Char(c) => drill.press(&c.to_string()),
                _ => {}
            },
            Screen::Practice(session) => match key {
                KeyInput::Escape => return Control::Quit,
                KeyInput::Char(c) => session.type_char(c),
                KeyInput::Backspace => session.backspace(),
                KeyInput::Enter => session.enter(),
                _ => {}
            },
        }
        Control::Continue
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.log {
        let path = AppDirs::log_path().ok_or_else(|| taja::error::Error::NoStateDir {
            purpose: "log file".to_string(),
        })?;
        init_file_logging(&path)?;
    }

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    if !stdin().is_tty() {
        eprintln!("taja needs an interactive terminal");
        std::process::exit(1);
    }

    let mut app = App::new(config, cli.prompt.clone())?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let redraw = match runner.step() {
            TutorEvent::Tick => app.on_tick(),
            TutorEvent::Resize => true,
            TutorEvent::Key(key) => {
                if app.on_key(key) == Control::Quit {
                    break;
                }
                true
            }
        };

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
