pub mod config;
pub mod difficulty;
pub mod game;
pub mod runtime;
pub mod ui;
pub mod words;

use crate::{
    config::{Config, ConfigStore, FileConfigStore},
    difficulty::Difficulty,
    game::{Game, Phase},
    runtime::{CrosstermEventSource, EventSource, GameEvent, Runner},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

/// memorize-and-recall word game for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Memorize a shuffled list of words while the clock runs down, then type them back in order. Three presets control how many words you get and how long you may study them."
)]
pub struct Cli {
    /// difficulty preset to play (defaults to the last one played)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,
}

#[derive(Debug)]
pub struct App {
    pub game: Game,
}

impl App {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            game: Game::new(difficulty),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let difficulty = cli
        .difficulty
        .unwrap_or_else(|| config_store.load().difficulty());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(difficulty);
    let result = run(&mut terminal, &mut app, &config_store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend, C: ConfigStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config_store: &C,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new());
    event_loop(terminal, app, config_store, &runner)
}

fn event_loop<B: Backend, C: ConfigStore, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config_store: &C,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            GameEvent::Tick => {
                if app.game.phase() == Phase::Memorize {
                    app.game.on_tick();
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            GameEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            GameEvent::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break;
                }
                if handle_key(app, key.code, config_store) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

/// Forwards a key press into the phase-appropriate game transition.
/// Returns true when the app should quit.
fn handle_key<C: ConfigStore>(app: &mut App, code: KeyCode, config_store: &C) -> bool {
    match app.game.phase() {
        Phase::Start => match code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Left => app.game.prev_difficulty(),
            KeyCode::Right => app.game.next_difficulty(),
            KeyCode::Char('1') => app.game.set_difficulty(Difficulty::Easy),
            KeyCode::Char('2') => app.game.set_difficulty(Difficulty::Medium),
            KeyCode::Char('3') => app.game.set_difficulty(Difficulty::Hard),
            KeyCode::Enter => {
                let _ = config_store.save(&Config::from(app.game.difficulty()));
                app.game.start();
            }
            _ => {}
        },
        Phase::Memorize => {
            if code == KeyCode::Esc {
                app.game.exit_to_start();
            }
        }
        Phase::Recall => match code {
            KeyCode::Esc => app.game.exit_to_start(),
            KeyCode::Enter => app.game.submit(),
            KeyCode::Backspace => app.game.backspace(),
            KeyCode::Char(c) => app.game.write(c),
            _ => {}
        },
        Phase::Complete => match code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Enter | KeyCode::Char('r') => app.game.play_again(),
            _ => {}
        },
    }

    false
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::Parser;
    use ratatui::{backend::TestBackend, Terminal};
    use std::cell::RefCell;

    /// In-memory config store so tests never touch the real config dir
    struct MemoryConfigStore {
        saved: RefCell<Option<Config>>,
    }

    impl MemoryConfigStore {
        fn new() -> Self {
            Self {
                saved: RefCell::new(None),
            }
        }
    }

    impl ConfigStore for MemoryConfigStore {
        fn load(&self) -> Config {
            self.saved.borrow().clone().unwrap_or_default()
        }

        fn save(&self, cfg: &Config) -> std::io::Result<()> {
            *self.saved.borrow_mut() = Some(cfg.clone());
            Ok(())
        }
    }

    fn drive_to_recall(app: &mut App) {
        let store = MemoryConfigStore::new();
        handle_key(app, KeyCode::Enter, &store);
        assert_matches!(app.game.phase(), Phase::Memorize);
        while app.game.phase() == Phase::Memorize {
            app.game.on_tick();
        }
        assert_matches!(app.game.phase(), Phase::Recall);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["remem"]);
        assert_eq!(cli.difficulty, None);
    }

    #[test]
    fn test_cli_difficulty_flag() {
        let cli = Cli::parse_from(["remem", "-d", "medium"]);
        assert_eq!(cli.difficulty, Some(Difficulty::Medium));

        let cli = Cli::parse_from(["remem", "--difficulty", "hard"]);
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn test_cli_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["remem", "-d", "nightmare"]).is_err());
    }

    #[test]
    fn test_app_new_starts_idle() {
        let app = App::new(Difficulty::Medium);

        assert_matches!(app.game.phase(), Phase::Start);
        assert_eq!(app.game.difficulty(), Difficulty::Medium);
        assert!(app.game.words().is_empty());
    }

    #[test]
    fn test_quit_keys_from_start() {
        let store = MemoryConfigStore::new();
        let mut app = App::new(Difficulty::Easy);

        assert!(handle_key(&mut app, KeyCode::Esc, &store));
        assert!(handle_key(&mut app, KeyCode::Char('q'), &store));
    }

    #[test]
    fn test_difficulty_selection_keys() {
        let store = MemoryConfigStore::new();
        let mut app = App::new(Difficulty::Easy);

        handle_key(&mut app, KeyCode::Right, &store);
        assert_eq!(app.game.difficulty(), Difficulty::Medium);
        handle_key(&mut app, KeyCode::Left, &store);
        assert_eq!(app.game.difficulty(), Difficulty::Easy);
        handle_key(&mut app, KeyCode::Char('3'), &store);
        assert_eq!(app.game.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_start_saves_difficulty() {
        let store = MemoryConfigStore::new();
        let mut app = App::new(Difficulty::Easy);

        handle_key(&mut app, KeyCode::Char('2'), &store);
        handle_key(&mut app, KeyCode::Enter, &store);

        assert_matches!(app.game.phase(), Phase::Memorize);
        assert_eq!(store.load().difficulty(), Difficulty::Medium);
    }

    #[test]
    fn test_exit_key_abandons_session() {
        let store = MemoryConfigStore::new();
        let mut app = App::new(Difficulty::Easy);

        handle_key(&mut app, KeyCode::Enter, &store);
        assert_matches!(app.game.phase(), Phase::Memorize);

        handle_key(&mut app, KeyCode::Esc, &store);
        assert_matches!(app.game.phase(), Phase::Start);
        assert!(app.game.words().is_empty());
    }

    #[test]
    fn test_full_game_via_key_events() {
        let store = MemoryConfigStore::new();
        let mut app = App::new(Difficulty::Easy);
        drive_to_recall(&mut app);

        while app.game.phase() == Phase::Recall {
            let answer = app.game.words()[app.game.current_index()].text.clone();
            for c in answer.chars() {
                handle_key(&mut app, KeyCode::Char(c), &store);
            }
            handle_key(&mut app, KeyCode::Enter, &store);
        }

        assert_matches!(app.game.phase(), Phase::Complete);
        assert_eq!(app.game.score(), 5);
    }

    #[test]
    fn test_backspace_key_edits_input() {
        let store = MemoryConfigStore::new();
        let mut app = App::new(Difficulty::Easy);
        drive_to_recall(&mut app);

        handle_key(&mut app, KeyCode::Char('a'), &store);
        handle_key(&mut app, KeyCode::Char('b'), &store);
        handle_key(&mut app, KeyCode::Backspace, &store);

        assert_eq!(app.game.input(), "a");
    }

    #[test]
    fn test_play_again_key_from_complete() {
        let store = MemoryConfigStore::new();
        let mut app = App::new(Difficulty::Easy);
        drive_to_recall(&mut app);

        while app.game.phase() == Phase::Recall {
            handle_key(&mut app, KeyCode::Char('z'), &store);
            handle_key(&mut app, KeyCode::Enter, &store);
        }
        assert_matches!(app.game.phase(), Phase::Complete);

        handle_key(&mut app, KeyCode::Char('r'), &store);

        assert_matches!(app.game.phase(), Phase::Memorize);
        assert_eq!(app.game.words().len(), 5);
        assert_eq!(app.game.score(), 0);
        assert_eq!(app.game.current_index(), 0);
    }

    #[test]
    fn test_quit_keys_from_complete() {
        let store = MemoryConfigStore::new();
        let mut app = App::new(Difficulty::Easy);
        drive_to_recall(&mut app);

        while app.game.phase() == Phase::Recall {
            handle_key(&mut app, KeyCode::Enter, &store);
        }

        assert!(handle_key(&mut app, KeyCode::Esc, &store));
        assert!(handle_key(&mut app, KeyCode::Char('q'), &store));
    }

    #[test]
    fn test_ui_renders_start_phase() {
        let app = App::new(Difficulty::Easy);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("remem"));
        assert!(content.contains("Easy"));
    }

    #[test]
    fn test_ui_renders_memorize_phase() {
        let mut app = App::new(Difficulty::Easy);
        app.game.start();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("memorize these words"));
        assert!(content.contains("10s"));
    }

    #[test]
    fn test_ui_renders_recall_phase() {
        let mut app = App::new(Difficulty::Easy);
        drive_to_recall(&mut app);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("word 1 of 5"));
    }

    #[test]
    fn test_ui_renders_complete_phase() {
        let store = MemoryConfigStore::new();
        let mut app = App::new(Difficulty::Easy);
        drive_to_recall(&mut app);

        while app.game.phase() == Phase::Recall {
            handle_key(&mut app, KeyCode::Enter, &store);
        }
        assert_matches!(app.game.phase(), Phase::Complete);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("0 out of 5"));
        assert!(content.contains("✗"));
    }

    #[test]
    fn test_ui_renders_on_small_terminal() {
        let mut app = App::new(Difficulty::Hard);
        app.game.start();

        let backend = TestBackend::new(30, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();
    }
}
