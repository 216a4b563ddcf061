use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use glyphpad_config::Config;
use glyphpad_engine::{EditorSession, RuleTable};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::{
    env,
    io::stdout,
    path::PathBuf,
    process,
    time::{Duration, Instant},
};

const APP_TITLE: &str = "Egyptian Hieroglyph Transliteration Pad";

/// Poll interval of the event loop; also how often the debounce timer is
/// given a chance to fire.
const TICK_RATE: Duration = Duration::from_millis(50);

struct App {
    session: EditorSession,
    config: Config,
    scroll: u16,
    message: Option<String>,
}

impl App {
    fn new(session: EditorSession, config: Config) -> Self {
        Self {
            session,
            config,
            scroll: 0,
            message: None,
        }
    }

    /// Handle one key press; returns true when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.message = None;
        let now = Instant::now();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('s') => self.save(),
                KeyCode::Char('n') => self.session.new_file(),
                KeyCode::Char('z') => self.undo(),
                KeyCode::Char('y') => self.redo(),
                KeyCode::Char('w') => self.config.word_wrap = !self.config.word_wrap,
                KeyCode::Char('b') => self.config.status_bar = !self.config.status_bar,
                KeyCode::Char('g') => self.config.dark_mode = !self.config.dark_mode,
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Char(ch) => self.session.insert_char(ch, now),
            KeyCode::Enter => self.session.insert_char('\n', now),
            KeyCode::Backspace => self.session.backspace(now),
            KeyCode::Delete => self.session.delete_forward(now),
            KeyCode::Left => self.session.move_left(),
            KeyCode::Right => self.session.move_right(),
            KeyCode::Up => self.session.move_up(),
            KeyCode::Down => self.session.move_down(),
            KeyCode::Home => self.session.move_line_start(),
            KeyCode::End => self.session.move_line_end(),
            _ => {}
        }
        false
    }

    fn save(&mut self) {
        // Without a stored path, fall back to the display name in the
        // working directory; there are no dialogs in a terminal session.
        let result = match self.session.path() {
            Some(_) => self.session.save(),
            None => {
                let fallback = PathBuf::from(self.session.file_name());
                self.session.save_as(&fallback)
            }
        };
        self.message = Some(match result {
            Ok(()) => format!("Saved {}", self.session.file_name()),
            Err(e) => format!("Save failed: {e}"),
        });
    }

    fn undo(&mut self) {
        if self.session.undo().is_err() {
            self.message = Some("Nothing to undo".to_string());
        }
    }

    fn redo(&mut self) {
        if self.session.redo().is_err() {
            self.message = Some("Nothing to redo".to_string());
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let file_path = match args.len() {
        1 => None,
        2 => Some(PathBuf::from(&args[1])),
        _ => {
            eprintln!("Usage: {} [file.txt]", args[0]);
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Warning: failed to load config, using defaults: {e}");
            Config::default()
        }
    };

    let mut session = EditorSession::new(RuleTable::egyptological());
    if let Some(path) = &file_path {
        if let Err(e) = session.open(path) {
            eprintln!("Error: cannot open '{}': {e}", path.display());
            process::exit(1);
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, config);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // View settings persist between sessions
    if let Err(e) = app.config.save() {
        eprintln!("Warning: failed to save config: {e}");
    }

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && app.handle_key(key)
            {
                return Ok(());
            }
        }

        // Quiescence check: captures a coalesced history snapshot once the
        // user has paused typing.
        app.session.tick(Instant::now());
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let (fg, bg) = if app.config.dark_mode {
        (Color::Rgb(255, 255, 255), Color::Rgb(32, 32, 32))
    } else {
        (Color::Rgb(0, 0, 0), Color::Rgb(255, 255, 255))
    };
    let base = Style::default().fg(fg).bg(bg);

    let mut constraints = vec![Constraint::Min(0)];
    if app.config.status_bar {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    // Editor pane
    let editor_area = chunks[0];
    let dirty_marker = if app.session.is_dirty() { "*" } else { "" };
    let title = format!("{}{} | {}", app.session.file_name(), dirty_marker, APP_TITLE);

    let (line, col) = app.session.cursor_position();
    let (line, col) = (line - 1, col - 1);

    // Keep the caret line inside the viewport
    let inner_height = editor_area.height.saturating_sub(2) as usize;
    if line < app.scroll as usize {
        app.scroll = line as u16;
    } else if inner_height > 0 && line >= app.scroll as usize + inner_height {
        app.scroll = (line + 1 - inner_height) as u16;
    }

    let mut editor = Paragraph::new(app.session.buffer())
        .style(base)
        .scroll((app.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    if app.config.word_wrap {
        editor = editor.wrap(Wrap { trim: false });
    }
    f.render_widget(editor, editor_area);

    let caret_x = editor_area.x + 1 + (col as u16).min(editor_area.width.saturating_sub(2));
    let caret_y = editor_area.y + 1 + (line - app.scroll as usize) as u16;
    f.set_cursor_position(Position::new(caret_x, caret_y));

    // Status bar
    if app.config.status_bar {
        let mut status = format!("Ln {}, Col {}", line + 1, col + 1);
        if let Some(message) = &app.message {
            status.push_str(" | ");
            status.push_str(message);
        }
        f.render_widget(Paragraph::new(status).style(base), chunks[1]);
    }

    // Key bindings
    let help = Line::from(vec![Span::raw(
        "^Q Quit | ^S Save | ^N New | ^Z Undo | ^Y Redo | ^W Wrap | ^B Status bar | ^G Dark mode",
    )]);
    let last = chunks[chunks.len() - 1];
    f.render_widget(Paragraph::new(vec![help]).style(base), last);
}
