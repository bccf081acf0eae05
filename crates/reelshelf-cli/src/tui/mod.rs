use std::io;
use std::path::Path;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use reelshelf_core::store::Slot;
use reelshelf_core::{Collection, Field, FormController, FormMode, LoadStatus, Submission};

pub mod form_pane;
pub mod list_pane;

/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Form,
}

/// One row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Text(Field),
    Kind,
}

/// A message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Application state for the shelf TUI.
#[derive(Debug)]
pub struct App<S: Slot> {
    pub collection: Collection<S>,
    pub form: FormController,
    pub focus: Focus,
    pub selected: usize,
    /// Index into [`App::inputs`] of the focused form row.
    pub active_input: usize,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl<S: Slot> App<S> {
    pub fn new(collection: Collection<S>) -> Self {
        Self {
            collection,
            form: FormController::new(),
            focus: Focus::List,
            selected: 0,
            active_input: 0,
            notice: None,
            should_quit: false,
        }
    }

    /// Form rows in display order. The last row follows the draft's kind.
    pub fn inputs(&self) -> [Input; 6] {
        [
            Input::Text(Field::Title),
            Input::Text(Field::Description),
            Input::Kind,
            Input::Text(Field::Year),
            Input::Text(Field::Genre),
            Input::Text(self.form.draft().kind.detail_field()),
        ]
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Notices last until the next key press.
        self.notice = None;
        match self.focus {
            Focus::List => self.handle_list_key(key.code),
            Focus::Form => self.handle_form_key(key.code),
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.collection.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(stars) = c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                    self.rate_selected(stars);
                }
            }
            KeyCode::Char('e') | KeyCode::Enter => self.edit_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('n') | KeyCode::Tab => {
                self.focus = Focus::Form;
                self.active_input = 0;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let input = self.inputs()[self.active_input];

        match key {
            KeyCode::Esc => {
                if self.form.mode() == FormMode::Edit {
                    self.form.cancel_edit();
                    self.notice = Some(Notice::info("Edit cancelled"));
                }
                self.focus = Focus::List;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.active_input = (self.active_input + 1) % self.inputs().len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                let len = self.inputs().len();
                self.active_input = (self.active_input + len - 1) % len;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if input == Input::Kind => {
                let kind = self.form.draft().kind.other();
                self.form.set_kind(kind);
            }
            KeyCode::Char(c) => {
                if let Input::Text(field) = input {
                    self.form.field_mut(field).push(c);
                }
            }
            KeyCode::Backspace => {
                if let Input::Text(field) = input {
                    self.form.field_mut(field).pop();
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        match self.form.submit(&mut self.collection) {
            Ok(Submission::Created { index }) => {
                self.selected = index;
                self.active_input = 0;
                self.notice = Some(Notice::info(format!("Added #{index}")));
            }
            Ok(Submission::Updated { index }) => {
                self.selected = index;
                self.focus = Focus::List;
                self.notice = Some(Notice::info(format!("Updated #{index}")));
            }
            Err(e) => self.report(&e),
        }
    }

    fn edit_selected(&mut self) {
        if self.form.begin_edit(&self.collection, self.selected) {
            self.focus = Focus::Form;
            self.active_input = 0;
            self.notice = Some(Notice::info(format!("Editing #{}", self.selected)));
        }
    }

    fn delete_selected(&mut self) {
        match self.collection.delete(self.selected) {
            Ok(removed) => {
                if self.form.editing_id() == Some(removed.id) {
                    self.form.cancel_edit();
                }
                self.selected = self
                    .selected
                    .min(self.collection.len().saturating_sub(1));
                self.notice = Some(Notice::info(format!("Deleted {}", removed.title)));
            }
            Err(e) => self.report(&e),
        }
    }

    fn rate_selected(&mut self, stars: u8) {
        if let Err(e) = self.collection.rate(self.selected, stars) {
            self.report(&e);
        }
    }

    fn report(&mut self, err: &reelshelf_core::Error) {
        log::warn!("{}", err);
        self.notice = Some(Notice::error(err.to_string()));
    }
}

/// Run the shelf TUI.
///
/// Sets up the terminal, runs the main event loop, and restores the terminal
/// on exit (including on error).
pub fn run_tui<S: Slot>(collection: Collection<S>, status: &LoadStatus) -> Result<()> {
    let mut app = App::new(collection);
    if let LoadStatus::Corrupt { reason } = status {
        app.notice = Some(Notice::error(format!(
            "Stored catalog was unreadable ({reason}); starting empty"
        )));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop, capturing any error so we can restore the terminal
    let result = run_event_loop(&mut terminal, app);

    // Restore terminal regardless of success or failure
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Open the database at `db_path` and run the TUI on it.
pub fn run_on_database(db_path: &Path) -> Result<()> {
    let slot = reelshelf_core::store::SqliteSlot::open(db_path)?;
    let (collection, status) = Collection::load(slot)?;
    run_tui(collection, &status)
}

fn run_event_loop<S: Slot>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render<S: Slot>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Panes
            Constraint::Length(3), // Status / help bar
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[0]);

    form_pane::render(frame, app, panes[0]);
    list_pane::render(frame, app, panes[1]);
    render_status(frame, app, chunks[1]);
}

fn render_status<S: Slot>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let (text, style) = match &app.notice {
        Some(notice) if notice.is_error => (
            format!("  \u{2717} {}", notice.text),
            Style::default().fg(Color::Red),
        ),
        Some(notice) => (
            format!("  {}", notice.text),
            Style::default().fg(Color::Green),
        ),
        None => (
            help_text(app.focus).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let status = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn help_text(focus: Focus) -> &'static str {
    match focus {
        Focus::List => "  \u{2191}/k Up  \u{2193}/j Down  1-5 Rate  e Edit  d Delete  n New  q Quit",
        Focus::Form => "  Tab Next field  Space Toggle kind  Enter Save  Esc Cancel",
    }
}
