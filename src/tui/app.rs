//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::debug;

use crate::config::Config;
use crate::form::{FormError, PairStore, SubmissionHandler, ValidationReport, Validator};
use crate::models::{display_rows, resolve_label, PairField};
use crate::tui::components::{
    render_select_cell, OptionDropdown, PairTable, StatusDisplay, TextInput,
};
use crate::tui::events::AppEvent;
use crate::tui::ui::Styles;

const ROW_HEIGHT: u16 = 3;

/// Which cell column of the focused pair is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusColumn {
    Input,
    Select,
}

/// What the bottom table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// The last successfully submitted snapshot
    Snapshot,
    /// The live collection as it is being edited
    Live,
}

/// Main TUI application state
pub struct App {
    pub config: Config,
    pub store: PairStore,
    pub validator: Validator,
    pub handler: SubmissionHandler,

    // Validation display state
    pub report: ValidationReport,
    pub show_errors: bool,

    // Focus and editing state
    pub focus_row: usize,
    pub focus_col: FocusColumn,
    pub text_input: TextInput,
    pub dropdown: OptionDropdown,
    dropdown_anchor: Option<Rect>,

    // Display state
    pub display_mode: DisplayMode,
    pub table: PairTable,
    pub status: StatusDisplay,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let validator = Validator::new();
        let handler = SubmissionHandler::simulated(validator.clone(), config.submit_delay());

        let mut store = PairStore::new();
        store.subscribe(|event| debug!(?event, "store changed"));

        Self {
            config,
            store,
            validator,
            handler,
            report: ValidationReport::default(),
            show_errors: false,
            focus_row: 0,
            focus_col: FocusColumn::Input,
            text_input: TextInput::new(),
            dropdown: OptionDropdown::new(),
            dropdown_anchor: None,
            display_mode: DisplayMode::Snapshot,
            table: PairTable::default(),
            status: StatusDisplay::new(),
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(event) = self.handle_key_event(key).await? {
                        self.apply_event(event);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.should_quit = true,
            AppEvent::ShowInfo(message) => self.status.set_info(message),
            AppEvent::ShowSuccess(message) => self.status.set_success(message),
            AppEvent::ShowError(message) => self.status.set_error(message),
            AppEvent::ToggleDisplayMode => {
                self.display_mode = match self.display_mode {
                    DisplayMode::Snapshot => DisplayMode::Live,
                    DisplayMode::Live => DisplayMode::Snapshot,
                };
            }
            AppEvent::ClearStatus => self.status.clear(),
        }
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<AppEvent>> {
        if self.dropdown.open {
            return Ok(self.handle_dropdown_key(key));
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return Ok(Some(AppEvent::Quit)),
                KeyCode::Char('n') => return Ok(self.add_pair()),
                KeyCode::Char('d') => return Ok(self.remove_focused_pair()),
                KeyCode::Char('s') => return Ok(Some(self.submit().await)),
                KeyCode::Char('l') => return Ok(Some(AppEvent::ClearStatus)),
                _ => return Ok(None),
            }
        }

        match key.code {
            KeyCode::Esc => return Ok(Some(AppEvent::Quit)),
            KeyCode::F(2) => return Ok(Some(AppEvent::ToggleDisplayMode)),
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_previous(),
            KeyCode::Up => self.focus_row_up(),
            KeyCode::Down => self.focus_row_down(),
            KeyCode::Enter => match self.focus_col {
                FocusColumn::Select => {
                    let current = self.focused_pair_value(PairField::Select);
                    self.dropdown.open_at(&self.config.options, &current);
                }
                FocusColumn::Input => self.focus_next(),
            },
            _ => return self.handle_text_key(key),
        }

        Ok(None)
    }

    fn handle_dropdown_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        let option_count = self.config.options.len();
        match key.code {
            KeyCode::Up => self.dropdown.previous(option_count),
            KeyCode::Down => self.dropdown.next(option_count),
            KeyCode::Enter => {
                if let Some(value) = self
                    .dropdown
                    .selected_value(&self.config.options)
                    .map(str::to_string)
                {
                    if let Err(err) = self.store.update(self.focus_row, PairField::Select, value) {
                        self.dropdown.close();
                        return Some(AppEvent::ShowError(err.to_string()));
                    }
                    self.revalidate();
                }
                self.dropdown.close();
            }
            KeyCode::Esc | KeyCode::Tab => self.dropdown.close(),
            _ => {}
        }
        None
    }

    fn handle_text_key(&mut self, key: KeyEvent) -> Result<Option<AppEvent>> {
        if self.focus_col != FocusColumn::Input {
            return Ok(None);
        }

        let row = self.focus_row;
        let mut value = self.focused_pair_value(PairField::Input);
        self.text_input.sync(&value);

        let changed = match key.code {
            KeyCode::Char(c) => {
                self.text_input.insert(&mut value, c);
                true
            }
            KeyCode::Backspace => self.text_input.backspace(&mut value),
            KeyCode::Delete => self.text_input.delete_forward(&mut value),
            KeyCode::Left => {
                self.text_input.move_left(&value);
                false
            }
            KeyCode::Right => {
                self.text_input.move_right(&value);
                false
            }
            KeyCode::Home => {
                self.text_input.move_to_start();
                false
            }
            KeyCode::End => {
                self.text_input.move_to_end(&value);
                false
            }
            _ => false,
        };

        if changed {
            if let Err(err) = self.store.update(row, PairField::Input, value) {
                return Ok(Some(AppEvent::ShowError(err.to_string())));
            }
            self.revalidate();
        }

        Ok(None)
    }

    fn focused_pair_value(&self, field: PairField) -> String {
        self.store
            .pairs()
            .get(self.focus_row)
            .map(|pair| match field {
                PairField::Input => pair.input_value.clone(),
                PairField::Select => pair.select_value.clone(),
            })
            .unwrap_or_default()
    }

    /// Re-validate the whole collection; the view decides what to show
    fn revalidate(&mut self) {
        self.report = self.validator.validate(self.store.pairs());
    }

    fn add_pair(&mut self) -> Option<AppEvent> {
        let index = self.store.add();
        self.focus_row = index;
        self.focus_col = FocusColumn::Input;
        self.text_input.move_to_start();
        self.revalidate();
        Some(AppEvent::ShowInfo(format!("Added field pair {}", index + 1)))
    }

    fn remove_focused_pair(&mut self) -> Option<AppEvent> {
        let removed = self.focus_row;
        match self.store.remove_at(removed) {
            Ok(_) => {
                if self.focus_row >= self.store.len() {
                    self.focus_row = self.store.len() - 1;
                }
                self.sync_cursor_to_focus();
                self.revalidate();
                Some(AppEvent::ShowInfo(format!(
                    "Removed field pair {}",
                    removed + 1
                )))
            }
            Err(err) => Some(AppEvent::ShowError(err.to_string())),
        }
    }

    async fn submit(&mut self) -> AppEvent {
        match self.handler.submit(self.store.pairs()).await {
            Ok(count) => {
                self.show_errors = false;
                self.report = ValidationReport::default();
                if let Some(path) = self.config.export_path.clone() {
                    if let Some(snapshot) = self.handler.snapshot() {
                        if let Err(err) = snapshot.write_json(&path) {
                            return AppEvent::ShowError(format!("{err:#}"));
                        }
                    }
                }
                AppEvent::ShowSuccess(format!("Successfully submitted {} field pairs", count))
            }
            Err(FormError::ValidationFailed(report)) => {
                let count = report.error_count();
                self.report = report;
                self.show_errors = true;
                AppEvent::ShowError(format!("Form validation failed ({count} error(s))"))
            }
            Err(err) => AppEvent::ShowError(err.to_string()),
        }
    }

    fn focus_next(&mut self) {
        match self.focus_col {
            FocusColumn::Input => self.focus_col = FocusColumn::Select,
            FocusColumn::Select => {
                self.focus_row = (self.focus_row + 1) % self.store.len();
                self.focus_col = FocusColumn::Input;
            }
        }
        self.sync_cursor_to_focus();
    }

    fn focus_previous(&mut self) {
        match self.focus_col {
            FocusColumn::Select => self.focus_col = FocusColumn::Input,
            FocusColumn::Input => {
                self.focus_row = if self.focus_row == 0 {
                    self.store.len() - 1
                } else {
                    self.focus_row - 1
                };
                self.focus_col = FocusColumn::Select;
            }
        }
        self.sync_cursor_to_focus();
    }

    fn focus_row_up(&mut self) {
        if self.focus_row > 0 {
            self.focus_row -= 1;
            self.sync_cursor_to_focus();
        }
    }

    fn focus_row_down(&mut self) {
        if self.focus_row + 1 < self.store.len() {
            self.focus_row += 1;
            self.sync_cursor_to_focus();
        }
    }

    fn sync_cursor_to_focus(&mut self) {
        let value = self.focused_pair_value(PairField::Input);
        self.text_input.move_to_end(&value);
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let table_rows = match self.display_mode {
            DisplayMode::Snapshot => self
                .handler
                .snapshot()
                .map(|s| display_rows(s.pairs(), &self.config.options))
                .unwrap_or_default(),
            DisplayMode::Live => display_rows(self.store.pairs(), &self.config.options),
        };
        let table_height = (table_rows.len() as u16 + 3).clamp(3, 10);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(ROW_HEIGHT + 2),
                Constraint::Length(1),
                Constraint::Length(table_height),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_form(f, chunks[0]);
        self.draw_help_line(f, chunks[1]);

        let table_title = match self.display_mode {
            DisplayMode::Snapshot => "Submitted Data",
            DisplayMode::Live => "Form State (live)",
        };
        self.table.render(f, chunks[2], table_title, &table_rows);

        self.status.render(f, chunks[3]);

        if self.dropdown.open {
            self.draw_dropdown(f, size);
        }
    }

    fn draw_form(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Dynamic Form")
            .borders(Borders::ALL)
            .border_style(Styles::title());
        let inner = block.inner(area);
        f.render_widget(block, area);

        self.dropdown_anchor = None;

        let visible = ((inner.height / ROW_HEIGHT) as usize).max(1);
        let offset = (self.focus_row + 1).saturating_sub(visible);

        for (slot, index) in (offset..self.store.len()).take(visible).enumerate() {
            let row_area = Rect {
                x: inner.x,
                y: inner.y + slot as u16 * ROW_HEIGHT,
                width: inner.width,
                height: ROW_HEIGHT,
            };
            self.draw_pair_row(f, row_area, index);
        }
    }

    fn draw_pair_row(&mut self, f: &mut Frame, area: Rect, index: usize) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let pair = &self.store.pairs()[index];
        let focused = index == self.focus_row;

        let input_error = self
            .show_errors
            .then(|| self.report.error_for(index, PairField::Input))
            .flatten();
        let select_error = self
            .show_errors
            .then(|| self.report.error_for(index, PairField::Select))
            .flatten();

        self.text_input.render(
            f,
            cells[0],
            &pair.input_value,
            "Enter value",
            &format!("Input #{}", index + 1),
            focused && self.focus_col == FocusColumn::Input,
            input_error,
        );

        let label = if pair.select_value.is_empty() {
            ""
        } else {
            resolve_label(&self.config.options, &pair.select_value)
        };
        render_select_cell(
            f,
            cells[1],
            label,
            &format!("Select #{}", index + 1),
            focused && self.focus_col == FocusColumn::Select,
            select_error,
        );

        if focused && self.focus_col == FocusColumn::Select {
            self.dropdown_anchor = Some(cells[1]);
        }
    }

    fn draw_help_line(&self, f: &mut Frame, area: Rect) {
        let help = "Tab: next field | Ctrl+N: add | Ctrl+D: remove | Enter: choose option | \
                    Ctrl+S: submit | F2: toggle view | Esc: quit";
        f.render_widget(Paragraph::new(help).style(Styles::inactive()), area);
    }

    fn draw_dropdown(&mut self, f: &mut Frame, frame_area: Rect) {
        let Some(anchor) = self.dropdown_anchor else {
            return;
        };

        let height = (self.config.options.len() as u16 + 2).min(frame_area.height);
        let below = anchor.y + ROW_HEIGHT;
        let y = if below + height <= frame_area.bottom() {
            below
        } else {
            anchor.y.saturating_sub(height)
        };

        let popup = Rect {
            x: anchor.x,
            y,
            width: anchor.width,
            height,
        };

        f.render_widget(Clear, popup);
        self.dropdown.render(f, popup, &self.config.options);
    }
}
