//! Editable form cells: text input with cursor, dropdown selection
//!
//! Cells do not own the form's values; the store stays the single source of
//! truth. The components here keep only presentation state (cursor position,
//! dropdown visibility) and render whatever value they are handed.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::SelectOption;
use crate::tui::ui::Styles;

/// Cursor state for the focused text cell
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp the cursor to the given value, e.g. after a focus change
    pub fn sync(&mut self, value: &str) {
        if self.cursor > value.len() {
            self.cursor = value.len();
        }
    }

    pub fn insert(&mut self, value: &mut String, c: char) {
        value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self, value: &mut String) -> bool {
        if self.cursor == 0 {
            return false;
        }
        // Step back over one char boundary
        let mut new_cursor = self.cursor - 1;
        while !value.is_char_boundary(new_cursor) {
            new_cursor -= 1;
        }
        value.remove(new_cursor);
        self.cursor = new_cursor;
        true
    }

    pub fn delete_forward(&mut self, value: &mut String) -> bool {
        if self.cursor >= value.len() {
            return false;
        }
        value.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self, value: &str) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self, value: &str) {
        if self.cursor >= value.len() {
            return;
        }
        self.cursor += 1;
        while !value.is_char_boundary(self.cursor) {
            self.cursor += 1;
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self, value: &str) {
        self.cursor = value.len();
    }

    /// Render a text cell; only the focused cell gets the terminal cursor
    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        value: &str,
        placeholder: &str,
        title: &str,
        focused: bool,
        error: Option<&str>,
    ) {
        let display_text = if value.is_empty() { placeholder } else { value };

        let border_style = if focused {
            Styles::active_border()
        } else if error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let title = match error {
            Some(error) => format!("{} - {}", title, error),
            None => title.to_string(),
        };

        let text_style = if value.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let paragraph = Paragraph::new(display_text.to_string())
            .style(text_style)
            .block(block);
        f.render_widget(paragraph, area);

        if focused {
            let cursor_x = area.x + 1 + self.cursor as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Render the closed select cell showing the chosen option's label
pub fn render_select_cell(
    f: &mut Frame,
    area: Rect,
    label: &str,
    title: &str,
    focused: bool,
    error: Option<&str>,
) {
    let border_style = if focused {
        Styles::active_border()
    } else if error.is_some() {
        Styles::error()
    } else {
        Styles::inactive_border()
    };

    let title = match error {
        Some(error) => format!("{} - {}", title, error),
        None => title.to_string(),
    };

    let (text, style) = if label.is_empty() {
        ("Select an option".to_string(), Styles::inactive())
    } else {
        (label.to_string(), Styles::default())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    f.render_widget(Paragraph::new(text).style(style).block(block), area);
}

/// Dropdown state for the select cell being edited
#[derive(Debug, Clone, Default)]
pub struct OptionDropdown {
    pub state: ListState,
    pub open: bool,
}

impl OptionDropdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dropdown, pre-selecting the current value when present
    pub fn open_at(&mut self, options: &[SelectOption], current_value: &str) {
        let selected = options
            .iter()
            .position(|o| o.value == current_value)
            .unwrap_or(0);
        self.state.select(Some(selected));
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        self.state.select(Some((selected + 1) % option_count));
    }

    pub fn previous(&mut self, option_count: usize) {
        if option_count == 0 {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            option_count - 1
        } else {
            selected - 1
        };
        self.state.select(Some(new_selected));
    }

    /// Value of the highlighted option
    pub fn selected_value<'a>(&self, options: &'a [SelectOption]) -> Option<&'a str> {
        self.state
            .selected()
            .and_then(|i| options.get(i))
            .map(|o| o.value.as_str())
    }

    /// Render the dropdown list over the given area
    pub fn render(&mut self, f: &mut Frame, area: Rect, options: &[SelectOption]) {
        if !self.open || options.is_empty() {
            return;
        }

        let items: Vec<ListItem> = options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if Some(i) == self.state.selected() {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(option.label.clone()).style(style)
            })
            .collect();

        let block = Block::default()
            .title("Options")
            .borders(Borders::ALL)
            .border_style(Styles::active_border());

        f.render_stateful_widget(List::new(items).block(block), area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new();
        let mut value = String::new();

        input.insert(&mut value, 'h');
        input.insert(&mut value, 'i');
        assert_eq!(value, "hi");
        assert_eq!(input.cursor, 2);

        input.move_left(&value);
        input.insert(&mut value, 'e');
        assert_eq!(value, "hei");

        assert!(input.backspace(&mut value));
        assert_eq!(value, "hi");
        assert_eq!(input.cursor, 1);

        assert!(input.delete_forward(&mut value));
        assert_eq!(value, "h");
        assert!(!input.delete_forward(&mut value));
    }

    #[test]
    fn test_text_input_multibyte() {
        let mut input = TextInput::new();
        let mut value = String::new();
        input.insert(&mut value, 'é');
        input.insert(&mut value, 'x');
        assert_eq!(value, "éx");

        input.move_left(&value);
        input.move_left(&value);
        assert_eq!(input.cursor, 0);
        input.move_right(&value);
        assert_eq!(input.cursor, 'é'.len_utf8());

        assert!(input.backspace(&mut value));
        assert_eq!(value, "x");
    }

    #[test]
    fn test_sync_clamps_cursor() {
        let mut input = TextInput { cursor: 10 };
        input.sync("abc");
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn test_dropdown_navigation_wraps() {
        let options = vec![
            SelectOption::new("option1", "Option 1"),
            SelectOption::new("option2", "Option 2"),
            SelectOption::new("option3", "Option 3"),
        ];
        let mut dropdown = OptionDropdown::new();
        dropdown.open_at(&options, "option2");
        assert_eq!(dropdown.selected_value(&options), Some("option2"));

        dropdown.next(options.len());
        assert_eq!(dropdown.selected_value(&options), Some("option3"));
        dropdown.next(options.len());
        assert_eq!(dropdown.selected_value(&options), Some("option1"));
        dropdown.previous(options.len());
        assert_eq!(dropdown.selected_value(&options), Some("option3"));
    }

    #[test]
    fn test_dropdown_defaults_to_first_for_unknown_value() {
        let options = vec![
            SelectOption::new("option1", "Option 1"),
            SelectOption::new("option2", "Option 2"),
        ];
        let mut dropdown = OptionDropdown::new();
        dropdown.open_at(&options, "");
        assert_eq!(dropdown.selected_value(&options), Some("option1"));
    }
}
