//! Read-only table of field-pair rows
//!
//! Renders either the submitted snapshot or the live collection, one row per
//! pair: 1-based ordinal, input value, resolved select label.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::DisplayRow;
use crate::tui::ui::Styles;

/// Configuration for the pair table display
#[derive(Debug, Clone)]
pub struct PairTableConfig {
    pub max_input_len: usize,
    pub max_label_len: usize,
}

impl Default for PairTableConfig {
    fn default() -> Self {
        Self {
            max_input_len: 28,
            max_label_len: 18,
        }
    }
}

/// Table component for submitted or live form data
#[derive(Debug, Clone, Default)]
pub struct PairTable {
    pub config: PairTableConfig,
}

impl PairTable {
    pub fn new(config: PairTableConfig) -> Self {
        Self { config }
    }

    /// Format one row into aligned columns
    fn format_row(&self, row: &DisplayRow) -> String {
        format!(
            "{:>3}  {}  {}",
            row.ordinal,
            truncate_string(&row.input, self.config.max_input_len),
            truncate_string(&row.select_label, self.config.max_label_len),
        )
    }

    fn header(&self) -> String {
        format!(
            "{:>3}  {}  {}",
            "#",
            truncate_string("Input Value", self.config.max_input_len),
            truncate_string("Selected Option", self.config.max_label_len),
        )
    }

    pub fn render(&self, f: &mut Frame, area: Rect, title: &str, rows: &[DisplayRow]) {
        let block = Block::default().title(title).borders(Borders::ALL);

        if rows.is_empty() {
            let empty = Paragraph::new("Nothing submitted yet")
                .style(Styles::inactive())
                .block(block);
            f.render_widget(empty, area);
            return;
        }

        let mut items = vec![ListItem::new(Line::styled(self.header(), Styles::title()))];
        items.extend(
            rows.iter()
                .map(|row| ListItem::new(self.format_row(row))),
        );

        f.render_widget(List::new(items).block(block), area);
    }
}

/// Truncate a string to a display width, padding with spaces (Unicode-aware)
fn truncate_string(s: &str, max_width: usize) -> String {
    let display_width = s.width();
    if display_width <= max_width {
        let padding = max_width - display_width;
        format!("{}{}", s, " ".repeat(padding))
    } else {
        let target_width = max_width.saturating_sub(1);
        let mut truncated = String::new();
        let mut current_width = 0;
        for ch in s.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > target_width {
                break;
            }
            truncated.push(ch);
            current_width += ch_width;
        }
        truncated.push('…');
        let padding = max_width.saturating_sub(current_width + 1);
        format!("{}{}", truncated, " ".repeat(padding))
    }
}
