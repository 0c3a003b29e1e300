//! Status display component for transient notices

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::ui::Styles;

/// Types of status messages
#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
    Error,
}

/// Status message with type and content
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: chrono::Local::now(),
        }
    }

    pub fn info(message: String) -> Self {
        Self::new(message, StatusType::Info)
    }

    pub fn success(message: String) -> Self {
        Self::new(message, StatusType::Success)
    }

    pub fn error(message: String) -> Self {
        Self::new(message, StatusType::Error)
    }
}

/// Status display component
pub struct StatusDisplay {
    pub current_message: Option<StatusMessage>,
    pub message_history: Vec<StatusMessage>,
    pub max_history: usize,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            current_message: None,
            message_history: Vec::new(),
            max_history: 100,
        }
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set current status message, pushing the previous one into history
    pub fn set_message(&mut self, message: StatusMessage) {
        if let Some(current) = self.current_message.take() {
            self.message_history.push(current);
            if self.message_history.len() > self.max_history {
                self.message_history.remove(0);
            }
        }
        self.current_message = Some(message);
    }

    pub fn set_info(&mut self, message: String) {
        self.set_message(StatusMessage::info(message));
    }

    pub fn set_success(&mut self, message: String) {
        self.set_message(StatusMessage::success(message));
    }

    pub fn set_error(&mut self, message: String) {
        self.set_message(StatusMessage::error(message));
    }

    pub fn clear(&mut self) {
        if let Some(current) = self.current_message.take() {
            self.message_history.push(current);
        }
    }

    /// Render the status bar
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let (text, style) = match &self.current_message {
            Some(msg) => {
                let style = match msg.status_type {
                    StatusType::Info => Styles::info(),
                    StatusType::Success => Styles::success(),
                    StatusType::Error => Styles::error(),
                };
                (
                    format!("{} {}", msg.timestamp.format("%H:%M:%S"), msg.message),
                    style,
                )
            }
            None => (String::from("Ready"), Styles::inactive()),
        };

        let block = Block::default().title("Status").borders(Borders::ALL);
        let paragraph = Paragraph::new(text).style(style).block(block);
        f.render_widget(paragraph, area);
    }
}
