//! Event handling for the pairform TUI

/// Actions produced by key handling, applied centrally by the app
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Quit the application
    Quit,
    /// Show status message
    ShowInfo(String),
    /// Show success message
    ShowSuccess(String),
    /// Show error message
    ShowError(String),
    /// Switch between submitted-snapshot and live-collection display
    ToggleDisplayMode,
    /// Clear the status line
    ClearStatus,
}
