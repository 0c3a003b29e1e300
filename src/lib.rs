//! pairform: a dynamic field-pair form for the terminal
//!
//! The logical core (store, validator, submission handling) lives in
//! [`form`] and is independent of the view; [`tui`] renders it with ratatui.

pub mod cli;
pub mod config;
pub mod form;
pub mod models;
pub mod tui;
