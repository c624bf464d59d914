//! Application state and lifecycle management.
//!
//! This module contains:
//! - The resident list state container (state.rs)
//! - The view driver that loads and deletes through the backend (view.rs)
//! - Confirmation/alert prompts (dialogs.rs)
//! - Modal prompt tracking for the window (prompt.rs)
//! - The gpui window entry point (gui.rs, feature `gui`)

pub mod dialogs;
mod error;
pub mod prompt;
pub mod state;
pub mod view;

#[cfg(feature = "gui")]
mod gui;

pub use dialogs::{AssumeYes, Dialogs, TerminalDialogs};
pub use error::ResidentsError;
pub use prompt::{Prompt, PromptRejected, PromptState};
pub use state::{
    DeleteRejected, ResidentsListState, ViewBody, DELETE_CONFIRMATION, DELETE_FAILURE_MESSAGE,
    LOAD_FAILURE_MESSAGE,
};
pub use view::{DeleteOutcome, LoadOutcome, ResidentsListView};

#[cfg(feature = "gui")]
pub use gui::App;
