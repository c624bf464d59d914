//! Application views.
//!
//! Views are the top-level gpui components. Each view manages its own state
//! and handles user interactions.

mod residents_panel;

pub use residents_panel::ResidentsPanel;
