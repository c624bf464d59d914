//! Administrative resident list.
//!
//! Fetches resident records from the `/api/residents` backend, renders them
//! as a table (terminal or gpui window) and deletes individual residents
//! after confirmation.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod services;
pub mod ui;

pub use app::{DeleteOutcome, LoadOutcome, ResidentsListState, ResidentsListView, ViewBody};
pub use domain::{Resident, ResidentId};
pub use services::{ApiError, HttpResidentsApi, ResidentsApi};
