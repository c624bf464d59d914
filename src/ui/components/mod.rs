//! Reusable UI components.
//!
//! Stateless gpui building blocks shared by the views.

pub mod button;

pub use button::{button, ButtonVariant};
