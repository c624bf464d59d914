//! User interface.
//!
//! - `table`: text rendering of the resident list for the terminal
//! - `color`: terminal color palette
//! - `components`: reusable gpui primitives (feature `gui`)
//! - `views`: gpui views (feature `gui`)

pub mod color;
pub mod table;

#[cfg(feature = "gui")]
pub mod components;
#[cfg(feature = "gui")]
pub mod views;

pub use table::{render, row_cells, RenderOptions, RowCells};
#[cfg(feature = "gui")]
pub use views::ResidentsPanel;
