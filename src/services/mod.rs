//! Backend services.
//!
//! The [`ResidentsApi`] trait is the seam between the list view and the
//! HTTP backend; [`HttpResidentsApi`] is the production implementation.

mod error;
mod residents_api;

pub use error::ApiError;
pub use residents_api::{HttpResidentsApi, ResidentsApi};

#[cfg(test)]
pub use residents_api::MockResidentsApi;
