//! Domain types.

mod resident;

pub use resident::{Resident, ResidentId, ResidentsEnvelope, NOT_PROVIDED};
