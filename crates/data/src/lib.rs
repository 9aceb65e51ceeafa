//! Immutable daily forcing data and catchment metadata.
//!
//! Everything in this crate is read-only after construction: the calibration
//! engine shares these containers by reference across concurrently running
//! calibrations, so the constructors validate once and the getters hand out
//! borrowed slices.

mod catchment;
mod error;
mod forcing;

pub use catchment::Catchment;
pub use error::DataError;
pub use forcing::Forcing;
