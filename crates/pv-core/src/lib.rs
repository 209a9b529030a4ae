//! pv-core: shared foundation for the PV cabling workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for lengths, sections, currents, voltages)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{PvError, PvResult};
pub use numeric::*;
pub use units::*;
