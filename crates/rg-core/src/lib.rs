//! rg-core: shared numerics for the realgas engine.
//!
//! Contains:
//! - units (uom SI types + constructors for state and caloric quantities)
//! - numeric (Real + tolerances + float helpers)
//! - cubic (closed-form Cardano solver shared by the cubic EOS and the binodal)
//! - error (shared error types)

pub mod cubic;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use cubic::{CubicRoots, refine, solve_cubic};
pub use error::{RgError, RgResult};
pub use numeric::*;
pub use units::*;
