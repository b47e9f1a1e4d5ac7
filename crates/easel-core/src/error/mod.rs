//! Error types for Easel
//!
//! Every fallible operation in this crate returns [`EaselResult`]. Variants
//! map onto the failure classes callers have to handle differently:
//! configuration problems are raised before any session access, service
//! failures propagate without touching the stored session.

mod constructors;
mod conversions;
mod types;

pub use types::{EaselError, EaselResult};
