//! # Config Crate
//!
//! Centralized tolerances and limits for the Smaug mesh engine.
//! Every epsilon used by the slicing and tessellation code lives here so the
//! geometry crates never carry loose literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{LINE_EPSILON, NEAR_EPSILON};
//! use config::Tolerances;
//!
//! // Compare against zero the same way the engine does
//! let value: f64 = 0.00001;
//! assert!(value.abs() < NEAR_EPSILON);
//!
//! // The grouped bundle starts from the same constants
//! let tolerances = Tolerances::default();
//! assert_eq!(tolerances.line(), LINE_EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Injectable**: `Tolerances` is passed explicitly, never read from a global
//! - **Validated**: Bundles are checked on construction and deserialization

pub mod constants;
mod tolerances;

pub use tolerances::{ConfigError, Tolerances};

#[cfg(test)]
mod tests;
