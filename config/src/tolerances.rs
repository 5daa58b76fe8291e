//! Grouped tolerances handed to the slicing engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    COPLANAR_EPSILON, ENDPOINT_EPSILON, LINE_EPSILON, NEAR_EPSILON, ON_EDGE_EPSILON,
    SHARED_LINE_EPSILON,
};

/// Immutable bundle of every epsilon the engine compares against.
///
/// Fields are only reachable through accessors, so a bundle that exists has
/// passed [`Tolerances::validate`]. Deserializing runs the same check.
///
/// # Examples
/// ```
/// use config::Tolerances;
/// let tolerances = Tolerances::default();
/// assert!(tolerances.coplanar() > tolerances.near());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTolerances")]
pub struct Tolerances {
    near: f64,
    line: f64,
    on_edge: f64,
    coplanar: f64,
    shared_line: f64,
    endpoint: f64,
}

/// Unchecked wire form of [`Tolerances`].
#[derive(Deserialize)]
struct RawTolerances {
    near: f64,
    line: f64,
    on_edge: f64,
    coplanar: f64,
    shared_line: f64,
    endpoint: f64,
}

impl TryFrom<RawTolerances> for Tolerances {
    type Error = ConfigError;

    fn try_from(raw: RawTolerances) -> Result<Self, ConfigError> {
        Self::new(
            raw.near,
            raw.line,
            raw.on_edge,
            raw.coplanar,
            raw.shared_line,
            raw.endpoint,
        )
    }
}

impl Tolerances {
    /// Builds a bundle, rejecting non-positive or non-finite values.
    ///
    /// # Examples
    /// ```
    /// use config::{ConfigError, Tolerances};
    /// assert!(Tolerances::new(1e-4, 1e-3, 1e-3, 1e-2, 1e-4, 1e-3).is_ok());
    /// assert_eq!(
    ///     Tolerances::new(1e-4, 0.0, 1e-3, 1e-2, 1e-4, 1e-3).unwrap_err(),
    ///     ConfigError::InvalidTolerance { name: "line", value: 0.0 }
    /// );
    /// ```
    pub fn new(
        near: f64,
        line: f64,
        on_edge: f64,
        coplanar: f64,
        shared_line: f64,
        endpoint: f64,
    ) -> Result<Self, ConfigError> {
        let tolerances = Self {
            near,
            line,
            on_edge,
            coplanar,
            shared_line,
            endpoint,
        };
        tolerances.validate()?;
        Ok(tolerances)
    }

    /// Copy of this bundle with the plane coincidence distance replaced.
    pub fn with_coplanar(self, coplanar: f64) -> Result<Self, ConfigError> {
        Self::new(
            self.near,
            self.line,
            self.on_edge,
            coplanar,
            self.shared_line,
            self.endpoint,
        )
    }

    /// Checks every field, reporting the first offending one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("near", self.near),
            ("line", self.line),
            ("on_edge", self.on_edge),
            ("coplanar", self.coplanar),
            ("shared_line", self.shared_line),
            ("endpoint", self.endpoint),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }

    /// "Close to" tolerance for normals, parameters and coincident points.
    pub fn near(&self) -> f64 {
        self.near
    }

    /// Segment/segment intersection tolerance.
    pub fn line(&self) -> f64 {
        self.line
    }

    /// On-edge band for point-in-convex-loop queries.
    pub fn on_edge(&self) -> f64 {
        self.on_edge
    }

    /// Plane coincidence distance.
    pub fn coplanar(&self) -> f64 {
        self.coplanar
    }

    /// Shared-line detection threshold.
    pub fn shared_line(&self) -> f64 {
        self.shared_line
    }

    /// Endpoint suppression distance on shared lines.
    pub fn endpoint(&self) -> f64 {
        self.endpoint
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            near: NEAR_EPSILON,
            line: LINE_EPSILON,
            on_edge: ON_EDGE_EPSILON,
            coplanar: COPLANAR_EPSILON,
            shared_line: SHARED_LINE_EPSILON,
            endpoint: ENDPOINT_EPSILON,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Raised when a tolerance is zero, negative or not finite.
    #[error("tolerance `{name}` must be positive and finite: {value}")]
    InvalidTolerance {
        /// Field that failed validation.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}
