//! Kernel-level configuration building on the shared `config` crate.
//!
//! The world owns one `KernelConfig` and hands it to every node update, so the
//! slicing engine never reads tolerances from a global.

use config::{ConfigError, Tolerances};

/// Geometry kernel configuration wrapper.
///
/// # Examples
/// ```
/// use smaug_mesh::config::KernelConfig;
/// let cfg = KernelConfig::default();
/// assert!(cfg.tolerances.line() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KernelConfig {
    /// Tolerances forwarded to the slicing predicates.
    pub tolerances: Tolerances,
}

impl KernelConfig {
    /// Creates a configuration from an explicit tolerance bundle.
    ///
    /// # Examples
    /// ```
    /// use config::Tolerances;
    /// use smaug_mesh::config::KernelConfig;
    /// let tolerances = Tolerances::default().with_coplanar(0.05).unwrap();
    /// let cfg = KernelConfig::new(tolerances).unwrap();
    /// assert_eq!(cfg.tolerances.coplanar(), 0.05);
    /// ```
    pub fn new(tolerances: Tolerances) -> Result<Self, ConfigError> {
        tolerances.validate()?;
        Ok(Self { tolerances })
    }
}
