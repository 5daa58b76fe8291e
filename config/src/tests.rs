//! # Tests for Config Constants
//!
//! Unit tests verifying the relationships between the engine tolerances.

use crate::constants::*;
use crate::{ConfigError, Tolerances};

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_near_epsilon_is_positive_and_small() {
    assert!(NEAR_EPSILON > 0.0, "NEAR_EPSILON must be positive");
    assert!(NEAR_EPSILON < 1e-2, "NEAR_EPSILON should stay below plane tolerance");
}

#[test]
fn test_line_epsilon_matches_on_edge_band() {
    // A point the line test accepts must not be rejected by the on-edge band
    assert!(ON_EDGE_EPSILON >= LINE_EPSILON);
}

// =============================================================================
// SLICING TESTS
// =============================================================================

#[test]
fn test_coplanar_epsilon_is_loosest() {
    assert!(COPLANAR_EPSILON > LINE_EPSILON);
    assert!(COPLANAR_EPSILON > SHARED_LINE_EPSILON);
    assert!(COPLANAR_EPSILON > ENDPOINT_EPSILON);
}

#[test]
fn test_aabb_margin_covers_plane_tolerance() {
    assert!(AABB_MARGIN >= COPLANAR_EPSILON);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_render_limit_fits_u16_indices() {
    assert_eq!(MAX_RENDER_VERTICES - 1, u16::MAX as usize);
}

// =============================================================================
// TOLERANCE BUNDLE TESTS
// =============================================================================

#[test]
fn test_default_bundle_uses_constants() {
    let t = Tolerances::default();
    assert_eq!(t.near(), NEAR_EPSILON);
    assert_eq!(t.line(), LINE_EPSILON);
    assert_eq!(t.on_edge(), ON_EDGE_EPSILON);
    assert_eq!(t.coplanar(), COPLANAR_EPSILON);
    assert_eq!(t.shared_line(), SHARED_LINE_EPSILON);
    assert_eq!(t.endpoint(), ENDPOINT_EPSILON);
    assert!(t.validate().is_ok());
}

#[test]
fn test_bundle_rejects_negative_value() {
    let err = Tolerances::new(1e-4, 1e-3, 1e-3, -1.0, 1e-4, 1e-3).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidTolerance {
            name: "coplanar",
            value: -1.0
        }
    );
}

#[test]
fn test_bundle_rejects_nan() {
    let err = Tolerances::new(f64::NAN, 1e-3, 1e-3, 1e-2, 1e-4, 1e-3).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTolerance { name: "near", .. }));
}

#[test]
fn test_with_coplanar_revalidates() {
    let t = Tolerances::default().with_coplanar(0.05).unwrap();
    assert_eq!(t.coplanar(), 0.05);
    assert_eq!(t.near(), NEAR_EPSILON);
    assert!(Tolerances::default().with_coplanar(0.0).is_err());
}

#[test]
fn test_deserialize_rejects_invalid_bundle() {
    use serde::de::value::{Error as ValueError, MapDeserializer};
    use serde::Deserialize;

    let fields = [
        ("near", 1e-4),
        ("line", 1e-3),
        ("on_edge", 1e-3),
        ("coplanar", 1e-2),
        ("shared_line", 1e-4),
        ("endpoint", 1e-3),
    ];
    let valid = Tolerances::deserialize(MapDeserializer::<_, ValueError>::new(fields.into_iter()));
    assert_eq!(valid.unwrap(), Tolerances::new(1e-4, 1e-3, 1e-3, 1e-2, 1e-4, 1e-3).unwrap());

    let mut broken = fields;
    broken[5].1 = -1.0;
    let err = Tolerances::deserialize(MapDeserializer::<_, ValueError>::new(broken.into_iter()))
        .unwrap_err();
    assert!(err.to_string().contains("endpoint"));
}
