/// Tests for the cube room primitive.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use config::Tolerances;

    use crate::core::vec3::Vec3;
    use crate::primitives::cube::{cube_room, BOTTOM, FRONT, PART_NAMES, TOP};
    use crate::MeshError;

    /// Every part of a room faces its centre.
    #[test]
    fn test_parts_face_inward() {
        let mut room = cube_room(2.0).unwrap();
        room.define_part_faces().unwrap();
        for (index, part) in room.parts().iter().enumerate() {
            let center = room
                .part_points(index)
                .unwrap()
                .into_iter()
                .map(|k| room.position(k).unwrap())
                .sum::<Vec3>()
                / 4.0;
            assert!(
                part.normal.dot(-center) > 0.0,
                "{} faces outward",
                PART_NAMES[index]
            );
        }
        assert_relative_eq!(room.part(FRONT).unwrap().normal, Vec3::NEG_Z);
        assert_relative_eq!(room.part(TOP).unwrap().normal, Vec3::NEG_Y);
        assert_relative_eq!(room.part(BOTTOM).unwrap().normal, Vec3::Y);
    }

    /// Corners are shared between parts through the point pool.
    #[test]
    fn test_room_shares_eight_points() {
        let room = cube_room(1.0).unwrap();
        assert_eq!(room.points().len(), 8);
        assert_eq!(room.base_points().len(), 8);
        let bounds = room.aabb().unwrap();
        assert_eq!(bounds.min, Vec3::splat(-1.0));
        assert_eq!(bounds.max, Vec3::splat(1.0));
    }

    /// A freshly tessellated room has two triangles per part.
    #[test]
    fn test_room_tessellates_to_twelve_triangles() {
        let tolerances = Tolerances::default();
        let mut room = cube_room(1.0).unwrap();
        room.fit_collision(&tolerances).unwrap();
        room.tessellate(&tolerances).unwrap();
        for part in room.parts() {
            assert_eq!(part.collision.len(), 1);
            assert_eq!(part.tris.len(), 2);
            assert!(part.sliced.is_none());
        }
    }

    /// Non-positive sizes are rejected.
    #[test]
    fn test_room_rejects_bad_size() {
        assert_eq!(
            cube_room(0.0).unwrap_err(),
            MeshError::InvalidSize { value: 0.0 }
        );
        assert!(cube_room(f64::NAN).is_err());
    }
}
