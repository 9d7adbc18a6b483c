use glam::{Vec2, Vec3};

/// Sign of a value with zero mapping to zero
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Unit vector on the (x, z) plane for a heading.
/// Heading 0 faces +z; positive headings sweep toward +x.
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), heading.cos())
}

/// Lift a plane point (x, z) into world space at height `y`
pub fn lift(point: Vec2, y: f32) -> Vec3 {
    Vec3::new(point.x, y, point.y)
}

/// Drop a world-space point onto the (x, z) plane
pub fn planar(point: Vec3) -> Vec2 {
    Vec2::new(point.x, point.z)
}
