use repfit_base::Vec2;
use std::fmt;

/// Zero-length rays make a joint angle undefined.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    Degenerate,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Degenerate => {
                write!(f, "degenerate geometry: zero-length ray at joint vertex")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Angle in degrees [0, 180] at vertex `b` formed by rays `b -> a` and
/// `b -> c`.
///
/// The cosine is clamped to [-1, 1] before the arccosine so exactly
/// parallel or antiparallel rays cannot overshoot into NaN. Fails with
/// `GeometryError::Degenerate` when either ray has zero length.
pub fn angle_at(a: Vec2, b: Vec2, c: Vec2) -> Result<f32, GeometryError> {
    let ba = a - b;
    let bc = c - b;

    let mag = ba.length() * bc.length();
    if mag == 0.0 {
        return Err(GeometryError::Degenerate);
    }

    let cosine = (ba.dot(bc) / mag).clamp(-1.0, 1.0);
    Ok(cosine.acos().to_degrees())
}
