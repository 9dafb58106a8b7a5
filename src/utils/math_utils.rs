use uom::si::{angle::degree, f64::Angle};

/// Largest angle (in degrees, measured from the interface normal) an edit may set.
pub const MAX_ANGLE_DEG: f64 = 89.9;

/// Clamp an angle measured from the interface normal to `[0°, 89.9°]`.
#[must_use]
pub fn clamp_angle(angle: Angle) -> Angle {
    Angle::new::<degree>(angle.get::<degree>().clamp(0.0, MAX_ANGLE_DEG))
}
