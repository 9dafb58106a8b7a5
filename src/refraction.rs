#![warn(missing_docs)]
//! Snell's law between two media with a planar interface.
//!
//! The lighter medium (air) has a fixed refractive index of 1.0. Total internal reflection can only happen
//! when the ray travels from the denser into the lighter medium.
use serde::{Deserialize, Serialize};
use uom::si::{angle::radian, f64::Angle};

use crate::radian;

/// Refractive index of the lighter medium.
pub const N_AIR: f64 = 1.0;

/// Outcome of refracting a ray at the interface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Refraction {
    /// the ray passes the interface with the given angle (measured from the normal)
    Refracted(Angle),
    /// the ray cannot leave the denser medium
    TotalInternalReflection,
}
impl Refraction {
    /// Returns the refracted angle or `None` in case of total internal reflection.
    #[must_use]
    pub const fn angle(self) -> Option<Angle> {
        match self {
            Self::Refracted(angle) => Some(angle),
            Self::TotalInternalReflection => None,
        }
    }
    /// Returns `true` if this is a total internal reflection.
    #[must_use]
    pub const fn is_tir(self) -> bool {
        matches!(self, Self::TotalInternalReflection)
    }
}

/// Critical angle of a medium with refractive index `n` against air.
///
/// Returns `None` if `n` is not finite or `n <= 1.0`. In this case no total internal reflection is possible.
#[must_use]
pub fn critical_angle(n: f64) -> Option<Angle> {
    if !n.is_finite() || n <= N_AIR {
        return None;
    }
    Some(radian!((N_AIR / n).asin()))
}

/// Refract a ray with the given incident angle from a medium `n_from` into a medium `n_to`.
///
/// Applies `n_from · sin(θ_from) = n_to · sin(θ_to)`. [`Refraction::TotalInternalReflection`] is returned if the
/// incident angle reaches the critical angle or if the arcsine argument exceeds 1.0 due to rounding.
#[must_use]
pub fn refract(incident: Angle, n_from: f64, n_to: f64) -> Refraction {
    if n_from > n_to {
        if let Some(critical) = critical_angle(n_from / n_to) {
            if incident >= critical {
                return Refraction::TotalInternalReflection;
            }
        }
    }
    let sin_refracted = n_from / n_to * incident.get::<radian>().sin();
    if !sin_refracted.is_finite() || sin_refracted > 1.0 {
        return Refraction::TotalInternalReflection;
    }
    Refraction::Refracted(radian!(sin_refracted.clamp(-1.0, 1.0).asin()))
}
/// Forward direction: a ray inside the water (index `n`) leaving into air.
#[must_use]
pub fn water_to_air(incident: Angle, n: f64) -> Refraction {
    refract(incident, n, N_AIR)
}
/// Inverse direction: a viewing ray in air entering the water (index `n`).
///
/// This never results in a total internal reflection for `n >= 1.0`.
#[must_use]
pub fn air_to_water(incident: Angle, n: f64) -> Refraction {
    refract(incident, N_AIR, n)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::degree;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use uom::si::angle::degree;

    const INDICES: [f64; 6] = [1.05, 1.2, 1.33, 1.5, 1.75, 1.99];

    #[test]
    fn critical_angle_water() {
        let critical = critical_angle(1.33).unwrap();
        assert_abs_diff_eq!(critical.get::<degree>(), 48.753, epsilon = 1e-3);
        assert_abs_diff_eq!(critical_angle(2.0).unwrap().get::<degree>(), 30.0, epsilon = 1e-9);
    }
    #[test]
    fn critical_angle_undefined() {
        assert!(critical_angle(1.0).is_none());
        assert!(critical_angle(0.5).is_none());
        assert!(critical_angle(f64::NAN).is_none());
        assert!(critical_angle(f64::INFINITY).is_none());
    }
    #[test]
    fn refraction_accessors() {
        let r = Refraction::Refracted(degree!(10.0));
        assert_eq!(r.angle(), Some(degree!(10.0)));
        assert!(!r.is_tir());
        assert!(Refraction::TotalInternalReflection.angle().is_none());
        assert!(Refraction::TotalInternalReflection.is_tir());
    }
    #[test]
    fn normal_incidence() {
        let r = refract(degree!(0.0), 1.33, 1.0).angle().unwrap();
        assert_abs_diff_eq!(r.get::<degree>(), 0.0);
    }
    #[test]
    fn water_to_air_30_degree() {
        let r = water_to_air(degree!(30.0), 1.33).angle().unwrap();
        assert_abs_diff_eq!(r.get::<degree>(), 41.68, epsilon = 1e-2);
    }
    #[test]
    fn air_to_water_30_degree() {
        let r = air_to_water(degree!(30.0), 1.33).angle().unwrap();
        assert_abs_diff_eq!(r.get::<degree>(), 22.08, epsilon = 1e-2);
    }
    #[test]
    fn air_to_water_never_tir() {
        for n in INDICES {
            assert_matches!(air_to_water(degree!(89.9), n), Refraction::Refracted(_));
        }
    }
    #[test]
    fn round_trip() {
        for n in INDICES {
            let critical = critical_angle(n).unwrap().get::<degree>();
            for fraction in [0.0, 0.1, 0.5, 0.9, 0.999] {
                let theta = degree!(critical * fraction);
                let out = refract(theta, n, N_AIR).angle().unwrap();
                let back = refract(out, N_AIR, n).angle().unwrap();
                assert_abs_diff_eq!(
                    back.get::<degree>(),
                    theta.get::<degree>(),
                    epsilon = 1e-9
                );
            }
        }
    }
    #[test]
    fn round_trip_without_index_contrast() {
        let theta = degree!(70.0);
        let out = refract(theta, 1.0, 1.0).angle().unwrap();
        assert_abs_diff_eq!(out.get::<degree>(), 70.0, epsilon = 1e-9);
    }
    #[test]
    fn critical_angle_boundary() {
        let eps = 1e-4;
        for n in INDICES {
            let critical = critical_angle(n).unwrap().get::<degree>();
            let below = refract(degree!(critical - eps), n, N_AIR);
            assert_matches!(below, Refraction::Refracted(_));
            assert!(below.angle().unwrap().get::<degree>() > 89.0);
            assert!(refract(degree!(critical + eps), n, N_AIR).is_tir());
            assert!(refract(critical_angle(n).unwrap(), n, N_AIR).is_tir());
        }
    }
    #[test]
    fn beyond_critical() {
        assert!(water_to_air(degree!(50.0), 1.33).is_tir());
        assert!(water_to_air(degree!(89.9), 1.33).is_tir());
    }
}
