#![warn(missing_docs)]
//! Basic 2D geometry in screen space.
//!
//! The interface between the two media is a horizontal line. Screen coordinates grow downwards, hence
//! "above the interface" means a smaller y coordinate. All angles are measured from the (vertical) interface normal.
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use uom::si::{angle::radian, f64::Angle};

use crate::radian;

/// A point in screen space.
pub type Point = Point2<f64>;

/// Horizontal side with respect to a refraction point.
///
/// It is used both for tagging the two refraction points and for mirroring rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, Display)]
pub enum Side {
    /// smaller x coordinates
    Left,
    /// larger x coordinates
    Right,
}
impl Side {
    /// Sign of the horizontal component of a ray leaving towards this side.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
    /// Returns the other [`Side`].
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Returns true if `target` lies left of the given refraction point.
#[must_use]
pub fn is_left(target: &Point, refraction_point: &Point) -> bool {
    target.x < refraction_point.x
}
/// Classify on which [`Side`] of the given refraction point `target` lies.
#[must_use]
pub fn side_of(target: &Point, refraction_point: &Point) -> Side {
    if is_left(target, refraction_point) {
        Side::Left
    } else {
        Side::Right
    }
}

/// Returns the point `length` away from `origin` along the upward direction enclosing `angle` with the normal.
///
/// The horizontal component is mirrored for [`Side::Left`]. A negative `length` walks the same line downwards.
#[must_use]
pub fn ray_point(origin: &Point, angle: Angle, length: f64, side: Side) -> Point {
    let theta = angle.get::<radian>();
    Point::new(
        side.sign().mul_add(length * theta.sin(), origin.x),
        length.mul_add(-theta.cos(), origin.y),
    )
}

/// Angle between the normal and the line from `origin` to `target`.
///
/// The result is always within `[0°, 90°]` regardless of whether the target is above or below `origin`.
#[must_use]
pub fn angle_from_vector(origin: &Point, target: &Point) -> Angle {
    let d = target - origin;
    radian!(d.x.abs().atan2(d.y.abs()))
}

/// Mirror a point at the horizontal line `y = level`.
#[must_use]
pub fn mirror_across(point: &Point, level: f64) -> Point {
    Point::new(point.x, 2.0f64.mul_add(level, -point.y))
}
