#![warn(missing_docs)]
//! The state of the archer fish setup.
//!
//! An [`OpticalSystem`] owns the two refraction points on the interface, the water-side angles at both points, the
//! refractive index of the water, the apparent position and (if locked) the real position. All derived quantities are
//! computed on read and never cached.
//!
//! The system can only be mutated through the [`Controller`](crate::controller::Controller).
use serde::{Deserialize, Serialize};
use uom::si::f64::Angle;

use crate::{
    config::SimulationConfig,
    error::ArcherResult,
    geometry::{angle_from_vector, mirror_across, ray_point, side_of, Point, Side},
    intersection::intersect,
    refraction::{air_to_water, critical_angle, water_to_air, Refraction},
    utils::clamp_angle,
};

/// Horizontal distance below which a target counts as straight above (or below) a refraction point.
const SIDE_TOLERANCE: f64 = 1e-6;

/// A point on the interface where a ray crosses between the media.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefractionPoint {
    side: Side,
    position: Point,
}
impl RefractionPoint {
    /// Returns the side tag of this [`RefractionPoint`].
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }
    /// Returns the position of this [`RefractionPoint`].
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }
}

/// End points of the ray segments at one refraction point, as needed for drawing.
///
/// All segments start at [`SideRays::origin`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideRays {
    /// the refraction point
    pub origin: Point,
    /// end of the segment inside the water (towards the observer)
    pub water: Point,
    /// end of the straight continuation of the water-side ray into air (the viewing direction)
    pub apparent: Point,
    /// end of the ray refracted into air, `None` in case of total internal reflection
    pub transmitted: Option<Point>,
    /// end of the ray reflected back into the water, only present in case of total internal reflection
    pub reflected: Option<Point>,
}

/// The complete state of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalSystem {
    water_level: f64,
    ray_length: f64,
    left: RefractionPoint,
    right: RefractionPoint,
    left_angle: Angle,
    right_angle: Angle,
    refractive_index: f64,
    apparent: Option<Point>,
    locked_real: Option<Point>,
    lock_real_position: bool,
}
impl Default for OpticalSystem {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}
impl OpticalSystem {
    /// Creates a new [`OpticalSystem`] from the given configuration.
    ///
    /// The initial apparent position is the intersection of the two water-side rays continued into air. If the
    /// configuration locks the real position, the real position derived from the initial angles is locked.
    ///
    /// # Errors
    ///
    /// This function will return an error if the configuration is invalid.
    pub fn new(config: &SimulationConfig) -> ArcherResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }
    fn from_config(config: &SimulationConfig) -> Self {
        let mut system = Self {
            water_level: config.water_level,
            ray_length: config.ray_length,
            left: RefractionPoint {
                side: Side::Left,
                position: Point::new(config.left_x, config.water_level),
            },
            right: RefractionPoint {
                side: Side::Right,
                position: Point::new(config.right_x, config.water_level),
            },
            left_angle: clamp_angle(config.left_angle),
            right_angle: clamp_angle(config.right_angle),
            refractive_index: config.refractive_index,
            apparent: None,
            locked_real: None,
            lock_real_position: false,
        };
        system.apparent = system.apparent_from_angles();
        if config.lock_real_position {
            system.locked_real = system.real_from_angles();
            system.lock_real_position = true;
        }
        system
    }
    /// Returns the y coordinate of the interface.
    #[must_use]
    pub const fn water_level(&self) -> f64 {
        self.water_level
    }
    /// Returns the [`RefractionPoint`] of the given side.
    #[must_use]
    pub const fn refraction_point(&self, side: Side) -> &RefractionPoint {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
    /// Returns the water-side angle at the refraction point of the given side.
    #[must_use]
    pub const fn angle(&self, side: Side) -> Angle {
        match side {
            Side::Left => self.left_angle,
            Side::Right => self.right_angle,
        }
    }
    /// Returns the refractive index of the water.
    #[must_use]
    pub const fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
    /// Returns the apparent position or `None` if it could not be derived.
    #[must_use]
    pub const fn apparent_position(&self) -> Option<Point> {
        self.apparent
    }
    /// Returns `true` if the real position is the authoritative quantity.
    #[must_use]
    pub const fn lock_real_position(&self) -> bool {
        self.lock_real_position
    }
    /// Returns the locked real position regardless of the current refraction state.
    #[must_use]
    pub const fn locked_real_position(&self) -> Option<Point> {
        self.locked_real
    }
    /// Returns the length of the ray segments in [`SideRays`].
    #[must_use]
    pub const fn ray_length(&self) -> f64 {
        self.ray_length
    }
    /// Returns the horizontal distance between the two refraction points.
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.right.position.x - self.left.position.x).abs()
    }
    /// Returns the critical angle of the water or `None` if no total internal reflection is possible (`n == 1.0`).
    #[must_use]
    pub fn critical_angle(&self) -> Option<Angle> {
        critical_angle(self.refractive_index)
    }
    /// Returns `true` if the angle at the given side reaches the critical angle (total internal reflection).
    #[must_use]
    pub fn exceeds_critical(&self, side: Side) -> bool {
        self.critical_angle()
            .is_some_and(|critical| self.angle(side) >= critical)
    }
    /// Returns `true` if at least one side is in total internal reflection.
    #[must_use]
    pub fn any_tir(&self) -> bool {
        self.exceeds_critical(Side::Left) || self.exceeds_critical(Side::Right)
    }
    /// Refraction of the water-side ray at the given side into air.
    #[must_use]
    pub fn refraction(&self, side: Side) -> Refraction {
        water_to_air(self.angle(side), self.refractive_index)
    }
    /// Returns the air-side angle at the given side or `None` in case of total internal reflection.
    #[must_use]
    pub fn refracted_angle(&self, side: Side) -> Option<Angle> {
        self.refraction(side).angle()
    }
    /// Side towards which the rays at the refraction point of the given side leave.
    ///
    /// The side is classified against the apparent position (or the locked real position if no apparent position
    /// is available). Without any target, or with the target straight above or below the refraction point, both
    /// refraction points face each other.
    #[must_use]
    pub fn ray_side(&self, side: Side) -> Side {
        let target = self.apparent.or(if self.lock_real_position {
            self.locked_real
        } else {
            None
        });
        let origin = self.refraction_point(side).position;
        target
            .filter(|target| (target.x - origin.x).abs() > SIDE_TOLERANCE)
            .map_or_else(|| side.opposite(), |target| side_of(&target, &origin))
    }
    /// The real position.
    ///
    /// If the real position is locked, the locked position is returned, otherwise it is derived from the current
    /// angles (see [`OpticalSystem::real_from_angles`]). Returns `None` if any side is in total internal reflection.
    #[must_use]
    pub fn real_position(&self) -> Option<Point> {
        if self.any_tir() {
            return None;
        }
        if self.lock_real_position {
            self.locked_real
        } else {
            self.real_from_angles()
        }
    }
    /// Intersect the two rays refracted into air.
    ///
    /// Returns `None` if any side is in total internal reflection, the rays are parallel or they meet at or below the
    /// interface.
    #[must_use]
    pub fn real_from_angles(&self) -> Option<Point> {
        let left_air = self.refracted_angle(Side::Left)?;
        let right_air = self.refracted_angle(Side::Right)?;
        intersect(
            &self.left.position,
            left_air,
            self.ray_side(Side::Left),
            &self.right.position,
            right_air,
            self.ray_side(Side::Right),
        )
        .filter(|p| p.y < self.water_level)
    }
    /// Intersect the straight continuations of the two water-side rays.
    ///
    /// The sides are first classified against the current apparent position. If these rays do not meet above the
    /// interface, the refraction points are taken as facing each other. Returns `None` if any side is in total
    /// internal reflection or no intersection exists.
    #[must_use]
    pub fn apparent_from_angles(&self) -> Option<Point> {
        if self.any_tir() {
            return None;
        }
        let classified =
            self.intersect_water_rays(self.ray_side(Side::Left), self.ray_side(Side::Right));
        let above = |p: &Point| p.y < self.water_level;
        classified
            .filter(above)
            .or_else(|| self.intersect_water_rays(Side::Right, Side::Left))
            .or(classified)
    }
    fn intersect_water_rays(&self, left_direction: Side, right_direction: Side) -> Option<Point> {
        intersect(
            &self.left.position,
            self.left_angle,
            left_direction,
            &self.right.position,
            self.right_angle,
            right_direction,
        )
    }
    /// Derive the apparent position from the given real position.
    ///
    /// The viewing ray from each refraction point towards `real` is refracted into the water and the two resulting
    /// directions are continued into air and intersected. Returns `None` if the real position is not above the
    /// interface, any side is currently in total internal reflection or the rays are parallel.
    #[must_use]
    pub fn apparent_from_real(&self, real: &Point) -> Option<Point> {
        if real.y >= self.water_level || self.any_tir() {
            return None;
        }
        let left_water = self.water_angle_towards(Side::Left, real)?;
        let right_water = self.water_angle_towards(Side::Right, real)?;
        intersect(
            &self.left.position,
            left_water,
            side_of(real, &self.left.position),
            &self.right.position,
            right_water,
            side_of(real, &self.right.position),
        )
    }
    /// Water-side angles at both refraction points (left, right) of rays pointing towards the given real position.
    #[must_use]
    pub fn angles_from_real(&self, real: &Point) -> Option<(Angle, Angle)> {
        Some((
            clamp_angle(self.water_angle_towards(Side::Left, real)?),
            clamp_angle(self.water_angle_towards(Side::Right, real)?),
        ))
    }
    /// Angles (left, right) of the lines from both refraction points to the apparent position.
    ///
    /// Returns `None` if no apparent position is available.
    #[must_use]
    pub fn angles_from_apparent(&self) -> Option<(Angle, Angle)> {
        let apparent = self.apparent?;
        Some((
            clamp_angle(angle_from_vector(&self.left.position, &apparent)),
            clamp_angle(angle_from_vector(&self.right.position, &apparent)),
        ))
    }
    fn water_angle_towards(&self, side: Side, real: &Point) -> Option<Angle> {
        let air = angle_from_vector(&self.refraction_point(side).position, real);
        air_to_water(air, self.refractive_index).angle()
    }
    /// Ray segments at the refraction point of the given side.
    #[must_use]
    pub fn rays(&self, side: Side) -> SideRays {
        let origin = self.refraction_point(side).position;
        let angle = self.angle(side);
        let direction = self.ray_side(side);
        let apparent = ray_point(&origin, angle, self.ray_length, direction);
        let (transmitted, reflected) = match self.refraction(side) {
            Refraction::Refracted(air) => (
                Some(ray_point(&origin, air, self.ray_length, direction)),
                None,
            ),
            Refraction::TotalInternalReflection => {
                (None, Some(mirror_across(&apparent, self.water_level)))
            }
        };
        SideRays {
            origin,
            water: ray_point(&origin, angle, -self.ray_length, direction),
            apparent,
            transmitted,
            reflected,
        }
    }
    pub(crate) fn set_refraction_x(&mut self, side: Side, x: f64) {
        let water_level = self.water_level;
        let point = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        point.position = Point::new(x, water_level);
    }
    pub(crate) fn set_angle(&mut self, side: Side, angle: Angle) {
        let angle = clamp_angle(angle);
        match side {
            Side::Left => self.left_angle = angle,
            Side::Right => self.right_angle = angle,
        }
    }
    pub(crate) fn set_angles(&mut self, (left, right): (Angle, Angle)) {
        self.set_angle(Side::Left, left);
        self.set_angle(Side::Right, right);
    }
    pub(crate) fn set_refractive_index(&mut self, refractive_index: f64) {
        self.refractive_index = refractive_index;
    }
    pub(crate) fn set_apparent(&mut self, apparent: Option<Point>) {
        self.apparent = apparent;
    }
    pub(crate) fn set_locked_real(&mut self, real: Option<Point>) {
        self.locked_real = real;
    }
    pub(crate) fn set_lock_real_position(&mut self, lock: bool) {
        self.lock_real_position = lock;
    }
}
