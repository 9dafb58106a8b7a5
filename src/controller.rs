#![warn(missing_docs)]
//! Reconciliation of the [`OpticalSystem`] after user edits.
//!
//! Each [`Edit`] has exactly one origin. Its handler writes the edited value, recomputes the quantities depending on
//! it in a fixed order and terminates. Derived writes never dispatch further edits. While a handler runs, a
//! [`SuppressGuard`] is held so that any edit arriving during reconciliation is ignored.
//!
//! | origin | recomputation |
//! |---|---|
//! | refraction point | angles from the apparent position |
//! | apparent position | angles from the apparent position |
//! | real position (locked only) | angles from the real position, then apparent from real |
//! | angle | apparent from real (locked) or apparent from angles (unlocked) |
//! | refractive index | apparent from real (locked only) |
//! | coupling | apparent from real, then angles from the apparent position (unlock only) |
use std::cell::Cell;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use uom::si::f64::Angle;

use crate::{
    config::{validate_refractive_index, SimulationConfig},
    error::{ArcherError, ArcherResult},
    geometry::{Point, Side},
    optical_system::OpticalSystem,
};

/// The kind of quantity a user edit changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum EditOrigin {
    /// a refraction point was moved along the interface
    RefractionPoint,
    /// the apparent position was moved
    ApparentPosition,
    /// the real position was moved
    RealPosition,
    /// an angle was edited
    Angle,
    /// the refractive index was edited
    RefractiveIndex,
    /// the coupling mode was changed
    Coupling,
}

/// A single user edit together with its new raw value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Edit {
    /// Move the refraction point of the given side. Only the x coordinate is used.
    MoveRefractionPoint {
        /// which refraction point
        side: Side,
        /// new position
        position: Point,
    },
    /// Move the apparent position.
    MoveApparent(Point),
    /// Move the real position. Only permitted while the real position is locked.
    MoveReal(Point),
    /// Set the water-side angle of the given side.
    SetAngle {
        /// which refraction point
        side: Side,
        /// new angle, clamped to `[0°, 89.9°]`
        angle: Angle,
    },
    /// Set the refractive index of the water.
    SetRefractiveIndex(f64),
    /// Lock (`true`) or unlock (`false`) the real position.
    SetCoupling(bool),
}
impl Edit {
    /// Returns the [`EditOrigin`] of this [`Edit`].
    #[must_use]
    pub const fn origin(&self) -> EditOrigin {
        match self {
            Self::MoveRefractionPoint { .. } => EditOrigin::RefractionPoint,
            Self::MoveApparent(_) => EditOrigin::ApparentPosition,
            Self::MoveReal(_) => EditOrigin::RealPosition,
            Self::SetAngle { .. } => EditOrigin::Angle,
            Self::SetRefractiveIndex(_) => EditOrigin::RefractiveIndex,
            Self::SetCoupling(_) => EditOrigin::Coupling,
        }
    }
}

/// Consumer of the reconciled state, e.g. a canvas renderer.
pub trait Renderer {
    /// Called once after every successfully handled edit.
    fn redraw(&mut self, system: &OpticalSystem);
}
/// A [`Renderer`] doing nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;
impl Renderer for NullRenderer {
    fn redraw(&mut self, _system: &OpticalSystem) {}
}

/// Scoped suppression flag. The flag is released when the guard is dropped.
#[derive(Debug)]
pub struct SuppressGuard<'a> {
    flag: &'a Cell<bool>,
}
impl<'a> SuppressGuard<'a> {
    /// Set the flag and return a guard for it. Returns `None` if the flag is already set.
    #[must_use]
    pub fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag })
        }
    }
}
impl Drop for SuppressGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Owner of the [`OpticalSystem`] and the only way to mutate it.
#[derive(Debug)]
pub struct Controller<R: Renderer = NullRenderer> {
    system: OpticalSystem,
    suppress: Cell<bool>,
    renderer: R,
}
impl Default for Controller {
    fn default() -> Self {
        Self::with_renderer(OpticalSystem::default(), NullRenderer)
    }
}
impl Controller {
    /// Creates a new [`Controller`] without a renderer.
    ///
    /// # Errors
    ///
    /// This function will return an error if the given configuration is invalid.
    pub fn new(config: &SimulationConfig) -> ArcherResult<Self> {
        Ok(Self::with_renderer(OpticalSystem::new(config)?, NullRenderer))
    }
}
impl<R: Renderer> Controller<R> {
    /// Creates a new [`Controller`] for the given system, notifying `renderer` after each edit.
    pub const fn with_renderer(system: OpticalSystem, renderer: R) -> Self {
        Self {
            system,
            suppress: Cell::new(false),
            renderer,
        }
    }
    /// Returns a reference to the [`OpticalSystem`].
    #[must_use]
    pub const fn system(&self) -> &OpticalSystem {
        &self.system
    }
    /// Returns a reference to the renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }
    /// Returns `true` while an edit is being reconciled.
    #[must_use]
    pub fn is_reconciling(&self) -> bool {
        self.suppress.get()
    }
    /// Handle a single edit and request a redraw afterwards.
    ///
    /// Edits arriving while another edit is reconciled are ignored.
    ///
    /// # Errors
    ///
    /// This function will return an error if the edit carries an invalid value or is not permitted in the current
    /// coupling mode. The system is left unchanged in this case and no redraw is requested.
    pub fn dispatch(&mut self, edit: Edit) -> ArcherResult<()> {
        let Some(_guard) = SuppressGuard::acquire(&self.suppress) else {
            trace!("ignoring {} edit during reconciliation", edit.origin());
            return Ok(());
        };
        debug!("reconciling {} edit", edit.origin());
        let system = &mut self.system;
        match edit {
            Edit::MoveRefractionPoint { side, position } => {
                refraction_point_moved(system, side, position)?;
            }
            Edit::MoveApparent(position) => apparent_moved(system, position)?,
            Edit::MoveReal(position) => real_moved(system, position)?,
            Edit::SetAngle { side, angle } => angle_edited(system, side, angle)?,
            Edit::SetRefractiveIndex(n) => refractive_index_edited(system, n)?,
            Edit::SetCoupling(lock) => coupling_changed(system, lock),
        }
        for side in Side::iter() {
            if system.exceeds_critical(side) {
                warn!("total internal reflection at {side} refraction point");
            }
        }
        self.renderer.redraw(&self.system);
        Ok(())
    }
    /// Move the refraction point of the given side along the interface.
    ///
    /// # Errors
    ///
    /// This function will return an error if the x coordinate is not finite.
    pub fn move_refraction_point(&mut self, side: Side, position: Point) -> ArcherResult<()> {
        self.dispatch(Edit::MoveRefractionPoint { side, position })
    }
    /// Move the apparent position.
    ///
    /// # Errors
    ///
    /// This function will return an error if the position is not finite.
    pub fn move_apparent(&mut self, position: Point) -> ArcherResult<()> {
        self.dispatch(Edit::MoveApparent(position))
    }
    /// Move the real position.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the real position is not locked.
    ///   - the position is not finite or not above the interface.
    pub fn move_real(&mut self, position: Point) -> ArcherResult<()> {
        self.dispatch(Edit::MoveReal(position))
    }
    /// Set the water-side angle of the given side.
    ///
    /// # Errors
    ///
    /// This function will return an error if the angle is not finite.
    pub fn set_angle(&mut self, side: Side, angle: Angle) -> ArcherResult<()> {
        self.dispatch(Edit::SetAngle { side, angle })
    }
    /// Set the refractive index of the water.
    ///
    /// # Errors
    ///
    /// This function will return an error if the index is not finite or outside `[1.0, 2.0]`.
    pub fn set_refractive_index(&mut self, refractive_index: f64) -> ArcherResult<()> {
        self.dispatch(Edit::SetRefractiveIndex(refractive_index))
    }
    /// Lock or unlock the real position.
    ///
    /// # Errors
    ///
    /// This function does not fail but shares the signature of the other mutators.
    pub fn set_coupling(&mut self, lock: bool) -> ArcherResult<()> {
        self.dispatch(Edit::SetCoupling(lock))
    }
    /// Toggle the coupling mode.
    ///
    /// # Errors
    ///
    /// This function does not fail but shares the signature of the other mutators.
    pub fn toggle_coupling(&mut self) -> ArcherResult<()> {
        let lock = !self.system.lock_real_position();
        self.set_coupling(lock)
    }
}

fn check_point(position: &Point) -> ArcherResult<()> {
    if position.x.is_finite() && position.y.is_finite() {
        Ok(())
    } else {
        Err(ArcherError::Position("coordinates must be finite".into()))
    }
}

fn angles_from_apparent(system: &mut OpticalSystem) {
    if let Some(angles) = system.angles_from_apparent() {
        system.set_angles(angles);
    } else {
        warn!("apparent position unavailable, angles kept");
    }
}

fn apparent_from_real(system: &mut OpticalSystem) {
    let apparent = system
        .locked_real_position()
        .and_then(|real| system.apparent_from_real(&real));
    if apparent.is_some() {
        system.set_apparent(apparent);
    } else {
        warn!("cannot derive apparent position from real position, apparent position kept");
    }
}

fn refraction_point_moved(system: &mut OpticalSystem, side: Side, position: Point) -> ArcherResult<()> {
    if !position.x.is_finite() {
        return Err(ArcherError::Position("coordinates must be finite".into()));
    }
    system.set_refraction_x(side, position.x);
    angles_from_apparent(system);
    Ok(())
}

fn apparent_moved(system: &mut OpticalSystem, position: Point) -> ArcherResult<()> {
    check_point(&position)?;
    system.set_apparent(Some(position));
    angles_from_apparent(system);
    Ok(())
}

fn real_moved(system: &mut OpticalSystem, position: Point) -> ArcherResult<()> {
    if !system.lock_real_position() {
        return Err(ArcherError::Coupling(
            "the real position can only be moved while it is locked".into(),
        ));
    }
    check_point(&position)?;
    if position.y >= system.water_level() {
        return Err(ArcherError::Position(
            "the real position must lie above the interface".into(),
        ));
    }
    let angles = system.angles_from_real(&position).ok_or_else(|| {
        ArcherError::Other("cannot derive angles from the real position".into())
    })?;
    system.set_locked_real(Some(position));
    system.set_angles(angles);
    apparent_from_real(system);
    Ok(())
}

fn angle_edited(system: &mut OpticalSystem, side: Side, angle: Angle) -> ArcherResult<()> {
    if !angle.is_finite() {
        return Err(ArcherError::Angle("angle must be finite".into()));
    }
    system.set_angle(side, angle);
    if system.lock_real_position() {
        apparent_from_real(system);
    } else {
        let apparent = system.apparent_from_angles();
        if apparent.is_none() {
            warn!("apparent position unavailable");
        }
        system.set_apparent(apparent);
    }
    Ok(())
}

fn refractive_index_edited(system: &mut OpticalSystem, n: f64) -> ArcherResult<()> {
    validate_refractive_index(n)?;
    system.set_refractive_index(n);
    if system.lock_real_position() {
        apparent_from_real(system);
    }
    Ok(())
}

fn coupling_changed(system: &mut OpticalSystem, lock: bool) {
    match (system.lock_real_position(), lock) {
        (false, false) => return,
        (false, true) => {
            let real = system.real_from_angles();
            system.set_locked_real(real);
            system.set_lock_real_position(true);
        }
        (true, _) => {}
    }
    apparent_from_real(system);
    if !lock {
        angles_from_apparent(system);
        system.set_lock_real_position(false);
        system.set_locked_real(None);
    }
}
