//! This is the documentation for the **archerfish** package, a refraction geometry engine for a planar water/air
//! interface.
//!
//! An object above the water is seen by an observer below the surface through two refraction points. Due to
//! refraction, the *apparent* position of the object differs from its *real* position. Given the two refraction
//! points and either the two water-side angles or a target position, all other quantities are derived using Snell's
//! law and kept consistent while single inputs are edited through the [`Controller`].
//!
//! ```
//! use archerfish::{degree, geometry::Side, Controller};
//!
//! let mut controller: Controller = Controller::default();
//! controller.set_angle(Side::Left, degree!(50.0)).unwrap();
//! assert!(controller.system().exceeds_critical(Side::Left));
//! assert!(controller.system().real_position().is_none());
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod intersection;
pub mod optical_system;
pub mod refraction;
pub mod utils;

pub use config::SimulationConfig;
pub use controller::{Controller, Edit, EditOrigin, NullRenderer, Renderer};
pub use optical_system::OpticalSystem;
