#![warn(missing_docs)]
//! Archerfish specific error structures
use std::{error::Error, fmt::Display};

/// Archerfish specific Result type
pub type ArcherResult<T> = std::result::Result<T, ArcherError>;

/// Errors that can be returned by the mutators of the optical system.
///
/// All of them are recoverable. The state of the system is left unchanged if a mutator returns one of them.
#[derive(Debug, PartialEq, Eq)]
pub enum ArcherError {
    /// the refractive index is not finite or outside the interval `[1.0, 2.0]`
    RefractiveIndex(String),
    /// an angle input is not finite
    Angle(String),
    /// a point input is not finite or lies on the wrong side of the interface
    Position(String),
    /// the edit is not permitted in the current coupling mode
    Coupling(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for ArcherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RefractiveIndex(m) => {
                write!(f, "RefractiveIndex:{m}")
            }
            Self::Angle(m) => {
                write!(f, "Angle:{m}")
            }
            Self::Position(m) => {
                write!(f, "Position:{m}")
            }
            Self::Coupling(m) => {
                write!(f, "Coupling:{m}")
            }
            Self::Other(m) => write!(f, "Archerfish Error:Other:{m}"),
        }
    }
}
impl Error for ArcherError {}

impl std::convert::From<String> for ArcherError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
