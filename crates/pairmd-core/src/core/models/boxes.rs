use nalgebra::Vector3;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum BoxError {
    #[error("Box extent along {0} must be positive, got {1}")]
    NonPositiveExtent(Axis, f64),
}

/// A Cartesian axis of the simulation box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes, in component order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The vector component index of this axis.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// An axis-aligned simulation cell with positive side lengths.
///
/// The box is externally owned and outlives a pair-list generation / force
/// cycle. Resizing is supported; the engine validates its cached grid against
/// the current box extents on every generation call, so a resize transparently
/// triggers a grid rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationBox {
    lengths: Vector3<f64>,
}

impl SimulationBox {
    /// Creates a box with the given side lengths in nanometers.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::NonPositiveExtent`] if any side length is not
    /// strictly positive.
    pub fn new(lx: f64, ly: f64, lz: f64) -> Result<Self, BoxError> {
        let lengths = Vector3::new(lx, ly, lz);
        for axis in Axis::ALL {
            let extent = lengths[axis.index()];
            if extent <= 0.0 {
                return Err(BoxError::NonPositiveExtent(axis, extent));
            }
        }
        Ok(Self { lengths })
    }

    /// Creates a cubic box with the given side length.
    pub fn cubic(length: f64) -> Result<Self, BoxError> {
        Self::new(length, length, length)
    }

    /// The side lengths in nanometers.
    #[inline]
    pub fn lengths(&self) -> &Vector3<f64> {
        &self.lengths
    }

    /// The side length along one axis.
    #[inline]
    pub fn length(&self, axis: Axis) -> f64 {
        self.lengths[axis.index()]
    }

    /// The box volume in cubic nanometers.
    pub fn volume(&self) -> f64 {
        self.lengths.x * self.lengths.y * self.lengths.z
    }

    /// Resizes the box, validating the new extents.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::NonPositiveExtent`] if any new side length is not
    /// strictly positive; the box is left unchanged in that case.
    pub fn resize(&mut self, lx: f64, ly: f64, lz: f64) -> Result<(), BoxError> {
        *self = Self::new(lx, ly, lz)?;
        Ok(())
    }
}
