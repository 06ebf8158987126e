use super::ids::ParticleId;
use super::spec::ParticleSpec;
use nalgebra::{Point3, Vector3};
use std::sync::Arc;

/// Represents a single particle in a molecular dynamics simulation.
///
/// A particle carries mutable dynamical state (position, velocity, force
/// accumulator) alongside an immutable shared [`ParticleSpec`]. The dense
/// `index` is the particle's position in the system's sequence order and is
/// the only valid array index into per-step force buffers; the [`ParticleId`]
/// is an opaque stable token for cross-referencing.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// The opaque, stable identity of this particle.
    pub id: ParticleId,
    /// Dense sequence index in `0..N`, assigned by the owning system.
    pub index: usize,
    /// The shared, immutable species specification.
    pub spec: Arc<ParticleSpec>,
    /// Position in nanometers.
    pub position: Point3<f64>,
    /// Velocity in nanometers per picosecond.
    pub velocity: Vector3<f64>,
    /// Force accumulator in kJ/(mol·nm); reset once per step by the caller.
    pub force: Vector3<f64>,
    /// Whether this particle is excluded from movement (e.g., a wall particle).
    pub frozen: bool,
}

impl Particle {
    /// Creates a new particle at rest with a zeroed force accumulator.
    ///
    /// # Arguments
    ///
    /// * `id` - The opaque identity assigned by the owning system.
    /// * `index` - The dense sequence index assigned by the owning system.
    /// * `spec` - The shared species specification.
    /// * `position` - The initial position in nanometers.
    pub fn new(id: ParticleId, index: usize, spec: Arc<ParticleSpec>, position: Point3<f64>) -> Self {
        Self {
            id,
            index,
            spec,
            position,
            velocity: Vector3::zeros(),
            force: Vector3::zeros(),
            frozen: false,
        }
    }

    /// Adds a contribution to the force accumulator.
    #[inline]
    pub fn add_force(&mut self, contribution: &Vector3<f64>) {
        self.force += contribution;
    }

    /// Resets the force accumulator to zero.
    #[inline]
    pub fn reset_force(&mut self) {
        self.force = Vector3::zeros();
    }
}
