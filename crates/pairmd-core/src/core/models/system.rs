use super::boxes::SimulationBox;
use super::group::{ParticleGroup, TopologyError};
use super::ids::ParticleId;
use super::particle::Particle;
use super::spec::ParticleSpec;
use nalgebra::{Point3, Vector3};
use slotmap::SlotMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Represents a complete particle system: particles, bonded groups, and box.
///
/// This struct is the central arena for all particle state. Particles are
/// stored in a slot map keyed by opaque [`ParticleId`] tokens, while a dense
/// sequence order (`0..N`) is maintained alongside so that per-step force
/// buffers can be plain indexed arrays. Groups reference particles by dense
/// index, never by owned handles.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    /// Primary storage for particles using a slot map for stable IDs.
    particles: SlotMap<ParticleId, Particle>,
    /// Dense sequence order; `order[index]` is the particle at that index.
    order: Vec<ParticleId>,
    /// Bonded groups, referencing members by dense index.
    groups: Vec<ParticleGroup>,
    /// The simulation cell.
    simulation_box: SimulationBox,
}

impl ParticleSystem {
    /// Creates a new, empty particle system inside the given box.
    pub fn new(simulation_box: SimulationBox) -> Self {
        Self {
            particles: SlotMap::with_key(),
            order: Vec::new(),
            groups: Vec::new(),
            simulation_box,
        }
    }

    /// Adds a particle and returns its opaque ID.
    ///
    /// The particle receives the next dense sequence index. Particles are
    /// never removed during a run, so the dense order stays gap-free.
    ///
    /// # Arguments
    ///
    /// * `spec` - The shared species specification.
    /// * `position` - The initial position in nanometers.
    pub fn add_particle(&mut self, spec: Arc<ParticleSpec>, position: Point3<f64>) -> ParticleId {
        let index = self.order.len();
        let id = self
            .particles
            .insert_with_key(|id| Particle::new(id, index, spec, position));
        self.order.push(id);
        id
    }

    /// Registers a bonded group over existing particles.
    ///
    /// # Arguments
    ///
    /// * `members` - IDs of the member particles.
    /// * `bonds` - ID pairs to bond; every endpoint must be a member.
    ///
    /// # Errors
    ///
    /// Returns a [`TopologyError`] if an ID does not belong to this system or
    /// the group violates its structural invariants (empty membership,
    /// self-bond, bond endpoint outside the group).
    pub fn add_group(
        &mut self,
        members: &[ParticleId],
        bonds: &[(ParticleId, ParticleId)],
    ) -> Result<(), TopologyError> {
        let member_indices = members
            .iter()
            .map(|&id| self.index_of(id))
            .collect::<Result<Vec<_>, _>>()?;
        let bond_indices = bonds
            .iter()
            .map(|&(a, b)| Ok((self.index_of(a)?, self.index_of(b)?)))
            .collect::<Result<Vec<_>, TopologyError>>()?;
        self.groups
            .push(ParticleGroup::new(member_indices, bond_indices)?);
        Ok(())
    }

    fn index_of(&self, id: ParticleId) -> Result<usize, TopologyError> {
        self.particles
            .get(id)
            .map(|p| p.index)
            .ok_or(TopologyError::UnknownParticle)
    }

    /// Retrieves an immutable reference to a particle by its ID.
    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    /// Retrieves a mutable reference to a particle by its ID.
    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id)
    }

    /// Retrieves an immutable reference to a particle by its dense index.
    pub fn particle_by_index(&self, index: usize) -> Option<&Particle> {
        self.order.get(index).and_then(|&id| self.particles.get(id))
    }

    /// Retrieves a mutable reference to a particle by its dense index.
    pub fn particle_mut_by_index(&mut self, index: usize) -> Option<&mut Particle> {
        match self.order.get(index) {
            Some(&id) => self.particles.get_mut(id),
            None => None,
        }
    }

    /// Returns all particles in dense sequence order.
    ///
    /// The returned slice of references is indexable by dense index, which is
    /// the access pattern of the force evaluation inner loops.
    pub fn particles_ordered(&self) -> Vec<&Particle> {
        self.order.iter().map(|&id| &self.particles[id]).collect()
    }

    /// Returns an iterator over all particles in dense sequence order.
    pub fn particles_iter(&self) -> impl Iterator<Item = &Particle> {
        self.order.iter().map(|&id| &self.particles[id])
    }

    /// The number of particles in the system.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the system contains no particles.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The simulation box.
    pub fn simulation_box(&self) -> &SimulationBox {
        &self.simulation_box
    }

    /// Mutable access to the simulation box (e.g., for volume-changing moves).
    pub fn simulation_box_mut(&mut self) -> &mut SimulationBox {
        &mut self.simulation_box
    }

    /// The registered bonded groups.
    pub fn groups(&self) -> &[ParticleGroup] {
        &self.groups
    }

    /// Dense indices of free particles, i.e. those not in any group.
    pub fn free_indices(&self) -> Vec<usize> {
        let grouped: HashSet<usize> = self
            .groups
            .iter()
            .flat_map(|g| g.members().iter().copied())
            .collect();
        (0..self.order.len())
            .filter(|index| !grouped.contains(index))
            .collect()
    }

    /// Zeroes every particle's force accumulator.
    ///
    /// Force evaluation only ever adds contributions; the integrator calls
    /// this exactly once per step before any force call.
    pub fn reset_forces(&mut self) {
        for particle in self.particles.values_mut() {
            particle.reset_force();
        }
    }

    /// Adds a dense force array into particle state.
    ///
    /// `forces[index]` is added to the particle at that dense index. The array
    /// length must equal the particle count; excess entries are ignored.
    pub fn apply_forces(&mut self, forces: &[Vector3<f64>]) {
        for (&id, contribution) in self.order.iter().zip(forces.iter()) {
            self.particles[id].force += contribution;
        }
    }

    /// The average particle mass in unified atomic mass units, or zero for an
    /// empty system.
    pub fn average_mass(&self) -> f64 {
        if self.order.is_empty() {
            return 0.0;
        }
        let total: f64 = self.particles.values().map(|p| p.spec.mass).sum();
        total / self.order.len() as f64
    }

    /// The ionic strength as a number density, `½·Σ cᵢ·zᵢ²` in nm⁻³.
    ///
    /// Summed over individual particles, which is equivalent to the per-species
    /// form with cᵢ the species number density.
    pub fn ionic_strength(&self) -> f64 {
        let charge_sq_sum: f64 = self
            .particles
            .values()
            .map(|p| p.spec.charge * p.spec.charge)
            .sum();
        0.5 * charge_sq_sum / self.simulation_box.volume()
    }
}
