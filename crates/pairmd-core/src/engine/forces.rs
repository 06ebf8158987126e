use super::bc::BoundaryCondition;
use super::pairlist::PairList;
use crate::core::forcefield::pairwise::PotentialTable;
use crate::core::models::boxes::SimulationBox;
use crate::core::models::particle::Particle;
use crate::core::models::system::ParticleSystem;
use nalgebra::Vector3;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Below this particle count, non-bonded evaluation stays on the calling
/// thread; dispatch overhead dominates small runs.
pub(crate) const CONCURRENT_PARTICLE_THRESHOLD: usize = 1000;
/// Number of disjoint sub-lists the pair list is split into for the
/// fork-join phase.
pub(crate) const SUBLIST_COUNT: usize = 8;

/// Evaluates pair potentials over pair lists and accumulates forces.
///
/// Both entry points only ever add per-particle force contributions; the
/// caller zeroes forces once per step before any call. For large systems the
/// non-bonded walk is a fork-join: the pair list is split into
/// [`SUBLIST_COUNT`] disjoint sub-lists, each task accumulates into its own
/// full-size force array, and the merge into particle state is strictly
/// single-threaded after all tasks join. Sub-lists are re-split only when the
/// pair list reports modification. A panic inside a task propagates to the
/// caller on join and aborts the step.
#[derive(Debug)]
pub struct Forces {
    bc: BoundaryCondition,
    table: PotentialTable,
    partitions: Option<Vec<Vec<(usize, usize)>>>,
}

impl Forces {
    pub fn new(bc: BoundaryCondition, table: PotentialTable) -> Self {
        Self {
            bc,
            table,
            partitions: None,
        }
    }

    /// Replaces the potential table (species composition or cutoff changed).
    pub fn set_table(&mut self, table: PotentialTable) {
        self.table = table;
    }

    /// Evaluates all non-bonded pairs, accumulating forces into the system.
    ///
    /// Returns the total non-bonded potential energy. An empty pair list
    /// returns zero without touching forces.
    #[instrument(skip_all, name = "non_bonded_forces")]
    pub fn non_bonded(&mut self, system: &mut ParticleSystem, pair_list: &mut PairList) -> f64 {
        if pair_list.non_bonded().is_empty() {
            return 0.0;
        }

        if pair_list.particle_count() < CONCURRENT_PARTICLE_THRESHOLD {
            let (energy, forces) = {
                let particles = system.particles_ordered();
                evaluate_sublist(
                    &particles,
                    pair_list.non_bonded(),
                    &self.bc,
                    &self.table,
                    system.simulation_box(),
                )
            };
            system.apply_forces(&forces);
            return energy;
        }

        if pair_list.take_modified() {
            self.partitions = None;
        }
        let partitions = self.partitions.get_or_insert_with(|| {
            debug!(
                pairs = pair_list.non_bonded().len(),
                sublists = SUBLIST_COUNT,
                "re-splitting pair list for concurrent evaluation"
            );
            split_pairs(pair_list.non_bonded())
        });

        let (energy, forces) = {
            let particles = system.particles_ordered();
            let simulation_box = system.simulation_box();
            let bc = &self.bc;
            let table = &self.table;
            let partials: Vec<(f64, Vec<Vector3<f64>>)> = partitions
                .par_iter()
                .map(|sublist| evaluate_sublist(&particles, sublist, bc, table, simulation_box))
                .collect();

            let mut total_energy = 0.0;
            let mut total_forces = vec![Vector3::zeros(); particles.len()];
            for (partial_energy, partial_forces) in partials {
                total_energy += partial_energy;
                for (accumulated, contribution) in total_forces.iter_mut().zip(partial_forces) {
                    *accumulated += contribution;
                }
            }
            (total_energy, total_forces)
        };
        system.apply_forces(&forces);
        energy
    }

    /// Evaluates every group's bonds, accumulating forces into the system.
    ///
    /// Bonded counts are small, so this walk is single-threaded. Returns the
    /// total bonded potential energy.
    #[instrument(skip_all, name = "bonded_forces")]
    pub fn bonded(&self, system: &mut ParticleSystem) -> f64 {
        let (energy, forces) = {
            let particles = system.particles_ordered();
            let simulation_box = system.simulation_box();
            let mut forces = vec![Vector3::zeros(); particles.len()];
            let mut energy = 0.0;
            for group in system.groups() {
                for bond in group.bonds() {
                    let p_i = particles[bond.i];
                    let p_j = particles[bond.j];
                    let dr = self
                        .bc
                        .displacement(simulation_box, &p_i.position, &p_j.position);
                    let potential = self.table.bonded_between(&p_i.spec.name, &p_j.spec.name);
                    let (bond_energy, force_on_j) = potential.evaluate(&dr);
                    energy += bond_energy;
                    forces[bond.j] += force_on_j;
                    forces[bond.i] -= force_on_j;
                }
            }
            (energy, forces)
        };
        system.apply_forces(&forces);
        energy
    }
}

/// Evaluates one sub-list into a private full-size force array.
///
/// The returned array is indexed by dense particle index; a particle may
/// appear in pairs on several sub-lists, so contributions are only merged
/// into shared state after all tasks join.
fn evaluate_sublist(
    particles: &[&Particle],
    pairs: &[(usize, usize)],
    bc: &BoundaryCondition,
    table: &PotentialTable,
    simulation_box: &SimulationBox,
) -> (f64, Vec<Vector3<f64>>) {
    let mut forces = vec![Vector3::zeros(); particles.len()];
    let mut energy = 0.0;
    for &(i, j) in pairs {
        let p_i = particles[i];
        let p_j = particles[j];
        let dr = bc.displacement(simulation_box, &p_i.position, &p_j.position);
        let potential = table.non_bonded_between(&p_i.spec.name, &p_j.spec.name);
        let (pair_energy, force_on_j) = potential.evaluate(&dr);
        energy += pair_energy;
        forces[j] += force_on_j;
        forces[i] -= force_on_j;
    }
    (energy, forces)
}

fn split_pairs(pairs: &[(usize, usize)]) -> Vec<Vec<(usize, usize)>> {
    let chunk_size = pairs.len().div_ceil(SUBLIST_COUNT).max(1);
    pairs.chunks(chunk_size).map(<[_]>::to_vec).collect()
}
