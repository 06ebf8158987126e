use super::bc::BoundaryCondition;
use super::grid::Grid;
use super::pairlist::PairList;
use crate::core::models::system::ParticleSystem;
use itertools::Itertools;
use std::collections::HashSet;
use tracing::{info, instrument, trace};

/// Produces candidate non-bonded pair lists via cell-grid decomposition.
///
/// The generator owns the grid cache: the grid is built lazily on first use
/// and validated against the current box extents and cutoff on every call, so
/// box resizes and cutoff changes transparently trigger a rebuild. Pairs are
/// collected into a set keyed by the order-independent index pair, then bonded
/// pairs and (optionally) frozen-frozen pairs are excluded.
#[derive(Debug)]
pub struct PairListGenerator {
    bc: BoundaryCondition,
    grid: Option<Grid>,
}

impl PairListGenerator {
    pub fn new(bc: BoundaryCondition) -> Self {
        Self { bc, grid: None }
    }

    /// The boundary condition pairs are generated under.
    pub fn boundary_condition(&self) -> &BoundaryCondition {
        &self.bc
    }

    /// Generates the non-bonded pair list for the current particle positions.
    ///
    /// # Arguments
    ///
    /// * `system` - The particle system to decompose.
    /// * `cutoff` - The effective (Verlet-padded) pair-list cutoff in nm.
    /// * `exclude_frozen_pairs` - Whether to drop pairs whose members are both
    ///   frozen.
    ///
    /// An empty system yields an empty list, never an error.
    #[instrument(skip_all, name = "pair_list_generation")]
    pub fn generate(
        &mut self,
        system: &ParticleSystem,
        cutoff: f64,
        exclude_frozen_pairs: bool,
    ) -> PairList {
        if system.is_empty() {
            return PairList::empty();
        }
        let bc = self.bc;
        let simulation_box = system.simulation_box();
        let grid = self
            .grid
            .get_or_insert_with(|| Grid::new(simulation_box, &bc, cutoff));
        if !grid.matches(simulation_box, cutoff) {
            info!(cutoff, "cell grid stale; rebuilding");
            *grid = Grid::new(simulation_box, &bc, cutoff);
        }
        let membership_changed = grid.assign(system, &bc);

        let particles = system.particles_ordered();
        let cutoff_sq = cutoff * cutoff;
        let within_cutoff = |a: usize, b: usize| {
            let dr = bc.displacement(
                simulation_box,
                &particles[a].position,
                &particles[b].position,
            );
            dr.norm_squared() <= cutoff_sq
        };

        let mut candidates: HashSet<(usize, usize)> = HashSet::new();
        for (cell_index, cell) in grid.cells().iter().enumerate() {
            let members = cell.particles();
            if members.is_empty() {
                continue;
            }
            for (slot, &a) in members.iter().enumerate() {
                for &b in &members[slot + 1..] {
                    if within_cutoff(a, b) {
                        candidates.insert(pair_key(a, b));
                    }
                }
            }
            for &neighbor_index in grid.neighbors(cell_index) {
                for &a in members {
                    for &b in grid.cells()[neighbor_index].particles() {
                        if within_cutoff(a, b) {
                            candidates.insert(pair_key(a, b));
                        }
                    }
                }
            }
        }

        let list = materialize(system, candidates, exclude_frozen_pairs, membership_changed);
        trace!(%list, "generated pair list");
        list
    }

    /// Brute-force O(N²) reference with identical exclusion rules.
    ///
    /// Produces an identical pair set to the cell-based path for any system
    /// and cutoff; kept as the cross-check oracle for the grid walk.
    pub fn generate_brute_force(
        &self,
        system: &ParticleSystem,
        cutoff: f64,
        exclude_frozen_pairs: bool,
    ) -> PairList {
        if system.is_empty() {
            return PairList::empty();
        }
        let simulation_box = system.simulation_box();
        let particles = system.particles_ordered();
        let cutoff_sq = cutoff * cutoff;
        let candidates: HashSet<(usize, usize)> = (0..particles.len())
            .tuple_combinations()
            .filter(|&(a, b)| {
                let dr = self.bc.displacement(
                    simulation_box,
                    &particles[a].position,
                    &particles[b].position,
                );
                dr.norm_squared() <= cutoff_sq
            })
            .map(|(a, b)| pair_key(a, b))
            .collect();
        materialize(system, candidates, exclude_frozen_pairs, true)
    }
}

#[inline]
fn pair_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

fn materialize(
    system: &ParticleSystem,
    mut candidates: HashSet<(usize, usize)>,
    exclude_frozen_pairs: bool,
    modified: bool,
) -> PairList {
    let mut bonded: Vec<(usize, usize)> = Vec::new();
    for group in system.groups() {
        for bond in group.bonds() {
            candidates.remove(&bond.key());
            bonded.push(bond.key());
        }
    }
    bonded.sort_unstable();
    bonded.dedup();

    if exclude_frozen_pairs {
        let particles = system.particles_ordered();
        candidates.retain(|&(a, b)| !(particles[a].frozen && particles[b].frozen));
    }

    let mut non_bonded: Vec<(usize, usize)> = candidates.into_iter().collect();
    non_bonded.sort_unstable();
    PairList::new(non_bonded, bonded, modified, system.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::boxes::{Axis, SimulationBox};
    use crate::core::models::spec::ParticleSpec;
    use crate::engine::bc::Periodicity;
    use nalgebra::Point3;
    use std::sync::Arc;

    fn spec() -> Arc<ParticleSpec> {
        ParticleSpec::new("Ar", 39.948, 0.0, 0.17).shared()
    }

    fn generator(periodicity: Periodicity) -> PairListGenerator {
        PairListGenerator::new(BoundaryCondition::new(periodicity).unwrap())
    }

    /// Deterministic xorshift positions for the equivalence tests.
    fn pseudo_random_system(count: usize, box_length: f64, seed: u64) -> ParticleSystem {
        let mut system = ParticleSystem::new(SimulationBox::cubic(box_length).unwrap());
        let mut state = seed;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1u64 << 53) as f64 * box_length
        };
        for _ in 0..count {
            let position = Point3::new(next(), next(), next());
            system.add_particle(spec(), position);
        }
        system
    }

    #[test]
    fn empty_system_yields_empty_list() {
        let system = ParticleSystem::new(SimulationBox::cubic(10.0).unwrap());
        let mut generator = generator(Periodicity::Full);
        let list = generator.generate(&system, 2.5, false);
        assert!(list.non_bonded().is_empty());
        assert_eq!(list.particle_count(), 0);
    }

    #[test]
    fn two_particle_scenario_yields_exactly_one_pair() {
        let mut system = ParticleSystem::new(SimulationBox::cubic(10.0).unwrap());
        system.add_particle(spec(), Point3::new(0.0, 0.0, 0.0));
        system.add_particle(spec(), Point3::new(0.0, 0.0, 1.0));
        let mut generator = generator(Periodicity::None);
        let list = generator.generate(&system, 2.5, false);
        assert_eq!(list.non_bonded(), &[(0, 1)]);
        assert!(list.bonded().is_empty());
        assert_eq!(list.particle_count(), 2);
    }

    #[test]
    fn periodic_wrap_finds_pair_across_the_boundary() {
        let mut system = ParticleSystem::new(SimulationBox::cubic(1.0).unwrap());
        system.add_particle(spec(), Point3::new(0.01, 0.5, 0.5));
        system.add_particle(spec(), Point3::new(0.99, 0.5, 0.5));
        let mut generator = generator(Periodicity::Full);
        let list = generator.generate(&system, 0.1, false);
        assert_eq!(list.non_bonded(), &[(0, 1)]);

        // Without periodicity the raw separation exceeds the cutoff.
        let mut open_generator = self::generator(Periodicity::None);
        let list = open_generator.generate(&system, 0.1, false);
        assert!(list.non_bonded().is_empty());
    }

    #[test]
    fn bonded_pairs_are_excluded_from_the_non_bonded_list() {
        let mut system = ParticleSystem::new(SimulationBox::cubic(10.0).unwrap());
        let a = system.add_particle(spec(), Point3::new(1.0, 1.0, 1.0));
        let b = system.add_particle(spec(), Point3::new(1.2, 1.0, 1.0));
        system.add_particle(spec(), Point3::new(1.4, 1.0, 1.0));
        system.add_group(&[a, b], &[(a, b)]).unwrap();

        let mut generator = generator(Periodicity::Full);
        let list = generator.generate(&system, 2.5, false);
        assert!(!list.non_bonded().contains(&(0, 1)));
        assert!(list.non_bonded().contains(&(0, 2)));
        assert!(list.non_bonded().contains(&(1, 2)));
        assert_eq!(list.bonded(), &[(0, 1)]);

        // No pair appears in both collections.
        for pair in list.non_bonded() {
            assert!(!list.bonded().contains(pair));
        }
    }

    #[test]
    fn frozen_pair_exclusion_is_a_toggle() {
        let mut system = ParticleSystem::new(SimulationBox::cubic(10.0).unwrap());
        let a = system.add_particle(spec(), Point3::new(1.0, 1.0, 1.0));
        let b = system.add_particle(spec(), Point3::new(1.5, 1.0, 1.0));
        system.add_particle(spec(), Point3::new(2.0, 1.0, 1.0));
        for id in [a, b] {
            if let Some(p) = system.particle_mut(id) {
                p.frozen = true;
            }
        }

        let mut generator = generator(Periodicity::Full);
        let included = generator.generate(&system, 2.5, false);
        assert!(included.non_bonded().contains(&(0, 1)));

        let excluded = generator.generate(&system, 2.5, true);
        assert!(!excluded.non_bonded().contains(&(0, 1)));
        // Frozen-free pairs survive.
        assert!(excluded.non_bonded().contains(&(0, 2)));
        assert!(excluded.non_bonded().contains(&(1, 2)));
    }

    #[test]
    fn no_pair_appears_twice() {
        let system = pseudo_random_system(80, 4.0, 0x9e3779b97f4a7c15);
        let mut generator = generator(Periodicity::Full);
        let list = generator.generate(&system, 1.0, false);
        let unique: HashSet<_> = list.non_bonded().iter().collect();
        assert_eq!(unique.len(), list.non_bonded().len());
        assert!(list.non_bonded().iter().all(|&(a, b)| a < b));
    }

    #[test]
    fn cell_walk_matches_brute_force_for_various_sizes() {
        for &count in &[0usize, 1, 2, 17, 60, 150] {
            for periodicity in [Periodicity::Full, Periodicity::None] {
                let system = pseudo_random_system(count, 5.0, 1 + count as u64);
                let mut generator = generator(periodicity);
                let cell_based = generator.generate(&system, 1.2, false);
                let reference = generator.generate_brute_force(&system, 1.2, false);
                assert_eq!(
                    cell_based.non_bonded(),
                    reference.non_bonded(),
                    "mismatch for N = {count}, {periodicity:?}"
                );
            }
        }
    }

    #[test]
    fn cell_walk_matches_brute_force_under_planar_and_axial_periodicity() {
        // Slab and pore geometries mix wrapped and truncated adjacency, so
        // the stencil must wrap on exactly the named axes.
        let modes = [
            Periodicity::TwoAxes(Axis::X, Axis::Y),
            Periodicity::TwoAxes(Axis::Y, Axis::Z),
            Periodicity::OneAxis(Axis::X),
            Periodicity::OneAxis(Axis::Z),
        ];
        for &count in &[2usize, 30, 120] {
            for (salt, periodicity) in modes.into_iter().enumerate() {
                let system = pseudo_random_system(count, 5.0, 17 + (count + salt) as u64);
                let mut generator = generator(periodicity);
                let cell_based = generator.generate(&system, 1.2, false);
                let reference = generator.generate_brute_force(&system, 1.2, false);
                assert_eq!(
                    cell_based.non_bonded(),
                    reference.non_bonded(),
                    "mismatch for N = {count}, {periodicity:?}"
                );
            }
        }
    }

    #[test]
    fn two_cell_axes_do_not_alias_wrapped_neighbors() {
        // With exactly two cells per axis, the +1 and -1 wrapped offsets land
        // on the same neighbor; deduplication must not drop real pairs.
        let system = pseudo_random_system(60, 4.0, 5);
        let mut generator = generator(Periodicity::Full);
        let cell_based = generator.generate(&system, 2.0, false);
        let reference = generator.generate_brute_force(&system, 2.0, false);
        assert_eq!(cell_based.non_bonded(), reference.non_bonded());
    }

    #[test]
    fn cell_walk_matches_brute_force_with_exclusions() {
        let mut system = pseudo_random_system(40, 3.0, 42);
        let a = system.particle_by_index(3).unwrap().id;
        let b = system.particle_by_index(7).unwrap().id;
        let c = system.particle_by_index(11).unwrap().id;
        system.add_group(&[a, b, c], &[(a, b), (b, c)]).unwrap();
        for index in [0, 1, 2, 3] {
            if let Some(p) = system.particle_mut_by_index(index) {
                p.frozen = true;
            }
        }
        for exclude_frozen in [false, true] {
            let mut generator = generator(Periodicity::Full);
            let cell_based = generator.generate(&system, 1.0, exclude_frozen);
            let reference = generator.generate_brute_force(&system, 1.0, exclude_frozen);
            assert_eq!(cell_based.non_bonded(), reference.non_bonded());
            assert_eq!(cell_based.bonded(), reference.bonded());
        }
    }

    #[test]
    fn degenerate_cutoff_larger_than_box_still_matches_brute_force() {
        let system = pseudo_random_system(25, 2.0, 7);
        let mut generator = generator(Periodicity::Full);
        let cell_based = generator.generate(&system, 5.0, false);
        let reference = generator.generate_brute_force(&system, 5.0, false);
        assert_eq!(cell_based.non_bonded(), reference.non_bonded());
    }

    #[test]
    fn modified_flag_tracks_cell_membership_changes() {
        let mut system = pseudo_random_system(20, 5.0, 99);
        if let Some(p) = system.particle_mut_by_index(0) {
            p.position = Point3::new(0.1, 0.1, 0.1);
        }
        let mut generator = generator(Periodicity::Full);
        let first = generator.generate(&system, 1.5, false);
        assert!(first.is_modified());

        let second = generator.generate(&system, 1.5, false);
        assert!(!second.is_modified());

        // Moving a particle into a different cell marks the next list.
        if let Some(p) = system.particle_mut_by_index(0) {
            p.position = Point3::new(4.9, 4.9, 4.9);
        }
        let third = generator.generate(&system, 1.5, false);
        assert!(third.is_modified());
    }

    #[test]
    fn box_resize_triggers_grid_rebuild() {
        let mut system = pseudo_random_system(30, 5.0, 3);
        let mut generator = generator(Periodicity::Full);
        generator.generate(&system, 1.5, false);

        system.simulation_box_mut().resize(8.0, 8.0, 8.0).unwrap();
        let after = generator.generate(&system, 1.5, false);
        let reference = generator.generate_brute_force(&system, 1.5, false);
        assert_eq!(after.non_bonded(), reference.non_bonded());
    }
}
