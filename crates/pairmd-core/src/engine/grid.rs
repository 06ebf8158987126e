use super::bc::BoundaryCondition;
use crate::core::models::boxes::{Axis, SimulationBox};
use crate::core::models::system::ParticleSystem;
use std::collections::HashSet;
use tracing::debug;

/// A fixed-size bucket referencing the particles currently inside one cell.
#[derive(Debug, Clone, Default)]
pub(crate) struct Cell {
    particles: Vec<usize>,
}

impl Cell {
    pub(crate) fn particles(&self) -> &[usize] {
        &self.particles
    }
}

/// A spatial cell grid sized to the pair-list cutoff.
///
/// The grid partitions the box into cells of at least cutoff extent, so that
/// all pairs within cutoff lie in the same or adjacent cells. The
/// neighbor-cell adjacency is precomputed at construction, honoring periodic
/// wrap only on periodic axes; cell membership is recomputed on every
/// [`Grid::assign`] pass. A grid is rebuilt when box extents or cutoff change
/// and reused otherwise.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    counts: [usize; 3],
    cell_lengths: [f64; 3],
    box_lengths: [f64; 3],
    cutoff: f64,
    cells: Vec<Cell>,
    neighbors: Vec<Vec<usize>>,
    membership: Vec<usize>,
}

impl Grid {
    /// Builds a grid for the given box, boundary condition, and cutoff.
    ///
    /// Per-axis cell counts are `max(1, floor(length / cutoff))`; a cutoff
    /// larger than a box extent collapses that axis to a single cell,
    /// degenerating toward all-pairs there.
    pub(crate) fn new(
        simulation_box: &SimulationBox,
        bc: &BoundaryCondition,
        cutoff: f64,
    ) -> Self {
        let mut counts = [1usize; 3];
        let mut cell_lengths = [0.0; 3];
        let mut box_lengths = [0.0; 3];
        for axis in Axis::ALL {
            let k = axis.index();
            let length = simulation_box.length(axis);
            box_lengths[k] = length;
            counts[k] = ((length / cutoff).floor() as usize).max(1);
            cell_lengths[k] = length / counts[k] as f64;
        }
        let total = counts[0] * counts[1] * counts[2];
        let cells = vec![Cell::default(); total];
        let neighbors = build_adjacency(counts, bc);
        debug!(
            nx = counts[0],
            ny = counts[1],
            nz = counts[2],
            cutoff,
            "built cell grid"
        );
        Self {
            counts,
            cell_lengths,
            box_lengths,
            cutoff,
            cells,
            neighbors,
            membership: Vec::new(),
        }
    }

    /// Whether this grid still matches the given box extents and cutoff.
    pub(crate) fn matches(&self, simulation_box: &SimulationBox, cutoff: f64) -> bool {
        if self.cutoff != cutoff {
            return false;
        }
        Axis::ALL
            .iter()
            .all(|axis| self.box_lengths[axis.index()] == simulation_box.length(*axis))
    }

    /// Assigns every particle to the cell containing its wrapped position.
    ///
    /// Clears all buckets, maps each particle's position through the boundary
    /// condition's periodic normalization to an integer cell coordinate
    /// (clamped on non-periodic axes), and appends. O(N). Returns whether cell
    /// membership changed since the previous pass.
    pub(crate) fn assign(&mut self, system: &ParticleSystem, bc: &BoundaryCondition) -> bool {
        for cell in &mut self.cells {
            cell.particles.clear();
        }
        let simulation_box = system.simulation_box();
        let mut membership = Vec::with_capacity(system.len());
        for particle in system.particles_iter() {
            let wrapped = bc.wrap(simulation_box, &particle.position);
            let mut coord = [0usize; 3];
            for k in 0..3 {
                let raw = (wrapped[k] / self.cell_lengths[k]).floor() as isize;
                coord[k] = raw.clamp(0, self.counts[k] as isize - 1) as usize;
            }
            let cell_index = self.linear_index(coord);
            self.cells[cell_index].particles.push(particle.index);
            membership.push(cell_index);
        }
        let changed = membership != self.membership;
        self.membership = membership;
        changed
    }

    /// Per-axis cell counts.
    pub(crate) fn counts(&self) -> [usize; 3] {
        self.counts
    }

    /// All cells, addressable by linear index.
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Forward neighbor cells (linear index greater than the owner) to check
    /// against the cell at `cell_index`.
    pub(crate) fn neighbors(&self, cell_index: usize) -> &[usize] {
        &self.neighbors[cell_index]
    }

    #[inline]
    fn linear_index(&self, coord: [usize; 3]) -> usize {
        (coord[0] * self.counts[1] + coord[1]) * self.counts[2] + coord[2]
    }
}

/// Precomputes the forward half of the 27-stencil per cell.
///
/// Offsets wrap on periodic axes and are discarded when they leave the grid
/// on non-periodic ones. Wrap can alias distinct offsets onto the same cell
/// on small grids, so neighbors are deduplicated; restricting to linear
/// indices greater than the owner visits each cell pair once.
fn build_adjacency(counts: [usize; 3], bc: &BoundaryCondition) -> Vec<Vec<usize>> {
    let total = counts[0] * counts[1] * counts[2];
    let mut adjacency = Vec::with_capacity(total);
    let linear = |coord: [usize; 3]| (coord[0] * counts[1] + coord[1]) * counts[2] + coord[2];
    for ix in 0..counts[0] {
        for iy in 0..counts[1] {
            for iz in 0..counts[2] {
                let own = linear([ix, iy, iz]);
                let mut seen = HashSet::new();
                let mut forward = Vec::new();
                for dx in -1i64..=1 {
                    for dy in -1i64..=1 {
                        for dz in -1i64..=1 {
                            if dx == 0 && dy == 0 && dz == 0 {
                                continue;
                            }
                            let offset = [dx, dy, dz];
                            let base = [ix, iy, iz];
                            let mut coord = [0usize; 3];
                            let mut valid = true;
                            for (k, axis) in Axis::ALL.iter().enumerate() {
                                let shifted = base[k] as i64 + offset[k];
                                let count = counts[k] as i64;
                                if bc.is_periodic(*axis) {
                                    coord[k] = shifted.rem_euclid(count) as usize;
                                } else if (0..count).contains(&shifted) {
                                    coord[k] = shifted as usize;
                                } else {
                                    valid = false;
                                    break;
                                }
                            }
                            if !valid {
                                continue;
                            }
                            let neighbor = linear(coord);
                            if neighbor > own && seen.insert(neighbor) {
                                forward.push(neighbor);
                            }
                        }
                    }
                }
                forward.sort_unstable();
                adjacency.push(forward);
            }
        }
    }
    adjacency
}
