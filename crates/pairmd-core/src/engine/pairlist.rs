use std::fmt;

/// The candidate interacting pairs of one generation cycle.
///
/// Holds the non-bonded pairs surviving cutoff and exclusion tests, plus the
/// bonded pairs collected from every group, both as ordered sequences of
/// dense-index pairs with the smaller index first. The `modified` flag records
/// whether cell membership changed since the previous generation; the force
/// evaluator consumes it (via [`PairList::take_modified`]) to decide when its
/// concurrency partitions need re-splitting.
#[derive(Debug, Clone)]
pub struct PairList {
    non_bonded: Vec<(usize, usize)>,
    bonded: Vec<(usize, usize)>,
    modified: bool,
    particle_count: usize,
}

impl PairList {
    pub(crate) fn new(
        non_bonded: Vec<(usize, usize)>,
        bonded: Vec<(usize, usize)>,
        modified: bool,
        particle_count: usize,
    ) -> Self {
        Self {
            non_bonded,
            bonded,
            modified,
            particle_count,
        }
    }

    /// An empty pair list over zero particles.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), false, 0)
    }

    /// The non-bonded pairs, each with the smaller dense index first.
    pub fn non_bonded(&self) -> &[(usize, usize)] {
        &self.non_bonded
    }

    /// The bonded pairs, each with the smaller dense index first.
    pub fn bonded(&self) -> &[(usize, usize)] {
        &self.bonded
    }

    /// The particle count of the system this list was generated for.
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Whether cell membership changed when this list was generated.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Consumes the modified flag, returning its previous value.
    ///
    /// The force evaluator calls this once per list to decide whether to
    /// re-split its partitions; subsequent calls return `false` until the
    /// generator produces a new modified list.
    pub fn take_modified(&mut self) -> bool {
        std::mem::take(&mut self.modified)
    }
}

impl fmt::Display for PairList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PairList {{ non-bonded: {}, bonded: {}, particles: {} }}",
            self.non_bonded.len(),
            self.bonded.len(),
            self.particle_count
        )
    }
}
