use super::params::{ForceField, InteractionKind, InteractionParams};
use super::potentials;
use crate::core::models::system::ParticleSystem;
use nalgebra::Vector3;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

const MIN_DISTANCE: f64 = 1e-6;

/// A fully resolved pair potential: interaction kind plus numeric parameters.
///
/// This closed tagged variant replaces stringly-typed runtime dispatch; every
/// entry is resolved once per species composition when the [`PotentialTable`]
/// is built. `evaluate` returns `(energy, force)` where the force acts on the
/// second particle of the pair; the caller applies the negation to the first.
/// This sign convention is fixed crate-wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairPotential {
    /// No interaction; evaluates to zero energy and force.
    None,
    LennardJones {
        c12: f64,
        c6: f64,
    },
    LennardJonesReactionField {
        c12: f64,
        c6: f64,
        charge_product: f64,
        eps_inside: f64,
        k_rf: f64,
        c_rf: f64,
    },
    HarmonicBond {
        r0: f64,
        fc: f64,
    },
    QuarticBond {
        r0: f64,
        fc: f64,
    },
}

impl PairPotential {
    /// Evaluates energy and force over a minimum-image displacement.
    ///
    /// `dr` points from the first particle of the pair to the second; the
    /// returned force acts on the second particle.
    #[inline]
    pub fn evaluate(&self, dr: &Vector3<f64>) -> (f64, Vector3<f64>) {
        let dist = dr.norm();
        let (energy, force_scalar) = match *self {
            PairPotential::None => (0.0, 0.0),
            PairPotential::LennardJones { c12, c6 } => potentials::lennard_jones(dist, c12, c6),
            PairPotential::LennardJonesReactionField {
                c12,
                c6,
                charge_product,
                eps_inside,
                k_rf,
                c_rf,
            } => {
                let (lj_energy, lj_force) = potentials::lennard_jones(dist, c12, c6);
                let (rf_energy, rf_force) =
                    potentials::reaction_field(dist, charge_product, eps_inside, k_rf, c_rf);
                (lj_energy + rf_energy, lj_force + rf_force)
            }
            PairPotential::HarmonicBond { r0, fc } => potentials::harmonic(dist, r0, fc),
            PairPotential::QuarticBond { r0, fc } => {
                potentials::halve_attractive_quartic(dist, r0, fc)
            }
        };
        if dist < MIN_DISTANCE {
            return (energy, Vector3::zeros());
        }
        (energy, dr * (force_scalar / dist))
    }
}

/// Resolved pair potentials for every species pair of one composition.
///
/// Built once per species composition and cached by the session context.
/// Species names are interned to small indices and the potentials stored in
/// dense symmetric matrices, so the per-pair hot path costs two hash lookups
/// and one array read.
#[derive(Debug, Clone)]
pub struct PotentialTable {
    species: HashMap<String, usize>,
    non_bonded: Vec<PairPotential>,
    bonded: Vec<PairPotential>,
}

impl PotentialTable {
    /// Resolves the force field against the system's species composition.
    ///
    /// Reaction-field constants are computed once here: the Debye screening
    /// parameter comes from the system's ionic composition, the dielectrics
    /// from the force field globals. Species pairs without force field
    /// parameters are logged as a warning and treated as non-interacting;
    /// this is recoverable by design, never an error.
    pub fn build(
        forcefield: &ForceField,
        system: &ParticleSystem,
        cutoff: f64,
        temperature: f64,
    ) -> Self {
        let mut species: HashMap<String, usize> = HashMap::new();
        let mut charges: Vec<f64> = Vec::new();
        for particle in system.particles_iter() {
            if !species.contains_key(&particle.spec.name) {
                species.insert(particle.spec.name.clone(), charges.len());
                charges.push(particle.spec.charge);
            }
        }
        let n = charges.len();

        let eps_inside = forcefield.globals.eps_inside_cutoff;
        let eps_outside = forcefield.globals.eps_outside_cutoff;
        let kappa = potentials::debye_kappa(system.ionic_strength(), eps_outside, temperature);
        let (k_rf, c_rf) = if cutoff > 0.0 {
            potentials::reaction_field_constants(eps_inside, eps_outside, kappa, cutoff)
        } else {
            (0.0, 0.0)
        };
        debug!(species = n, kappa, "building potential table");

        let bonded_species_pairs = bonded_species_pairs(system, &species);

        let names: Vec<&str> = {
            let mut names = vec![""; n];
            for (name, &idx) in &species {
                names[idx] = name.as_str();
            }
            names
        };

        let mut non_bonded = vec![PairPotential::None; n * n];
        let mut bonded = vec![PairPotential::None; n * n];
        for i in 0..n {
            for j in i..n {
                let (a, b) = (names[i], names[j]);
                let pair_potential = match forcefield.lookup(
                    a,
                    b,
                    InteractionKind::LennardJonesReactionField,
                ) {
                    Some(&InteractionParams::LennardJones { c12, c6 }) => {
                        PairPotential::LennardJonesReactionField {
                            c12,
                            c6,
                            charge_product: charges[i] * charges[j],
                            eps_inside,
                            k_rf,
                            c_rf,
                        }
                    }
                    _ => match forcefield.lookup(a, b, InteractionKind::LennardJones) {
                        Some(&InteractionParams::LennardJones { c12, c6 }) => {
                            PairPotential::LennardJones { c12, c6 }
                        }
                        _ => {
                            warn!(
                                spec_a = a,
                                spec_b = b,
                                "no non-bonded parameters for species pair; treating as non-interacting"
                            );
                            PairPotential::None
                        }
                    },
                };
                non_bonded[i * n + j] = pair_potential;
                non_bonded[j * n + i] = pair_potential;

                let bond_potential = match forcefield.lookup(a, b, InteractionKind::HarmonicBond) {
                    Some(&InteractionParams::Bond { r0, fc }) => {
                        PairPotential::HarmonicBond { r0, fc }
                    }
                    _ => match forcefield.lookup(a, b, InteractionKind::QuarticBond) {
                        Some(&InteractionParams::Bond { r0, fc }) => {
                            PairPotential::QuarticBond { r0, fc }
                        }
                        _ => {
                            if bonded_species_pairs.contains(&(i.min(j), i.max(j))) {
                                warn!(
                                    spec_a = a,
                                    spec_b = b,
                                    "no bond parameters for bonded species pair; treating as non-interacting"
                                );
                            }
                            PairPotential::None
                        }
                    },
                };
                bonded[i * n + j] = bond_potential;
                bonded[j * n + i] = bond_potential;
            }
        }

        Self {
            species,
            non_bonded,
            bonded,
        }
    }

    /// The resolved non-bonded potential for two species names.
    #[inline]
    pub fn non_bonded_between(&self, a: &str, b: &str) -> PairPotential {
        self.entry(&self.non_bonded, a, b)
    }

    /// The resolved bonded potential for two species names.
    #[inline]
    pub fn bonded_between(&self, a: &str, b: &str) -> PairPotential {
        self.entry(&self.bonded, a, b)
    }

    #[inline]
    fn entry(&self, matrix: &[PairPotential], a: &str, b: &str) -> PairPotential {
        match (self.species.get(a), self.species.get(b)) {
            (Some(&i), Some(&j)) => matrix[i * self.species.len() + j],
            _ => PairPotential::None,
        }
    }
}

fn bonded_species_pairs(
    system: &ParticleSystem,
    species: &HashMap<String, usize>,
) -> HashSet<(usize, usize)> {
    let mut pairs = HashSet::new();
    for group in system.groups() {
        for bond in group.bonds() {
            let a = system
                .particle_by_index(bond.i)
                .and_then(|p| species.get(&p.spec.name));
            let b = system
                .particle_by_index(bond.j)
                .and_then(|p| species.get(&p.spec.name));
            if let (Some(&i), Some(&j)) = (a, b) {
                pairs.insert((i.min(j), i.max(j)));
            }
        }
    }
    pairs
}
