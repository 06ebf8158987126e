use serde::Deserialize;
use std::sync::Arc;

/// Charge of a single proton in elementary charge units.
pub const PROTON_CHARGE: f64 = 1.0;
/// Mass of a single proton in unified atomic mass units.
pub const PROTON_MASS: f64 = 1.007_276;

/// An immutable particle specification shared by many particles.
///
/// A specification describes a particle species: its name as used for force
/// field lookups, its mass, charge, and radius. Specifications are many-to-one
/// with particles and are shared via [`Arc`]; they never change after
/// construction. Protonatable species additionally report state-dependent
/// charge and mass as a function of the number of bound protons.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParticleSpec {
    /// Species name used as the force field lookup key (e.g., "Ar", "CW").
    pub name: String,
    /// Mass in unified atomic mass units.
    pub mass: f64,
    /// Charge in elementary charge units.
    pub charge: f64,
    /// Radius in nanometers.
    pub radius: f64,
    /// Whether this species can bind or release protons.
    #[serde(default)]
    pub protonatable: bool,
}

impl ParticleSpec {
    /// Creates a new, non-protonatable particle specification.
    ///
    /// # Arguments
    ///
    /// * `name` - The species name, used as the force field lookup key.
    /// * `mass` - The mass in unified atomic mass units.
    /// * `charge` - The charge in elementary charge units.
    /// * `radius` - The radius in nanometers.
    pub fn new(name: &str, mass: f64, charge: f64, radius: f64) -> Self {
        Self {
            name: name.to_string(),
            mass,
            charge,
            radius,
            protonatable: false,
        }
    }

    /// Creates a new protonatable particle specification.
    ///
    /// The `mass` and `charge` given describe the fully deprotonated state;
    /// bound protons add to both via [`Self::charge_with_protons`] and
    /// [`Self::mass_with_protons`].
    pub fn protonatable(name: &str, mass: f64, charge: f64, radius: f64) -> Self {
        Self {
            name: name.to_string(),
            mass,
            charge,
            radius,
            protonatable: true,
        }
    }

    /// Returns the charge with `bound_protons` protons bound.
    ///
    /// For non-protonatable species the proton count is ignored.
    pub fn charge_with_protons(&self, bound_protons: u32) -> f64 {
        if self.protonatable {
            self.charge + f64::from(bound_protons) * PROTON_CHARGE
        } else {
            self.charge
        }
    }

    /// Returns the mass with `bound_protons` protons bound.
    ///
    /// For non-protonatable species the proton count is ignored.
    pub fn mass_with_protons(&self, bound_protons: u32) -> f64 {
        if self.protonatable {
            self.mass + f64::from(bound_protons) * PROTON_MASS
        } else {
            self.mass
        }
    }

    /// Wraps this specification in an [`Arc`] for sharing across particles.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
