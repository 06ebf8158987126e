//! Session context tying parameters, pair-list generation, and force
//! evaluation together for the lifetime of a run.

use super::bc::{BoundaryCondition, Periodicity};
use super::config::SimulationParameters;
use super::cutoff;
use super::error::EngineError;
use super::forces::Forces;
use super::generator::PairListGenerator;
use super::pairlist::PairList;
use crate::core::forcefield::pairwise::PotentialTable;
use crate::core::forcefield::params::ForceField;
use crate::core::models::system::ParticleSystem;
use tracing::info;

/// One simulation session: validated parameters, the boundary condition, the
/// pair-list generator with its cached grid, and the force evaluator with its
/// potential table.
///
/// The effective cutoff used for pair-list generation is the interaction
/// cutoff padded with the thermal displacement margin, so a list stays usable
/// for a full update interval. It is fixed at construction (and whenever the
/// parameters are replaced) from the system's average mass.
#[derive(Debug)]
pub struct SimulationContext {
    forcefield: ForceField,
    parameters: SimulationParameters,
    generator: PairListGenerator,
    forces: Forces,
    effective_cutoff: f64,
    average_mass: f64,
}

impl SimulationContext {
    /// Builds a context for the given system.
    ///
    /// # Arguments
    ///
    /// * `forcefield` - Interaction parameters keyed by species pair.
    /// * `parameters` - Validated run parameters.
    /// * `periodicity` - Which box axes wrap.
    /// * `system` - The particle system the session will evaluate; its
    ///   species composition and average mass seed the potential table and
    ///   the displacement margin.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the periodicity names the same
    /// axis twice.
    pub fn new(
        forcefield: ForceField,
        parameters: SimulationParameters,
        periodicity: Periodicity,
        system: &ParticleSystem,
    ) -> Result<Self, EngineError> {
        let bc = BoundaryCondition::new(periodicity)?;
        let average_mass = system.average_mass();
        let effective_cutoff = cutoff::effective_cutoff(
            parameters.cutoff,
            parameters.temperature,
            parameters.timestep,
            parameters.pair_list_update_interval,
            average_mass,
        );
        let table = PotentialTable::build(
            &forcefield,
            system,
            parameters.cutoff,
            parameters.temperature,
        );
        info!(
            particles = system.len(),
            cutoff = parameters.cutoff,
            effective_cutoff,
            "simulation context ready"
        );
        Ok(Self {
            forcefield,
            parameters,
            generator: PairListGenerator::new(bc),
            forces: Forces::new(bc, table),
            effective_cutoff,
            average_mass,
        })
    }

    /// Regenerates the pair list with the padded cutoff.
    pub fn generate_pair_list(&mut self, system: &ParticleSystem) -> PairList {
        self.generator.generate(
            system,
            self.effective_cutoff,
            self.parameters.exclude_frozen_pairs,
        )
    }

    /// Evaluates non-bonded interactions over the given pair list,
    /// accumulating forces into the system and returning the energy.
    pub fn non_bonded(&mut self, system: &mut ParticleSystem, pair_list: &mut PairList) -> f64 {
        self.forces.non_bonded(system, pair_list)
    }

    /// Evaluates bonded interactions over the system's groups, accumulating
    /// forces and returning the energy.
    pub fn bonded(&self, system: &mut ParticleSystem) -> f64 {
        self.forces.bonded(system)
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    pub fn effective_cutoff(&self) -> f64 {
        self.effective_cutoff
    }

    /// Replaces the run parameters mid-session.
    ///
    /// Revalidates them, recomputes the padded cutoff, and rebuilds the
    /// potential table since its reaction-field constants depend on the
    /// cutoff and temperature. The next [`Self::generate_pair_list`] call
    /// picks up the new cutoff; an already-issued pair list is unaffected.
    pub fn set_parameters(
        &mut self,
        parameters: SimulationParameters,
        system: &ParticleSystem,
    ) -> Result<(), EngineError> {
        parameters.validate()?;
        self.parameters = parameters;
        self.effective_cutoff = cutoff::effective_cutoff(
            parameters.cutoff,
            parameters.temperature,
            parameters.timestep,
            parameters.pair_list_update_interval,
            self.average_mass,
        );
        self.forces.set_table(PotentialTable::build(
            &self.forcefield,
            system,
            parameters.cutoff,
            parameters.temperature,
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::{GlobalParams, InteractionKind, InteractionParams};
    use crate::core::models::boxes::SimulationBox;
    use crate::core::models::spec::ParticleSpec;
    use nalgebra::Point3;

    const TOLERANCE: f64 = 1e-9;

    fn argon_forcefield() -> ForceField {
        let mut ff = ForceField::new(GlobalParams::default());
        ff.add_interaction(
            "Ar",
            "Ar",
            InteractionKind::LennardJones,
            InteractionParams::LennardJones { c12: 1.0, c6: 1.0 },
        )
        .unwrap();
        ff.add_interaction(
            "Ar",
            "Ar",
            InteractionKind::HarmonicBond,
            InteractionParams::Bond { r0: 1.0, fc: 50.0 },
        )
        .unwrap();
        ff
    }

    fn parameters() -> SimulationParameters {
        SimulationParameters {
            temperature: 300.0,
            timestep: 0.002,
            pair_list_update_interval: 10,
            cutoff: 2.5,
            exclude_frozen_pairs: false,
        }
    }

    fn two_argon_system() -> ParticleSystem {
        let spec = ParticleSpec::new("Ar", 39.948, 0.0, 0.17).shared();
        let mut system = ParticleSystem::new(SimulationBox::cubic(10.0).unwrap());
        system.add_particle(spec.clone(), Point3::new(0.0, 0.0, 0.0));
        system.add_particle(spec, Point3::new(0.0, 0.0, 1.2));
        system
    }

    #[test]
    fn end_to_end_two_particle_run() {
        let mut system = two_argon_system();
        let mut context = SimulationContext::new(
            argon_forcefield(),
            parameters(),
            Periodicity::Full,
            &system,
        )
        .unwrap();

        let mut pair_list = context.generate_pair_list(&system);
        assert_eq!(pair_list.non_bonded(), &[(0, 1)]);

        system.reset_forces();
        let energy = context.non_bonded(&mut system, &mut pair_list);
        // Past the minimum at 2^(1/6), the pair attracts.
        assert!(energy < 0.0);
        let f0 = system.particle_by_index(0).unwrap().force;
        let f1 = system.particle_by_index(1).unwrap().force;
        assert!((f0 + f1).norm() < TOLERANCE);
        assert!(f1.z < 0.0);
    }

    #[test]
    fn bonded_pairs_leave_the_non_bonded_list() {
        let mut system = two_argon_system();
        let a = system.particle_by_index(0).unwrap().id;
        let b = system.particle_by_index(1).unwrap().id;
        system.add_group(&[a, b], &[(a, b)]).unwrap();

        let mut context = SimulationContext::new(
            argon_forcefield(),
            parameters(),
            Periodicity::Full,
            &system,
        )
        .unwrap();
        let pair_list = context.generate_pair_list(&system);
        assert!(pair_list.non_bonded().is_empty());
        assert_eq!(pair_list.bonded(), &[(0, 1)]);

        system.reset_forces();
        let energy = context.bonded(&mut system);
        let expected = 0.5 * 50.0 * (1.2_f64 - 1.0).powi(2);
        assert!((energy - expected).abs() < TOLERANCE);
    }

    #[test]
    fn effective_cutoff_is_padded_above_the_interaction_cutoff() {
        let system = two_argon_system();
        let context = SimulationContext::new(
            argon_forcefield(),
            parameters(),
            Periodicity::Full,
            &system,
        )
        .unwrap();
        assert!(context.effective_cutoff() > context.parameters().cutoff);
    }

    #[test]
    fn set_parameters_recomputes_the_effective_cutoff() {
        let system = two_argon_system();
        let mut context = SimulationContext::new(
            argon_forcefield(),
            parameters(),
            Periodicity::Full,
            &system,
        )
        .unwrap();

        let mut updated = parameters();
        updated.cutoff = 1.0;
        updated.temperature = 0.0;
        context.set_parameters(updated, &system).unwrap();
        assert!((context.effective_cutoff() - 1.0).abs() < TOLERANCE);

        let mut invalid = parameters();
        invalid.cutoff = -1.0;
        assert!(context.set_parameters(invalid, &system).is_err());
    }

    #[test]
    fn duplicate_planar_axes_are_rejected() {
        use crate::core::models::boxes::Axis;
        let system = two_argon_system();
        let result = SimulationContext::new(
            argon_forcefield(),
            parameters(),
            Periodicity::TwoAxes(Axis::X, Axis::X),
            &system,
        );
        assert!(result.is_err());
    }
}
