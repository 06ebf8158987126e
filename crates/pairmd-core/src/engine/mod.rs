//! The simulation engine: everything needed to turn a particle system and a
//! force field into per-step energies and forces.
//!
//! The flow is [`context::SimulationContext`] at the top, which owns a
//! [`generator::PairListGenerator`] (boundary condition plus cached cell
//! grid) and a [`forces::Forces`] evaluator (potential table plus fork-join
//! partitions). Pair lists are value objects handed back to the caller, who
//! decides when to regenerate them per the update interval in
//! [`config::SimulationParameters`].

pub mod bc;
pub mod config;
pub mod context;
pub mod cutoff;
pub mod error;
pub mod forces;
pub mod generator;
pub(crate) mod grid;
pub mod pairlist;
