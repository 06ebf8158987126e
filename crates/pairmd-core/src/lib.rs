//! # pairMD Core Library
//!
//! A pair-interaction engine for classical molecular dynamics on atomistic and
//! coarse-grained particle systems. Given particle state (positions, velocities,
//! bonded topology) and a force field, it decomposes the system into candidate
//! interacting pairs under a boundary condition using a spatial cell grid, then
//! evaluates pairwise and bonded potentials over those pairs with concurrent
//! force accumulation.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict two-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`ParticleSystem`, `ParticleGroup`, `SimulationBox`) and pure mathematical
//!   representations of the force field (`potentials`, `pairwise`).
//!
//! - **[`engine`]: The Logic Core.** This stateful layer orchestrates pair-list
//!   generation and force evaluation. It includes the spatial `Grid` for
//!   near-O(N) neighbor search, the `PairListGenerator`, the fork-join `Forces`
//!   evaluator, and the `SimulationContext` session object that threads cached
//!   state (grid, potential table, partitions) through a simulation run.
//!
//! The time-stepping loop itself (Velocity Verlet, Langevin, Monte Carlo, ...)
//! is an external consumer: it calls [`engine::context::SimulationContext`] to
//! refresh the pair list periodically and to accumulate forces every step.

pub mod core;
pub mod engine;
