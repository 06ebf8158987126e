//! # Force Field Module
//!
//! This module provides the core functionality for pairwise molecular
//! mechanics calculations in pairMD: parameter management, closed-form
//! potentials, and the resolved per-composition dispatch table.
//!
//! ## Overview
//!
//! The force field module computes interaction energies and forces between
//! particle pairs using classical molecular mechanics potentials. It supports:
//!
//! - **Lennard-Jones 12-6** in the `C12`/`C6` form
//! - **Lennard-Jones + Reaction-Field** electrostatics with Debye screening
//!   derived from the system's ionic composition
//! - **Harmonic bonds** for bonded pairs
//! - **Halve-attractive quartic bonds** as a per-entry selectable alternative
//!
//! ## Key Components
//!
//! - [`params`] - Force field parameter tables, keyed by unordered
//!   specification-name pair and interaction kind, loaded from TOML
//! - [`pairwise`] - The [`pairwise::PairPotential`] closed variant and the
//!   [`pairwise::PotentialTable`] resolved once per species composition
//!
//! Parameter lookup misses are recoverable by design: non-interacting species
//! pairs are common and intentional, so a miss logs a warning and evaluates to
//! zero energy and force.
//!
//! ## Conventions
//!
//! Units are nm / ps / u / kJ·mol⁻¹ / elementary charge. The force returned by
//! a pair evaluation acts on the second particle of the pair; the caller
//! applies the negation to the first.

pub mod pairwise;
pub mod params;
pub(crate) mod potentials;
