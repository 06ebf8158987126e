//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent
//! particle systems in pairMD, providing the foundation for pair-list
//! generation and force evaluation.
//!
//! ## Overview
//!
//! The models module defines the core abstractions of a molecular dynamics
//! state: particles with mutable dynamical state, immutable shared species
//! specifications, bonded groups, and the simulation box. These models are
//! designed to:
//!
//! - **Keep force buffers trivially addressable** - Every particle carries a
//!   dense sequence index into per-step arrays
//! - **Separate identity from order** - Opaque slot-map IDs for stable
//!   cross-references, dense indices for hot loops
//! - **Fail fast on malformed topology** - Group and box constructors validate
//!   their structural invariants
//!
//! ## Key Components
//!
//! - [`particle`] - Individual particle state (position, velocity, force, frozen flag)
//! - [`spec`] - Immutable, shared species specifications (mass, charge, radius)
//! - [`group`] - Bonded particle groups whose internal bonds are excluded from
//!   non-bonded evaluation
//! - [`boxes`] - The axis-aligned simulation cell
//! - [`system`] - The particle arena tying everything together
//! - [`ids`] - Opaque particle identifier type

pub mod boxes;
pub mod group;
pub mod ids;
pub mod particle;
pub mod spec;
pub mod system;
