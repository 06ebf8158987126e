//! # Core Module
//!
//! This module provides the fundamental building blocks for molecular dynamics
//! simulations in pairMD, serving as the stateless computational foundation of
//! the library.
//!
//! ## Overview
//!
//! The core module implements the data structures and pure functions required
//! to represent particle systems and to evaluate pairwise interaction energies
//! and forces. It deliberately contains no session state: grids, caches, and
//! concurrency live in the [`crate::engine`] layer.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Particles, specifications,
//!   bonded groups, simulation boxes, and the particle system arena
//! - **Energy and Force Calculations** ([`forcefield`]) - Force field parameter
//!   tables and closed-form pair potentials

pub mod forcefield;
pub mod models;
