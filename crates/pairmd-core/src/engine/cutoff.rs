//! Cutoff staleness policy for pair lists that are reused across steps.
//!
//! A pair list generated with the interaction cutoff alone goes stale as soon
//! as particles move: a pair just outside the cutoff at generation time can
//! drift inside it before the next rebuild. The list is therefore generated
//! with an effective cutoff that is padded by the root-mean-square thermal
//! displacement accumulated over one update interval, so every pair that can
//! become interacting before the rebuild is already on the list.

use crate::core::forcefield::potentials::BOLTZMANN;

/// Root-mean-square displacement a thermalized particle of the given average
/// mass accumulates over `update_interval` steps of length `timestep`.
///
/// Uses the equipartition speed `sqrt(3 k_B T / m)`. Returns zero when the
/// temperature is zero or the mass is not positive, so an empty system falls
/// back to the bare interaction cutoff.
pub fn displacement_margin(
    temperature: f64,
    timestep: f64,
    update_interval: usize,
    average_mass: f64,
) -> f64 {
    if temperature <= 0.0 || average_mass <= 0.0 {
        return 0.0;
    }
    let rms_speed = (3.0 * BOLTZMANN * temperature / average_mass).sqrt();
    rms_speed * timestep * update_interval as f64
}

/// Interaction cutoff padded with the thermal displacement margin.
pub fn effective_cutoff(
    cutoff: f64,
    temperature: f64,
    timestep: f64,
    update_interval: usize,
    average_mass: f64,
) -> f64 {
    cutoff + displacement_margin(temperature, timestep, update_interval, average_mass)
}
