use std::f64::consts::PI;

/// Boltzmann constant in kJ/(mol·K).
pub const BOLTZMANN: f64 = 8.314_462_618e-3;
/// Electric conversion factor `e²/(4πε₀)` in kJ·nm/(mol·e²).
pub const ELECTRIC_FACTOR: f64 = 138.935_458;

const MIN_DISTANCE: f64 = 1e-6;
const OVERLAP_ENERGY: f64 = 1e10;

/// Lennard-Jones 12-6 in the C12/C6 form.
///
/// Returns `(energy, -dU/dr)`; the second value is the scalar force along the
/// inter-particle direction.
#[inline]
pub fn lennard_jones(dist: f64, c12: f64, c6: f64) -> (f64, f64) {
    if dist < MIN_DISTANCE {
        return (OVERLAP_ENERGY, 0.0);
    }
    let r6 = dist.powi(6);
    let r12 = r6 * r6;
    let energy = c12 / r12 - c6 / r6;
    let force = (12.0 * c12 / r12 - 6.0 * c6 / r6) / dist;
    (energy, force)
}

/// Screened reaction-field electrostatics (Tironi et al. form).
///
/// `k_rf` and `c_rf` come from [`reaction_field_constants`]. Returns
/// `(energy, -dU/dr)`.
#[inline]
pub fn reaction_field(
    dist: f64,
    charge_product: f64,
    eps_inside: f64,
    k_rf: f64,
    c_rf: f64,
) -> (f64, f64) {
    if dist < MIN_DISTANCE {
        let sign = charge_product.signum();
        return (sign * OVERLAP_ENERGY, 0.0);
    }
    let prefactor = ELECTRIC_FACTOR * charge_product / eps_inside;
    let energy = prefactor * (1.0 / dist + k_rf * dist * dist - c_rf);
    let force = prefactor * (1.0 / (dist * dist) - 2.0 * k_rf * dist);
    (energy, force)
}

/// Precomputes the reaction-field constants `(k_rf, c_rf)`.
///
/// `k_rf` is the quadratic coefficient, `c_rf` the shift making the energy
/// vanish at the cutoff. `kappa` is the inverse Debye screening length of the
/// continuum outside the cutoff; zero recovers the unscreened expressions.
pub fn reaction_field_constants(
    eps_inside: f64,
    eps_outside: f64,
    kappa: f64,
    cutoff: f64,
) -> (f64, f64) {
    let kr = kappa * cutoff;
    let kr2 = kr * kr;
    let numerator = (2.0 * (eps_outside - eps_inside)) * (1.0 + kr) + eps_outside * kr2;
    let denominator = (eps_inside + 2.0 * eps_outside) * (1.0 + kr) + eps_outside * kr2;
    let k_rf = numerator / (denominator * 2.0 * cutoff.powi(3));
    let c_rf = 1.0 / cutoff + k_rf * cutoff * cutoff;
    (k_rf, c_rf)
}

/// Inverse Debye screening length in nm⁻¹.
///
/// `ionic_strength` is the number-density ionic strength `½·Σ cᵢ·zᵢ²` in nm⁻³.
pub fn debye_kappa(ionic_strength: f64, eps: f64, temperature: f64) -> f64 {
    if ionic_strength <= 0.0 || temperature <= 0.0 {
        return 0.0;
    }
    (8.0 * PI * ELECTRIC_FACTOR * ionic_strength / (eps * BOLTZMANN * temperature)).sqrt()
}

/// Harmonic bond potential `U = ½·fc·(r − r₀)²`.
///
/// Returns `(energy, -dU/dr)`.
#[inline]
pub fn harmonic(dist: f64, r0: f64, fc: f64) -> (f64, f64) {
    let stretch = dist - r0;
    (0.5 * fc * stretch * stretch, -fc * stretch)
}

/// Halve-attractive quartic bond potential.
///
/// Acts only when stretched beyond `r₀`: zero for `r ≤ r₀`,
/// `U = ½·fc·(r − r₀)⁴` beyond. Returns `(energy, -dU/dr)`.
#[inline]
pub fn halve_attractive_quartic(dist: f64, r0: f64, fc: f64) -> (f64, f64) {
    if dist <= r0 {
        return (0.0, 0.0);
    }
    let stretch = dist - r0;
    let stretch3 = stretch * stretch * stretch;
    (0.5 * fc * stretch3 * stretch, -2.0 * fc * stretch3)
}
