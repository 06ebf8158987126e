use super::config::ConfigError;
use crate::core::models::boxes::{Axis, SimulationBox};
use nalgebra::{Point3, Vector3};

/// The active periodicity mode of the simulation cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Periodicity {
    /// Periodic images on all three axes.
    Full,
    /// Periodic on two named, distinct axes (slab geometry).
    TwoAxes(Axis, Axis),
    /// Periodic on one named axis (pore geometry).
    OneAxis(Axis),
    /// No periodic images; the box merely bounds the cell grid.
    None,
}

/// Maps position pairs to minimum-image displacement vectors.
///
/// A boundary condition is a pure function of (positions, box, axis
/// selection). It is invoked on every candidate pair, so both entry points are
/// branch-light and allocation-free. Malformed axis configuration fails at
/// construction; the evaluation methods cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryCondition {
    periodicity: Periodicity,
    periodic: [bool; 3],
}

impl BoundaryCondition {
    /// Creates a boundary condition for the given periodicity mode.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicatePeriodicAxes`] when a planar mode names
    /// the same axis twice.
    pub fn new(periodicity: Periodicity) -> Result<Self, ConfigError> {
        let mut periodic = [false; 3];
        match periodicity {
            Periodicity::Full => periodic = [true; 3],
            Periodicity::TwoAxes(a, b) => {
                if a == b {
                    return Err(ConfigError::DuplicatePeriodicAxes(a));
                }
                periodic[a.index()] = true;
                periodic[b.index()] = true;
            }
            Periodicity::OneAxis(a) => periodic[a.index()] = true,
            Periodicity::None => {}
        }
        Ok(Self {
            periodicity,
            periodic,
        })
    }

    /// The periodicity mode this condition was built with.
    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Whether the given axis is periodic.
    #[inline]
    pub fn is_periodic(&self, axis: Axis) -> bool {
        self.periodic[axis.index()]
    }

    /// The minimum-image displacement from `r_i` to `r_j`.
    ///
    /// On periodic axes the component is folded into `[-L/2, L/2)`; on
    /// non-periodic axes the raw difference is kept.
    #[inline]
    pub fn displacement(
        &self,
        simulation_box: &SimulationBox,
        r_i: &Point3<f64>,
        r_j: &Point3<f64>,
    ) -> Vector3<f64> {
        let mut dr = r_j - r_i;
        let lengths = simulation_box.lengths();
        for k in 0..3 {
            if self.periodic[k] {
                let length = lengths[k];
                dr[k] -= length * (dr[k] / length).round();
            }
        }
        dr
    }

    /// Normalizes a position into the primary box image on periodic axes.
    ///
    /// Non-periodic components are returned unchanged; the cell grid clamps
    /// them to its extent during assignment.
    #[inline]
    pub fn wrap(&self, simulation_box: &SimulationBox, position: &Point3<f64>) -> Point3<f64> {
        let mut wrapped = *position;
        let lengths = simulation_box.lengths();
        for k in 0..3 {
            if self.periodic[k] {
                let length = lengths[k];
                wrapped[k] -= length * (wrapped[k] / length).floor();
            }
        }
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn cubic_box(length: f64) -> SimulationBox {
        SimulationBox::cubic(length).unwrap()
    }

    #[test]
    fn duplicate_planar_axes_fail_at_construction() {
        let result = BoundaryCondition::new(Periodicity::TwoAxes(Axis::X, Axis::X));
        assert_eq!(result, Err(ConfigError::DuplicatePeriodicAxes(Axis::X)));
    }

    #[test]
    fn full_periodicity_folds_every_axis() {
        let bc = BoundaryCondition::new(Periodicity::Full).unwrap();
        let bx = cubic_box(10.0);
        let dr = bc.displacement(
            &bx,
            &Point3::new(0.5, 9.5, 0.0),
            &Point3::new(9.5, 0.5, 3.0),
        );
        assert!((dr.x - -1.0).abs() < TOLERANCE);
        assert!((dr.y - 1.0).abs() < TOLERANCE);
        assert!((dr.z - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn no_periodicity_returns_raw_difference() {
        let bc = BoundaryCondition::new(Periodicity::None).unwrap();
        let bx = cubic_box(10.0);
        let dr = bc.displacement(&bx, &Point3::new(0.5, 0.0, 0.0), &Point3::new(9.5, 0.0, 0.0));
        assert!((dr.x - 9.0).abs() < TOLERANCE);
    }

    #[test]
    fn planar_periodicity_only_folds_named_axes() {
        let bc = BoundaryCondition::new(Periodicity::TwoAxes(Axis::X, Axis::Y)).unwrap();
        let bx = cubic_box(10.0);
        let dr = bc.displacement(
            &bx,
            &Point3::new(0.5, 0.5, 0.5),
            &Point3::new(9.5, 9.5, 9.5),
        );
        assert!((dr.x - -1.0).abs() < TOLERANCE);
        assert!((dr.y - -1.0).abs() < TOLERANCE);
        assert!((dr.z - 9.0).abs() < TOLERANCE);
        assert!(bc.is_periodic(Axis::X));
        assert!(!bc.is_periodic(Axis::Z));
    }

    #[test]
    fn axial_periodicity_folds_one_axis() {
        let bc = BoundaryCondition::new(Periodicity::OneAxis(Axis::Z)).unwrap();
        let bx = cubic_box(4.0);
        let dr = bc.displacement(&bx, &Point3::new(0.0, 0.0, 0.1), &Point3::new(3.0, 3.0, 3.9));
        assert!((dr.z - -0.2).abs() < TOLERANCE);
        assert!((dr.x - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn minimum_image_wrap_finds_close_pair_across_the_boundary() {
        // Raw coordinate difference far exceeds the cutoff; the minimum image
        // does not.
        let bc = BoundaryCondition::new(Periodicity::Full).unwrap();
        let bx = cubic_box(10.0);
        let dr = bc.displacement(
            &bx,
            &Point3::new(0.01, 0.0, 0.0),
            &Point3::new(9.99, 0.0, 0.0),
        );
        assert!(dr.norm() <= 0.1);
    }

    #[test]
    fn wrap_normalizes_periodic_components_into_the_box() {
        let bc = BoundaryCondition::new(Periodicity::Full).unwrap();
        let bx = cubic_box(10.0);
        let wrapped = bc.wrap(&bx, &Point3::new(-0.5, 10.5, 25.0));
        assert!((wrapped.x - 9.5).abs() < TOLERANCE);
        assert!((wrapped.y - 0.5).abs() < TOLERANCE);
        assert!((wrapped.z - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn wrap_leaves_non_periodic_components_untouched() {
        let bc = BoundaryCondition::new(Periodicity::OneAxis(Axis::X)).unwrap();
        let bx = cubic_box(10.0);
        let wrapped = bc.wrap(&bx, &Point3::new(12.0, -3.0, 42.0));
        assert!((wrapped.x - 2.0).abs() < TOLERANCE);
        assert_eq!(wrapped.y, -3.0);
        assert_eq!(wrapped.z, 42.0);
    }
}
