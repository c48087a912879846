use crate::locality::*;

#[cfg(feature = "serde_support")]
use serde::{Serialize, Deserialize};

/// A point in space. Two dimensional systems leave the last coordinate at zero
pub type Point = [f64; 3];

/// # Orthorhombic simulation box
/// * side lengths `lx, ly, lz`, each dimension can be periodic or not
/// * a two dimensional box ignores the z coordinate entirely
/// * displacements are wrapped with the minimum image convention
///   along periodic dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct SimulationBox{
    lengths: [f64; 3],
    periodic: [bool; 3],
    is_2d: bool,
}

impl SimulationBox
{
    /// # Create a new box
    /// * `Err(InvalidBox)` if a used side length is not positive and finite
    /// * for 2d boxes `lengths[2]` is ignored and `periodic[2]` is treated as `false`
    pub fn new(lengths: [f64; 3], periodic: [bool; 3], is_2d: bool) -> Result<Self, LocalityError>
    {
        let dims = if is_2d { 2 } else { 3 };
        if lengths[..dims].iter().any(|l| !l.is_finite() || *l <= 0.0) {
            return Err(LocalityError::InvalidBox);
        }
        let mut lengths = lengths;
        let mut periodic = periodic;
        if is_2d {
            lengths[2] = 0.0;
            periodic[2] = false;
        }
        Ok(
            Self{
                lengths,
                periodic,
                is_2d
            }
        )
    }

    /// Fully periodic cube of side length `l`
    pub fn cube(l: f64) -> Result<Self, LocalityError>
    {
        Self::new([l; 3], [true; 3], false)
    }

    /// Fully periodic two dimensional square of side length `l`
    pub fn square(l: f64) -> Result<Self, LocalityError>
    {
        Self::new([l, l, 0.0], [true, true, false], true)
    }

    /// Side lengths, `lengths()[2]` is zero for 2d boxes
    pub fn lengths(&self) -> [f64; 3]
    {
        self.lengths
    }

    /// Periodicity of every dimension
    pub fn periodic(&self) -> [bool; 3]
    {
        self.periodic
    }

    /// Is this a two dimensional box?
    pub fn is_2d(&self) -> bool
    {
        self.is_2d
    }

    /// # Volume of the box
    /// * area for 2d boxes
    pub fn volume(&self) -> f64
    {
        if self.is_2d {
            self.lengths[0] * self.lengths[1]
        } else {
            self.lengths.iter().product()
        }
    }

    /// # Largest query radius with a unique minimum image
    /// * half of the shortest periodic side length
    /// * infinite if no dimension is periodic
    pub fn max_query_radius(&self) -> f64
    {
        self.lengths
            .iter()
            .zip(self.periodic.iter())
            .filter(|(_, &periodic)| periodic)
            .map(|(l, _)| 0.5 * l)
            .fold(f64::INFINITY, f64::min)
    }

    /// # Minimum image of a displacement
    /// * every periodic component is wrapped into `[-l/2, l/2]`
    /// * the z component of 2d displacements is set to zero
    #[inline]
    pub fn wrap(&self, mut delta: Point) -> Point
    {
        for ((d, &l), &periodic) in delta.iter_mut()
            .zip(self.lengths.iter())
            .zip(self.periodic.iter())
        {
            if periodic {
                *d -= l * (*d / l).round();
            }
        }
        if self.is_2d {
            delta[2] = 0.0;
        }
        delta
    }

    /// # Wrapped displacement `to - from`
    #[inline]
    pub fn displacement(&self, from: Point, to: Point) -> Point
    {
        self.wrap([to[0] - from[0], to[1] - from[1], to[2] - from[2]])
    }
}

/// Euclidean length of a vector
#[inline(always)]
pub fn norm(v: Point) -> f64
{
    v[0].mul_add(v[0], v[1].mul_add(v[1], v[2] * v[2])).sqrt()
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn invalid_boxes()
    {
        assert_eq!(SimulationBox::cube(0.0).unwrap_err(), LocalityError::InvalidBox);
        assert_eq!(SimulationBox::cube(-1.0).unwrap_err(), LocalityError::InvalidBox);
        assert_eq!(SimulationBox::square(f64::NAN).unwrap_err(), LocalityError::InvalidBox);
        // z is irrelevant in 2d
        assert!(SimulationBox::new([1.0, 1.0, -3.0], [true; 3], true).is_ok());
    }

    #[test]
    fn minimum_image()
    {
        let sim_box = SimulationBox::cube(10.0).unwrap();
        let d = sim_box.displacement([0.5, 0.0, 0.0], [9.5, 0.0, 3.0]);
        assert!((d[0] + 1.0).abs() < 1e-12);
        assert_eq!(d[1], 0.0);
        assert!((d[2] - 3.0).abs() < 1e-12);
        assert_eq!(sim_box.volume(), 1000.0);

        let open = SimulationBox::new([10.0; 3], [false; 3], false).unwrap();
        let d = open.displacement([0.5, 0.0, 0.0], [9.5, 0.0, 0.0]);
        assert_eq!(d[0], 9.0);

        let square = SimulationBox::square(4.0).unwrap();
        let d = square.displacement([0.0, 0.0, 1.0], [3.0, 1.0, 7.0]);
        assert_eq!(d, [-1.0, 1.0, 0.0]);
        assert_eq!(square.volume(), 16.0);
        assert_eq!(norm([3.0, 4.0, 0.0]), 5.0);
    }

    #[test]
    fn query_radius_limit()
    {
        assert_eq!(SimulationBox::cube(4.0).unwrap().max_query_radius(), 2.0);
        let mixed = SimulationBox::new([6.0, 3.0, 1.0], [true, true, false], false).unwrap();
        assert_eq!(mixed.max_query_radius(), 1.5);
        let open = SimulationBox::new([1.0; 3], [false; 3], false).unwrap();
        assert_eq!(open.max_query_radius(), f64::INFINITY);
        // z is ignored in 2d
        let square = SimulationBox::new([8.0, 8.0, 1.0], [true; 3], true).unwrap();
        assert_eq!(square.max_query_radius(), 4.0);
    }
}
