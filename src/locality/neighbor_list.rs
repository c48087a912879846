use crate::locality::*;

#[cfg(feature = "serde_support")]
use serde::{Serialize, Deserialize};

/// # A bond between a query point and a point
/// * `distance` is the (minimum image) distance between both
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborBond{
    /// index into the query points
    pub query_point_index: usize,
    /// index into the points of the neighbor query
    pub point_index: usize,
    /// separation of both points
    pub distance: f64,
}

impl NeighborBond
{
    /// Create a new bond
    #[inline(always)]
    pub fn new(query_point_index: usize, point_index: usize, distance: f64) -> Self
    {
        Self{
            query_point_index,
            point_index,
            distance
        }
    }
}

/// # Errors of neighbor finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum LocalityError{
    /// Side lengths of a box have to be positive and finite
    #[error("box side lengths have to be positive and finite")]
    InvalidBox,

    /// Query radius has to be positive
    #[error("query radius r_max has to be positive")]
    InvalidRMax,

    /// # Query radius reaches more than one periodic image
    /// * `r_max` has to be at most half of the shortest periodic side length
    #[error("query radius r_max exceeds half of the shortest periodic box length")]
    RMaxTooLarge,

    /// Nearest neighbor queries need at least one neighbor
    #[error("nearest neighbor query needs num_neighbors > 0")]
    NoNeighbors,

    /// A bond refers to a point that does not exist
    #[error("bond {bond} refers to a point index outside of the point set")]
    IndexOutOfBounds{
        /// position of the offending bond in the list
        bond: usize
    },

    /// A bond has a negative or non finite distance
    #[error("bond {bond} has an invalid distance")]
    InvalidDistance{
        /// position of the offending bond in the list
        bond: usize
    },
}

/// # Precomputed list of bonds
/// * every bond is validated against the number of query points and points on creation
/// * the list is the bond source with the least overhead, if the same
///   neighborhood is used for several computations
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborList{
    bonds: Vec<NeighborBond>,
    n_query_points: usize,
    n_points: usize,
    max_distance: f64,
}

impl NeighborList
{
    /// # Create a new neighbor list
    /// * `n_query_points`: number of query points the `query_point_index` of the bonds refers to
    /// * `n_points`: number of points the `point_index` of the bonds refers to
    /// ## Errors
    /// * `IndexOutOfBounds` if any index is too large
    /// * `InvalidDistance` if any distance is negative, NaN or infinite
    pub fn new(bonds: Vec<NeighborBond>, n_query_points: usize, n_points: usize) -> Result<Self, LocalityError>
    {
        let mut max_distance: f64 = 0.0;
        for (bond, b) in bonds.iter().enumerate() {
            if b.query_point_index >= n_query_points || b.point_index >= n_points {
                return Err(LocalityError::IndexOutOfBounds{bond});
            }
            if !b.distance.is_finite() || b.distance < 0.0 {
                return Err(LocalityError::InvalidDistance{bond});
            }
            max_distance = max_distance.max(b.distance);
        }
        Ok(
            Self{
                bonds,
                n_query_points,
                n_points,
                max_distance
            }
        )
    }

    /// All bonds
    #[inline]
    pub fn bonds(&self) -> &[NeighborBond]
    {
        &self.bonds
    }

    /// Number of bonds
    pub fn len(&self) -> usize
    {
        self.bonds.len()
    }

    /// Does the list contain any bonds?
    pub fn is_empty(&self) -> bool
    {
        self.bonds.is_empty()
    }

    /// Number of query points the list refers to
    pub fn n_query_points(&self) -> usize
    {
        self.n_query_points
    }

    /// Number of points the list refers to
    pub fn n_points(&self) -> usize
    {
        self.n_points
    }

    /// Largest distance of all bonds, 0 for an empty list
    pub fn max_distance(&self) -> f64
    {
        self.max_distance
    }

    /// # Keep only bonds with `distance < r_max`
    pub fn filter_r(&self, r_max: f64) -> Self
    {
        let bonds: Vec<_> = self.bonds
            .iter()
            .filter(|b| b.distance < r_max)
            .copied()
            .collect();
        let max_distance = bonds.iter()
            .fold(0.0, |acc: f64, b| acc.max(b.distance));
        Self{
            bonds,
            n_query_points: self.n_query_points,
            n_points: self.n_points,
            max_distance
        }
    }

    /// # Number of bonds of every query point
    pub fn neighbor_counts(&self) -> Vec<usize>
    {
        let mut counts = vec![0; self.n_query_points];
        for b in self.bonds.iter() {
            counts[b.query_point_index] += 1;
        }
        counts
    }
}
