use{
    crate::locality::*,
    rayon::prelude::*,
};

#[cfg(feature = "serde_support")]
use serde::{Serialize, Deserialize};

/// # How neighbors are selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum QueryMode{
    /// every point closer than `r_max`
    Ball,
    /// the `num_neighbors` closest points, as long as they are closer than `r_max`
    Nearest{
        /// how many neighbors at most
        num_neighbors: usize
    },
}

/// # Arguments of a neighbor query
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct QueryArgs{
    /// How to select neighbors
    pub mode: QueryMode,
    /// bonds have `distance < r_max`
    pub r_max: f64,
    /// # skip bonds with `query_point_index == point_index`
    /// * use this if the query points are the points themselves
    pub exclude_ii: bool,
}

impl QueryArgs
{
    /// Ball query with radius `r_max`
    pub fn ball(r_max: f64) -> Self
    {
        Self{
            mode: QueryMode::Ball,
            r_max,
            exclude_ii: false
        }
    }

    /// Query for the `num_neighbors` nearest points within `r_max`
    pub fn nearest(num_neighbors: usize, r_max: f64) -> Self
    {
        Self{
            mode: QueryMode::Nearest{num_neighbors},
            r_max,
            exclude_ii: false
        }
    }

    /// Builder style setter for `exclude_ii`
    pub fn exclude_ii(mut self, exclude_ii: bool) -> Self
    {
        self.exclude_ii = exclude_ii;
        self
    }

    /// # Check the arguments
    /// * `r_max` has to be positive (infinity is allowed for nearest neighbor queries)
    /// * nearest neighbor queries need `num_neighbors > 0`
    pub fn validate(&self) -> Result<(), LocalityError>
    {
        if self.r_max.is_nan() || self.r_max <= 0.0 {
            return Err(LocalityError::InvalidRMax);
        }
        match self.mode {
            QueryMode::Ball if !self.r_max.is_finite() => Err(LocalityError::InvalidRMax),
            QueryMode::Nearest{num_neighbors: 0} => Err(LocalityError::NoNeighbors),
            _ => Ok(())
        }
    }

    /// # Check the arguments for a query inside of `sim_box`
    /// * everything [validate](Self::validate) checks
    /// * `Err(RMaxTooLarge)` if `r_max` exceeds [SimulationBox::max_query_radius],
    ///   since bonds to further periodic images would be missed
    pub fn validate_for(&self, sim_box: &SimulationBox) -> Result<(), LocalityError>
    {
        self.validate()?;
        if self.r_max > sim_box.max_query_radius() {
            Err(LocalityError::RMaxTooLarge)
        } else {
            Ok(())
        }
    }
}

/// # Where the bonds of a computation come from
#[derive(Debug, Clone, Copy)]
pub enum BondSource<'a>{
    /// a precomputed neighbor list
    List(&'a NeighborList),
    /// run a neighbor query for every query point
    Query(QueryArgs),
}

impl<'a> From<&'a NeighborList> for BondSource<'a>
{
    fn from(nlist: &'a NeighborList) -> Self
    {
        BondSource::List(nlist)
    }
}

impl From<QueryArgs> for BondSource<'_>
{
    fn from(args: QueryArgs) -> Self
    {
        BondSource::Query(args)
    }
}

/// # Finds the neighbors of query points among a set of points
/// * implementations have to report every bond matching the [QueryArgs] exactly once,
///   each with `distance < args.r_max`
pub trait NeighborQuery: Sync
{
    /// Number of points
    fn n_points(&self) -> usize;

    /// # Position of point `index`
    /// * panics if `index` is out of bounds
    fn point(&self, index: usize) -> Point;

    /// The box the points live in
    fn sim_box(&self) -> &SimulationBox;

    /// # Call `f` for every bond of one query point
    /// * `query_index` is stored in the bonds and used for `exclude_ii`
    fn for_each_neighbor<F>(&self, query_point: Point, query_index: usize, args: &QueryArgs, f: F)
    where F: FnMut(NeighborBond);

    /// # Run the query for all query points and collect the bonds
    /// * `Err` if the arguments are invalid for the box, see [QueryArgs::validate_for]
    /// * query points are processed in parallel
    /// * bonds are sorted by query point, then by distance
    fn query_all(&self, query_points: &[Point], args: &QueryArgs) -> Result<NeighborList, LocalityError>
    {
        args.validate_for(self.sim_box())?;
        let bonds: Vec<NeighborBond> = query_points
            .par_iter()
            .enumerate()
            .flat_map_iter(
                |(query_index, &query_point)|
                {
                    let mut bonds = Vec::new();
                    self.for_each_neighbor(query_point, query_index, args, |b| bonds.push(b));
                    bonds.sort_by(|a, b| a.distance.total_cmp(&b.distance));
                    bonds
                }
            ).collect();
        NeighborList::new(bonds, query_points.len(), self.n_points())
    }
}

/// # Neighbor query that checks every pair
/// * `O(n_points)` per query point, intended for small systems and as reference
#[derive(Debug, Clone)]
pub struct BruteForceQuery{
    sim_box: SimulationBox,
    points: Vec<Point>,
}

impl BruteForceQuery
{
    /// Create a query over `points` inside of `sim_box`
    pub fn new(sim_box: SimulationBox, points: Vec<Point>) -> Self
    {
        Self{
            sim_box,
            points
        }
    }

    /// All points
    pub fn points(&self) -> &[Point]
    {
        &self.points
    }
}

impl NeighborQuery for BruteForceQuery
{
    fn n_points(&self) -> usize
    {
        self.points.len()
    }

    fn point(&self, index: usize) -> Point
    {
        self.points[index]
    }

    fn sim_box(&self) -> &SimulationBox
    {
        &self.sim_box
    }

    fn for_each_neighbor<F>(&self, query_point: Point, query_index: usize, args: &QueryArgs, mut f: F)
    where F: FnMut(NeighborBond)
    {
        let candidates = self.points
            .iter()
            .enumerate()
            .filter(|(point_index, _)| !(args.exclude_ii && *point_index == query_index))
            .map(
                |(point_index, &point)|
                {
                    let distance = norm(self.sim_box.displacement(point, query_point));
                    NeighborBond::new(query_index, point_index, distance)
                }
            )
            .filter(|b| b.distance < args.r_max);

        match args.mode {
            QueryMode::Ball => candidates.for_each(f),
            QueryMode::Nearest{num_neighbors} => {
                let mut nearest: Vec<_> = candidates.collect();
                nearest.sort_by(
                    |a, b| a.distance
                        .total_cmp(&b.distance)
                        .then(a.point_index.cmp(&b.point_index))
                );
                nearest.into_iter()
                    .take(num_neighbors)
                    .for_each(&mut f);
            }
        }
    }
}
