use{
    crate::{
        compute::*,
        histogram::*,
        locality::*,
    },
    log::{debug, trace},
};

/// # Errors of the computations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputeError{
    /// Construction parameters violate their constraints
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// Length of an input array does not match its point set
    #[error("{what} has length {got}, expected {expected}")]
    LengthMismatch{
        /// which input
        what: &'static str,
        /// required length
        expected: usize,
        /// actual length
        got: usize
    },

    /// The neighbor list does not belong to the given points
    #[error("neighbor list does not fit the computation: {0}")]
    InvalidNeighborList(&'static str),

    /// Error while building histograms
    #[error(transparent)]
    Hist(#[from] HistErrors),

    /// Error of the neighbor finding
    #[error(transparent)]
    Locality(#[from] LocalityError),

    /// rayon could not build the requested thread pool
    #[error("unable to build thread pool: {0}")]
    ThreadPool(String),
}

/// # Shared state of all statistics computed from bond histograms
/// * bond counts are stored as `u32`, see [BondHistogram::bin_counts] for their limit
/// * the canonical count histogram, its thread local counterpart and the
///   flag telling whether a reduction is pending
/// * bookkeeping of the accumulate calls: number of frames, point counts and box
///   of the most recent call
#[derive(Debug)]
pub struct BondHistogramCompute{
    histogram: Histogram<u32>,
    local_histograms: ThreadLocalHistogram<u32>,
    frame_counter: usize,
    n_points: usize,
    n_query_points: usize,
    sim_box: Option<SimulationBox>,
    reduce: bool,
    reductions: usize,
    parallelism: Parallelism,
}

impl BondHistogramCompute
{
    /// # Create the count histogram over `axes`
    /// * `Err` if there are no axes
    pub fn new(axes: Vec<AxisF64>) -> Result<Self, ComputeError>
    {
        let histogram = Histogram::new(axes)?;
        let local_histograms = ThreadLocalHistogram::new(&histogram);
        debug!("created bond histogram with shape {:?}", histogram.shape());
        Ok(
            Self{
                histogram,
                local_histograms,
                frame_counter: 0,
                n_points: 0,
                n_query_points: 0,
                sim_box: None,
                reduce: true,
                reductions: 0,
                parallelism: Parallelism::default(),
            }
        )
    }

    /// # Canonical count histogram
    /// * only up to date after a reduction, see [BondHistogram::bin_counts]
    pub fn histogram(&self) -> &Histogram<u32>
    {
        &self.histogram
    }

    /// Thread local count histograms, filled while accumulating
    pub fn local_histograms(&self) -> &ThreadLocalHistogram<u32>
    {
        &self.local_histograms
    }

    /// # Fold the thread local counts into the canonical histogram
    /// * the canonical histogram is zeroed first
    pub fn reduce_counts(&mut self)
    {
        self.histogram.reduce_over_threads(&mut self.local_histograms);
    }

    /// # Clear the accumulated counts and the frame bookkeeping
    /// * the geometry is kept
    /// * a reduction stays pending, so the next read yields all zero counts
    pub fn reset(&mut self)
    {
        self.local_histograms.reset();
        self.frame_counter = 0;
        self.n_points = 0;
        self.n_query_points = 0;
        self.sim_box = None;
        self.reduce = true;
    }

    /// Has anything been accumulated since the last reduction?
    pub fn is_reduce_pending(&self) -> bool
    {
        self.reduce
    }

    /// Number of reductions performed so far
    pub fn reduction_count(&self) -> usize
    {
        self.reductions
    }

    /// Number of accumulate calls since construction or the last reset
    pub fn frame_counter(&self) -> usize
    {
        self.frame_counter
    }

    /// Number of points of the most recent accumulate call
    pub fn n_points(&self) -> usize
    {
        self.n_points
    }

    /// Number of query points of the most recent accumulate call
    pub fn n_query_points(&self) -> usize
    {
        self.n_query_points
    }

    /// Box of the most recent accumulate call
    pub fn sim_box(&self) -> Option<&SimulationBox>
    {
        self.sim_box.as_ref()
    }

    /// How bonds are processed
    pub fn parallelism(&self) -> Parallelism
    {
        self.parallelism
    }

    /// Change how bonds are processed
    pub fn set_parallelism(&mut self, parallelism: Parallelism)
    {
        self.parallelism = parallelism;
    }

    /// # Process every bond of `source`
    /// * validates that `source` fits `query` and `query_points`. Query radii may not
    ///   exceed [SimulationBox::max_query_radius] of the box of `query`
    /// * records the frame and marks a reduction as pending
    /// * calls `f(self, bond)` for every bond, possibly from many threads at once.
    ///   `f` only gets shared access, so it can increment thread local histograms
    ///   but never the canonical ones
    pub fn accumulate_general<Q, F>(
        &mut self,
        query: &Q,
        query_points: &[Point],
        source: BondSource<'_>,
        f: F
    ) -> Result<(), ComputeError>
    where
        Q: NeighborQuery,
        F: Fn(&Self, &NeighborBond) + Sync + Send
    {
        match source {
            BondSource::List(nlist) => {
                if nlist.n_query_points() != query_points.len() {
                    return Err(ComputeError::InvalidNeighborList("number of query points differs"));
                }
                if nlist.n_points() != query.n_points() {
                    return Err(ComputeError::InvalidNeighborList("number of points differs"));
                }
            },
            BondSource::Query(args) => args.validate_for(query.sim_box())?
        }

        self.frame_counter += 1;
        self.n_points = query.n_points();
        self.n_query_points = query_points.len();
        self.sim_box = Some(*query.sim_box());
        self.reduce = true;
        trace!(
            "accumulating frame {} with {} points and {} query points",
            self.frame_counter,
            self.n_points,
            self.n_query_points
        );

        let this = &*self;
        let parallelism = this.parallelism;
        match source {
            BondSource::List(nlist) => {
                parallelism.maybe_par_for_each(nlist.bonds(), |bond| f(this, bond));
            },
            BondSource::Query(args) => {
                parallelism.maybe_par_for_each(
                    0..query_points.len(),
                    |query_index| query.for_each_neighbor(
                        query_points[query_index],
                        query_index,
                        &args,
                        |bond| f(this, &bond)
                    )
                );
            }
        }
        Ok(())
    }
}

/// # Statistics built on a [BondHistogramCompute]
/// * accumulating only touches thread local histograms, the canonical results are
///   computed by [reduce](Self::reduce) on demand
/// * every accessor returning reduced data first calls
///   [reduce_if_pending](Self::reduce_if_pending), so repeated reads without
///   accumulating in between do not fold again
pub trait BondHistogram
{
    /// The shared bond histogram state
    fn base(&self) -> &BondHistogramCompute;

    /// The shared bond histogram state, mutable
    fn base_mut(&mut self) -> &mut BondHistogramCompute;

    /// # Fold all thread local state into the canonical state
    /// * has to be idempotent
    /// * prefer [reduce_if_pending](Self::reduce_if_pending)
    fn reduce(&mut self);

    /// # Clear everything accumulated so far
    /// * keeps the bin geometry
    fn reset(&mut self);

    /// # Reduce, if anything was accumulated since the last reduction
    fn reduce_if_pending(&mut self)
    {
        if self.base().is_reduce_pending() {
            debug!("reducing bond histogram after {} frame(s)", self.base().frame_counter());
            self.reduce();
            let base = self.base_mut();
            base.reduce = false;
            base.reductions += 1;
        }
    }

    /// # Reduced count histogram
    /// * number of bonds per bin, summed over all frames since the last reset
    /// * counts are `u32`. More than `u32::MAX` bonds in one bin overflow, which panics in
    ///   debug builds and wraps around in release builds. Call [reset](Self::reset) between
    ///   batches of frames if a bin can get that many bonds
    fn bin_counts(&mut self) -> &[u32]
    {
        self.reduce_if_pending();
        self.base().histogram().values()
    }

    /// Has anything been accumulated since the last reduction?
    fn is_reduce_pending(&self) -> bool
    {
        self.base().is_reduce_pending()
    }

    /// Number of reductions performed so far
    fn reduction_count(&self) -> usize
    {
        self.base().reduction_count()
    }

    /// Number of accumulate calls since construction or the last reset
    fn frame_counter(&self) -> usize
    {
        self.base().frame_counter()
    }

    /// Number of bins of every axis
    fn shape(&self) -> Vec<usize>
    {
        self.base().histogram().shape()
    }

    /// Bin centers, one vector per axis
    fn bin_centers(&self) -> Vec<Vec<f64>>
    {
        self.base().histogram().bin_centers()
    }

    /// Bin edges, one vector per axis
    fn bin_edges(&self) -> Vec<Vec<f64>>
    {
        self.base().histogram().bin_edges()
    }

    /// Change how bonds are processed
    fn set_parallelism(&mut self, parallelism: Parallelism)
    {
        self.base_mut().set_parallelism(parallelism)
    }
}
