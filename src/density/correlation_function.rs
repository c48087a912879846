use{
    crate::{
        compute::*,
        histogram::*,
        locality::*,
    },
    log::debug,
    num_complex::Complex64,
    std::ops::{DivAssign, Mul},
};

/// # Values that can be correlated
/// * products of a point value and a query point value are summed per bin
///   and divided by the number of bonds of that bin
/// * implemented for `f64` and `Complex<f64>`
pub trait CorrelationValue: BinValue + Mul<Output = Self> + DivAssign<f64> {}

impl<T> CorrelationValue for T
where T: BinValue + Mul<Output = T> + DivAssign<f64> {}

/// # Pairwise correlation function
/// * every bond between a point `j` and a query point `i` adds
///   `values[j] * query_values[i]` to the bin of its distance
/// * the result is the mean of these products per bin, i.e., divided by the
///   number of bonds of the bin. Bins without bonds stay zero
/// * bins are `floor(r_max / dr)` regular bins spanning `[0, r_max)`
///
/// ## Example
/// ```
/// use paircorr::{compute::*, density::*, locality::*};
///
/// let mut cf = CorrelationFunction::<f64>::new(2.0, 1.0).unwrap();
///
/// let sim_box = SimulationBox::new([10.0; 3], [false; 3], false).unwrap();
/// let query = BruteForceQuery::new(sim_box, vec![[0.0; 3], [3.0, 0.0, 0.0]]);
/// let query_points = vec![[0.5, 0.0, 0.0], [1.5, 0.0, 0.0]];
/// let bonds = vec![
///     NeighborBond::new(0, 0, 0.5),
///     NeighborBond::new(1, 0, 1.5),
///     NeighborBond::new(0, 1, 0.5),
/// ];
/// let nlist = NeighborList::new(bonds, 2, 2).unwrap();
///
/// cf.accumulate(&query, &[2.0, 3.0], &query_points, &[1.0, 4.0], &nlist).unwrap();
/// assert_eq!(cf.bin_counts(), &[2, 1]);
/// assert_eq!(cf.correlation(), &[2.5, 8.0]);
/// ```
#[derive(Debug)]
pub struct CorrelationFunction<T: Send>{
    base: BondHistogramCompute,
    correlation_function: Histogram<T>,
    local_correlation_function: ThreadLocalHistogram<T>,
    r_max: f64,
    dr: f64,
}

/// Largest number of radial bins a [CorrelationFunction] accepts
pub const MAX_RADIAL_BINS: usize = 1 << 26;

/// Correlation function of real values
pub type RealCorrelationFunction = CorrelationFunction<f64>;

/// Correlation function of complex values
pub type ComplexCorrelationFunction = CorrelationFunction<Complex64>;

impl<T> CorrelationFunction<T>
where T: CorrelationValue
{
    /// # Create a new correlation function
    /// * `r_max`: bonds have to be shorter than this
    /// * `dr`: requested bin width, the number of bins is `floor(r_max / dr)`
    /// ## Errors
    /// `InvalidParameter` if `dr` or `r_max` is not positive, `r_max` is not finite,
    /// `dr > r_max` or `floor(r_max / dr)` exceeds [MAX_RADIAL_BINS]
    pub fn new(r_max: f64, dr: f64) -> Result<Self, ComputeError>
    {
        if dr.is_nan() || dr <= 0.0 {
            return Err(ComputeError::InvalidParameter("dr has to be positive"));
        }
        if r_max.is_nan() || r_max <= 0.0 {
            return Err(ComputeError::InvalidParameter("r_max has to be positive"));
        }
        if !r_max.is_finite() {
            return Err(ComputeError::InvalidParameter("r_max has to be finite"));
        }
        if dr > r_max {
            return Err(ComputeError::InvalidParameter("dr has to be less than or equal to r_max"));
        }

        let nbins = (r_max / dr).floor();
        if nbins > MAX_RADIAL_BINS as f64 {
            return Err(ComputeError::InvalidParameter("too many bins, dr is too small compared to r_max"));
        }
        let nbins = nbins as usize;
        // counts and values use the same radial axis
        let base = BondHistogramCompute::new(vec![AxisF64::new(nbins, 0.0, r_max)?])?;
        let correlation_function = Histogram::with_geometry_of(base.histogram());
        let local_correlation_function = ThreadLocalHistogram::new(&correlation_function);
        debug!("created correlation function with r_max={r_max}, dr={dr} and {nbins} bins");

        Ok(
            Self{
                base,
                correlation_function,
                local_correlation_function,
                r_max,
                dr
            }
        )
    }

    /// Bonds have to be shorter than `r_max`
    pub fn r_max(&self) -> f64
    {
        self.r_max
    }

    /// The requested bin width
    pub fn dr(&self) -> f64
    {
        self.dr
    }

    /// Number of radial bins
    pub fn nbins(&self) -> usize
    {
        self.base.histogram().bin_count()
    }

    /// # Accumulate the bonds of one frame
    /// * `values[j]` belongs to point `j` of `query`
    /// * `query_values[i]` belongs to `query_points[i]`
    /// * `source` is a [NeighborList] or [QueryArgs]. All bonds have to be shorter than `r_max`,
    ///   so neighbor lists may not contain longer bonds and query arguments may not use a
    ///   larger radius
    /// * can be called for several frames, the results add up until [reset](BondHistogram::reset)
    pub fn accumulate<'a, Q, S>(
        &mut self,
        query: &Q,
        values: &[T],
        query_points: &[Point],
        query_values: &[T],
        source: S
    ) -> Result<(), ComputeError>
    where
        Q: NeighborQuery,
        S: Into<BondSource<'a>>
    {
        if values.len() != query.n_points() {
            return Err(
                ComputeError::LengthMismatch{
                    what: "values",
                    expected: query.n_points(),
                    got: values.len()
                }
            );
        }
        if query_values.len() != query_points.len() {
            return Err(
                ComputeError::LengthMismatch{
                    what: "query_values",
                    expected: query_points.len(),
                    got: query_values.len()
                }
            );
        }
        let source = source.into();
        match source {
            BondSource::List(nlist) if nlist.max_distance() >= self.r_max => {
                return Err(ComputeError::InvalidNeighborList("bonds have to be shorter than r_max"));
            },
            BondSource::Query(args) if args.r_max > self.r_max => {
                return Err(ComputeError::InvalidParameter("query radius has to be at most r_max"));
            },
            _ => ()
        }

        let local_correlation_function = &self.local_correlation_function;
        self.base.accumulate_general(
            query,
            query_points,
            source,
            |base, bond|
            {
                let bin = base.histogram().bin(&[bond.distance]);
                base.local_histograms().increment(bin);
                local_correlation_function.increment_by(
                    bin,
                    values[bond.point_index] * query_values[bond.query_point_index]
                );
            }
        )
    }

    /// # Reduced correlation function
    /// * mean product of the values per bin, zero for bins without bonds
    pub fn correlation(&mut self) -> &[T]
    {
        self.reduce_if_pending();
        self.correlation_function.values()
    }
}

impl<T> BondHistogram for CorrelationFunction<T>
where T: CorrelationValue
{
    fn base(&self) -> &BondHistogramCompute
    {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BondHistogramCompute
    {
        &mut self.base
    }

    fn reduce(&mut self)
    {
        self.base.reduce_counts();
        let counts = self.base.histogram();
        self.correlation_function.reduce_over_threads_per_bin(
            &mut self.local_correlation_function,
            |index, value|
            {
                let count = counts[index];
                if count != 0 {
                    *value /= f64::from(count);
                }
            }
        );
    }

    fn reset(&mut self)
    {
        self.base.reset();
        self.local_correlation_function.reset();
    }
}
