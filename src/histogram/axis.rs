use{
    crate::histogram::*,
    num_traits::{Float, FromPrimitive},
};

#[cfg(feature = "serde_support")]
use serde::{Serialize, Deserialize};

/// # Regular partition of an interval
/// * `nbins` bins of equal width covering `[lower, upper)`
/// * left border inclusive, right border exclusive
/// * immutable after construction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct RegularAxis<T>
{
    nbins: usize,
    lower: T,
    upper: T,
    /// `nbins / (upper - lower)`, cached for the hot path
    inv_bin_width: T,
}

/// Axis over `f64` coordinates - alias for `RegularAxis<f64>`
pub type AxisF64 = RegularAxis<f64>;

impl<T> RegularAxis<T>
where T: Float + FromPrimitive
{
    /// # Create a new axis
    /// * right exclusive, left inclusive
    /// ## Errors
    /// * `NoBins` if `nbins == 0`
    /// * `InvalidVal` if a border is not finite
    /// * `IntervalWidthZero` if `lower >= upper`
    pub fn new(nbins: usize, lower: T, upper: T) -> Result<Self, HistErrors>
    {
        if nbins < 1 {
            return Err(HistErrors::NoBins);
        }
        if !lower.is_finite() || !upper.is_finite() {
            return Err(HistErrors::InvalidVal);
        }
        if lower >= upper {
            return Err(HistErrors::IntervalWidthZero);
        }
        let nbins_as_t = T::from_usize(nbins)
            .ok_or(HistErrors::InvalidVal)?;

        Ok(
            Self{
                nbins,
                lower,
                upper,
                inv_bin_width: nbins_as_t / (upper - lower)
            }
        )
    }

    /// Number of bins
    #[inline(always)]
    pub fn nbins(&self) -> usize
    {
        self.nbins
    }

    /// Left border (inclusive)
    #[inline(always)]
    pub fn lower(&self) -> T
    {
        self.lower
    }

    /// Right border (exclusive)
    #[inline(always)]
    pub fn upper(&self) -> T
    {
        self.upper
    }

    /// Width of every bin
    pub fn bin_width(&self) -> T
    {
        self.inv_bin_width.recip()
    }

    /// does a value correspond to a valid bin?
    #[inline]
    pub fn is_inside(&self, val: T) -> bool
    {
        val >= self.lower && val < self.upper
    }

    /// # Bin index of `val`
    /// * `None` if `val` is outside of `[lower, upper)` or not finite
    #[inline]
    pub fn bin_index(&self, val: T) -> Option<usize>
    {
        if self.is_inside(val) {
            Some(self.bin_index_unchecked(val))
        } else {
            None
        }
    }

    /// # Bin index without range check
    /// * bin `i` contains `edge(i) <= val < edge(i + 1)`, with the same edges
    ///   [bin_edges](Self::bin_edges) reports
    /// * only meaningful for `val` inside `[lower, upper)`, the caller has to make sure of that.
    ///   Values below `lower` map to bin 0, values at or above `upper` to `nbins - 1`
    #[inline(always)]
    pub fn bin_index_unchecked(&self, val: T) -> usize
    {
        let guess = ((val - self.lower) * self.inv_bin_width)
            .floor()
            .to_usize()
            .unwrap_or(0)
            .min(self.nbins - 1);
        // the estimate can be off by one next to an edge
        if val < self.edge(guess) {
            guess.saturating_sub(1)
        } else if guess + 1 < self.nbins && val >= self.edge(guess + 1) {
            guess + 1
        } else {
            guess
        }
    }

    /// left border of bin `index`, `upper` for `index >= nbins`
    #[inline(always)]
    fn edge(&self, index: usize) -> T
    {
        if index >= self.nbins {
            return self.upper;
        }
        let i = T::from_usize(index).unwrap_or_else(T::zero);
        let n = T::from_usize(self.nbins).unwrap_or_else(T::one);
        self.lower + (self.upper - self.lower) * i / n
    }

    /// # Borders of all bins
    /// * `nbins + 1` values, the first one is `lower`, the last one `upper`
    /// * a value equal to an edge belongs to the bin right of it
    /// ## Example
    /// ```
    /// use paircorr::histogram::*;
    ///
    /// let axis = RegularAxis::<f64>::new(2, 0.0, 1.0).unwrap();
    /// assert_eq!(axis.bin_edges(), vec![0.0, 0.5, 1.0]);
    /// ```
    pub fn bin_edges(&self) -> Vec<T>
    {
        (0..=self.nbins)
            .map(|i| self.edge(i))
            .collect()
    }

    /// # Centers of all bins
    /// * `nbins` values
    pub fn bin_centers(&self) -> Vec<T>
    {
        let edges = self.bin_edges();
        let two = T::one() + T::one();
        edges.windows(2)
            .map(|w| (w[0] + w[1]) / two)
            .collect()
    }
}

#[cfg(test)]
mod tests{
    use rand_pcg::Pcg64Mcg;
    use rand::{Rng, SeedableRng};
    use super::*;

    #[test]
    fn axis_construction_errors()
    {
        assert_eq!(RegularAxis::<f64>::new(0, 0.0, 1.0).unwrap_err(), HistErrors::NoBins);
        assert_eq!(RegularAxis::<f64>::new(3, 1.0, 1.0).unwrap_err(), HistErrors::IntervalWidthZero);
        assert_eq!(RegularAxis::<f64>::new(3, 2.0, 1.0).unwrap_err(), HistErrors::IntervalWidthZero);
        assert_eq!(RegularAxis::<f64>::new(3, f64::NAN, 1.0).unwrap_err(), HistErrors::InvalidVal);
        assert_eq!(RegularAxis::<f32>::new(3, 0.0, f32::INFINITY).unwrap_err(), HistErrors::InvalidVal);
    }

    #[test]
    fn edges_tile_interval()
    {
        let mut rng = Pcg64Mcg::seed_from_u64(0xcafef00dd15ea5e5);

        for nbins in 1..100 {
            let lower: f64 = rng.random_range(-10.0..10.0);
            let upper = lower + rng.random_range(0.01..10.0);
            let axis = RegularAxis::new(nbins, lower, upper).unwrap();
            let edges = axis.bin_edges();

            assert_eq!(edges.len(), nbins + 1, "nbins={}", nbins);
            assert_eq!(edges[0], lower);
            assert_eq!(edges[nbins], upper);
            for w in edges.windows(2) {
                assert!(w[0] < w[1]);
            }
            let centers = axis.bin_centers();
            assert_eq!(centers.len(), nbins);
            for (id, center) in centers.iter().enumerate() {
                assert_eq!(axis.bin_index(*center), Some(id), "nbins={}", nbins);
            }
            assert_eq!(axis.bin_index(lower), Some(0));
            assert_eq!(axis.bin_index(upper), None);
        }
    }

    #[test]
    fn edges_belong_to_their_bin()
    {
        let axis = AxisF64::new(4, 0.0, 0.7).unwrap();
        let edges = axis.bin_edges();
        assert_eq!(axis.bin_index(edges[3]), Some(3));

        let mut rng = Pcg64Mcg::seed_from_u64(0x5eed_ed9e);
        for _ in 0..500 {
            let nbins = rng.random_range(1..200);
            let lower: f64 = rng.random_range(-100.0..100.0);
            let upper = lower + rng.random_range(1e-3..50.0);
            let axis = AxisF64::new(nbins, lower, upper).unwrap();
            for (id, &edge) in axis.bin_edges()[..nbins].iter().enumerate() {
                assert_eq!(axis.bin_index(edge), Some(id), "nbins={nbins}, lower={lower}, upper={upper}");
            }
        }
    }

    #[test]
    fn bin_index_floor()
    {
        let axis = RegularAxis::new(2, 0.0, 2.0).unwrap();
        assert_eq!(axis.bin_index(0.0), Some(0));
        assert_eq!(axis.bin_index(0.5), Some(0));
        assert_eq!(axis.bin_index(0.999), Some(0));
        assert_eq!(axis.bin_index(1.0), Some(1));
        assert_eq!(axis.bin_index(1.5), Some(1));
        assert_eq!(axis.bin_index(-0.1), None);
        assert_eq!(axis.bin_index(f64::NAN), None);
        assert_eq!(axis.bin_index_unchecked(2.0 - f64::EPSILON), 1);
        assert_eq!(axis.bin_centers(), vec![0.5, 1.5]);
        assert_eq!(axis.bin_width(), 1.0);
    }
}
