use{
    crate::histogram::*,
    num_traits::One,
    rayon::prelude::*,
    std::{
        ops::{Index, IndexMut},
        sync::Arc
    }
};

/// # N-dimensional histogram with cells of type `V`
/// * the bin grid is defined by an ordered list of axes, shared between
///   all histograms created from one another
/// * cells are stored in row-major order, i.e., the index of the last axis
///   is contiguous
/// * the number of cells is the product of the number of bins of every axis
///   and never changes after construction
#[derive(Debug, Clone)]
pub struct Histogram<V>{
    axes: Arc<[AxisF64]>,
    cells: Vec<V>,
}

impl<V> Histogram<V>
{
    /// The axes defining the bin grid
    pub fn axes(&self) -> &[AxisF64]
    {
        &self.axes
    }

    /// Number of bins of every axis
    pub fn shape(&self) -> Vec<usize>
    {
        self.axes
            .iter()
            .map(AxisF64::nbins)
            .collect()
    }

    /// # How many cells the histogram contains
    #[inline(always)]
    pub fn bin_count(&self) -> usize
    {
        self.cells.len()
    }

    /// All cells, row-major
    #[inline(always)]
    pub fn values(&self) -> &[V]
    {
        &self.cells
    }

    /// # Do both histograms use the same bin grid?
    /// * cheap if both share their axes, otherwise the axes are compared
    pub fn same_geometry<W>(&self, other: &Histogram<W>) -> bool
    {
        Arc::ptr_eq(&self.axes, &other.axes) || *self.axes == *other.axes
    }

    /// # Flattened index of a cell
    /// * `indices` contains one bin index per axis
    /// * `None` if the number of indices is wrong or any index is out of bounds
    pub fn flat_index(&self, indices: &[usize]) -> Option<usize>
    {
        if indices.len() != self.axes.len() {
            return None;
        }
        let mut flat = 0;
        for (axis, &idx) in self.axes.iter().zip(indices) {
            if idx >= axis.nbins() {
                return None;
            }
            flat = flat * axis.nbins() + idx;
        }
        Some(flat)
    }

    /// Cell at per-axis bin indices, or `None` if out of bounds
    pub fn get(&self, indices: &[usize]) -> Option<&V>
    {
        self.flat_index(indices)
            .map(|flat| &self.cells[flat])
    }

    /// # Flattened bin of a point
    /// * `coords` contains one coordinate per axis
    /// * no range check: the coordinates have to be inside of the histogram,
    ///   which is the job of whoever produces them.
    ///   Use [`checked_bin`](Self::checked_bin) if that is not guaranteed
    #[inline]
    pub fn bin(&self, coords: &[f64]) -> usize
    {
        debug_assert_eq!(coords.len(), self.axes.len());
        debug_assert!(
            self.axes.iter().zip(coords).all(|(axis, &x)| axis.is_inside(x)),
            "coordinates {coords:?} outside of histogram"
        );
        self.axes
            .iter()
            .zip(coords)
            .fold(0, |flat, (axis, &x)| flat * axis.nbins() + axis.bin_index_unchecked(x))
    }

    /// # Flattened bin of a point
    /// * `Err(DimensionMismatch)` if the number of coordinates is wrong
    /// * `Err(OutsideHist)` if any coordinate is outside of its axis
    pub fn checked_bin(&self, coords: &[f64]) -> Result<usize, HistErrors>
    {
        if coords.len() != self.axes.len() {
            return Err(HistErrors::DimensionMismatch);
        }
        let mut flat = 0;
        for (axis, &x) in self.axes.iter().zip(coords) {
            let idx = axis.bin_index(x)
                .ok_or(HistErrors::OutsideHist)?;
            flat = flat * axis.nbins() + idx;
        }
        Ok(flat)
    }

    /// Bin centers, one vector per axis
    pub fn bin_centers(&self) -> Vec<Vec<f64>>
    {
        self.axes
            .iter()
            .map(AxisF64::bin_centers)
            .collect()
    }

    /// Bin edges, one vector per axis
    pub fn bin_edges(&self) -> Vec<Vec<f64>>
    {
        self.axes
            .iter()
            .map(AxisF64::bin_edges)
            .collect()
    }
}

impl<V> Histogram<V>
where V: BinValue
{
    /// # Create a new histogram
    /// * all cells start at zero
    /// * `Err(NoAxes)` if `axes` is empty
    pub fn new<A>(axes: A) -> Result<Self, HistErrors>
    where A: Into<Arc<[AxisF64]>>
    {
        let axes = axes.into();
        if axes.is_empty() {
            return Err(HistErrors::NoAxes);
        }
        let len = axes.iter()
            .map(AxisF64::nbins)
            .product();
        Ok(
            Self{
                axes,
                cells: vec![V::zero(); len]
            }
        )
    }

    /// # Empty histogram sharing the bin grid of `other`
    /// * used to keep, e.g., a count histogram and a value histogram in lockstep
    pub fn with_geometry_of<W>(other: &Histogram<W>) -> Self
    {
        Self{
            axes: Arc::clone(&other.axes),
            cells: vec![V::zero(); other.cells.len()]
        }
    }

    /// reset all cells to zero
    pub fn reset(&mut self)
    {
        self.cells
            .iter_mut()
            .for_each(|c| *c = V::zero());
    }

    /// # `self[index] += delta`
    /// * panics if `index` is out of bounds
    #[inline(always)]
    pub fn increment_index_by(&mut self, index: usize, delta: V)
    {
        self.cells[index] += delta;
    }

    /// # Sum thread local histograms into `self`
    /// * `self` is zeroed first, then every thread local copy is added cell by cell
    /// * the local copies are only read
    /// # Panics
    /// * if any local copy uses a different bin grid
    pub fn reduce_over_threads(&mut self, sources: &mut ThreadLocalHistogram<V>)
    {
        self.reduce_over_threads_per_bin(sources, |_, _| {})
    }

    /// # Sum thread local histograms into `self`, then finish every bin
    /// * same as [`reduce_over_threads`](Self::reduce_over_threads), but afterwards
    ///   `finish(index, &mut cell)` is called exactly once for every cell,
    ///   after all thread contributions of that cell were summed
    /// * bins are processed in parallel
    /// # Panics
    /// * if any local copy uses a different bin grid
    pub fn reduce_over_threads_per_bin<F>(&mut self, sources: &mut ThreadLocalHistogram<V>, finish: F)
    where F: Fn(usize, &mut V) + Sync
    {
        let locals: Vec<&Histogram<V>> = sources.local_histograms().collect();
        assert!(
            locals.iter().all(|local| self.same_geometry(*local)),
            "thread local histograms have to share the bin grid of the reduction target"
        );
        self.cells
            .par_iter_mut()
            .enumerate()
            .for_each(
                |(index, cell)|
                {
                    *cell = V::zero();
                    for local in locals.iter() {
                        *cell += local.cells[index];
                    }
                    finish(index, cell);
                }
            );
    }
}

impl<V> Histogram<V>
where V: BinValue + One
{
    /// # `self[index] += 1`
    /// * panics if `index` is out of bounds
    #[inline(always)]
    pub fn increment_index(&mut self, index: usize)
    {
        self.increment_index_by(index, V::one())
    }
}

impl<V> Index<usize> for Histogram<V>
{
    type Output = V;

    #[inline(always)]
    fn index(&self, index: usize) -> &V
    {
        &self.cells[index]
    }
}

impl<V> IndexMut<usize> for Histogram<V>
{
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut V
    {
        &mut self.cells[index]
    }
}
