use{
    crate::histogram::*,
    num_traits::One,
    std::cell::RefCell,
    thread_local::ThreadLocal,
};

/// # One histogram per worker thread
/// * every thread that calls [`increment_by`](Self::increment_by) gets its own
///   copy of the prototype histogram, created on first touch
/// * a thread only ever mutates its own copy, so incrementing needs no locks
/// * reading the copies (for a reduction) or resetting them requires `&mut self`,
///   i.e., it can only happen while no thread is incrementing
/// * the copies are owned by this struct and freed exactly once, when it is dropped
///
/// ## Example
/// ```
/// use paircorr::histogram::*;
/// use rayon::prelude::*;
///
/// let axes = vec![AxisF64::new(10, 0.0, 1.0).unwrap()];
/// let mut hist = Histogram::<u32>::new(axes).unwrap();
/// let mut local = ThreadLocalHistogram::new(&hist);
///
/// (0..1000)
///     .into_par_iter()
///     .for_each(
///         |i|
///         {
///             let bin = hist.bin(&[(i % 10) as f64 / 10.0 + 0.05]);
///             local.increment(bin);
///         }
///     );
///
/// hist.reduce_over_threads(&mut local);
/// assert!(hist.values().iter().all(|&count| count == 100));
/// ```
#[derive(Debug)]
pub struct ThreadLocalHistogram<V: Send>{
    prototype: Histogram<V>,
    local: ThreadLocal<RefCell<Histogram<V>>>,
}

impl<V> ThreadLocalHistogram<V>
where V: BinValue
{
    /// # Create thread local counterpart of `prototype`
    /// * copies share the bin grid of `prototype` and start at zero
    /// * no copies exist until the first increment
    pub fn new(prototype: &Histogram<V>) -> Self
    {
        Self{
            prototype: Histogram::with_geometry_of(prototype),
            local: ThreadLocal::new()
        }
    }

    /// Empty histogram every thread local copy starts from
    pub fn prototype(&self) -> &Histogram<V>
    {
        &self.prototype
    }

    /// # `local[index] += delta` on the copy of the calling thread
    /// * creates the copy if the calling thread has none yet
    /// * panics if `index` is out of bounds
    #[inline]
    pub fn increment_by(&self, index: usize, delta: V)
    {
        self.local
            .get_or(|| RefCell::new(self.prototype.clone()))
            .borrow_mut()
            .increment_index_by(index, delta);
    }

    /// # Zero every thread local copy
    /// * the copies (and their threads' association) are kept
    pub fn reset(&mut self)
    {
        self.local
            .iter_mut()
            .for_each(|hist| hist.get_mut().reset());
    }

    /// # Iterate over the thread local copies
    /// * in no particular order
    pub fn local_histograms(&mut self) -> impl Iterator<Item = &Histogram<V>>
    {
        self.local
            .iter_mut()
            .map(|hist| &*hist.get_mut())
    }

    /// Number of threads which own a copy
    pub fn thread_count(&mut self) -> usize
    {
        self.local.iter_mut().count()
    }
}

impl<V> ThreadLocalHistogram<V>
where V: BinValue + One
{
    /// # `local[index] += 1` on the copy of the calling thread
    /// * see [`increment_by`](Self::increment_by)
    #[inline]
    pub fn increment(&self, index: usize)
    {
        self.increment_by(index, V::one())
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use rayon::prelude::*;

    fn pool(threads: usize) -> rayon::ThreadPool
    {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    #[test]
    fn copies_are_created_lazily()
    {
        let hist = Histogram::<u32>::new(vec![AxisF64::new(3, 0.0, 3.0).unwrap()]).unwrap();
        let mut local = ThreadLocalHistogram::new(&hist);
        assert_eq!(local.thread_count(), 0);

        local.increment(2);
        local.increment(2);
        assert_eq!(local.thread_count(), 1);
        let copies: Vec<_> = local.local_histograms().collect();
        assert_eq!(copies[0].values(), &[0, 0, 2]);
    }

    #[test]
    fn reset_zeros_all_copies()
    {
        let hist = Histogram::<f64>::new(vec![AxisF64::new(4, 0.0, 1.0).unwrap()]).unwrap();
        let mut local = ThreadLocalHistogram::new(&hist);
        pool(4).install(
            || (0..400).into_par_iter().for_each(|i| local.increment_by(i % 4, 0.5))
        );
        local.reset();
        assert!(
            local.local_histograms()
                .all(|h| h.values().iter().all(|v| *v == 0.0))
        );
        assert_eq!(local.prototype().bin_count(), 4);
    }

    #[test]
    fn parallel_counts_are_exact()
    {
        let mut hist = Histogram::<u32>::new(vec![AxisF64::new(7, 0.0, 7.0).unwrap()]).unwrap();
        for threads in [1, 2, 4] {
            let mut local = ThreadLocalHistogram::new(&hist);
            pool(threads).install(
                || (0..7000).into_par_iter().for_each(|i| local.increment(i % 7))
            );
            assert!(local.thread_count() <= threads);
            hist.reduce_over_threads(&mut local);
            assert!(hist.values().iter().all(|&c| c == 1000), "threads={}", threads);
        }
    }
}
