use{
    crate::compute::ComputeError,
    rayon::prelude::*,
};

/// # Whether bonds may be processed in parallel
/// * `Parallel` uses rayon parallel iterators on the current pool,
///   i.e., the global pool or the pool installed by [run_with_threads]
/// * `Sequential` processes everything on the calling thread
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism{
    /// everything on the calling thread
    Sequential,
    /// rayon parallel iterators
    #[default]
    Parallel,
}

impl Parallelism
{
    /// # Create from a thread count
    /// * `0`: parallel, unless the current rayon pool only has one thread
    /// * `1`: sequential
    /// * more: parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self
    {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// `true` for `Parallel`
    #[inline]
    pub fn is_parallel(self) -> bool
    {
        matches!(self, Parallelism::Parallel)
    }

    /// # `for_each`, in parallel if allowed
    #[inline]
    pub fn maybe_par_for_each<T, I, F>(self, iter: I, f: F)
    where
        T: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().for_each(f);
        } else {
            iter.into_iter().for_each(f);
        }
    }
}

/// # Run `f` with the requested number of threads
/// * `0`: all available cores
/// * `1`: sequential, no thread pool is created
/// * `n > 1`: a dedicated rayon pool with exactly `n` threads
///
/// `f` gets the [Parallelism] it should hand on to the computations.
/// ## Example
/// ```
/// use paircorr::compute::*;
///
/// let threads = run_with_threads(2, |_| rayon::current_num_threads()).unwrap();
/// assert_eq!(threads, 2);
/// ```
pub fn run_with_threads<T, F>(n_threads: usize, f: F) -> Result<T, ComputeError>
where
    T: Send,
    F: FnOnce(Parallelism) -> T + Send,
{
    match Parallelism::from_threads(n_threads) {
        Parallelism::Sequential => Ok(f(Parallelism::Sequential)),
        Parallelism::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()
                .map_err(|e| ComputeError::ThreadPool(e.to_string()))?;
            Ok(pool.install(|| f(Parallelism::Parallel)))
        }
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn thread_count_semantics()
    {
        assert_eq!(Parallelism::from_threads(1), Parallelism::Sequential);
        assert_eq!(Parallelism::from_threads(4), Parallelism::Parallel);
        assert_eq!(Parallelism::default(), Parallelism::Parallel);

        let p = run_with_threads(1, |p| p).unwrap();
        assert_eq!(p, Parallelism::Sequential);
        let threads = run_with_threads(3, |_| rayon::current_num_threads()).unwrap();
        assert_eq!(threads, 3);
    }

    #[test]
    fn both_modes_visit_everything()
    {
        for p in [Parallelism::Sequential, Parallelism::Parallel] {
            let sum = AtomicUsize::new(0);
            p.maybe_par_for_each(0..100usize, |i| { sum.fetch_add(i, Ordering::Relaxed); });
            assert_eq!(sum.into_inner(), 4950);
        }
    }
}
