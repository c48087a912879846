//! Histograms with a regular bin grid, filled concurrently from many threads.
//!
//! # Building blocks
//! * [RegularAxis] maps a coordinate to a bin index
//! * [Histogram] is an N-dimensional grid of cells, one axis per dimension.
//!   Cells can be anything implementing [BinValue], e.g., `u32` for counts or
//!   `f64` and `Complex<f64>` for weighted sums
//! * [ThreadLocalHistogram] keeps one copy of a histogram per worker thread
//!
//! # Accumulate, then reduce
//! Worker threads only increment their own copy, so no locking is needed while
//! accumulating. Afterwards the copies are folded into one canonical histogram.
//! Since the fold is a plain sum, the result does not depend on how the work
//! was distributed between threads.
//!
//! ```
//! use paircorr::histogram::*;
//! use rayon::prelude::*;
//!
//! let axes = vec![AxisF64::new(2, 0.0, 2.0).unwrap()];
//! let mut counts = Histogram::<u32>::new(axes).unwrap();
//! let mut sums = Histogram::<f64>::with_geometry_of(&counts);
//! let mut local_counts = ThreadLocalHistogram::new(&counts);
//! let mut local_sums = ThreadLocalHistogram::new(&sums);
//!
//! let samples = [(0.5, 1.0), (0.7, 3.0), (1.5, 8.0)];
//! samples.par_iter()
//!     .for_each(
//!         |&(x, weight)|
//!         {
//!             let bin = counts.bin(&[x]);
//!             local_counts.increment(bin);
//!             local_sums.increment_by(bin, weight);
//!         }
//!     );
//!
//! counts.reduce_over_threads(&mut local_counts);
//! // mean per bin
//! sums.reduce_over_threads_per_bin(
//!     &mut local_sums,
//!     |index, sum| {
//!         let count = counts[index];
//!         if count != 0 {
//!             *sum /= f64::from(count);
//!         }
//!     }
//! );
//! assert_eq!(counts.values(), &[2, 1]);
//! assert_eq!(sums.values(), &[2.0, 8.0]);
//! ```

mod axis;
mod hist;
mod histogram_traits;
mod thread_local_hist;

pub use axis::*;
pub use hist::*;
pub use histogram_traits::*;
pub use thread_local_hist::*;
