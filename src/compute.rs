//! The accumulate/reduce lifecycle shared by all bond based statistics.
//!
//! A computation owns a [BondHistogramCompute] and implements [BondHistogram].
//! Accumulating (possibly many frames) fills thread local histograms from many
//! threads at once. Any accessor of reduced data folds these into the canonical
//! histograms first, but only if something was accumulated since the last fold.
//!
//! ```text
//! constructed ── accumulate ──> accumulating ── read ──> reduced
//!                                   ^                      │
//!                                   └──── accumulate ──────┘
//! ```
//! [reset](BondHistogram::reset) clears all accumulated data but keeps the bin geometry.
mod bond_compute;
mod parallelism;

pub use bond_compute::*;
pub use parallelism::*;
