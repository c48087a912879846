//! # Pair statistics of particle systems
//! * bond histograms filled lock free from many threads and reduced lazily on read
//! * [radial correlation functions](density::CorrelationFunction) of real or complex values
//! * [potentials of mean force and torque](pmft::PmftXY) in two dimensions
//!
//! Bonds between query points and points come either from a precomputed
//! [NeighborList] or from a [NeighborQuery], see [locality].
//!
//! ## Example
//! ```
//! use paircorr::*;
//!
//! let sim_box = SimulationBox::cube(10.0).unwrap();
//! let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [-1.5, 0.0, 0.0]];
//! let values = vec![1.0, 2.0, 3.0];
//! let query = BruteForceQuery::new(sim_box, points.clone());
//!
//! let mut cf = RealCorrelationFunction::new(2.0, 0.5).unwrap();
//! cf.accumulate(&query, &values, &points, &values, QueryArgs::ball(2.0).exclude_ii(true))
//!     .unwrap();
//!
//! // bonds at distance 1.0 (0-1) and 1.5 (0-2), both directions
//! assert_eq!(cf.bin_counts(), &[0, 0, 2, 2]);
//! assert_eq!(cf.correlation(), &[0.0, 0.0, 2.0, 3.0]);
//! ```
//!
//! ## Logging
//! Messages are emitted through the [log](https://docs.rs/log) facade,
//! `debug` for construction and reductions, `trace` for every accumulated frame.
//! Install any logger to see them.
#![deny(missing_docs)]

pub mod histogram;
pub mod locality;
pub mod compute;
pub mod density;
pub mod pmft;

pub use histogram::*;
pub use locality::*;
pub use compute::*;
pub use density::*;
pub use pmft::*;
