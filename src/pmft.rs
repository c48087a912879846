//! Potentials of mean force and torque.
//!
//! A PMFT is a bond histogram in the local frame of the query points. It shows
//! where neighbors are found relative to the position and orientation of a
//! particle, which reveals directional interactions.
//!
//! ```
//! use paircorr::{compute::*, locality::*, pmft::*};
//!
//! let sim_box = SimulationBox::square(10.0).unwrap();
//! let query = BruteForceQuery::new(sim_box, vec![[1.5, 0.5, 0.0]]);
//!
//! let mut pmft = PmftXY::new(3.0, 3.0, 6, 6).unwrap();
//! let args = QueryArgs::ball(pmft.r_max());
//! pmft.accumulate(&query, &[0.0], &[[0.0; 3]], args).unwrap();
//!
//! let pmf = pmft.pmf();
//! assert!(pmf[4 * 6 + 3].is_finite());
//! assert_eq!(pmf[0], f64::INFINITY);
//! ```
mod pmft_xy;

pub use pmft_xy::*;
