//! Points, boxes and the bonds between points.
//!
//! The statistics of this crate are computed from bonds, i.e., pairs of a query
//! point and a point together with their separation. Bonds come either from a
//! precomputed [NeighborList] or from a [NeighborQuery] run with [QueryArgs].
//!
//! ```
//! use paircorr::locality::*;
//!
//! let sim_box = SimulationBox::square(10.0).unwrap();
//! let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [9.5, 0.0, 0.0]];
//! let query = BruteForceQuery::new(sim_box, points.clone());
//!
//! let nlist = query.query_all(&points, &QueryArgs::ball(1.1).exclude_ii(true))
//!     .unwrap();
//! // 0-1 and 0-2 (through the periodic boundary), in both directions
//! assert_eq!(nlist.len(), 4);
//! ```
mod neighbor_list;
mod query;
mod sim_box;

pub use neighbor_list::*;
pub use query::*;
pub use sim_box::*;
