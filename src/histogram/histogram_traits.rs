use std::ops::AddAssign;
use num_traits::Zero;

#[cfg(feature = "serde_support")]
use serde::{Serialize, Deserialize};

/// # Value stored in a histogram cell
/// * the natural monoid of the cell type: `zero()` is the identity and `+=` combines
/// * addition has to be commutative and associative, since thread local partial
///   histograms are folded in an unspecified order
/// * automatically implemented, e.g., for `u32`, `u64`, `usize`, `f64` and `Complex<f64>`
pub trait BinValue: Copy + Zero + AddAssign + Send + Sync {}

impl<V> BinValue for V
where V: Copy + Zero + AddAssign + Send + Sync {}

/// Possible Errors of histograms and axes
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum HistErrors{
    /// A histogram without any bins does not make sense!
    #[error("an axis needs at least one bin")]
    NoBins,

    /// Nothing can hit the bin! (left >= right?)
    #[error("lower border has to be smaller than upper border")]
    IntervalWidthZero,

    /// Could be NAN, INFINITY or similar
    #[error("invalid value, borders have to be finite")]
    InvalidVal,

    /// A histogram needs at least one axis
    #[error("a histogram needs at least one axis")]
    NoAxes,

    /// Coordinates do not correspond to any bin
    #[error("value outside of histogram")]
    OutsideHist,

    /// Number of coordinates does not match the number of axes
    #[error("number of coordinates does not match number of axes")]
    DimensionMismatch,
}
