//! Radial statistics of values attached to points.
//!
//! [CorrelationFunction] measures how the values of points correlate with the
//! values of query points as a function of their separation. Values can be real
//! ([RealCorrelationFunction]) or complex ([ComplexCorrelationFunction]), e.g. for
//! bond orientational order parameters.
mod correlation_function;

pub use correlation_function::*;
