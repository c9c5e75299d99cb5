//! Moment and natural parameters of multivariate normal distributions,
//! as passed around by distributed Expectation Propagation.

/// Dense Cholesky factorization, solve and inverse on the upper triangle
pub mod cholesky;

/// Error taxonomy of the linear algebra routines
pub mod errors;

/// Owned moment and natural parameter pairs
pub mod gaussian;

/// Writing posterior summaries
pub mod io;

/// EP global approximation accumulating site statistics
pub mod ndarray_normal;

/// Switching between moment and natural parameters
pub mod normal;

/// Priors of the experiment models
pub mod prior;

pub mod traits;

pub use errors::{LinalgError, LinalgResult};
pub use gaussian::{MomentParams, NaturalParams};
pub use normal::{invert_normal_params, inverted_normal_params, Placed, Placement};
