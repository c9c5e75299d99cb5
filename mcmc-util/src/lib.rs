pub mod chain; // draws of a single chain
pub mod draws; // named element draws and warm starts
#[cfg(unix)]
pub mod quiet;
pub mod traits;

pub use chain::{last_samples, McmcChain};
pub use draws::{element_name, NamedDraws};
#[cfg(unix)]
pub use quiet::SuppressOutput;
