pub mod common_io; // gzip-aware line IO
pub mod dmatrix_util; // nalgebra bridging
pub mod ndarray_io;
pub mod ndarray_util; // layout and triangle helpers
pub mod traits;
