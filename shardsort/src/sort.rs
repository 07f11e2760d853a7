//! The phases of the distributed sample sort.
pub mod buckets;
pub mod redistribute;
pub mod samplesort;
pub mod splitters;

pub use samplesort::{samplesort, samplesort_by};
