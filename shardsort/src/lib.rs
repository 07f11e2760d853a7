//! # Shardsort
//!
//! A distributed sample sort \[1\] over MPI process groups. Each process owns one
//! contiguous shard of an unsorted dataset; after the sort every process owns the
//! slice of the globally sorted sequence matching its original shard length, written
//! back into the same storage. No process ever materializes the full dataset.
//!
//! The algorithm runs five phases in lockstep on every rank: a local sort, splitter
//! selection by regular sampling, an all-to-all bucket exchange, a local sort of the
//! received bucket, and a redistribution that restores the original per-rank shard
//! sizes.
//!
//! All collective communication goes through the `mpi` crate; element types describe
//! their wire layout via the [`Equivalence`](mpi::traits::Equivalence) trait.
//!
//! ## References
//! \[1\] Shi, H., & Schaeffer, J. (1992). Parallel sorting by regular sampling. Journal of Parallel and Distributed Computing, 14(4), 361-372.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod helpers;
pub mod sort;
pub mod types;

// Public API
#[doc(inline)]
pub use sort::samplesort::{samplesort, samplesort_by};
#[doc(inline)]
pub use types::{Error, Result};
