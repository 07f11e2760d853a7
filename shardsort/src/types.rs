//! General type definitions

/// Errors surfaced by the distributed sort.
///
/// Precondition failures are detected from globally gathered shard sizes before the
/// first data exchange, so every rank in the group returns the same error and no rank
/// is left blocking in a collective its peers abandoned. Failures of the collective
/// operations themselves are handled by the MPI runtime and abort the process group.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A rank holds a zero-length shard, which the splitter sampling step cannot handle.
    #[error("rank {rank} holds an empty shard; every rank must contribute at least one element")]
    EmptyShard {
        /// The lowest rank holding an empty shard.
        rank: usize,
    },

    /// The global element count does not fit the 32-bit counts used by the collective
    /// exchanges, which would silently corrupt displacements.
    #[error("global element count {0} exceeds the 32-bit count limit of the collective exchanges")]
    CountOverflow(u64),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
