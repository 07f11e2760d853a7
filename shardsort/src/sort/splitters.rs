//! Splitter selection by regular sampling.
//!
//! Every rank contributes P−1 evenly spaced elements of its sorted shard as quantile
//! estimates. A coordinator rank gathers the P·(P−1) samples, sorts them, keeps every
//! P-th element as a global splitter, and broadcasts the result. The P−1 splitters
//! partition the value space into P ordered ranges, one per rank.
use std::cmp::Ordering;

use itertools::Itertools;
use log::debug;
use mpi::{
    topology::SimpleCommunicator,
    traits::{Communicator, Equivalence, Root},
    Rank,
};

/// Regular-sampling indices into a sorted shard of length `len`, cut into `n_parts`
/// segments of near-equal length. Returns the index of the last element of each of
/// the first `n_parts - 1` segments.
///
/// The `len % n_parts` leftover elements are distributed one per segment to the
/// earliest segments, so all indices stay in bounds. Shards shorter than
/// `n_parts - 1` yield repeated indices, which weakens the quantile estimate but
/// remains valid; only `len == 0` is unsupported and must be rejected by the caller.
pub fn sample_positions(len: usize, n_parts: usize) -> Vec<usize> {
    let n_samples = n_parts - 1;
    let jump = len / n_parts;
    let leftover = len % n_parts;

    let mut positions = Vec::with_capacity(n_samples);
    let mut pos = 0;
    for i in 0..n_samples {
        pos += jump + usize::from(i < leftover);
        debug_assert!(pos >= 1 && pos <= len);
        positions.push(pos - 1);
    }

    positions
}

/// Select the global splitters from the sorted array of all gathered samples: every
/// `n_parts`-th element, at positions P−1, 2P−1, …, taking P−1 of them.
pub fn select_splitters<T: Clone>(sorted_samples: &[T], n_parts: usize) -> Vec<T> {
    debug_assert_eq!(sorted_samples.len(), n_parts * (n_parts - 1));
    (1..n_parts)
        .map(|i| sorted_samples[i * n_parts - 1].clone())
        .collect_vec()
}

/// Agree on P−1 global splitters across the group.
///
/// The coordinator role is transient: `root_rank` gathers and sorts the samples for
/// this call only and holds no state afterwards. Collective; every rank must call
/// with the same `root_rank` and a consistent comparator. Returns the identical
/// splitter vector on every rank, non-decreasing under `comp`.
pub fn gather_splitters<T, F>(
    sorted: &[T],
    comm: &SimpleCommunicator,
    root_rank: Rank,
    comp: &F,
) -> Vec<T>
where
    T: Equivalence + Default + Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let size = comm.size() as usize;
    let n_samples = size - 1;

    let local_samples = sample_positions(sorted.len(), size)
        .into_iter()
        .map(|i| sorted[i].clone())
        .collect_vec();

    let root_process = comm.process_at_rank(root_rank);
    let mut splitters = vec![T::default(); n_samples];

    if comm.rank() == root_rank {
        let mut all_samples = vec![T::default(); size * n_samples];
        root_process.gather_into_root(&local_samples[..], &mut all_samples[..]);

        all_samples.sort_by(|a, b| comp(a, b));
        splitters = select_splitters(&all_samples, size);
        debug!("selected {} splitters from {} samples", n_samples, all_samples.len());
    } else {
        root_process.gather_into(&local_samples[..]);
    }

    root_process.broadcast_into(&mut splitters[..]);

    splitters
}
