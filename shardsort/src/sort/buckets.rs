//! Bucket partitioning and the all-to-all bucket exchange.
//!
//! The P−1 global splitters define P half-open partitions of the value space,
//! partition i = [splitter\[i−1\], splitter\[i\]) with the boundary partitions
//! open-ended. Each rank counts how many of its sorted elements fall in each
//! partition and ships partition i to rank i, so that afterwards rank i holds the
//! complete (unsorted) contents of bucket i.
use std::cmp::Ordering;

use log::trace;
use mpi::{
    datatype::{Partition, PartitionMut},
    topology::SimpleCommunicator,
    traits::{Communicator, CommunicatorCollectives, Equivalence},
    Count,
};
use superslice::Ext;

use crate::helpers::exclusive_sum;

/// Per-partition element counts for a sorted shard.
///
/// Each splitter is located by binary search over the remaining suffix of the shard,
/// an O(len + P log len) scan. Returns `splitters.len() + 1` counts summing to
/// `sorted.len()`. Repeated splitter values produce zero-size partitions.
pub fn partition_counts<T, F>(sorted: &[T], splitters: &[T], comp: &F) -> Vec<Count>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut counts = Vec::with_capacity(splitters.len() + 1);

    let mut start = 0;
    for splitter in splitters {
        let offset = sorted[start..].lower_bound_by(|x| comp(x, splitter));
        counts.push(offset as Count);
        start += offset;
    }
    counts.push((sorted.len() - start) as Count);

    counts
}

/// Exchange buckets so that this rank receives all elements of its own partition.
///
/// `counts_snd` must be the [`partition_counts`] of `sorted`, whose partitions are
/// laid out contiguously because the shard is sorted. Collective; returns the
/// received bucket, a permutation slice of the global data whose size generally
/// differs from the local shard size.
pub fn exchange_buckets<T>(
    sorted: &[T],
    counts_snd: Vec<Count>,
    comm: &SimpleCommunicator,
) -> Vec<T>
where
    T: Equivalence + Default + Clone,
{
    let size = comm.size() as usize;

    // Bucket sizes first, so each rank can size its receive buffer.
    let mut counts_recv = vec![0 as Count; size];
    comm.all_to_all_into(&counts_snd[..], &mut counts_recv[..]);

    let displs_snd = exclusive_sum(&counts_snd);
    let displs_recv = exclusive_sum(&counts_recv);

    let total = counts_recv.iter().sum::<Count>();
    trace!("exchanging buckets: sending {}, receiving {}", sorted.len(), total);

    let mut bucket = vec![T::default(); total as usize];
    let partition_snd = Partition::new(sorted, counts_snd, &displs_snd[..]);
    let mut partition_recv = PartitionMut::new(&mut bucket[..], counts_recv, &displs_recv[..]);

    comm.all_to_all_varcount_into(&partition_snd, &mut partition_recv);

    bucket
}
