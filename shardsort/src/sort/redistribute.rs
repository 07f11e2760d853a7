//! Redistribution of the sorted buckets back into the original shard sizes.
//!
//! After the bucket sort the global order is the concatenation of buckets in rank
//! order, but bucket sizes rarely match the original shard sizes. Both layouts
//! partition the same global index space [0, N): prefix sums of the original shard
//! sizes give each rank an "original" interval, prefix sums of the bucket sizes a
//! "bucket" interval. The overlap of this rank's bucket interval with rank j's
//! original interval is exactly the number of elements to send to j, and
//! symmetrically for receives, so a single variable all-to-all restores the original
//! layout.
use log::trace;
use mpi::{
    datatype::{Partition, PartitionMut},
    topology::SimpleCommunicator,
    traits::{Communicator, CommunicatorCollectives, Equivalence},
    Count,
};

use crate::helpers::{exclusive_sum, interval_overlap};

/// Per-rank send and receive counts for the redistribution exchange.
///
/// `all_sizes` is the rank-ordered flattening of (original shard size, bucket size)
/// pairs, as gathered by [`redistribute`]; `rank` selects whose counts to compute.
pub fn transfer_counts(all_sizes: &[Count], rank: usize) -> (Vec<Count>, Vec<Count>) {
    let size = all_sizes.len() / 2;

    let my_orig_begin: Count = (0..rank).map(|i| all_sizes[2 * i]).sum();
    let my_bucket_begin: Count = (0..rank).map(|i| all_sizes[2 * i + 1]).sum();
    let my_orig_end = my_orig_begin + all_sizes[2 * rank];
    let my_bucket_end = my_bucket_begin + all_sizes[2 * rank + 1];

    let mut counts_snd = Vec::with_capacity(size);
    let mut counts_recv = Vec::with_capacity(size);

    let mut orig_begin = 0;
    let mut bucket_begin = 0;
    for i in 0..size {
        let orig_end = orig_begin + all_sizes[2 * i];
        counts_snd.push(interval_overlap(
            orig_begin,
            orig_end,
            my_bucket_begin,
            my_bucket_end,
        ));
        orig_begin = orig_end;

        let bucket_end = bucket_begin + all_sizes[2 * i + 1];
        counts_recv.push(interval_overlap(
            bucket_begin,
            bucket_end,
            my_orig_begin,
            my_orig_end,
        ));
        bucket_begin = bucket_end;
    }

    debug_assert_eq!(counts_snd.iter().sum::<Count>(), all_sizes[2 * rank + 1]);
    debug_assert_eq!(counts_recv.iter().sum::<Count>(), all_sizes[2 * rank]);

    (counts_snd, counts_recv)
}

/// Reshape the sorted buckets into the original shard sizes, writing the result
/// directly into `array`, the original shard storage.
///
/// Collective; after it returns, the concatenation of `array` over all ranks in rank
/// order is the globally sorted sequence, and every rank holds exactly as many
/// elements as it started with.
pub fn redistribute<T>(array: &mut [T], bucket: &[T], comm: &SimpleCommunicator)
where
    T: Equivalence + Default + Clone,
{
    let size = comm.size() as usize;
    let rank = comm.rank() as usize;

    let local_sizes = [array.len() as Count, bucket.len() as Count];
    let mut all_sizes = vec![0 as Count; 2 * size];
    comm.all_gather_into(&local_sizes[..], &mut all_sizes[..]);

    let (counts_snd, counts_recv) = transfer_counts(&all_sizes, rank);
    let displs_snd = exclusive_sum(&counts_snd);
    let displs_recv = exclusive_sum(&counts_recv);

    trace!("redistributing {} bucket elements into a shard of {}", bucket.len(), array.len());

    let partition_snd = Partition::new(bucket, counts_snd, &displs_snd[..]);
    let mut partition_recv = PartitionMut::new(array, counts_recv, &displs_recv[..]);

    comm.all_to_all_varcount_into(&partition_snd, &mut partition_recv);
}
