//! Entry points for the distributed sample sort.
use std::cmp::Ordering;

use log::debug;
use mpi::{
    topology::SimpleCommunicator,
    traits::{Communicator, CommunicatorCollectives, Equivalence},
    Count, Rank,
};

use crate::{
    sort::{
        buckets::{exchange_buckets, partition_counts},
        redistribute::redistribute,
        splitters::gather_splitters,
    },
    types::{Error, Result},
};

/// The rank that gathers and sorts the splitter samples. A convention, not a
/// durable role; it is a plain parameter of the splitter phase.
const SPLITTER_ROOT: Rank = 0;

/// Sort a dataset distributed as one shard per rank, in place.
///
/// Equivalent to [`samplesort_by`] with the element type's natural order.
pub fn samplesort<T>(array: &mut [T], comm: &SimpleCommunicator) -> Result<()>
where
    T: Equivalence + Ord + Default + Clone,
{
    samplesort_by(array, comm, |a: &T, b: &T| a.cmp(b))
}

/// Sort a dataset distributed as one shard per rank, in place, with a caller-supplied
/// comparator.
///
/// Every rank contributes `array`, its contiguous shard of the unsorted data; when
/// the call returns `Ok`, the concatenation of the shards in rank order is the input
/// multiset sorted under `comp`, and each shard has its original length. Collective:
/// all ranks of `comm` must call with the same comparator behavior, or the result is
/// unspecified. A failed collective aborts the process group; there is no recovery
/// path for a crashed or unresponsive peer.
///
/// With a single-rank communicator this reduces to a local in-place sort.
///
/// # Errors
/// - [`Error::EmptyShard`] if any rank contributes a zero-length shard.
/// - [`Error::CountOverflow`] if the global element count exceeds the 32-bit counts
///   of the underlying collective exchanges.
///
/// Both are detected from globally gathered shard sizes before any data moves, and
/// are returned on every rank.
pub fn samplesort_by<T, F>(array: &mut [T], comm: &SimpleCommunicator, comp: F) -> Result<()>
where
    T: Equivalence + Default + Clone,
    F: Fn(&T, &T) -> Ordering,
{
    // Local sort. With one rank this is already the final answer.
    array.sort_by(|a, b| comp(a, b));

    if comm.size() < 2 {
        return Ok(());
    }

    preflight(array.len(), comm)?;

    let splitters = gather_splitters(array, comm, SPLITTER_ROOT, &comp);

    let counts_snd = partition_counts(array, &splitters, &comp);
    let mut bucket = exchange_buckets(array, counts_snd, comm);

    bucket.sort_by(|a, b| comp(a, b));

    redistribute(array, &bucket, comm);

    Ok(())
}

/// Check the gathered shard sizes before the first data exchange, so every rank
/// agrees on whether to proceed.
fn preflight(len: usize, comm: &SimpleCommunicator) -> Result<()> {
    let size = comm.size() as usize;

    let mut all_lens = vec![0u64; size];
    comm.all_gather_into(&(len as u64), &mut all_lens[..]);

    if let Some(rank) = all_lens.iter().position(|&l| l == 0) {
        return Err(Error::EmptyShard { rank });
    }

    let total = all_lens.iter().sum::<u64>();
    if total > Count::MAX as u64 {
        return Err(Error::CountOverflow(total));
    }

    debug!("sorting {} elements over {} ranks", total, size);

    Ok(())
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use mpi::Count;
    use rand::prelude::{Rng, SeedableRng, StdRng};

    use crate::{
        helpers::exclusive_sum,
        sort::{
            buckets::partition_counts,
            redistribute::transfer_counts,
            splitters::{sample_positions, select_splitters},
        },
    };

    /// Drive the per-rank arithmetic of every phase without a communicator,
    /// standing in for the collective exchanges with local slicing.
    fn simulate(shards: &mut [Vec<i32>]) {
        let p = shards.len();

        for shard in shards.iter_mut() {
            shard.sort();
        }
        if p < 2 {
            return;
        }

        // Splitter selection: gather, sort, select.
        let mut all_samples = Vec::new();
        for shard in shards.iter() {
            for i in sample_positions(shard.len(), p) {
                all_samples.push(shard[i]);
            }
        }
        all_samples.sort();
        let splitters = select_splitters(&all_samples, p);

        // Bucket exchange: rank j's bucket is the union of every rank's j-th slice.
        let comp = |a: &i32, b: &i32| a.cmp(b);
        let counts = shards
            .iter()
            .map(|shard| partition_counts(shard, &splitters, &comp))
            .collect_vec();

        let mut buckets: Vec<Vec<i32>> = vec![Vec::new(); p];
        for (shard, counts_snd) in shards.iter().zip(counts.iter()) {
            let displs_snd = exclusive_sum(counts_snd);
            for j in 0..p {
                let (d, c) = (displs_snd[j] as usize, counts_snd[j] as usize);
                buckets[j].extend_from_slice(&shard[d..d + c]);
            }
        }

        for bucket in buckets.iter_mut() {
            bucket.sort();
        }

        // Redistribution back into the original shard sizes.
        let all_sizes = (0..p)
            .flat_map(|i| [shards[i].len() as Count, buckets[i].len() as Count])
            .collect_vec();

        let mut finals: Vec<Vec<i32>> = Vec::with_capacity(p);
        for i in 0..p {
            let (_, counts_recv) = transfer_counts(&all_sizes, i);
            let mut shard = Vec::with_capacity(shards[i].len());
            for j in 0..p {
                let (counts_snd_j, _) = transfer_counts(&all_sizes, j);
                assert_eq!(counts_snd_j[i], counts_recv[j]);
                let displs_snd_j = exclusive_sum(&counts_snd_j);
                let (d, c) = (displs_snd_j[i] as usize, counts_snd_j[i] as usize);
                shard.extend_from_slice(&buckets[j][d..d + c]);
            }
            finals.push(shard);
        }

        for (shard, sorted) in shards.iter_mut().zip(finals) {
            *shard = sorted;
        }
    }

    fn check_globally_sorted(shards: &[Vec<i32>], original_sizes: &[usize], reference: &[i32]) {
        for (shard, &len) in shards.iter().zip(original_sizes) {
            assert_eq!(shard.len(), len);
        }
        let flat = shards.iter().flatten().copied().collect_vec();
        assert_eq!(flat, reference);
    }

    #[test]
    fn test_four_rank_scenario() {
        let mut shards = vec![vec![5, 1, 9], vec![2, 8], vec![7, 3, 6, 4], vec![0]];
        simulate(&mut shards);
        check_globally_sorted(&shards, &[3, 2, 4, 1], &(0..10).collect_vec());
    }

    #[test]
    fn test_single_rank_identity() {
        let mut shards = vec![vec![3, 1, 2]];
        simulate(&mut shards);
        assert_eq!(shards[0], vec![1, 2, 3]);
    }

    #[test]
    fn test_all_equal_elements() {
        // Degenerate splitters leave some buckets empty, but no element is lost.
        let mut shards = vec![vec![7; 5], vec![7; 3], vec![7; 6]];
        simulate(&mut shards);
        check_globally_sorted(&shards, &[5, 3, 6], &vec![7; 14]);
    }

    #[test]
    fn test_idempotent_on_sorted_input() {
        let mut shards = vec![vec![0, 1, 2, 3], vec![4, 5], vec![6, 7, 8]];
        let before = shards.clone();
        simulate(&mut shards);
        assert_eq!(shards, before);
    }

    #[test]
    fn test_random_shards_match_flat_sort() {
        let mut rng = StdRng::seed_from_u64(0);
        let sizes = [17, 5, 31, 12, 23];
        let mut shards = sizes
            .iter()
            .map(|&n| (0..n).map(|_| rng.gen_range(-1000..1000)).collect_vec())
            .collect_vec();

        let mut reference = shards.iter().flatten().copied().collect_vec();
        reference.sort();

        simulate(&mut shards);
        check_globally_sorted(&shards, &sizes, &reference);
    }

    #[test]
    fn test_random_shards_with_duplicates() {
        let mut rng = StdRng::seed_from_u64(42);
        let sizes = [40, 40, 40, 40];
        let mut shards = sizes
            .iter()
            .map(|&n| (0..n).map(|_| rng.gen_range(0..10)).collect_vec())
            .collect_vec();

        let mut reference = shards.iter().flatten().copied().collect_vec();
        reference.sort();

        simulate(&mut shards);
        check_globally_sorted(&shards, &sizes, &reference);
    }

    #[test]
    fn test_deterministic() {
        let build = || vec![vec![9, 2, 5, 5], vec![1, 1, 8], vec![0, 4, 6, 3, 7]];
        let mut a = build();
        let mut b = build();
        simulate(&mut a);
        simulate(&mut b);
        assert_eq!(a, b);
    }
}
