//? mpirun -n {{NPROCESSES}}
use mpi::{
    topology::SimpleCommunicator,
    traits::{Communicator, CommunicatorCollectives, Destination, Equivalence, Source},
};
use rand::prelude::{Rng, SeedableRng, StdRng};
use shardsort::samplesort;

/// Check that the distributed array is globally sorted: each rank's portion is
/// locally sorted and does not overlap the next rank's portion.
fn test_sorted<T: Equivalence + Ord + Default + Copy>(
    sorted_arr: &[T],
    comm: &SimpleCommunicator,
    label: &str,
) {
    let rank = comm.rank();
    let size = comm.size();

    let min = *sorted_arr.iter().min().unwrap();
    let max = *sorted_arr.iter().max().unwrap();

    // Send min to the previous rank, which compares it against its max.
    if rank > 0 {
        comm.process_at_rank(rank - 1).send(&min);
    }

    if rank < size - 1 {
        let mut partner_min = T::default();
        comm.process_at_rank(rank + 1).receive_into(&mut partner_min);
        assert!(max <= partner_min);
    }

    for i in 0..(sorted_arr.len() - 1) {
        assert!(sorted_arr[i] <= sorted_arr[i + 1]);
    }

    if rank == 0 {
        println!("...test_{} passed", label)
    }
}

/// Check that the global element count is unchanged by the sort.
fn test_count(expected: u64, found: u64, comm: &SimpleCommunicator, label: &str) {
    let size = comm.size() as usize;
    let mut counts = vec![0u64; size];
    comm.all_gather_into(&found, &mut counts[..]);

    let mut expected_counts = vec![0u64; size];
    comm.all_gather_into(&expected, &mut expected_counts[..]);

    assert_eq!(
        counts.iter().sum::<u64>(),
        expected_counts.iter().sum::<u64>()
    );

    if comm.rank() == 0 {
        println!("...test_{} passed", label)
    }
}

fn main() {
    let universe = mpi::initialize().unwrap();
    let comm = universe.world();
    let rank = comm.rank();

    // Uneven shard sizes, seeded per rank, with duplicates.
    let mut rng = StdRng::seed_from_u64(rank as u64);
    let n = 1000 + 100 * (rank as usize);
    let mut arr: Vec<i32> = (0..n).map(|_| rng.gen_range(0..=10000)).collect();

    samplesort(&mut arr, &comm).unwrap();

    // Shape preservation: the shard length is part of the contract.
    assert_eq!(arr.len(), n);

    test_sorted(&arr, &comm, "samplesort_global_order");
    test_count(n as u64, arr.len() as u64, &comm, "samplesort_count");
}
