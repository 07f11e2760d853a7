//? mpirun -n {{NPROCESSES}}
use mpi::traits::{Communicator, CommunicatorCollectives};
use shardsort::samplesort;

fn main() {
    let universe = mpi::initialize().unwrap();
    let comm = universe.world();
    let rank = comm.rank();
    let size = comm.size() as usize;

    // Every element carries the same value, so all global splitters are equal and
    // some receive buckets stay empty. The sort must still preserve every element
    // and every shard size.
    let v = 42i32;
    let n = 500 + 50 * (rank as usize);
    let mut arr = vec![v; n];

    samplesort(&mut arr, &comm).unwrap();

    assert_eq!(arr.len(), n);
    assert!(arr.iter().all(|&x| x == v));

    let mut counts = vec![0u64; size];
    comm.all_gather_into(&(arr.len() as u64), &mut counts[..]);

    let expected: u64 = (0..size).map(|r| 500 + 50 * r as u64).sum();
    assert_eq!(counts.iter().sum::<u64>(), expected);

    if rank == 0 {
        println!("...test_equal_elements passed")
    }
}
