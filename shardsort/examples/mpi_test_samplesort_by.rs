//? mpirun -n {{NPROCESSES}}
use mpi::traits::{Communicator, Destination, Source};
use rand::prelude::{Rng, SeedableRng, StdRng};
use shardsort::samplesort_by;

fn main() {
    let universe = mpi::initialize().unwrap();
    let comm = universe.world();
    let rank = comm.rank();
    let size = comm.size();

    let mut rng = StdRng::seed_from_u64(rank as u64);
    let n = 2000;
    let mut arr: Vec<u64> = (0..n).map(|_| rng.gen()).collect();

    // Descending order via a reversed comparator.
    samplesort_by(&mut arr, &comm, |a: &u64, b: &u64| b.cmp(a)).unwrap();

    assert_eq!(arr.len(), n);

    for i in 0..(arr.len() - 1) {
        assert!(arr[i] >= arr[i + 1]);
    }

    // The largest value of the next rank must not exceed this rank's smallest.
    let min = *arr.last().unwrap();
    if rank > 0 {
        comm.process_at_rank(rank - 1).send(arr.first().unwrap());
    }
    if rank < size - 1 {
        let mut partner_max = 0u64;
        comm.process_at_rank(rank + 1).receive_into(&mut partner_max);
        assert!(partner_max <= min);
    }

    if rank == 0 {
        println!("...test_samplesort_by_descending passed")
    }
}
