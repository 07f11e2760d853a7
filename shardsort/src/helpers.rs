//! Prefix-sum and interval arithmetic shared by the exchange phases.
use itertools::Itertools;
use mpi::Count;

/// Exclusive prefix sum of per-rank counts, giving the displacement of each rank's
/// block in a packed exchange buffer.
pub fn exclusive_sum(counts: &[Count]) -> Vec<Count> {
    counts
        .iter()
        .scan(0, |acc, &x| {
            let tmp = *acc;
            *acc += x;
            Some(tmp)
        })
        .collect_vec()
}

/// Length of the intersection of the half-open intervals [l1, r1) and [l2, r2).
pub fn interval_overlap(l1: Count, r1: Count, l2: Count, r2: Count) -> Count {
    // Order the intervals by lower bound so only three cases remain.
    let (l1, r1, l2, r2) = if l2 < l1 {
        (l2, r2, l1, r1)
    } else {
        (l1, r1, l2, r2)
    };

    if r1 <= l2 {
        0
    } else if r1 >= r2 {
        r2 - l2
    } else {
        r1 - l2
    }
}
