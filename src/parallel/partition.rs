use std::ops::Range;

/// Splits `total` samples among `num_workers` and returns the block for `worker_id`.
///
/// Properties:
/// - Ranges are contiguous, disjoint and cover `[0..total)`.
/// - Sizes differ by at most 1, the first `total % num_workers` blocks get the extra sample.
/// - Blocks past `total` are empty (`total..total`) when there are more workers than samples.
pub fn shard_range(total: usize, worker_id: usize, num_workers: usize) -> Range<usize> {
    assert!(num_workers > 0);
    assert!(worker_id < num_workers);

    let base = total / num_workers;
    let rem = total % num_workers;

    let start = worker_id * base + worker_id.min(rem);
    let extra = if worker_id < rem { 1 } else { 0 };
    let end = start + base + extra;

    start..end
}

/// Splits `[0..total)` into `num_workers` blocks, one per worker in worker id order.
///
/// # Panics
/// If `num_workers` is zero.
pub fn partition(total: usize, num_workers: usize) -> Vec<Range<usize>> {
    assert!(num_workers > 0, "at least one worker is required");

    (0..num_workers)
        .map(|worker_id| shard_range(total, worker_id, num_workers))
        .collect()
}
