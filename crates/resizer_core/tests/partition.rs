use resizer_core::{PartitionPolicy, FOUR_WORKERS_ABOVE, TWO_WORKERS_ABOVE};

#[test]
fn empty_batch_has_no_chunks() {
    assert!(PartitionPolicy::default().chunk_sizes(0).is_empty());
    assert!(PartitionPolicy::Even { workers: 8 }.chunk_sizes(0).is_empty());
}

#[test]
fn thresholds_select_one_two_or_four_chunks() {
    let policy = PartitionPolicy::default();
    assert_eq!(policy.chunk_sizes(1), vec![1]);
    assert_eq!(policy.chunk_sizes(TWO_WORKERS_ABOVE), vec![20]);
    assert_eq!(policy.chunk_sizes(TWO_WORKERS_ABOVE + 1), vec![10, 11]);
    assert_eq!(policy.chunk_sizes(FOUR_WORKERS_ABOVE), vec![20, 20]);
    assert_eq!(policy.chunk_sizes(FOUR_WORKERS_ABOVE + 1), vec![10, 10, 10, 11]);
}

#[test]
fn forty_five_paths_leave_remainder_on_last_chunk() {
    assert_eq!(PartitionPolicy::default().chunk_sizes(45), vec![11, 11, 11, 12]);
}

#[test]
fn chunk_sizes_cover_every_path_without_empty_chunks() {
    let policy = PartitionPolicy::default();
    for total in 0..=500 {
        let sizes = policy.chunk_sizes(total);
        assert_eq!(sizes.iter().sum::<usize>(), total, "total {total}");
        assert!(sizes.iter().all(|&size| size > 0), "total {total}");
        let expected_chunks = match total {
            0 => 0,
            1..=20 => 1,
            21..=40 => 2,
            _ => 4,
        };
        assert_eq!(sizes.len(), expected_chunks, "total {total}");
    }
}

#[test]
fn tuned_thresholds_never_produce_empty_chunks() {
    let policy = PartitionPolicy::Thresholds {
        two_workers_above: 0,
        four_workers_above: 1,
    };
    assert_eq!(policy.chunk_sizes(1), vec![1]);
    assert_eq!(policy.chunk_sizes(2), vec![1, 1]);
    assert_eq!(policy.chunk_sizes(3), vec![1, 1, 1]);
    assert_eq!(policy.chunk_sizes(9), vec![2, 2, 2, 3]);
}

#[test]
fn even_policy_caps_chunks_at_path_count() {
    let policy = PartitionPolicy::Even { workers: 6 };
    assert_eq!(policy.chunk_sizes(3), vec![1, 1, 1]);
    assert_eq!(policy.chunk_sizes(14), vec![2, 2, 2, 2, 2, 4]);
    assert_eq!(PartitionPolicy::Even { workers: 0 }.chunk_sizes(5), vec![5]);
}

#[test]
fn split_keeps_order_and_contiguity() {
    let items: Vec<u32> = (0..45).collect();
    let chunks = PartitionPolicy::default().split(&items);
    assert_eq!(chunks.len(), 4);
    assert_eq!(chunks[0], (0..11).collect::<Vec<_>>());
    assert_eq!(chunks[3], (33..45).collect::<Vec<_>>());
    let rejoined: Vec<u32> = chunks.into_iter().flatten().collect();
    assert_eq!(rejoined, items);
}
