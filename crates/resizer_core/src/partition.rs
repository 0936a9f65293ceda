//! Splitting a batch into chunks, one per worker.

/// Above this many paths a batch is split across two workers.
pub const TWO_WORKERS_ABOVE: usize = 20;
/// Above this many paths a batch is split across four workers.
pub const FOUR_WORKERS_ABOVE: usize = 40;

/// Decides how many contiguous chunks a batch of `total` paths becomes.
///
/// Every policy yields chunks that are non-empty, sum to `total`, and give
/// the rounding remainder to the last chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionPolicy {
    /// One, two or four chunks depending on fixed count thresholds.
    Thresholds {
        two_workers_above: usize,
        four_workers_above: usize,
    },
    /// As many chunks as workers, capped at one path per chunk.
    Even { workers: usize },
}

impl Default for PartitionPolicy {
    fn default() -> Self {
        Self::Thresholds {
            two_workers_above: TWO_WORKERS_ABOVE,
            four_workers_above: FOUR_WORKERS_ABOVE,
        }
    }
}

impl PartitionPolicy {
    pub fn chunk_sizes(&self, total: usize) -> Vec<usize> {
        if total == 0 {
            return Vec::new();
        }
        let chunks = match *self {
            Self::Thresholds {
                two_workers_above,
                four_workers_above,
            } => {
                if total > four_workers_above {
                    4
                } else if total > two_workers_above {
                    2
                } else {
                    1
                }
            }
            Self::Even { workers } => workers.max(1),
        };
        split_evenly(total, chunks.min(total))
    }

    /// Splits `items` into contiguous chunks per [`Self::chunk_sizes`].
    pub fn split<T: Clone>(&self, items: &[T]) -> Vec<Vec<T>> {
        let mut offset = 0;
        self.chunk_sizes(items.len())
            .into_iter()
            .map(|size| {
                let chunk = items[offset..offset + size].to_vec();
                offset += size;
                chunk
            })
            .collect()
    }
}

fn split_evenly(total: usize, chunks: usize) -> Vec<usize> {
    let base = total / chunks;
    let mut sizes = vec![base; chunks];
    sizes[chunks - 1] = total - base * (chunks - 1);
    sizes
}
