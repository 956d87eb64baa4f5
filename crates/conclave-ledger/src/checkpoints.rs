//! Append-only checkpoint histories with binary-search lookups.
//!
//! A checkpoint records a value as of a block. Histories are strictly
//! monotonic in block: a write at or before the block of the last
//! checkpoint overwrites it instead of appending, so at most one
//! checkpoint exists per block and lookups can always binary-search.

/// One `(block, value)` snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// Block at which the value took effect
    pub block: u64,
    /// Value as of that block
    pub value: u128,
}

/// Ordered checkpoint sequence for a single accumulator.
#[derive(Debug, Default, Clone)]
pub struct CheckpointHistory {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value (the last checkpoint), zero if no history.
    pub fn latest(&self) -> u128 {
        self.checkpoints.last().map(|c| c.value).unwrap_or(0)
    }

    /// Record a new value as of `block`.
    ///
    /// Writes at or before the last checkpoint's block collapse into that
    /// checkpoint, so blocks stay strictly increasing and `value_at`'s
    /// binary search always sees an ordered history.
    pub fn push(&mut self, block: u64, value: u128) {
        match self.checkpoints.last_mut() {
            Some(last) if block <= last.block => last.value = value,
            _ => self.checkpoints.push(Checkpoint { block, value }),
        }
    }

    /// Value as of `block`: the latest checkpoint at or before it.
    ///
    /// Returns zero for blocks before the first checkpoint.
    pub fn value_at(&self, block: u64) -> u128 {
        let idx = self.checkpoints.partition_point(|c| c.block <= block);
        if idx == 0 {
            0
        } else {
            self.checkpoints[idx - 1].value
        }
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Full history, oldest first.
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let history = CheckpointHistory::new();
        assert_eq!(history.latest(), 0);
        assert_eq!(history.value_at(100), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn test_push_and_latest() {
        let mut history = CheckpointHistory::new();
        history.push(10, 100);
        history.push(20, 250);

        assert_eq!(history.latest(), 250);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_same_block_overwrites() {
        let mut history = CheckpointHistory::new();
        history.push(10, 100);
        history.push(10, 150);

        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), 150);
    }

    #[test]
    fn test_backwards_block_collapses_into_last() {
        let mut history = CheckpointHistory::new();
        history.push(10, 100);
        history.push(20, 250);
        history.push(5, 40);

        // The late write lands on the last checkpoint; ordering survives.
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest(), 40);
        assert_eq!(history.value_at(10), 100);
        assert_eq!(history.value_at(20), 40);

        let blocks: Vec<u64> = history.checkpoints().iter().map(|c| c.block).collect();
        assert_eq!(blocks, vec![10, 20]);
    }

    #[test]
    fn test_value_at_boundaries() {
        let mut history = CheckpointHistory::new();
        history.push(10, 100);
        history.push(20, 250);
        history.push(30, 50);

        assert_eq!(history.value_at(9), 0);
        assert_eq!(history.value_at(10), 100);
        assert_eq!(history.value_at(15), 100);
        assert_eq!(history.value_at(20), 250);
        assert_eq!(history.value_at(29), 250);
        assert_eq!(history.value_at(30), 50);
        assert_eq!(history.value_at(1000), 50);
    }
}
