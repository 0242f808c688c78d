//! Ledger height collaborator used for deadline checks

/// Source of the current ledger height
///
/// Heights never decrease. The engine compares deadlines against the height
/// preceding the current one, see [`deadline_height`].
pub trait HeightOracle {
    fn block_height(&self) -> u64;
}

/// Height a deadline is checked against: the block before the current one
pub fn deadline_height(oracle: &impl HeightOracle) -> u64 {
    oracle.block_height().saturating_sub(1)
}

/// Height set explicitly by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualHeightOracle {
    height: u64,
}

impl ManualHeightOracle {
    pub fn new(height: u64) -> Self {
        Self { height }
    }

    /// Move to `height`; lower values are ignored
    pub fn set(&mut self, height: u64) {
        self.height = self.height.max(height);
    }

    pub fn advance(&mut self, blocks: u64) {
        self.height = self.height.saturating_add(blocks);
    }
}

impl HeightOracle for ManualHeightOracle {
    fn block_height(&self) -> u64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_height_is_previous_block() {
        assert_eq!(deadline_height(&ManualHeightOracle::new(10)), 9);
        assert_eq!(deadline_height(&ManualHeightOracle::new(0)), 0);
    }

    #[test]
    fn test_height_is_monotonic() {
        let mut oracle = ManualHeightOracle::new(5);
        oracle.set(3);
        assert_eq!(oracle.block_height(), 5);
        oracle.advance(2);
        oracle.set(9);
        assert_eq!(oracle.block_height(), 9);
    }
}
