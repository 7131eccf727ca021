/// Default block edge for the 1D filter.
#[inline]
pub fn choose_block_size_1d(half: usize) -> usize {
    8 * (half + 2)
}

/// Default block edge for the 2D filter; `half` is the larger of the two
/// half-radii.
#[inline]
pub fn choose_block_size_2d(half: usize) -> usize {
    4 * (half + 2)
}

/// Partition of one dimension into overlapping blocks.
///
/// Adjacent blocks overlap by `2·half` samples so every window needed for
/// the positions a block emits lies entirely inside that block. Each global
/// position is emitted by exactly one block.
#[derive(Debug, Clone, Copy)]
pub struct BlockDim {
    pub size: usize,
    pub half: usize,
    pub step: usize,
    pub count: usize,
}

impl BlockDim {
    /// `block` must satisfy `2·half + 1 <= block`; callers validate before
    /// constructing.
    pub fn new(size: usize, half: usize, block: usize) -> Self {
        debug_assert!(2 * half + 1 <= block, "block {} below window span", block);
        let step = block - 2 * half;
        let count = if size <= block {
            1
        } else {
            (size - 2 * half).div_ceil(step)
        };
        Self {
            size,
            half,
            step,
            count,
        }
    }

    /// Extent of the widest block this partition produces.
    pub fn max_block_extent(&self) -> usize {
        if self.count == 1 {
            self.size
        } else {
            2 * self.half + self.step
        }
    }

    pub fn view(&self, index: usize) -> BlockView {
        debug_assert!(index < self.count);
        let start = index * self.step;
        let end = if index + 1 == self.count {
            self.size
        } else {
            2 * self.half + (index + 1) * self.step
        };
        let size = end - start;
        let b0 = if index == 0 { 0 } else { self.half };
        let b1 = if index + 1 == self.count {
            size
        } else {
            size - self.half
        };
        BlockView {
            start,
            size,
            b0,
            b1,
            half: self.half,
        }
    }
}

/// One block's placement in the full array plus the block-local range
/// `[b0, b1)` of positions whose medians this block emits.
#[derive(Debug, Clone, Copy)]
pub struct BlockView {
    pub start: usize,
    pub size: usize,
    pub b0: usize,
    pub b1: usize,
    half: usize,
}

impl BlockView {
    /// Low edge of the clipped window around block-local position `v`.
    #[inline]
    pub fn w0(&self, v: usize) -> usize {
        v.saturating_sub(self.half)
    }

    /// One past the high edge of the clipped window around `v`.
    #[inline]
    pub fn w1(&self, v: usize) -> usize {
        (v + 1 + self.half).min(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block_when_input_fits() {
        let dim = BlockDim::new(10, 2, 16);
        assert_eq!(dim.count, 1);
        let view = dim.view(0);
        assert_eq!(view.start, 0);
        assert_eq!(view.size, 10);
        assert_eq!(view.b0, 0);
        assert_eq!(view.b1, 10);
    }

    #[test]
    fn test_partition_invariants() {
        for &(size, half, block) in &[
            (100usize, 1usize, 8usize),
            (100, 3, 7),
            (1000, 2, 24),
            (37, 5, 11),
            (64, 0, 4),
            (129, 4, 9),
        ] {
            let dim = BlockDim::new(size, half, block);
            assert!(dim.count >= 1);
            assert!(
                2 * half + dim.count * dim.step >= size,
                "partition too short for size={} half={} block={}",
                size,
                half,
                block
            );
            if dim.count > 1 {
                assert!(2 * half + (dim.count - 1) * dim.step < size);
            }
        }
    }

    #[test]
    fn test_every_position_emitted_exactly_once() {
        for &(size, half, block) in &[
            (100usize, 1usize, 8usize),
            (55, 3, 7),
            (200, 0, 16),
            (17, 8, 17),
            (300, 2, 24),
        ] {
            let dim = BlockDim::new(size, half, block);
            let mut hits = vec![0usize; size];
            for i in 0..dim.count {
                let view = dim.view(i);
                assert!(view.b0 <= view.b1);
                assert!(view.start + view.size <= size);
                for v in view.b0..view.b1 {
                    hits[view.start + v] += 1;
                }
            }
            for (pos, &n) in hits.iter().enumerate() {
                assert_eq!(
                    n, 1,
                    "position {} emitted {} times (size={} half={} block={})",
                    pos, n, size, half, block
                );
            }
        }
    }

    #[test]
    fn test_interior_blocks_are_full_width() {
        let dim = BlockDim::new(100, 3, 13);
        for i in 0..dim.count - 1 {
            assert_eq!(dim.view(i).size, 13);
        }
        assert!(dim.view(dim.count - 1).size <= 13);
        assert_eq!(dim.max_block_extent(), 13);
    }

    #[test]
    fn test_window_clipping_at_edges() {
        let dim = BlockDim::new(10, 3, 16);
        let view = dim.view(0);
        assert_eq!(view.w0(0), 0);
        assert_eq!(view.w1(0), 4);
        assert_eq!(view.w0(5), 2);
        assert_eq!(view.w1(5), 9);
        assert_eq!(view.w0(9), 6);
        assert_eq!(view.w1(9), 10);
    }

    #[test]
    fn test_minimal_block_size_emits_one_interior_position() {
        // block = 2*half + 1 gives step 1: interior blocks emit one median each
        let dim = BlockDim::new(20, 2, 5);
        assert_eq!(dim.step, 1);
        for i in 1..dim.count - 1 {
            let view = dim.view(i);
            assert_eq!(view.b1 - view.b0, 1);
        }
    }

    #[test]
    fn test_block_size_heuristics() {
        assert_eq!(choose_block_size_1d(0), 16);
        assert_eq!(choose_block_size_1d(3), 40);
        assert_eq!(choose_block_size_2d(0), 8);
        assert_eq!(choose_block_size_2d(5), 28);
        for h in 0..50 {
            assert!(2 * h + 1 <= choose_block_size_1d(h));
            assert!(2 * h + 1 <= choose_block_size_2d(h));
        }
    }
}
