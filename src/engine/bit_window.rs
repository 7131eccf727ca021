use aligned_vec::{AVec, CACHELINE_ALIGN};

/// Direction of a window membership change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOp {
    Insert,
    Remove,
}

/// Bit-indexed multiset over ranks `[0, capacity)` with rank-select.
///
/// One bit per rank, packed into 64-bit words. The words are split at a
/// moving pivot into a lower half `[0, pivot)` and an upper half
/// `[pivot, word_count)` whose popcounts are cached in `half`, so locating
/// the k-th set bit only scans words between the pivot's old and new
/// positions. When consecutive queries ask for nearby ordinals the pivot
/// barely moves and `find` runs in near-constant time.
pub struct BitWindow {
    words: AVec<u64>,
    half: [usize; 2],
    pivot: usize,
}

impl BitWindow {
    pub fn new(capacity: usize) -> Self {
        let word_count = capacity.div_ceil(64).max(1);
        let mut words = AVec::with_capacity(CACHELINE_ALIGN, word_count);
        for _ in 0..word_count {
            words.push(0u64);
        }
        Self {
            words,
            half: [0, 0],
            pivot: word_count / 2,
        }
    }

    /// Empties the set and recenters the pivot.
    pub fn clear(&mut self) {
        self.words.fill(0);
        self.half = [0, 0];
        self.pivot = self.words.len() / 2;
    }

    /// Number of ranks currently in the set.
    pub fn len(&self) -> usize {
        self.half[0] + self.half[1]
    }

    /// Inserts or removes rank `r`.
    ///
    /// Inserting a rank that is already present, or removing one that is
    /// absent, corrupts the cached popcounts.
    pub fn update(&mut self, op: WindowOp, r: usize) {
        let w = r >> 6;
        let mask = 1u64 << (r & 63);
        match op {
            WindowOp::Insert => {
                debug_assert_eq!(self.words[w] & mask, 0, "rank {} already present", r)
            }
            WindowOp::Remove => {
                debug_assert_ne!(self.words[w] & mask, 0, "rank {} not present", r)
            }
        }
        self.words[w] ^= mask;
        let side = usize::from(w >= self.pivot);
        match op {
            WindowOp::Insert => self.half[side] += 1,
            WindowOp::Remove => self.half[side] -= 1,
        }
    }

    /// Rank of the set bit with ordinal `goal` (0-based, ascending).
    ///
    /// `goal` must be below `len()`. Walks the pivot left while the lower
    /// half already exceeds the goal, then right while the goal lies past
    /// the pivot word, transferring word popcounts between the two cached
    /// halves, and finally selects within a single word.
    pub fn find(&mut self, goal: usize) -> usize {
        debug_assert!(goal < self.len(), "ordinal {} out of {}", goal, self.len());
        while self.half[0] > goal {
            self.pivot -= 1;
            let c = self.words[self.pivot].count_ones() as usize;
            self.half[0] -= c;
            self.half[1] += c;
        }
        while self.half[0] + self.words[self.pivot].count_ones() as usize <= goal {
            let c = self.words[self.pivot].count_ones() as usize;
            self.half[0] += c;
            self.half[1] -= c;
            self.pivot += 1;
        }
        let n = goal - self.half[0];
        (self.pivot << 6) + nth_set_bit(self.words[self.pivot], n)
    }
}

/// Index of the `n`-th set bit of `word` (0-based from the least
/// significant end). `word` must carry at least `n + 1` set bits.
#[inline]
fn nth_set_bit(mut word: u64, n: usize) -> usize {
    for _ in 0..n {
        word &= word - 1;
    }
    word.trailing_zeros() as usize
}
