use crate::engine::bit_window::{BitWindow, WindowOp};

/// Rank assigned to NaN cells; never enters the bitset.
pub const NAN_MARKER: usize = usize::MAX;

/// Value-ordered view of one block's cells with NaN cells masked out.
///
/// Sorting once per block amortizes across every output position the block
/// emits; after that, sliding the window costs one bitset update per cell
/// entering or leaving. The rank table maps each block slot to its position
/// in the sorted order, or to `NAN_MARKER` for cells that must never count.
pub struct RankedWindow {
    sorted: Vec<(f64, usize)>,
    rank: Vec<usize>,
    bits: BitWindow,
}

impl RankedWindow {
    pub fn with_capacity(cells: usize) -> Self {
        Self {
            sorted: Vec::with_capacity(cells),
            rank: vec![NAN_MARKER; cells],
            bits: BitWindow::new(cells),
        }
    }

    /// Begins a new block.
    pub fn init_start(&mut self) {
        self.sorted.clear();
    }

    /// Registers the value stored at block slot `slot`.
    pub fn init_feed(&mut self, value: f64, slot: usize) {
        if value.is_nan() {
            self.rank[slot] = NAN_MARKER;
        } else {
            self.sorted.push((value, slot));
        }
    }

    /// Sorts the fed values and builds the slot-to-rank table. Ties are
    /// broken by slot index so ranks form a bijection even with repeated
    /// values.
    pub fn init_finish(&mut self) {
        self.sorted
            .sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        for (i, &(_, slot)) in self.sorted.iter().enumerate() {
            self.rank[slot] = i;
        }
    }

    /// Empties the window membership.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Adds or drops the cell at `slot`. NaN cells are ignored.
    pub fn update(&mut self, op: WindowOp, slot: usize) {
        let r = self.rank[slot];
        if r != NAN_MARKER {
            self.bits.update(op, r);
        }
    }

    /// Median of the finite values currently in the window; NaN when the
    /// window holds none. Even counts average the two middle values.
    pub fn median(&mut self) -> f64 {
        let total = self.bits.len();
        if total == 0 {
            return f64::NAN;
        }
        let g1 = (total - 1) / 2;
        let g2 = total / 2;
        let mut med = self.sorted[self.bits.find(g1)].0;
        if g2 != g1 {
            med = (med + self.sorted[self.bits.find(g2)].0) / 2.0;
        }
        med
    }
}
