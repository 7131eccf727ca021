use crate::engine::bit_window::WindowOp;
use crate::engine::blocks::{BlockDim, BlockView};
use crate::engine::ranked_window::RankedWindow;

/// Per-block median computation over a 1D array.
///
/// Each block is ranked once, then the window slides across the block's
/// emission range, dropping the trailing cell and adding the leading cell
/// whenever those edges are interior to the block.
pub struct MedCalc1d<'a> {
    dim: BlockDim,
    input: &'a [f64],
    output: &'a mut [f64],
    window: RankedWindow,
}

impl<'a> MedCalc1d<'a> {
    pub fn new(dim: BlockDim, input: &'a [f64], output: &'a mut [f64]) -> Self {
        let window = RankedWindow::with_capacity(dim.max_block_extent());
        Self {
            dim,
            input,
            output,
            window,
        }
    }

    pub fn run(&mut self) {
        for i in 0..self.dim.count {
            let view = self.dim.view(i);
            self.run_block(view);
        }
    }

    fn run_block(&mut self, view: BlockView) {
        let half = self.dim.half;

        self.window.init_start();
        for x in 0..view.size {
            self.window.init_feed(self.input[view.start + x], x);
        }
        self.window.init_finish();

        self.window.clear();
        for slot in view.w0(view.b0)..view.w1(view.b0) {
            self.window.update(WindowOp::Insert, slot);
        }
        self.output[view.start + view.b0] = self.window.median();

        for x in view.b0 + 1..view.b1 {
            if x > half {
                self.window.update(WindowOp::Remove, x - 1 - half);
            }
            if x + half < view.size {
                self.window.update(WindowOp::Insert, x + half);
            }
            self.output[view.start + x] = self.window.median();
        }
    }
}

/// Per-block median computation over a row-major 2D array.
///
/// Output positions inside a block are visited in snake order: down one
/// column, one step right, back up the next column. Consecutive positions
/// differ by a single unit step, so each transition touches only the strip
/// of cells entering or leaving the window and the bitset pivot drifts
/// minimally between median queries.
pub struct MedCalc2d<'a> {
    dim_x: BlockDim,
    dim_y: BlockDim,
    input: &'a [f64],
    output: &'a mut [f64],
    window: RankedWindow,
}

impl<'a> MedCalc2d<'a> {
    pub fn new(dim_x: BlockDim, dim_y: BlockDim, input: &'a [f64], output: &'a mut [f64]) -> Self {
        let cells = dim_x.max_block_extent() * dim_y.max_block_extent();
        let window = RankedWindow::with_capacity(cells);
        Self {
            dim_x,
            dim_y,
            input,
            output,
            window,
        }
    }

    pub fn run(&mut self) {
        for by in 0..self.dim_y.count {
            for bx in 0..self.dim_x.count {
                let vx = self.dim_x.view(bx);
                let vy = self.dim_y.view(by);
                self.run_block(vx, vy);
            }
        }
    }

    fn run_block(&mut self, vx: BlockView, vy: BlockView) {
        let row = vx.size;
        let width = self.dim_x.size;

        self.window.init_start();
        for y in 0..vy.size {
            let src = (y + vy.start) * width + vx.start;
            for x in 0..vx.size {
                self.window.init_feed(self.input[src + x], y * row + x);
            }
        }
        self.window.init_finish();

        self.window.clear();
        let mut x = vx.b0;
        let mut y = vy.b0;
        update_rect(
            &mut self.window,
            row,
            WindowOp::Insert,
            vx.w0(x),
            vx.w1(x),
            vy.w0(y),
            vy.w1(y),
        );
        self.output[(y + vy.start) * width + x + vx.start] = self.window.median();

        let mut down = true;
        loop {
            let stepped = if down && y + 1 < vy.b1 {
                update_rect(
                    &mut self.window,
                    row,
                    WindowOp::Remove,
                    vx.w0(x),
                    vx.w1(x),
                    vy.w0(y),
                    vy.w0(y + 1),
                );
                update_rect(
                    &mut self.window,
                    row,
                    WindowOp::Insert,
                    vx.w0(x),
                    vx.w1(x),
                    vy.w1(y),
                    vy.w1(y + 1),
                );
                y += 1;
                true
            } else if !down && y > vy.b0 {
                update_rect(
                    &mut self.window,
                    row,
                    WindowOp::Remove,
                    vx.w0(x),
                    vx.w1(x),
                    vy.w1(y - 1),
                    vy.w1(y),
                );
                update_rect(
                    &mut self.window,
                    row,
                    WindowOp::Insert,
                    vx.w0(x),
                    vx.w1(x),
                    vy.w0(y - 1),
                    vy.w0(y),
                );
                y -= 1;
                true
            } else {
                false
            };

            if !stepped {
                if x + 1 >= vx.b1 {
                    break;
                }
                update_rect(
                    &mut self.window,
                    row,
                    WindowOp::Remove,
                    vx.w0(x),
                    vx.w0(x + 1),
                    vy.w0(y),
                    vy.w1(y),
                );
                update_rect(
                    &mut self.window,
                    row,
                    WindowOp::Insert,
                    vx.w1(x),
                    vx.w1(x + 1),
                    vy.w0(y),
                    vy.w1(y),
                );
                x += 1;
                down = !down;
            }

            self.output[(y + vy.start) * width + x + vx.start] = self.window.median();
        }
    }
}

fn update_rect(
    window: &mut RankedWindow,
    row: usize,
    op: WindowOp,
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
) {
    for y in y0..y1 {
        for x in x0..x1 {
            window.update(op, y * row + x);
        }
    }
}
