use std::error::Error;

/// Owned row-major 2D array of f64 samples.
///
/// `index(x, y) = y * width + x`. NaN cells are legal and mean "no sample
/// here"; the filters exclude them from every window.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl Grid {
    pub fn from_values(width: usize, height: usize, values: Vec<f64>) -> Result<Self, Box<dyn Error>> {
        let expected = width.checked_mul(height).ok_or("width * height overflows")?;
        if values.len() != expected {
            return Err(format!(
                "grid of {}x{} needs {} values, got {}",
                width,
                height,
                expected,
                values.len()
            )
            .into());
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Builds a grid from equal-length rows, top row first.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, Box<dyn Error>> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut values = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(format!("row {} has {} values, expected {}", y, row.len(), width).into());
            }
            values.extend_from_slice(row);
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// Returns the transposed grid: `out(x, y) = self(y, x)`.
    pub fn transposed(&self) -> Grid {
        let mut values = Vec::with_capacity(self.values.len());
        for x in 0..self.width {
            for y in 0..self.height {
                values.push(self.get(x, y));
            }
        }
        Grid {
            width: self.height,
            height: self.width,
            values,
        }
    }
}
