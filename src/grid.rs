use crate::seed::SeedSource;

/// Grid structure for storing pixel states
/// Pixel values: 0=blank, 1=ink (collectible once, erased on visit)
#[derive(Clone)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
    pub cells: Vec<u8>,
}

impl Grid {
    /// Create a new grid with all pixels blank (0)
    pub fn new(rows: i32, cols: i32) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![0; (rows * cols) as usize],
        }
    }

    /// Create a grid filled with uniform random binary pixels
    pub fn from_source(rows: i32, cols: i32, source: &mut SeedSource) -> Self {
        let mut grid = Self::new(rows, cols);
        grid.refill(source);
        grid
    }

    /// Overwrite every pixel with a fresh uniform random bit
    pub fn refill(&mut self, source: &mut SeedSource) {
        for cell in self.cells.iter_mut() {
            *cell = source.uniform_bit();
        }
    }

    /// Convert (x, y) coordinates to pixel ID
    pub fn get_id(&self, x: i32, y: i32) -> i32 {
        x + y * self.cols
    }

    /// Convert pixel ID to (x, y) coordinates
    pub fn get_coords(&self, id: i32) -> (i32, i32) {
        (id % self.cols, id / self.cols)
    }

    /// Get pixel value at (x, y); out of bounds reads as blank
    pub fn get_cell(&self, x: i32, y: i32) -> u8 {
        if x < 0 || x >= self.cols || y < 0 || y >= self.rows {
            return 0;
        }
        self.cells[self.get_id(x, y) as usize]
    }

    /// Set pixel value at (x, y); out-of-bounds writes are ignored
    pub fn set_cell(&mut self, x: i32, y: i32, value: u8) {
        if x >= 0 && x < self.cols && y >= 0 && y < self.rows {
            let id = self.get_id(x, y);
            self.cells[id as usize] = value;
        }
    }

    /// Blank the pixel at (x, y) and return its previous value.
    /// A second erase of the same pixel yields 0 until the grid is refilled.
    pub fn erase(&mut self, x: i32, y: i32) -> u8 {
        let value = self.get_cell(x, y);
        self.set_cell(x, y, 0);
        value
    }

    /// Number of ink pixels remaining
    pub fn ink_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }
}
