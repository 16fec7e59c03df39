use std::ops::{Index, IndexMut};

/// The energy grid: an addressable two-dimensional field of `u32`
/// cells, sized to the working width rather than the raster's
/// physical stride.  One allocation serves two phases: the cells
/// first hold each pixel's local gradient energy, and the cumulative
/// pass then overwrites them in place with minimum-path totals.
/// Callers must not read local energies once accumulation has begun.
#[derive(Debug)]
pub struct EnergyGrid {
    pub width: u32,
    pub height: u32,
    cells: Vec<u32>,
}

impl EnergyGrid {
    /// A zero-filled grid of the given working dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        EnergyGrid {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major cell vector.  Handy for tests and
    /// for anything that wants to seed the grid directly.
    pub fn from_cells(width: u32, height: u32, cells: Vec<u32>) -> Self {
        assert_eq!(cells.len(), width as usize * height as usize);
        EnergyGrid {
            width,
            height,
            cells,
        }
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

impl Index<(u32, u32)> for EnergyGrid {
    type Output = u32;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &u32 {
        let index = self.get_index(x, y);
        &self.cells[index]
    }
}

impl IndexMut<(u32, u32)> for EnergyGrid {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut u32 {
        let index = self.get_index(x, y);
        &mut self.cells[index]
    }
}
