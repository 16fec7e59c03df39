// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest vertical seam
//!
//! Two passes over one grid: a row-major accumulation that overwrites
//! each local energy with the minimum total energy of any path from
//! the top of the image to that cell, then a bottom-up backtrack that
//! picks one column per row.
//!
//! The tie policies are part of the contract and they are not
//! symmetric.  The bottom-row start scan keeps the leftmost minimal
//! column; the per-row backtrack prefers mid over left over right.
//! Both are kept exactly as-is.

use crate::energy::local_energies;
use crate::grid::EnergyGrid;
use crate::ppm::PixelBuffer;
use crate::tern;

/// Cost assigned to a neighbor that is off the edge of the grid.
/// Cumulative energies stay u32, so a real path can only collide with
/// this sentinel by overflowing, which takes on the order of eleven
/// thousand maximally-noisy rows.
const UNREACHABLE: u32 = u32::MAX;

/// The in-place cumulative pass.  Row 0 keeps its local energies;
/// every later cell adds the cheapest of its three upper neighbors.
/// Row-major order matters: row y-1 is fully cumulative by the time
/// row y is touched.
pub fn accumulate(grid: &mut EnergyGrid) {
    let (width, height) = (grid.width, grid.height);
    let maxcol = width - 1;
    for y in 0..height {
        for x in 0..width {
            let upper_left = tern!(x > 0 && y > 0, grid[(x - 1, y - 1)], UNREACHABLE);
            let upper_mid = tern!(y > 0, grid[(x, y - 1)], UNREACHABLE);
            let upper_right = tern!(x < maxcol && y > 0, grid[(x + 1, y - 1)], UNREACHABLE);

            let minimum = upper_left.min(upper_mid).min(upper_right);
            if minimum != UNREACHABLE {
                grid[(x, y)] += minimum;
            }
        }
    }
}

// Scan the bottom row right to left, keeping `<=` ties, so the last
// winner -- the leftmost of the tied minima -- is the one returned.
fn seam_start(grid: &EnergyGrid) -> u32 {
    let y = grid.height - 1;
    let mut minimum = UNREACHABLE;
    let mut start = 0;
    for x in (0..grid.width).rev() {
        if grid[(x, y)] <= minimum {
            minimum = grid[(x, y)];
            start = x;
        }
    }
    start
}

// One backtracking step: given the chosen column in the row below,
// pick the column for row y.  This is a cascade, not a chain: all
// three tests run, each satisfied one overwrites the previous choice,
// so on ties mid beats left beats right.
fn next_column(grid: &EnergyGrid, below: u32, y: u32) -> u32 {
    let maxcol = grid.width - 1;
    let upper_right = tern!(below < maxcol, grid[(below + 1, y)], UNREACHABLE);
    let upper_left = tern!(below > 0, grid[(below - 1, y)], UNREACHABLE);
    let upper_mid = grid[(below, y)];

    let mut chosen = below;
    if upper_right <= upper_mid.min(upper_left) {
        chosen = below + 1;
    }
    if upper_left <= upper_mid.min(upper_right) {
        chosen = below - 1;
    }
    if upper_mid <= upper_left.min(upper_right) {
        chosen = below;
    }
    chosen
}

/// Find the vertical seam with the least cumulative energy.  The
/// result holds one column per row, bottom row first: `seam[i]` is
/// the column at row `height - 1 - i`, and consecutive entries never
/// differ by more than one.
pub fn find_vertical_seam(image: &PixelBuffer, width: u32) -> Vec<u32> {
    let mut grid = local_energies(image, width);
    accumulate(&mut grid);

    let height = grid.height;
    let mut seam = Vec::with_capacity(height as usize);
    let mut below = seam_start(&grid);
    seam.push(below);
    for y in (0..height - 1).rev() {
        below = next_column(&grid, below, y);
        seam.push(below);
    }
    seam
}
