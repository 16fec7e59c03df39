// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the local energy of every pixel
//!
//! Each pixel's energy is its squared-Euclidean RGB distance to the
//! neighbor on its left plus the distance to the neighbor above it;
//! a missing neighbor contributes nothing.  The grid is sized to the
//! *working* width, so once carving has narrowed the image the dead
//! columns on the right are never looked at.

use crate::grid::EnergyGrid;
use crate::ppm::PixelBuffer;
use itertools::iproduct;

/// Squared-Euclidean distance between two RGB triples.  This is the
/// rusty expression of:
///
/// ```text
/// |Δ|² = (Δr)² + (Δg)² + (Δb)²
/// ```
///
/// Never negative, never normalized.
pub fn color_difference(a: [u32; 3], b: [u32; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&c1, &c2)| {
            let d = c1 as i64 - c2 as i64;
            (d * d) as u32
        })
        .sum()
}

/// Compute the local energy of every live pixel.  `width` is the
/// working width, which may be narrower than the buffer's physical
/// stride.
pub fn local_energies(image: &PixelBuffer, width: u32) -> EnergyGrid {
    let height = image.dimensions().height;
    let mut grid = EnergyGrid::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let here = image.triple(x, y);
        let mut energy = 0;
        if x > 0 {
            energy += color_difference(image.triple(x - 1, y), here);
        }
        if y > 0 {
            energy += color_difference(image.triple(x, y - 1), here);
        }
        grid[(x, y)] = energy;
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_difference_squares_each_channel() {
        assert_eq!(color_difference([0, 0, 0], [1, 2, 3]), 1 + 4 + 9);
        assert_eq!(color_difference([255, 0, 0], [0, 0, 0]), 255 * 255);
    }

    #[test]
    fn color_difference_is_symmetric() {
        assert_eq!(
            color_difference([200, 10, 10], [10, 10, 10]),
            color_difference([10, 10, 10], [200, 10, 10])
        );
    }

    #[test]
    fn uniform_image_has_zero_energy_everywhere() {
        let image = PixelBuffer::from_raw(3, 2, vec![7; 18]);
        let grid = local_energies(&image, 3);
        for (y, x) in iproduct!(0..2, 0..3) {
            assert_eq!(grid[(x, y)], 0);
        }
    }

    #[test]
    fn energy_sums_left_and_upper_gradients() {
        // 2x2, one loud pixel in the top-left corner.
        #[rustfmt::skip]
        let image = PixelBuffer::from_raw(2, 2, vec![
            200, 10, 10,   10, 10, 10,
             10, 10, 10,   10, 10, 10,
        ]);
        let grid = local_energies(&image, 2);
        assert_eq!(grid[(0, 0)], 0); // no neighbors at the origin
        assert_eq!(grid[(1, 0)], 190 * 190); // left gradient only
        assert_eq!(grid[(0, 1)], 190 * 190); // upper gradient only
        assert_eq!(grid[(1, 1)], 0); // quiet on both sides
    }

    #[test]
    fn narrowed_width_ignores_dead_columns() {
        // Physical width 3, but only 2 live columns; the loud third
        // column must not leak into the grid.
        #[rustfmt::skip]
        let image = PixelBuffer::from_raw(3, 1, vec![
            5, 5, 5,   5, 5, 5,   255, 255, 255,
        ]);
        let grid = local_energies(&image, 2);
        assert_eq!(grid.width, 2);
        assert_eq!(grid[(0, 0)], 0);
        assert_eq!(grid[(1, 0)], 0);
    }
}
