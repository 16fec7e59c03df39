// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carve seams out of the raster
//!
//! Removal is an in-place compaction: each row's surviving triples
//! slide left and the freed tail of the physical row is zeroed, so
//! the buffer never reallocates and only the working width shrinks.
//! The orchestrator repeats find-then-remove for the requested count,
//! with one shortcut: removing every column is just zeroing the
//! buffer, no seam search required.

use crate::error::CarveError;
use crate::ppm::PixelBuffer;
use crate::seamfinder::find_vertical_seam;

/// Delete one seam from the buffer in place.  `seam[0]` names the
/// column to drop from the *bottom* row.  Every row is compacted
/// left-packed from column 0 and zero-filled from the shrunk width
/// out to the full physical stride.
pub fn remove_vertical_seam(image: &mut PixelBuffer, seam: &[u32], width: u32) {
    let height = image.dimensions().height;
    for (i, y) in (0..height).rev().enumerate() {
        let skip = seam[i] as usize;
        let row = image.row_mut(y);
        let mut write = 0;
        for x in 0..width as usize {
            if x == skip {
                continue;
            }
            for channel in 0..3 {
                row[write * 3 + channel] = row[x * 3 + channel];
            }
            write += 1;
        }
        for value in row[write * 3..].iter_mut() {
            *value = 0;
        }
    }
}

/// Map the user's requested carve count onto a concrete number of
/// iterations.  `None` and `-1` both mean "remove everything";
/// anything outside `[-1, width]` is fatal before any work begins.
pub fn resolve_count(requested: Option<i64>, width: u32) -> Result<u32, CarveError> {
    let count = match requested {
        None | Some(-1) => return Ok(width),
        Some(count) => count,
    };
    if count < -1 || count > i64::from(width) {
        return Err(CarveError::CountOutOfRange { count, width });
    }
    Ok(count as u32)
}

/// Carve `count` seams out of the image.  `count` must already have
/// been validated into `[0, width]`.
pub fn carve(image: &mut PixelBuffer, count: u32) {
    let mut width = image.dimensions().width;
    // Removing every column blacks out the whole raster; don't bother
    // searching for seams in what's left along the way.
    if count == width {
        image.clear();
        return;
    }
    let mut remaining = count;
    while remaining > 0 {
        let seam = find_vertical_seam(image, width);
        remove_vertical_seam(image, &seam, width);
        remaining -= 1;
        width -= 1;
    }
}
