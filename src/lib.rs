// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware narrowing for plain-text PPM images
//!
//! Parse a strictly-validated P3 raster, repeatedly find and delete
//! the vertical seam whose removal least disturbs the picture, and
//! write the narrowed, zero-padded result back out.

pub mod ternary;

pub mod carver;
pub mod energy;
pub mod error;
pub mod grid;
pub mod ppm;
pub mod seamfinder;

pub use carver::{carve, remove_vertical_seam, resolve_count};
pub use error::CarveError;
pub use ppm::{Dimensions, PixelBuffer};
pub use seamfinder::find_vertical_seam;
