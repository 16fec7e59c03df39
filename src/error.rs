// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fatal error conditions
//!
//! Every detectable failure in this program is fatal: a violated
//! format rule, a carve count outside the accepted range.  Nothing is
//! recoverable and nothing produces a partial result, so there is one
//! flat enum and the binary maps any variant to a non-zero exit.

use failure::Fail;

#[derive(Debug, Fail, PartialEq)]
pub enum CarveError {
    /// The input's name must end in `.ppm`, and the dot may not be
    /// the first byte of the name.
    #[fail(display = "'{}' does not carry a .ppm extension", _0)]
    UnsupportedExtension(String),

    #[fail(display = "not a plain-text PPM: missing 'P3' magic")]
    BadMagic,

    #[fail(display = "malformed header: {}", _0)]
    BadHeader(&'static str),

    #[fail(display = "width and height must both be positive")]
    EmptyImage,

    #[fail(display = "unsupported channel depth: only a maxval of 255 is accepted")]
    BadMaxval,

    #[fail(display = "pixel section contains a byte that is neither a digit nor whitespace")]
    BadPixelByte,

    #[fail(display = "channel value {} is outside the [0, 255] range", _0)]
    ChannelOutOfRange(u64),

    #[fail(display = "expected {} channel values, found {}", expected, found)]
    PixelCountMismatch { expected: u64, found: u64 },

    #[fail(display = "carve count {} is outside the [-1, {}] range", count, width)]
    CountOutOfRange { count: i64, width: u32 },
}
