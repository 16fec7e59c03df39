// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Strict parsing and writing of plain-text PPM rasters
//!
//! The carving engine indexes freely into a flat buffer, so it is
//! only safe downstream if every format rule has been proven up
//! front.  The parser here is therefore deliberately unforgiving:
//! the `.ppm` extension, the `P3` magic line, the exact shape of the
//! dimension and maxval lines, and the precise channel count are all
//! hard failure points, and nothing partial ever escapes.
//!
//! The writer emits the same layout back out: header, then one line
//! of space-separated values per physical row.

use crate::error::CarveError;
use crate::tern;
use itertools::Itertools;
use std::io::{self, Write};

const NEWLINE: u8 = b'\n';
const SPACE: u8 = b' ';

/// Image dimensions, fixed once at parse time.  Carving narrows the
/// *working* width, which travels separately; these never change for
/// the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// The flat pixel store: row-major, (R,G,B) interleaved, each channel
/// in [0,255].  The physical row stride stays `width * 3` no matter
/// how far the image has been narrowed; once carving starts, every
/// channel at or beyond the working width is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    dims: Dimensions,
    data: Vec<u32>,
}

impl PixelBuffer {
    /// Wrap a raw channel vector.  The vector length must agree with
    /// the dimensions exactly.
    pub fn from_raw(width: u32, height: u32, data: Vec<u32>) -> Self {
        assert_eq!(data.len(), width as usize * height as usize * 3);
        PixelBuffer {
            dims: Dimensions { width, height },
            data,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// The physical row stride in channel values.  Fixed for the
    /// buffer's lifetime, however narrow the image gets.
    pub fn stride(&self) -> usize {
        self.dims.width as usize * 3
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride() + (x as usize) * 3
    }

    /// The (R,G,B) triple at a pixel coordinate.
    pub fn triple(&self, x: u32, y: u32) -> [u32; 3] {
        let index = self.get_index(x, y);
        [self.data[index], self.data[index + 1], self.data[index + 2]]
    }

    /// One full physical row, mutable, for in-place compaction.
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// The physical rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.data.chunks(self.stride())
    }

    /// Zero every channel in the buffer.
    pub fn clear(&mut self) {
        for value in &mut self.data {
            *value = 0;
        }
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Mean brightness: the integer-truncated average over all pixels
    /// of each pixel's integer-truncated channel average.  Both
    /// divisions truncate, in that order, so this is *not* the mean
    /// of all channel values.
    pub fn brightness(&self) -> u32 {
        let pixels = u64::from(self.dims.width) * u64::from(self.dims.height);
        let total: u64 = self
            .data
            .chunks(3)
            .map(|px| u64::from((px[0] + px[1] + px[2]) / 3))
            .sum();
        (total / pixels) as u32
    }
}

// The filename has to end in ".ppm", and the dot introducing the
// extension may not be the name's first byte.
fn check_extension(filename: &str) -> Result<(), CarveError> {
    match filename.rfind('.') {
        Some(dot) if dot > 0 && &filename[dot + 1..] == "ppm" => Ok(()),
        _ => Err(CarveError::UnsupportedExtension(filename.to_string())),
    }
}

// Reads a run of ASCII digits starting at `at`, returning the value
// and the index one past the run, or None if `at` holds no digit.
// Saturates rather than wraps; anything that saturates is rejected by
// the range checks in the callers anyway.
fn read_number(bytes: &[u8], at: usize) -> Option<(u64, usize)> {
    let mut i = at;
    let mut value: u64 = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add(u64::from(bytes[i] - b'0'));
        i += 1;
    }
    tern!(i == at, None, Some((value, i)))
}

/// Decode and validate a plain-text PPM.  Every rule is a hard
/// failure point; on success the image is fully proven:
///
///   1. filename extension is exactly `ppm`
///   2. bytes 0..3 are `P3\n`
///   3. width digits begin at byte 3, then one-or-more spaces
///   4. height digits, optional spaces, exactly one newline
///   5. both dimensions strictly positive
///   6. the literal maxval line `255\n`
///   7. exactly `width * height * 3` whitespace-separated values,
///      each in [0,255], up to (not including) a NUL byte if any
pub fn parse(bytes: &[u8], filename: &str) -> Result<PixelBuffer, CarveError> {
    check_extension(filename)?;

    if bytes.get(..3) != Some(&b"P3\n"[..]) {
        return Err(CarveError::BadMagic);
    }

    let (width, mut i) = read_number(bytes, 3)
        .ok_or(CarveError::BadHeader("width must follow the magic line"))?;
    if bytes.get(i) != Some(&SPACE) {
        return Err(CarveError::BadHeader("at least one space must follow the width"));
    }
    while bytes.get(i) == Some(&SPACE) {
        i += 1;
    }

    let (height, mut i) = read_number(bytes, i)
        .ok_or(CarveError::BadHeader("height must follow the width"))?;
    while bytes.get(i) == Some(&SPACE) {
        i += 1;
    }
    if width == 0 || height == 0 {
        return Err(CarveError::EmptyImage);
    }
    if bytes.get(i) != Some(&NEWLINE) {
        return Err(CarveError::BadHeader("a newline must close the dimension line"));
    }
    i += 1;

    if width > u64::from(u32::MAX) || height > u64::from(u32::MAX) {
        return Err(CarveError::BadHeader("image dimensions overflow the supported range"));
    }

    if bytes.get(i..i + 4) != Some(&b"255\n"[..]) {
        return Err(CarveError::BadMaxval);
    }
    i += 4;

    // The pixel section: digits, spaces, and newlines only, stopping
    // short of a NUL terminator if one is present.
    let mut data: Vec<u32> = Vec::new();
    while i < bytes.len() {
        match bytes[i] {
            0 => break,
            NEWLINE | SPACE => i += 1,
            b'0'..=b'9' => {
                let mut value: u64 = 0;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    value = value * 10 + u64::from(bytes[i] - b'0');
                    if value > 255 {
                        return Err(CarveError::ChannelOutOfRange(value));
                    }
                    i += 1;
                }
                data.push(value as u32);
            }
            _ => return Err(CarveError::BadPixelByte),
        }
    }

    let expected = width.saturating_mul(height).saturating_mul(3);
    if data.len() as u64 != expected {
        return Err(CarveError::PixelCountMismatch {
            expected,
            found: data.len() as u64,
        });
    }

    Ok(PixelBuffer::from_raw(width as u32, height as u32, data))
}

/// Write the raster back out in the same textual layout it arrived
/// in: `P3`, dimensions, `255`, then one line of space-separated
/// values per physical row.
pub fn write<W: Write>(out: &mut W, image: &PixelBuffer) -> io::Result<()> {
    let Dimensions { width, height } = image.dimensions();
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", width, height)?;
    writeln!(out, "255")?;
    for row in image.rows() {
        writeln!(out, "{}", row.iter().join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"P3\n2 2\n255\n10 20 30 40 50 60\n70 80 90 100 110 120\n";

    fn parse_sample(bytes: &[u8]) -> Result<PixelBuffer, CarveError> {
        parse(bytes, "sample.ppm")
    }

    #[test]
    fn parses_a_well_formed_image() {
        let image = parse_sample(SAMPLE).unwrap();
        assert_eq!(image.dimensions(), Dimensions { width: 2, height: 2 });
        assert_eq!(image.triple(0, 0), [10, 20, 30]);
        assert_eq!(image.triple(1, 0), [40, 50, 60]);
        assert_eq!(image.triple(0, 1), [70, 80, 90]);
        assert_eq!(image.triple(1, 1), [100, 110, 120]);
    }

    #[test]
    fn header_allows_extra_spaces() {
        let image = parse_sample(b"P3\n2    2   \n255\n1 2 3 4 5 6 7 8 9 10 11 12\n").unwrap();
        assert_eq!(image.dimensions(), Dimensions { width: 2, height: 2 });
    }

    #[test]
    fn rejects_missing_extension() {
        assert_eq!(
            parse(SAMPLE, "sample"),
            Err(CarveError::UnsupportedExtension("sample".to_string()))
        );
    }

    #[test]
    fn rejects_a_dotfile_as_extensionless() {
        assert!(parse(SAMPLE, ".ppm").is_err());
    }

    #[test]
    fn rejects_foreign_extension() {
        assert!(parse(SAMPLE, "sample.png").is_err());
    }

    #[test]
    fn rejects_bad_magic() {
        assert_eq!(
            parse_sample(b"P6\n2 2\n255\n1 2 3 4 5 6 7 8 9 10 11 12\n"),
            Err(CarveError::BadMagic)
        );
    }

    #[test]
    fn rejects_newline_directly_after_width() {
        assert_eq!(
            parse_sample(b"P3\n2\n2\n255\n1 2 3 4 5 6 7 8 9 10 11 12\n"),
            Err(CarveError::BadHeader("at least one space must follow the width"))
        );
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(parse_sample(b"P3\n0 2\n255\n\n"), Err(CarveError::EmptyImage));
        assert_eq!(parse_sample(b"P3\n2 0\n255\n\n"), Err(CarveError::EmptyImage));
    }

    #[test]
    fn rejects_wrong_maxval() {
        assert_eq!(
            parse_sample(b"P3\n2 2\n128\n1 2 3 4 5 6 7 8 9 10 11 12\n"),
            Err(CarveError::BadMaxval)
        );
    }

    #[test]
    fn rejects_channel_above_255() {
        assert_eq!(
            parse_sample(b"P3\n1 1\n255\n1 2 256\n"),
            Err(CarveError::ChannelOutOfRange(256))
        );
    }

    #[test]
    fn rejects_stray_letter_in_pixel_section() {
        assert_eq!(
            parse_sample(b"P3\n1 1\n255\n1 x 3\n"),
            Err(CarveError::BadPixelByte)
        );
    }

    #[test]
    fn rejects_too_few_values() {
        assert_eq!(
            parse_sample(b"P3\n2 2\n255\n1 2 3 4 5 6 7 8 9 10 11\n"),
            Err(CarveError::PixelCountMismatch {
                expected: 12,
                found: 11
            })
        );
    }

    #[test]
    fn rejects_too_many_values() {
        assert_eq!(
            parse_sample(b"P3\n1 1\n255\n1 2 3 4\n"),
            Err(CarveError::PixelCountMismatch {
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn pixel_section_stops_at_a_nul_byte() {
        let image = parse_sample(b"P3\n1 1\n255\n1 2 3\n\0garbage after the terminator").unwrap();
        assert_eq!(image.triple(0, 0), [1, 2, 3]);
    }

    #[test]
    fn round_trips_unmodified() {
        let image = parse_sample(SAMPLE).unwrap();
        let mut written = Vec::new();
        write(&mut written, &image).unwrap();
        assert_eq!(written, SAMPLE);
    }

    #[test]
    fn brightness_of_a_flat_image_is_its_value() {
        // Scenario: 2x2, every channel 100.
        let image = PixelBuffer::from_raw(2, 2, vec![100; 12]);
        assert_eq!(image.brightness(), 100);
    }

    #[test]
    fn brightness_truncates_per_pixel_before_averaging() {
        // (0,0,5) -> 5/3 -> 1, not 5/3 carried as a fraction.
        let image = PixelBuffer::from_raw(1, 1, vec![0, 0, 5]);
        assert_eq!(image.brightness(), 1);
    }
}
