// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The ppmcarve command
//!
//! Three mutually exclusive modes, in priority order: `-s` prints the
//! image's stats, `-p` prints the next minimal seam, and otherwise
//! `-n COUNT` seams are carved out and the result lands in `out.ppm`.
//! Every failure is fatal: message on stderr, exit status 1, and no
//! output file.

use std::fs;
use std::io::{BufWriter, Write};
use std::process;

use clap::{App, Arg};
use failure::{format_err, Error};

use ppmcarve::{carve, find_vertical_seam, ppm, resolve_count};

fn run() -> Result<(), Error> {
    let matches = App::new("ppmcarve")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware narrowing for plain-text PPM images")
        .arg(
            Arg::with_name("stats")
                .short("s")
                .help("Print the image's width, height, and mean brightness"),
        )
        .arg(
            Arg::with_name("seam")
                .short("p")
                .help("Print the next minimal seam, one column per line, bottom row first"),
        )
        .arg(
            Arg::with_name("count")
                .short("n")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("Number of seams to carve; -1 or absent removes every column"),
        )
        .arg(
            Arg::with_name("ppmfile")
                .help("The image to narrow")
                .required(true)
                .index(1),
        )
        .get_matches();

    let filename = matches.value_of("ppmfile").unwrap();
    let bytes = fs::read(filename)?;
    let mut image = ppm::parse(&bytes, filename)?;
    let dims = image.dimensions();

    // Mode priority: stats beats seam printing beats carving.
    if matches.is_present("stats") {
        println!("width: {}", dims.width);
        println!("height: {}", dims.height);
        println!("brightness: {}", image.brightness());
        return Ok(());
    }

    if matches.is_present("seam") {
        for column in find_vertical_seam(&image, dims.width) {
            println!("{}", column);
        }
        return Ok(());
    }

    let requested = match matches.value_of("count") {
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| format_err!("carve count '{}' is not an integer", raw))?,
        ),
        None => None,
    };
    let count = resolve_count(requested, dims.width)?;
    carve(&mut image, count);

    let mut out = BufWriter::new(fs::File::create("out.ppm")?);
    ppm::write(&mut out, &image)?;
    out.flush()?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ppmcarve: {}", err);
        process::exit(1);
    }
}
