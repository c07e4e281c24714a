// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
extern crate log;
extern crate mandelbrot;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::{err_msg, Error};
use image::ColorType;
use log::info;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use mandelbrot::{Brightness, EscapeTimeRenderer, HueArithmetic, Palette, Region, RgbBuffer};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_region(s: &str) -> Option<Region> {
    let bounds: Vec<f64> = s
        .split(',')
        .map(|v| f64::from_str(v.trim()))
        .collect::<Result<_, _>>()
        .ok()?;
    match bounds.as_slice() {
        [x_min, x_max, y_min, y_max] => Region::new(*x_min, *x_max, *y_min, *y_max).ok(),
        _ => None,
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const REGION: &str = "region";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const BRIGHTNESS: &str = "brightness";
const HUE: &str = "hue";
const SINGLE: &str = "single";

fn args(default_threads: &str) -> ArgMatches {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; the format follows the extension"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1024x1024")
                .validator(|s| match parse_pair::<u16>(&s, 'x') {
                    Some((w, h)) if w >= 2 && h >= 2 => Ok(()),
                    Some(_) => Err("Image must be at least 2x2".to_string()),
                    None => Err("Could not parse output image size".to_string()),
                })
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(REGION)
                .required(false)
                .long(REGION)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,0.5,-1.25,1.25")
                .validator(|s| match parse_region(&s) {
                    Some(_) => Ok(()),
                    None => Err(
                        "Region must be XMIN,XMAX,YMIN,YMAX with XMIN < XMAX and YMIN < YMAX"
                            .to_string(),
                    ),
                })
                .help("Region of the complex plane to render"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_threads)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("256")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        65_535,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 65535",
                    )
                })
                .help("Maximum number of iterations per point"),
        )
        .arg(
            Arg::with_name(BRIGHTNESS)
                .required(false)
                .long(BRIGHTNESS)
                .short("b")
                .takes_value(true)
                .possible_values(&["sigmoid", "linear"])
                .default_value("sigmoid")
                .help("How pixel brightness follows the escape count"),
        )
        .arg(
            Arg::with_name(HUE)
                .required(false)
                .long(HUE)
                .takes_value(true)
                .possible_values(&["integer", "continuous"])
                .default_value("integer")
                .help("Whole-degree or real-valued hue steps"),
        )
        .arg(
            Arg::with_name(SINGLE)
                .long(SINGLE)
                .help("Render on the calling thread only"),
        )
        .get_matches()
}

fn write_image(outfile: &str, image: &RgbBuffer) -> Result<(), Error> {
    image::save_buffer(
        Path::new(outfile),
        image.as_bytes(),
        image.width() as u32,
        image.height() as u32,
        ColorType::RGB(8),
    )?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<u16>(s, 'x'))
        .ok_or_else(|| err_msg("Error parsing image dimensions"))?;
    let region = matches
        .value_of(REGION)
        .and_then(parse_region)
        .ok_or_else(|| err_msg("Error parsing region"))?;
    let threads = usize::from_str(matches.value_of(THREADS).unwrap_or("1"))?;
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap_or("256"))?;
    let brightness = match matches.value_of(BRIGHTNESS) {
        Some("linear") => Brightness::Linear,
        _ => Brightness::default(),
    };
    let hue_arithmetic = match matches.value_of(HUE) {
        Some("continuous") => HueArithmetic::Continuous,
        _ => HueArithmetic::Integer,
    };
    let output = matches
        .value_of(OUTPUT)
        .ok_or_else(|| err_msg("No output file"))?;

    let renderer =
        EscapeTimeRenderer::new(usize::from(width), usize::from(height), region, iterations)?;
    info!(
        "rendering {}x{} from {} to {}",
        width,
        height,
        region.leftlower(),
        region.rightupper()
    );

    let started = Instant::now();
    let counts = if matches.is_present(SINGLE) {
        renderer.render_single()
    } else {
        renderer.render(threads)
    };
    info!("escape times computed in {:?}", started.elapsed());

    let started = Instant::now();
    let palette = Palette {
        brightness,
        hue_arithmetic,
        ..Palette::default()
    };
    let image = if matches.is_present(SINGLE) {
        palette.colourize(&counts)
    } else {
        palette.colourize_threaded(&counts, threads)
    };
    info!("colours computed in {:?}", started.elapsed());

    write_image(output, &image)?;
    info!("wrote {}", output);
    Ok(())
}

fn main() {
    env_logger::init();
    let default_threads = num_cpus::get().to_string();
    let matches = args(&default_threads);
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
