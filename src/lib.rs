#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane for
//! which the orbit `z -> z^2 + c` stays bounded.  Any orbit whose
//! magnitude passes 2 goes to infinity, so for each point we count how
//! many steps that takes.  This "velocity" is the number used to
//! render the image.
//!
//! Rendering happens in two phases.  The first samples a rectangle of
//! the complex plane at a fixed resolution and produces a map of
//! escape counts; every pixel is independent, so rows are spread over
//! a pool of worker threads.  The second scans the map for its
//! smallest and largest counts and turns every count into a colour.
//! Nothing here opens windows or writes files: the colour buffer is
//! handed back to the caller, who can encode or display it.
//!
//! ```no_run
//! use mandelbrot::{EscapeTimeRenderer, Palette, Region};
//!
//! let region = Region::new(-2.0, 0.5, -1.25, 1.25).unwrap();
//! let renderer = EscapeTimeRenderer::new(1024, 1024, region, 256).unwrap();
//! let counts = renderer.render(8);
//! let image = Palette::default().colourize_threaded(&counts, 8);
//! assert_eq!(image.as_bytes().len(), 1024 * 1024 * 3);
//! ```

extern crate crossbeam;
extern crate failure;
extern crate itertools;
extern crate log;
extern crate num;

pub mod error;
pub mod escape;
pub mod grid;
pub mod palette;
pub mod planes;
pub mod workers;

pub use error::ConfigError;
pub use escape::escape_time;
pub use grid::{EscapeTimeRenderer, IterationMap};
pub use palette::{hsv_to_rgb, sigmoid, Brightness, Hsv, HueArithmetic, Palette, Rgb, RgbBuffer};
pub use planes::{linspace, PlaneMapper, Region};
