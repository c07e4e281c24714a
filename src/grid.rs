// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time renderer.  Takes a plane, samples every pixel of it
//! with the escape-time iteration, and returns a row-major map of the
//! iteration counts.  Every pixel is independent of every other, so
//! the threaded renderer hands out whole rows to workers; each row is
//! written by exactly one of them.

use itertools::{Itertools, MinMaxResult};
use log::debug;
use num::Complex;

use crate::error::ConfigError;
use crate::escape::escape_time;
use crate::planes::{PlaneMapper, Region};
use crate::workers::for_each_band;

/// A dense, row-major buffer of escape-time counts together with the
/// shape and iteration cap that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationMap {
    width: usize,
    height: usize,
    iterations: u32,
    counts: Vec<u32>,
}

impl IterationMap {
    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The iteration cap the counts were computed with.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// The counts, one row after another.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// The number of pixels in the map.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Describes that the map holds no counts.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The count for one pixel, or None outside the map.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.height && col < self.width {
            self.counts.get(row * self.width + col).cloned()
        } else {
            None
        }
    }

    /// The smallest and largest count over the whole map.
    pub fn min_max(&self) -> (u32, u32) {
        match self.counts.iter().minmax() {
            MinMaxResult::NoElements => (0, 0),
            MinMaxResult::OneElement(v) => (*v, *v),
            MinMaxResult::MinMax(lo, hi) => (*lo, *hi),
        }
    }

    /// Surrender the raw counts.
    pub fn into_counts(self) -> Vec<u32> {
        self.counts
    }
}

/// Holds a validated plane and an iteration cap.  Once built, neither
/// rendering method can fail.
#[derive(Debug, Clone)]
pub struct EscapeTimeRenderer {
    plane: PlaneMapper,
    iterations: u32,
}

impl EscapeTimeRenderer {
    /// Requires the width and height of the image, the region of the
    /// complex plane to sample, and the iteration cap.
    pub fn new(
        width: usize,
        height: usize,
        region: Region,
        iterations: u32,
    ) -> Result<Self, ConfigError> {
        if iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        let plane = PlaneMapper::new(width, height, region)?;
        Ok(EscapeTimeRenderer { plane, iterations })
    }

    /// The plane being sampled.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The iteration cap.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    fn render_row(&self, row: &mut [u32], y: f64, xs: &[f64]) {
        for (cell, x) in row.iter_mut().zip(xs) {
            *cell = escape_time(Complex::new(*x, y), self.iterations);
        }
    }

    fn finish(&self, counts: Vec<u32>) -> IterationMap {
        IterationMap {
            width: self.plane.width(),
            height: self.plane.height(),
            iterations: self.iterations,
            counts,
        }
    }

    /// The main function for single-threaded rendering.
    pub fn render_single(&self) -> IterationMap {
        let xs = self.plane.horizontal();
        let ys = self.plane.vertical();
        let mut counts = vec![0 as u32; self.plane.len()];
        for (row, y) in counts.chunks_mut(self.plane.width()).zip(&ys) {
            self.render_row(row, *y, &xs);
        }
        self.finish(counts)
    }

    /// A multi-threaded version of the render function.  Rows are
    /// dealt out to `threads` workers as they become free; the result
    /// is identical to `render_single`.
    pub fn render(&self, threads: usize) -> IterationMap {
        debug!(
            "rendering {}x{} at {} iterations on {} threads",
            self.plane.width(),
            self.plane.height(),
            self.iterations,
            threads
        );
        let xs = self.plane.horizontal();
        let ys = self.plane.vertical();
        let mut counts = vec![0 as u32; self.plane.len()];
        {
            let rows = counts.chunks_mut(self.plane.width()).zip(ys.iter());
            let xs = &xs;
            for_each_band(threads, rows, |(row, y)| self.render_row(row, *y, xs));
        }
        self.finish(counts)
    }
}
