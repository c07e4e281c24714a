// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised while setting up a render.  Once a renderer has been
//! constructed nothing downstream of it can fail.

use failure::Fail;

/// A render was requested with parameters that cannot produce a
/// well-formed buffer.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// Both sides of the pixel grid need at least two samples, or the
    /// coordinate stride is undefined.
    #[fail(display = "grid must be at least 2x2 pixels, got {}x{}", width, height)]
    DegenerateGrid {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The region of the complex plane has no area, is inverted, or
    /// contains a non-finite bound.
    #[fail(
        display = "region must satisfy x_min < x_max and y_min < y_max, got ({}, {}, {}, {})",
        x_min, x_max, y_min, y_max
    )]
    DegenerateRegion {
        /// Left edge.
        x_min: f64,
        /// Right edge.
        x_max: f64,
        /// Lower edge.
        y_min: f64,
        /// Upper edge.
        y_max: f64,
    },

    /// An iteration cap of zero would classify every point as a member.
    #[fail(display = "iteration cap must be positive")]
    NoIterations,
}
