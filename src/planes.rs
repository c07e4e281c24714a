// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane bounded by a Region.  The
//! mapper samples both axes of the complex rectangle inclusively, so
//! the first and last pixel of each axis sit exactly on the edges of
//! the region.
use log::debug;
use num::Complex;

use crate::error::ConfigError;

/// The rectangle of the complex plane to sample, treating the real
/// part as the x-component and the imaginary part as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    /// Left edge (smallest real part).
    pub x_min: f64,
    /// Right edge (largest real part).
    pub x_max: f64,
    /// Lower edge (smallest imaginary part).
    pub y_min: f64,
    /// Upper edge (largest imaginary part).
    pub y_max: f64,
}

impl Region {
    /// Constructor.  Rejects regions with no area, inverted bounds, or
    /// non-finite bounds.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Region, ConfigError> {
        let finite = [x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite());
        if !finite || x_min >= x_max || y_min >= y_max {
            return Err(ConfigError::DegenerateRegion {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }
        Ok(Region {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// The left-lower corner as a complex number.
    pub fn leftlower(&self) -> Complex<f64> {
        Complex::new(self.x_min, self.y_min)
    }

    /// The right-upper corner as a complex number.
    pub fn rightupper(&self) -> Complex<f64> {
        Complex::new(self.x_max, self.y_max)
    }
}

/// Returns `count` evenly spaced values from `minimum` to `maximum`
/// inclusive.  Each value is computed from its index rather than by
/// accumulating the stride, so the last entry is exactly `maximum`.
///
/// `count` must be at least 2; PlaneMapper guarantees that for the
/// axes it builds.
pub fn linspace(minimum: f64, maximum: f64, count: usize) -> Vec<f64> {
    debug_assert!(count >= 2, "linspace needs at least two samples");
    (0..count)
        .map(|i| axis_value(minimum, maximum, count, i))
        .collect()
}

/// Describes the width and height of an integral plane that is assumed
/// to start at 0,0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the column, row of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex cartesian plane.  Maps pixels of the one to points of
/// the other.  Row 0 maps to `y_min`; callers wanting row 0 at the top
/// of a displayed image choose their region accordingly.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// Width and height of the pixel grid.
    pub integral_plane: IntegralPlane,
    /// The sampled rectangle of the complex plane.
    pub region: Region,
}

impl PlaneMapper {
    /// Constructor.  Both dimensions of the pixel grid must be at least
    /// two so that each axis has a defined stride.  The region is
    /// checked again, since its fields are public.
    pub fn new(width: usize, height: usize, region: Region) -> Result<PlaneMapper, ConfigError> {
        if width < 2 || height < 2 {
            return Err(ConfigError::DegenerateGrid { width, height });
        }
        let region = Region::new(region.x_min, region.x_max, region.y_min, region.y_max)?;
        debug!("plane {}x{} over {:?}", width, height, region);
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            region,
        })
    }

    /// Width of the pixel grid.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Height of the pixel grid.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// A validated plane always has at least four pixels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The real part of every column, left to right.
    pub fn horizontal(&self) -> Vec<f64> {
        linspace(self.region.x_min, self.region.x_max, self.width())
    }

    /// The imaginary part of every row, from `y_min` to `y_max`.
    pub fn vertical(&self) -> Vec<f64> {
        linspace(self.region.y_min, self.region.y_max, self.height())
    }

    /// Given a pixel on the integral plane, return the point of the
    /// complex plane it samples.  Agrees exactly with the axes built by
    /// `horizontal` and `vertical`.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            axis_value(self.region.x_min, self.region.x_max, self.width(), pixel.0),
            axis_value(self.region.y_min, self.region.y_max, self.height(), pixel.1),
        )
    }
}

fn axis_value(minimum: f64, maximum: f64, count: usize, index: usize) -> f64 {
    let last = count - 1;
    if index == last {
        maximum
    } else {
        minimum + (maximum - minimum) / (last as f64) * (index as f64)
    }
}
