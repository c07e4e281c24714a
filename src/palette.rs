// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns an iteration map into RGB pixels.
//!
//! Hue comes from where a count sits between the smallest and largest
//! count in the whole map, rotated by a fixed offset.  Brightness comes
//! from the raw count, either through a sigmoid that keeps the low,
//! fast-escaping counts dark, or linearly against the iteration cap.
//! Saturation is constant.  The global extrema are scanned once,
//! before any pixel is coloured.

use log::debug;
use num::clamp;

use crate::grid::IterationMap;
use crate::workers::for_each_band;

/// Where the default sigmoid crosses one half.
pub const SIGMOID_MIDPOINT: f64 = 6.5;

/// A colour in hue (degrees, [0, 360)), saturation and value ([0, 1]).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsv {
    /// Angle in degrees.
    pub h: f64,
    /// A fraction between 0 and 1.
    pub s: f64,
    /// A fraction between 0 and 1.
    pub v: f64,
}

/// A colour with each channel a fraction between 0 and 1.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgb {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Rgb {
    /// Scale each channel to eight bits, rounding to nearest.
    pub fn to_bytes(&self) -> [u8; 3] {
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

fn channel(c: f64) -> u8 {
    clamp((c * 255.0).round(), 0.0, 255.0) as u8
}

/// The standard sector-wise HSV to RGB conversion.  Hues outside
/// [0, 360) wrap around the circle.  A saturation of zero or less is
/// grey at the given value whatever the hue.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    if hsv.s <= 0.0 {
        return Rgb {
            r: hsv.v,
            g: hsv.v,
            b: hsv.v,
        };
    }
    let h = hsv.h.rem_euclid(360.0);
    let hh = (if h >= 360.0 { 0.0 } else { h }) / 60.0;
    let sector = hh.floor();
    let ff = hh - sector;
    let v = hsv.v;
    let p = v * (1.0 - hsv.s);
    let q = v * (1.0 - hsv.s * ff);
    let t = v * (1.0 - hsv.s * (1.0 - ff));

    let (r, g, b) = match sector as i64 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb { r, g, b }
}

/// The logistic curve centred on `midpoint`.
#[inline]
pub fn sigmoid(count: u32, midpoint: f64) -> f64 {
    1.0 / (1.0 + (-(f64::from(count) - midpoint)).exp())
}

/// How a pixel's brightness is derived from its count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Brightness {
    /// `1 / (1 + e^-(count - midpoint))`.
    Sigmoid {
        /// The count at which brightness is one half.
        midpoint: f64,
    },
    /// `count / iterations`.
    Linear,
}

impl Default for Brightness {
    fn default() -> Self {
        Brightness::Sigmoid {
            midpoint: SIGMOID_MIDPOINT,
        }
    }
}

/// How a count's position between the extrema becomes an angle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HueArithmetic {
    /// Whole degrees: `360 / span` truncates, and the sum is reduced
    /// with integer remainder.  Maps spanning more than 360 counts
    /// collapse onto the offset hue.
    Integer,
    /// `360 / span` as a real, so the extrema sweep the full circle.
    Continuous,
}

impl Default for HueArithmetic {
    fn default() -> Self {
        HueArithmetic::Integer
    }
}

/// A dense, row-major buffer of 8-bit RGB triples.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbBuffer {
    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw bytes, three per pixel, one row after another.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The colour of one pixel, or None outside the buffer.
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 3]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let at = (row * self.width + col) * 3;
        Some([self.data[at], self.data[at + 1], self.data[at + 2]])
    }

    /// Surrender the raw bytes to an encoder.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// The colouring parameters.  The default reproduces the classic look:
/// hue rotated half a turn, full saturation, sigmoid brightness.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    /// How brightness follows the count.
    pub brightness: Brightness,
    /// How the hue is computed from the count.
    pub hue_arithmetic: HueArithmetic,
    /// Degrees added to every normalised hue.
    pub hue_offset: f64,
    /// Saturation of every pixel.
    pub saturation: f64,
    /// Hue used when every count in the map is the same.
    pub uniform_hue: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            brightness: Brightness::default(),
            hue_arithmetic: HueArithmetic::default(),
            hue_offset: 180.0,
            saturation: 1.0,
            uniform_hue: 0.0,
        }
    }
}

impl Palette {
    /// A default palette with the given brightness curve.
    pub fn with_brightness(brightness: Brightness) -> Self {
        Palette {
            brightness,
            ..Palette::default()
        }
    }

    /// A default palette with the given hue arithmetic.
    pub fn with_hue_arithmetic(hue_arithmetic: HueArithmetic) -> Self {
        Palette {
            hue_arithmetic,
            ..Palette::default()
        }
    }

    /// Hue of `count` given the extrema of the whole map, in [0, 360).
    pub fn hue(&self, count: u32, vmin: u32, vmax: u32) -> f64 {
        if vmax == vmin {
            return self.uniform_hue.rem_euclid(360.0);
        }
        let position = count.saturating_sub(vmin);
        match self.hue_arithmetic {
            HueArithmetic::Integer => {
                let step = 360 / i64::from(vmax - vmin);
                let offset = self.hue_offset.round() as i64;
                (step * i64::from(position) + offset).rem_euclid(360) as f64
            }
            HueArithmetic::Continuous => {
                let span = f64::from(vmax - vmin);
                ((360.0 / span) * f64::from(position) + self.hue_offset).rem_euclid(360.0)
            }
        }
    }

    /// Brightness of `count`.
    pub fn value(&self, count: u32, iterations: u32) -> f64 {
        match self.brightness {
            Brightness::Sigmoid { midpoint } => sigmoid(count, midpoint),
            Brightness::Linear => {
                if iterations == 0 {
                    0.0
                } else {
                    clamp(f64::from(count) / f64::from(iterations), 0.0, 1.0)
                }
            }
        }
    }

    /// Full colour of one count.
    pub fn colour(&self, count: u32, vmin: u32, vmax: u32, iterations: u32) -> Rgb {
        hsv_to_rgb(Hsv {
            h: self.hue(count, vmin, vmax),
            s: self.saturation,
            v: self.value(count, iterations),
        })
    }

    fn colour_row(
        &self,
        counts: &[u32],
        pixels: &mut [u8],
        extrema: (u32, u32),
        iterations: u32,
    ) {
        for (count, pixel) in counts.iter().zip(pixels.chunks_mut(3)) {
            let rgb = self.colour(*count, extrema.0, extrema.1, iterations);
            pixel.copy_from_slice(&rgb.to_bytes());
        }
    }

    /// Colour a whole map on the calling thread.
    pub fn colourize(&self, map: &IterationMap) -> RgbBuffer {
        let extrema = map.min_max();
        let mut data = vec![0 as u8; map.len() * 3];
        for (counts, pixels) in map
            .counts()
            .chunks(map.width())
            .zip(data.chunks_mut(map.width() * 3))
        {
            self.colour_row(counts, pixels, extrema, map.iterations());
        }
        RgbBuffer {
            width: map.width(),
            height: map.height(),
            data,
        }
    }

    /// Colour a whole map with `threads` workers, a row at a time.  The
    /// extrema scan completes before any worker starts.
    pub fn colourize_threaded(&self, map: &IterationMap, threads: usize) -> RgbBuffer {
        let extrema = map.min_max();
        debug!("colouring with counts in {}..={}", extrema.0, extrema.1);
        let mut data = vec![0 as u8; map.len() * 3];
        {
            let rows = map
                .counts()
                .chunks(map.width())
                .zip(data.chunks_mut(map.width() * 3));
            let iterations = map.iterations();
            for_each_band(threads, rows, |(counts, pixels)| {
                self.colour_row(counts, pixels, extrema, iterations)
            });
        }
        RgbBuffer {
            width: map.width(),
            height: map.height(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::EscapeTimeRenderer;
    use crate::planes::Region;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn primary_hues() {
        let red = hsv_to_rgb(Hsv { h: 0.0, s: 1.0, v: 1.0 });
        assert_eq!(red.to_bytes(), [255, 0, 0]);
        let green = hsv_to_rgb(Hsv { h: 120.0, s: 1.0, v: 1.0 });
        assert_eq!(green.to_bytes(), [0, 255, 0]);
        let blue = hsv_to_rgb(Hsv { h: 240.0, s: 1.0, v: 1.0 });
        assert_eq!(blue.to_bytes(), [0, 0, 255]);
    }

    #[test]
    fn secondary_hues_and_wraparound() {
        assert_eq!(hsv_to_rgb(Hsv { h: 60.0, s: 1.0, v: 1.0 }).to_bytes(), [255, 255, 0]);
        assert_eq!(hsv_to_rgb(Hsv { h: 180.0, s: 1.0, v: 1.0 }).to_bytes(), [0, 255, 255]);
        assert_eq!(hsv_to_rgb(Hsv { h: 300.0, s: 1.0, v: 1.0 }).to_bytes(), [255, 0, 255]);
        assert_eq!(hsv_to_rgb(Hsv { h: 360.0, s: 1.0, v: 1.0 }).to_bytes(), [255, 0, 0]);
    }

    #[test]
    fn interpolates_inside_a_sector() {
        let rgb = hsv_to_rgb(Hsv { h: 30.0, s: 1.0, v: 1.0 });
        assert!(close(rgb.r, 1.0));
        assert!(close(rgb.g, 0.5));
        assert!(close(rgb.b, 0.0));
    }

    #[test]
    fn zero_saturation_is_grey() {
        for h in &[0.0, 90.0, 200.0, 359.0] {
            let rgb = hsv_to_rgb(Hsv { h: *h, s: 0.0, v: 0.25 });
            assert_eq!(rgb, Rgb { r: 0.25, g: 0.25, b: 0.25 });
        }
    }

    #[test]
    fn sigmoid_is_centred_at_the_midpoint() {
        assert!(close(sigmoid(0, 0.0), 0.5));
        assert!(close(sigmoid(6, 6.5), 1.0 / (1.0 + (0.5f64).exp())));
        assert!(sigmoid(0, SIGMOID_MIDPOINT) < 0.01);
        assert!(sigmoid(255, SIGMOID_MIDPOINT) > 0.999);
        assert!(sigmoid(6, SIGMOID_MIDPOINT) < 0.5 && sigmoid(7, SIGMOID_MIDPOINT) > 0.5);
    }

    #[test]
    fn continuous_hue_spans_the_circle_from_the_offset() {
        let palette = Palette::with_hue_arithmetic(HueArithmetic::Continuous);
        assert!(close(palette.hue(10, 10, 100), 180.0));
        assert!(close(palette.hue(55, 10, 100), 0.0));
        assert!(close(palette.hue(100, 10, 100), 180.0));
        assert!(close(palette.hue(40, 10, 100), 300.0));
    }

    #[test]
    fn integer_hue_truncates_the_step() {
        let palette = Palette::default();
        assert_eq!(palette.hue_arithmetic, HueArithmetic::Integer);
        // 360 / 255 truncates to one degree per count.
        assert_eq!(palette.hue(100, 0, 255), 280.0);
        assert_eq!(palette.hue(0, 0, 255), 180.0);
        assert_eq!(palette.hue(200, 0, 255), 20.0);
        // 360 / 100 truncates to three.
        assert_eq!(palette.hue(50, 0, 100), 330.0);
        // More than 360 counts apart leaves only the offset.
        assert_eq!(palette.hue(300, 0, 1000), 180.0);
    }

    #[test]
    fn integer_and_continuous_differ_on_uneven_spans() {
        let continuous = Palette::with_hue_arithmetic(HueArithmetic::Continuous);
        assert!(close(continuous.hue(100, 0, 255), (360.0 / 255.0 * 100.0 + 180.0) % 360.0));
        assert!(Palette::default().hue(100, 0, 255) != continuous.hue(100, 0, 255));
    }

    #[test]
    fn out_of_range_hues_wrap() {
        let wrapped = |h: f64| hsv_to_rgb(Hsv { h, s: 1.0, v: 1.0 }).to_bytes();
        assert_eq!(wrapped(-90.0), wrapped(270.0));
        assert_eq!(wrapped(450.0), wrapped(90.0));
        assert_eq!(wrapped(720.0), wrapped(0.0));
    }

    #[test]
    fn fallback_hue_is_reduced() {
        let mut palette = Palette::default();
        palette.uniform_hue = -90.0;
        assert_eq!(palette.hue(3, 3, 3), 270.0);
        palette.uniform_hue = 450.0;
        assert_eq!(palette.hue(3, 3, 3), 90.0);
    }

    #[test]
    fn uniform_maps_use_the_fallback_hue() {
        let palette = Palette::default();
        assert_eq!(palette.hue(7, 7, 7), 0.0);
    }

    #[test]
    fn linear_brightness_follows_the_cap() {
        let palette = Palette::with_brightness(Brightness::Linear);
        assert!(close(palette.value(0, 256), 0.0));
        assert!(close(palette.value(128, 256), 0.5));
        assert!(close(palette.value(256, 256), 1.0));
    }

    #[test]
    fn bytes_round_to_nearest() {
        let rgb = Rgb { r: 0.5, g: 0.999, b: 0.001 };
        assert_eq!(rgb.to_bytes(), [128, 255, 0]);
    }

    #[test]
    fn a_set_interior_takes_the_fallback_path() {
        let renderer =
            EscapeTimeRenderer::new(16, 16, Region::new(-0.1, 0.1, -0.1, 0.1).unwrap(), 256)
                .unwrap();
        let map = renderer.render(2);
        let image = Palette::default().colourize(&map);
        assert_eq!(image.as_bytes().len(), 16 * 16 * 3);
        let expected = hsv_to_rgb(Hsv {
            h: 0.0,
            s: 1.0,
            v: sigmoid(0, SIGMOID_MIDPOINT),
        })
        .to_bytes();
        for row in 0..16 {
            for col in 0..16 {
                assert_eq!(image.pixel(row, col), Some(expected));
            }
        }
    }

    #[test]
    fn threaded_colouring_matches_single() {
        let renderer =
            EscapeTimeRenderer::new(64, 48, Region::new(-2.0, 0.5, -1.25, 1.25).unwrap(), 256)
                .unwrap();
        let map = renderer.render(4);
        for palette in &[Palette::default(), Palette::with_brightness(Brightness::Linear)] {
            let single = palette.colourize(&map);
            assert_eq!(palette.colourize_threaded(&map, 3), single);
            assert_eq!(single.width(), 64);
            assert_eq!(single.height(), 48);
            assert_eq!(single.pixel(48, 0), None);
        }
    }

    #[test]
    fn pixels_follow_their_counts() {
        let renderer =
            EscapeTimeRenderer::new(32, 32, Region::new(-2.0, 0.5, -1.25, 1.25).unwrap(), 256)
                .unwrap();
        let map = renderer.render_single();
        let palette = Palette::default();
        let image = palette.colourize(&map);
        let (vmin, vmax) = map.min_max();
        let count = map.get(13, 21).unwrap();
        assert_eq!(
            image.pixel(13, 21),
            Some(palette.colour(count, vmin, vmax, 256).to_bytes())
        );
    }
}
