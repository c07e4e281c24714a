// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iteration for a single point.

use num::Complex;

/// Once the squared magnitude of an orbit passes this, the orbit is
/// guaranteed to go to infinity.
pub const DIVERGENCE_BOUND_SQR: f64 = 4.0;

/// This is our classic iterator function.  The orbit starts at the
/// point itself, `z_0 = c`, and `z_{n+1} = z_n^2 + c`.  Returns the
/// first `n` below `iterations` for which `|z_n| > 2`.
///
/// A point that never escapes returns 0, which is also what a point
/// already outside the bound reports.  The two cases are not told
/// apart.
#[inline]
pub fn escape_time(c: Complex<f64>, iterations: u32) -> u32 {
    let mut z = c;
    for n in 0..iterations {
        if z.norm_sqr() > DIVERGENCE_BOUND_SQR {
            return n;
        }
        z = z * z + c;
    }
    0
}
