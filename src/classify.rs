// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-pixel classification: which root does Newton's method carry
//! this point to, and how quickly?
//!
//! This is called once for every pixel of every frame, so it does not
//! allocate, lock, or log.

use function::{ComplexFunction, FrameState};
use num::complex::Complex64;
use roots::RootSet;

/// The outcome of following one point.  `root` is None when the
/// point escaped: it failed to land on any known root, or the
/// iteration broke down along the way.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelResult {
    /// Index of the root the point converged to.
    pub root: Option<usize>,
    /// The (zero-based) iteration on which the point arrived.
    pub depth: usize,
    /// Fractional correction to `depth`, in [0, 1].
    pub smooth: f64,
}

impl PixelResult {
    /// The "no convergence" result.
    pub const ESCAPED: PixelResult = PixelResult {
        root: None,
        depth: 0,
        smooth: 0.0,
    };

    /// The root index with -1 standing for "escaped".
    pub fn root_index(&self) -> i64 {
        match self.root {
            Some(index) => index as i64,
            None => -1,
        }
    }

    /// `depth + smooth`: a continuous iteration count, for palettes
    /// that shade without banding.
    pub fn smooth_depth(&self) -> f64 {
        self.depth as f64 + self.smooth
    }
}

/// Where between two iterations the orbit crossed the tolerance,
/// measured on a log scale.  `before` and `after` are the distances to
/// the matched root on either side of the final step.
#[inline]
pub fn smoothing(tolerance: f64, before: f64, after: f64) -> f64 {
    if before <= 0.0 || after <= 0.0 {
        return 0.0;
    }
    let (lt, l0, l1) = (tolerance.ln(), before.ln(), after.ln());
    let denominator = l1 - l0;
    if denominator == 0.0 {
        return 0.0;
    }
    let smooth = (lt - l0) / denominator;
    if smooth.is_finite() {
        smooth.max(0.0).min(1.0)
    } else {
        0.0
    }
}

/// Runs Newton's method from `z` for at most `max_iterations` steps,
/// stopping on the first step that lands within `tolerance` of a root.
#[inline]
pub fn classify(
    function: &ComplexFunction,
    roots: &RootSet,
    state: &FrameState,
    z: Complex64,
    tolerance: f64,
    max_iterations: usize,
) -> PixelResult {
    let mut z = z;
    for depth in 0..max_iterations {
        let previous = z;
        z = match function.newton_step(z, state) {
            Some(next) => next,
            None => return PixelResult::ESCAPED,
        };
        if let Some(root) = roots.matching(z, tolerance) {
            return PixelResult {
                root: Some(root.index),
                depth,
                smooth: smoothing(
                    tolerance,
                    (previous - root.point).norm(),
                    (z - root.point).norm(),
                ),
            };
        }
    }
    PixelResult::ESCAPED
}
