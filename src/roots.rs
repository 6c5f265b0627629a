// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Root discovery.
//!
//! Before a single pixel can be colored we need to know where the
//! roots of the function are, and we need them in an order that does
//! not change from run to run, because the palettes pick colors by
//! root index.
//!
//! The search is brute force: drop a 100x100 grid of starting points
//! on the square [-5, 5] x [-5, 5] and let Newton's method carry each
//! one for up to a hundred steps.  A starting point that wanders into
//! the neighbourhood of a root we already know is dropped; one that
//! blows up (zero derivative, infinities, NaN) is dropped; whatever
//! survives the full hundred steps is a new root.  The window is
//! fixed and has nothing to do with the rendered viewport, so a
//! function whose roots cannot be reached from it will come back with
//! fewer roots than it has.

use function::{ComplexFunction, FrameState};
use itertools::iproduct;
use num::complex::Complex64;
use std::cmp::Ordering;

/// Samples along each axis of the discovery grid.
pub const DISCOVERY_SAMPLES: usize = 100;
/// Lower corner of the (square) discovery window, on both axes.
pub const DISCOVERY_MIN: f64 = -5.0;
/// Upper corner of the discovery window, on both axes.
pub const DISCOVERY_MAX: f64 = 5.0;
const DISCOVERY_PASSES: usize = 10;
const DISCOVERY_STEPS: usize = 10;
/// Decimal places kept when ordering roots.
const SORT_PRECISION: f64 = 100_000_000.0;

/// A root of the function.  The index is its position in the sorted
/// root set, and is what the palettes see.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Root {
    /// Position in the root set.
    pub index: usize,
    /// Where the root is.
    pub point: Complex64,
}

/// Whether two points lie within `tolerance` of each other on both axes.
#[inline]
pub fn within(a: Complex64, b: Complex64, tolerance: f64) -> bool {
    let diff = a - b;
    diff.re.abs() < tolerance && diff.im.abs() < tolerance
}

#[inline]
fn rounded(x: f64) -> f64 {
    (x * SORT_PRECISION).round() / SORT_PRECISION
}

fn canonical_order(a: &Complex64, b: &Complex64) -> Ordering {
    (rounded(a.re), rounded(a.im))
        .partial_cmp(&(rounded(b.re), rounded(b.im)))
        .unwrap_or(Ordering::Equal)
}

/// The roots of a function for one frame, sorted by real part and
/// then imaginary part.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RootSet {
    roots: Vec<Root>,
}

impl RootSet {
    /// Builds a root set from arbitrary points: sorts them into
    /// canonical order and hands out indices.  The points are assumed
    /// to be distinct already.
    pub fn from_points(mut points: Vec<Complex64>) -> Self {
        points.sort_by(canonical_order);
        RootSet {
            roots: points
                .into_iter()
                .enumerate()
                .map(|(index, point)| Root { index, point })
                .collect(),
        }
    }

    /// The roots, in index order.
    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    /// Number of roots found.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// True when discovery found nothing at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// The first root within `tolerance` of `z` on both axes.
    #[inline]
    pub fn matching(&self, z: Complex64, tolerance: f64) -> Option<&Root> {
        self.roots.iter().find(|root| within(z, root.point, tolerance))
    }

    /// The root closest to `z`, by euclidean distance.
    pub fn nearest(&self, z: Complex64) -> Option<&Root> {
        self.roots.iter().min_by(|a, b| {
            (a.point - z)
                .norm()
                .partial_cmp(&(b.point - z).norm())
                .unwrap_or(Ordering::Equal)
        })
    }
}

/// Follows one starting point through the discovery budget.  Returns
/// None if it re-converges onto a known root or stops being a
/// number; otherwise the point it ended on.
fn descend(
    function: &ComplexFunction,
    state: &FrameState,
    start: Complex64,
    found: &[Complex64],
    tolerance: f64,
) -> Option<Complex64> {
    let known = |z: Complex64| found.iter().any(|root| within(z, *root, tolerance));
    let mut z = start;
    for _ in 0..DISCOVERY_PASSES {
        for _ in 0..DISCOVERY_STEPS {
            if known(z) {
                return None;
            }
            z = function.newton_step(z, state)?;
        }
    }
    if known(z) {
        None
    } else {
        Some(z)
    }
}

/// Finds the roots of `function` under `state`.  Never fails; a
/// function with no reachable roots gives an empty set.
pub fn find_roots(function: &ComplexFunction, state: &FrameState, tolerance: f64) -> RootSet {
    let step = (DISCOVERY_MAX - DISCOVERY_MIN) / (DISCOVERY_SAMPLES as f64);
    let mut found: Vec<Complex64> = vec![];
    for (x, y) in iproduct!(0..DISCOVERY_SAMPLES, 0..DISCOVERY_SAMPLES) {
        let start = Complex64::new(
            DISCOVERY_MIN + (x as f64) * step,
            DISCOVERY_MIN + (y as f64) * step,
        );
        if let Some(root) = descend(function, state, start, &found, tolerance) {
            trace!("new root {} from sample {}", root, start);
            found.push(root);
        }
    }
    let roots = RootSet::from_points(found);
    debug!("frame {}: found {} roots", state.frame(), roots.len());
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 0.000_001;

    fn cubic(z: Complex64, _: &FrameState) -> Complex64 {
        z * z * z - 1.0
    }

    fn constant(_: Complex64, _: &FrameState) -> Complex64 {
        Complex64::new(1.0, 0.0)
    }

    fn scaled_cubic(z: Complex64, state: &FrameState) -> Complex64 {
        let s = state.get_or("scale", 1.0);
        z * z * z - s * s * s
    }

    #[test]
    fn finds_the_cube_roots_of_unity_in_order() {
        let roots = find_roots(&ComplexFunction::new(cubic), &FrameState::default(), TOLERANCE);
        assert_eq!(roots.len(), 3);
        let half_sqrt3 = 3.0_f64.sqrt() / 2.0;
        let expected = [
            Complex64::new(-0.5, -half_sqrt3),
            Complex64::new(-0.5, half_sqrt3),
            Complex64::new(1.0, 0.0),
        ];
        for (root, want) in roots.roots().iter().zip(expected.iter()) {
            assert!(within(root.point, *want, TOLERANCE), "{} != {}", root.point, want);
        }
        let indices: Vec<usize> = roots.roots().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn discovery_is_deterministic() {
        let f = ComplexFunction::new(cubic);
        let first = find_roots(&f, &FrameState::default(), TOLERANCE);
        let second = find_roots(&f, &FrameState::default(), TOLERANCE);
        assert_eq!(first, second);
    }

    #[test]
    fn roots_are_sorted_and_distinct() {
        let f = ComplexFunction::new(scaled_cubic);
        let state = FrameState::new(0).with("scale", 1.5);
        let roots = find_roots(&f, &state, TOLERANCE);
        assert_eq!(roots.len(), 3);
        for pair in roots.roots().windows(2) {
            assert_eq!(canonical_order(&pair[0].point, &pair[1].point), Ordering::Less);
        }
        for a in roots.roots() {
            for b in roots.roots() {
                if a.index != b.index {
                    assert!(!within(a.point, b.point, TOLERANCE));
                }
            }
        }
    }

    #[test]
    fn state_moves_the_roots() {
        let f = ComplexFunction::new(scaled_cubic);
        let roots = find_roots(&f, &FrameState::new(0).with("scale", 2.0), TOLERANCE);
        let largest = roots.roots().last().unwrap();
        assert!(within(largest.point, Complex64::new(2.0, 0.0), TOLERANCE));
    }

    #[test]
    fn no_roots_when_nothing_converges() {
        let roots = find_roots(&ComplexFunction::new(constant), &FrameState::default(), TOLERANCE);
        assert!(roots.is_empty());
    }

    #[test]
    fn sorting_ignores_noise_below_precision() {
        let roots = RootSet::from_points(vec![
            Complex64::new(1.0, 0.5),
            Complex64::new(1.0 + 1e-12, -0.5),
            Complex64::new(-1.0, 0.0),
        ]);
        let points: Vec<Complex64> = roots.roots().iter().map(|r| r.point).collect();
        assert_eq!(points[0], Complex64::new(-1.0, 0.0));
        assert_eq!(points[1], Complex64::new(1.0 + 1e-12, -0.5));
        assert_eq!(points[2], Complex64::new(1.0, 0.5));
    }

    #[test]
    fn nearest_and_matching() {
        let roots = RootSet::from_points(vec![Complex64::new(1.0, 0.0), Complex64::new(-1.0, 0.0)]);
        assert_eq!(roots.nearest(Complex64::new(0.9, 0.3)).unwrap().index, 1);
        assert!(roots.matching(Complex64::new(1.0, 1e-7), TOLERANCE).is_some());
        assert!(roots.matching(Complex64::new(1.0, 1e-5), TOLERANCE).is_none());
    }
}
