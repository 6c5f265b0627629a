// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The function whose roots we chase, the state it may depend on, and
//! the single Newton step everything else is built from.
//!
//! Functions are plain `fn` pointers rather than trait objects: a
//! fractal definition is a handful of free functions, and the
//! renderer copies the record into every worker.

use num::complex::Complex64;
use num::Zero;

/// Step used by the central-difference derivative.
pub const DERIVATIVE_STEP: f64 = 0.000_000_001;

/// The named values that describe one frame of an animation.  Still
/// images get the empty default.  A snapshot is built once per frame
/// and only ever read afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameState {
    frame: usize,
    values: Vec<(&'static str, f64)>,
}

impl FrameState {
    /// An empty state for the given frame.
    pub fn new(frame: usize) -> Self {
        FrameState {
            frame,
            values: Vec::new(),
        }
    }

    /// Adds (or replaces) a named value.
    pub fn with(mut self, name: &'static str, value: f64) -> Self {
        match self.values.iter().position(|(n, _)| *n == name) {
            Some(i) => self.values[i].1 = value,
            None => self.values.push((name, value)),
        }
        self
    }

    /// The frame this state was produced for.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Looks up a named value.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Looks up a named value, falling back to `default` when absent.
    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }
}

/// f(z) for a given frame.  Domain, overflow and division problems
/// show up as infinite or NaN results.
pub type EvalFn = fn(Complex64, &FrameState) -> Complex64;

/// A complex function, optionally with its analytic derivative.
#[derive(Copy, Clone)]
pub struct ComplexFunction {
    /// f(z)
    pub value: EvalFn,
    /// f'(z), when known in closed form.
    pub slope: Option<EvalFn>,
}

impl ComplexFunction {
    /// A function whose derivative will be estimated numerically.
    pub fn new(value: EvalFn) -> Self {
        ComplexFunction { value, slope: None }
    }

    /// A function with a closed-form derivative.
    pub fn with_slope(value: EvalFn, slope: EvalFn) -> Self {
        ComplexFunction {
            value,
            slope: Some(slope),
        }
    }

    /// f(z)
    #[inline]
    pub fn value(&self, z: Complex64, state: &FrameState) -> Complex64 {
        (self.value)(z, state)
    }

    /// f'(z): the analytic derivative if there is one, the central
    /// difference `(f(z+h) - f(z-h)) / 2h` otherwise.
    #[inline]
    pub fn derivative(&self, z: Complex64, state: &FrameState) -> Complex64 {
        match self.slope {
            Some(slope) => slope(z, state),
            None => {
                let h = DERIVATIVE_STEP;
                (self.value(z + h, state) - self.value(z - h, state)) / (2.0 * h)
            }
        }
    }

    /// One step of Newton's method, `z - f(z) / f'(z)`.  Returns None
    /// when the derivative is zero or anything along the way stops
    /// being a finite number.
    #[inline]
    pub fn newton_step(&self, z: Complex64, state: &FrameState) -> Option<Complex64> {
        let slope = self.derivative(z, state);
        if slope.is_zero() || !slope.is_finite() {
            return None;
        }
        let next = z - self.value(z, state) / slope;
        if next.is_finite() {
            Some(next)
        } else {
            None
        }
    }
}

impl ::std::fmt::Debug for ComplexFunction {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        f.debug_struct("ComplexFunction")
            .field("analytic_slope", &self.slope.is_some())
            .finish()
    }
}
