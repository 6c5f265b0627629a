#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Newton fractal renderer
//!
//! Newton's method finds a root of a function by repeatedly sliding
//! down its tangent: `z <- z - f(z) / f'(z)`.  Started from a point
//! on the complex plane, it usually lands on one of the function's
//! roots, but *which* root is a famously delicate matter; the
//! boundaries between the basins of attraction are fractals.
//!
//! This crate colors each pixel of a viewport by the root its point
//! converges to and by how many steps that took.  It first finds the
//! roots (`roots`), then classifies every pixel (`classify`), with the
//! raster split into column segments rendered on parallel workers
//! (`render`).  Animations (`animation`) repeat the whole process per
//! frame under an evolving state.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

#[cfg(test)]
extern crate rand;
#[cfg(test)]
extern crate tempfile;

pub mod animation;
pub mod classify;
pub mod color;
pub mod config;
pub mod errors;
pub mod function;
pub mod output;
pub mod planes;
pub mod presets;
pub mod render;
pub mod roots;

pub use animation::Animation;
pub use classify::PixelResult;
pub use config::{Config, Settings};
pub use errors::{ConfigError, RenderError};
pub use function::{ComplexFunction, FrameState};
pub use render::{NewtonRenderer, Raster};
pub use roots::RootSet;
