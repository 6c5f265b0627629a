// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render configuration.  `Settings` is the raw, freely editable
//! request; `Config` is what the renderer accepts, and it can only be
//! had by validating a `Settings`.  Once built it never changes.

use errors::ConfigError;
use planes::{Pixel, PlaneMapper};

use num::complex::Complex64;

/// The raw parameters of a render.  Every field is public so callers
/// can start from `Settings::default()` and change what they need.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// (min, max) of the real axis.
    pub x_range: (f64, f64),
    /// (min, max) of the imaginary axis.
    pub y_range: (f64, f64),
    /// Distance, on each axis, under which a point counts as a root.
    pub tolerance: f64,
    /// Newton steps allowed per pixel.
    pub max_iterations: usize,
    /// Number of column segments, and of workers rendering them.
    pub workers: usize,
    /// Frames in an animation.  Ignored for still images.
    pub frames: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: 1920,
            height: 1080,
            x_range: (-0.8, 0.8),
            y_range: (-1.1776, -0.2776),
            tolerance: 0.000_001,
            max_iterations: 100,
            workers: num_cpus::get(),
            frames: 60,
        }
    }
}

/// A validated render configuration.
#[derive(Clone, Debug)]
pub struct Config {
    settings: Settings,
    plane: PlaneMapper,
}

impl Config {
    /// Validates the settings.  All the checks happen here so that
    /// nothing downstream has to repeat them.
    pub fn new(settings: Settings) -> Result<Config, ConfigError> {
        if settings.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }

        if settings.width % settings.workers != 0 {
            return Err(ConfigError::UnevenTiling {
                width: settings.width,
                workers: settings.workers,
            });
        }

        if !(settings.tolerance.is_finite() && settings.tolerance > 0.0) {
            return Err(ConfigError::Tolerance(settings.tolerance));
        }

        if settings.max_iterations == 0 {
            return Err(ConfigError::NoIterations);
        }

        if settings.frames == 0 {
            return Err(ConfigError::NoFrames);
        }

        let plane = PlaneMapper::new(
            settings.width,
            settings.height,
            settings.x_range,
            settings.y_range,
        )
        .map_err(ConfigError::Viewport)?;

        Ok(Config { settings, plane })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.settings.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.settings.height
    }

    /// Per-axis convergence distance.
    pub fn tolerance(&self) -> f64 {
        self.settings.tolerance
    }

    /// Newton steps allowed per pixel.
    pub fn max_iterations(&self) -> usize {
        self.settings.max_iterations
    }

    /// Number of column segments rendered in parallel.
    pub fn workers(&self) -> usize {
        self.settings.workers
    }

    /// Frames in an animation.
    pub fn frames(&self) -> usize {
        self.settings.frames
    }

    /// The pixel <-> plane mapping of the viewport.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Width of one column segment.
    pub fn step(&self) -> usize {
        self.settings.width / self.settings.workers
    }

    /// The first column of every segment, in increasing order.
    pub fn segment_origins(&self) -> Vec<usize> {
        (0..self.settings.workers).map(|i| i * self.step()).collect()
    }

    /// Convenience wrapper for the viewport mapping.
    #[inline]
    pub fn pixel_to_point(&self, column: usize, row: usize) -> Complex64 {
        self.plane.pixel_to_point(&Pixel(column, row))
    }
}
