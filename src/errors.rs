// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two kinds of failure the renderer admits.  Points that refuse
//! to converge are not among them: those are ordinary pixels, painted
//! in whatever color the palette gives to "escaped".

/// Problems with the requested render, all detected before any
/// Newton iteration is run.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// The raster is split into equal-width column segments, one per worker.
    #[fail(
        display = "Image width ({}) not evenly divisible over the amount of workers ({})",
        width, workers
    )]
    UnevenTiling {
        /// Requested image width.
        width: usize,
        /// Requested worker count.
        workers: usize,
    },

    /// At least one worker is needed.
    #[fail(display = "The worker count must be at least 1")]
    NoWorkers,

    /// The viewport could not be mapped onto the raster.
    #[fail(display = "Bad viewport: {}", _0)]
    Viewport(String),

    /// Convergence tolerance must be a positive, finite number.
    #[fail(display = "The tolerance must be a positive number, not {}", _0)]
    Tolerance(f64),

    /// Every pixel must be allowed at least one Newton step.
    #[fail(display = "The iteration limit must be at least 1")]
    NoIterations,

    /// An animation needs frames.
    #[fail(display = "An animation needs at least one frame")]
    NoFrames,

    /// Animations are only written as GIF files.
    #[fail(display = "File extension should be '.gif' for an animation, not '{}'", _0)]
    NotAGif(String),
}

/// Failures while a frame is being rendered.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// A segment worker died before returning its tile.
    #[fail(display = "The worker rendering columns from {} panicked", _0)]
    WorkerPanicked(usize),

    /// The thread scope itself could not be joined.
    #[fail(display = "The render thread scope failed")]
    ScopeFailed,

    /// The returned tiles do not cover the raster exactly once.
    #[fail(display = "Tile at column {} does not fit the raster", _0)]
    MisplacedTile(usize),
}
