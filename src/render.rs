// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Newton fractal renderer
//!
//! The raster is cut into as many equal-width column segments as
//! there are workers.  Each worker gets a segment origin, borrows the
//! frame's roots and state, and paints its own tile; nothing is
//! shared mutably, so there is nothing to lock.  The tiles are then
//! stitched back together left to right, in origin order, whatever
//! order the workers happened to finish in.

use crossbeam::thread::ScopedJoinHandle;
use itertools::iproduct;

use classify::classify;
use color::{Colorizer, Rgb};
use config::Config;
use errors::RenderError;
use function::{ComplexFunction, FrameState};
use roots::{find_roots, RootSet};

/// A vertical slice of the raster, `height` rows of `width` pixels,
/// starting at column `origin`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// First column of the slice in the full raster.
    pub origin: usize,
    /// Columns in the slice.
    pub width: usize,
    /// Rows in the slice.
    pub height: usize,
    /// Row-major pixels.
    pub pixels: Vec<Rgb>,
}

impl Tile {
    fn row(&self, row: usize) -> &[Rgb] {
        &self.pixels[row * self.width..(row + 1) * self.width]
    }
}

/// A finished frame: row-major RGB bytes, three per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// `width * height * 3` bytes.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Stitches tiles together in increasing origin order.  The tiles
    /// may arrive in any order, but between them they must cover
    /// every column exactly once.
    pub fn assemble(
        width: usize,
        height: usize,
        mut tiles: Vec<Tile>,
    ) -> Result<Raster, RenderError> {
        tiles.sort_by_key(|tile| tile.origin);

        let mut next = 0;
        for tile in &tiles {
            if tile.origin != next
                || tile.height != height
                || tile.pixels.len() != tile.width * height
            {
                return Err(RenderError::MisplacedTile(tile.origin));
            }
            next += tile.width;
        }
        if next != width {
            return Err(RenderError::MisplacedTile(next));
        }

        let mut pixels = Vec::with_capacity(width * height * 3);
        for row in 0..height {
            for tile in &tiles {
                for rgb in tile.row(row) {
                    pixels.extend_from_slice(rgb);
                }
            }
        }
        Ok(Raster {
            width,
            height,
            pixels,
        })
    }

    /// The color at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let offset = (y * self.width + x) * 3;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }
}

/// Holds everything a frame needs besides its roots and state: the
/// validated configuration, the function, and the palette.  Once
/// built it is never mutated, and it is shared by reference with
/// every worker.
pub struct NewtonRenderer {
    config: Config,
    function: ComplexFunction,
    colorizer: Colorizer,
}

impl ::std::fmt::Debug for NewtonRenderer {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        f.debug_struct("NewtonRenderer")
            .field("config", &self.config)
            .field("function", &self.function)
            .finish()
    }
}

impl NewtonRenderer {
    /// Requires an already validated configuration.
    pub fn new(config: Config, function: ComplexFunction, colorizer: Colorizer) -> Self {
        NewtonRenderer {
            config,
            function,
            colorizer,
        }
    }

    /// The configuration this renderer was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Root discovery for the given frame state.
    pub fn find_roots(&self, state: &FrameState) -> RootSet {
        find_roots(&self.function, state, self.config.tolerance())
    }

    /// Paints the segment starting at column `origin`.
    pub fn render_segment(&self, roots: &RootSet, state: &FrameState, origin: usize) -> Tile {
        let (width, height) = (self.config.step(), self.config.height());
        let (tolerance, limit) = (self.config.tolerance(), self.config.max_iterations());
        let pixels = iproduct!(0..height, 0..width)
            .map(|(row, column)| {
                let point = self.config.pixel_to_point(origin + column, row);
                let result = classify(&self.function, roots, state, point, tolerance, limit);
                (self.colorizer)(&result, state)
            })
            .collect();
        Tile {
            origin,
            width,
            height,
            pixels,
        }
    }

    /// The main function for single-threaded rendering: every segment
    /// in turn, on the calling thread.
    pub fn render_single(
        &self,
        roots: &RootSet,
        state: &FrameState,
    ) -> Result<Raster, RenderError> {
        let tiles = self
            .config
            .segment_origins()
            .into_iter()
            .map(|origin| self.render_segment(roots, state, origin))
            .collect();
        Raster::assemble(self.config.width(), self.config.height(), tiles)
    }

    /// The multi-threaded render: one scoped worker per segment.
    pub fn render(&self, roots: &RootSet, state: &FrameState) -> Result<Raster, RenderError> {
        let origins = self.config.segment_origins();
        debug!("rendering {} segments of {} columns", origins.len(), self.config.step());

        let joined = crossbeam::scope(|spawner| {
            let handles: Vec<(usize, ScopedJoinHandle<Tile>)> = origins
                .iter()
                .map(|&origin| {
                    (
                        origin,
                        spawner.spawn(move |_| self.render_segment(roots, state, origin)),
                    )
                })
                .collect();

            handles
                .into_iter()
                .map(|(origin, handle)| {
                    handle
                        .join()
                        .map_err(|_| RenderError::WorkerPanicked(origin))
                })
                .collect::<Result<Vec<Tile>, RenderError>>()
        });

        let tiles = joined.map_err(|_| RenderError::ScopeFailed)??;
        Raster::assemble(self.config.width(), self.config.height(), tiles)
    }

    /// Renders a still image: discovers roots under the default state
    /// and renders a single frame.
    pub fn image(&self) -> Result<Raster, RenderError> {
        let state = FrameState::default();
        let roots = self.find_roots(&state);
        self.render(&roots, &state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color::by_root;
    use config::Settings;
    use num::complex::Complex64;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn cubic(z: Complex64, _: &FrameState) -> Complex64 {
        z * z * z - 1.0
    }

    fn renderer(width: usize, height: usize, workers: usize) -> NewtonRenderer {
        let config = Config::new(Settings {
            width,
            height,
            x_range: (-2.0, 2.0),
            y_range: (-1.5, 1.5),
            max_iterations: 50,
            workers,
            ..Settings::default()
        })
        .unwrap();
        NewtonRenderer::new(config, ComplexFunction::new(cubic), by_root)
    }

    fn tile(origin: usize, width: usize, height: usize, value: u8) -> Tile {
        Tile {
            origin,
            width,
            height,
            pixels: vec![[value; 3]; width * height],
        }
    }

    #[test]
    fn segment_has_the_right_shape() {
        let r = renderer(24, 6, 4);
        let roots = r.find_roots(&FrameState::default());
        let tile = r.render_segment(&roots, &FrameState::default(), 6);
        assert_eq!(tile.origin, 6);
        assert_eq!(tile.width, 6);
        assert_eq!(tile.height, 6);
        assert_eq!(tile.pixels.len(), 36);
    }

    #[test]
    fn threaded_matches_single() {
        let r = renderer(32, 12, 4);
        let state = FrameState::default();
        let roots = r.find_roots(&state);
        let single = r.render_single(&roots, &state).unwrap();
        let threaded = r.render(&roots, &state).unwrap();
        assert_eq!(single, threaded);
        assert_eq!(single.pixels.len(), 32 * 12 * 3);
    }

    #[test]
    fn tile_completion_order_does_not_matter() {
        let r = renderer(40, 8, 8);
        let state = FrameState::default();
        let roots = r.find_roots(&state);
        let expected = r.render_single(&roots, &state).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5 {
            let mut tiles: Vec<Tile> = r
                .config()
                .segment_origins()
                .into_iter()
                .map(|origin| r.render_segment(&roots, &state, origin))
                .collect();
            tiles.shuffle(&mut rng);
            assert_eq!(Raster::assemble(40, 8, tiles).unwrap(), expected);
        }
    }

    #[test]
    fn assemble_concatenates_rows_left_to_right() {
        let raster = Raster::assemble(4, 2, vec![tile(2, 2, 2, 9), tile(0, 2, 2, 1)]).unwrap();
        assert_eq!(raster.pixel(0, 0), [1, 1, 1]);
        assert_eq!(raster.pixel(1, 1), [1, 1, 1]);
        assert_eq!(raster.pixel(2, 0), [9, 9, 9]);
        assert_eq!(raster.pixel(3, 1), [9, 9, 9]);
    }

    #[test]
    fn assemble_refuses_gaps_and_overlaps() {
        let gap = Raster::assemble(6, 2, vec![tile(0, 2, 2, 0), tile(4, 2, 2, 0)]);
        assert_eq!(gap, Err(RenderError::MisplacedTile(4)));
        let short = Raster::assemble(6, 2, vec![tile(0, 2, 2, 0), tile(2, 2, 2, 0)]);
        assert_eq!(short, Err(RenderError::MisplacedTile(4)));
        let wrong_height = Raster::assemble(2, 3, vec![tile(0, 2, 2, 0)]);
        assert_eq!(wrong_height, Err(RenderError::MisplacedTile(0)));
    }

    #[test]
    fn escape_pixels_are_painted_black() {
        let r = renderer(8, 8, 2);
        let raster = r.render(&RootSet::default(), &FrameState::default()).unwrap();
        assert!(raster.pixels.iter().all(|&b| b == 0));
    }
}
