// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Animations are sequences of frames whose function and palette may
//! drift with a per-frame state.  Because the roots can move, appear,
//! or vanish from one frame to the next, every frame pays for its own
//! root discovery.  Frames are rendered strictly one after another;
//! frame N+1's state is not even computed until frame N's workers are
//! all home.

use config::Config;
use errors::RenderError;
use function::FrameState;
use render::{NewtonRenderer, Raster};

/// Produces the state for a frame.  Must depend only on its
/// arguments, so that asking twice for the same frame is harmless.
pub type UpdateFn = fn(usize, &Config) -> FrameState;

/// Suggested delay between GIF frames, in milliseconds.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 1000 / 30;

/// A renderer plus the hook that evolves its state.
pub struct Animation {
    renderer: NewtonRenderer,
    update: UpdateFn,
}

impl Animation {
    /// The frame count comes from the renderer's configuration.
    pub fn new(renderer: NewtonRenderer, update: UpdateFn) -> Self {
        Animation { renderer, update }
    }

    /// The underlying still renderer.
    pub fn renderer(&self) -> &NewtonRenderer {
        &self.renderer
    }

    /// Renders one frame: state, roots, raster.
    pub fn render_frame(&self, frame: usize) -> Result<Raster, RenderError> {
        let state = (self.update)(frame, self.renderer.config());
        let roots = self.renderer.find_roots(&state);
        self.renderer.render(&roots, &state)
    }

    /// Renders every frame, in order.
    pub fn render_frames(&self) -> Result<Vec<Raster>, RenderError> {
        let frames = self.renderer.config().frames();
        let mut rasters = Vec::with_capacity(frames);
        for frame in 0..frames {
            rasters.push(self.render_frame(frame)?);
            info!("frame {} of {} complete", frame + 1, frames);
        }
        Ok(rasters)
    }
}
