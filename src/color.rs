// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning a classified pixel into a color.

use classify::PixelResult;
use function::FrameState;
use num::clamp;

/// One RGB pixel.
pub type Rgb = [u8; 3];

/// Black, the usual color of points that never settle.
pub const BLACK: Rgb = [0, 0, 0];

/// Maps a classification to a color.  Must give the same answer for
/// the same arguments; it runs on every worker thread.
pub type Colorizer = fn(&PixelResult, &FrameState) -> Rgb;

/// Darkens a channel by `amount`, never below black nor above white.
#[inline]
pub fn shade(value: f64, amount: f64) -> u8 {
    clamp((value - amount).floor(), 0.0, 255.0) as u8
}

/// Darkens every channel of `base` by the same amount.
#[inline]
pub fn shade_rgb(base: [f64; 3], amount: f64) -> Rgb {
    [
        shade(base[0], amount),
        shade(base[1], amount),
        shade(base[2], amount),
    ]
}

/// A palette usable for any function: each root gets a fixed hue,
/// darkening with depth, escapes are black.
pub fn by_root(result: &PixelResult, _: &FrameState) -> Rgb {
    const HUES: [[f64; 3]; 4] = [
        [255.0, 0.0, 0.0],
        [0.0, 255.0, 0.0],
        [0.0, 0.0, 255.0],
        [255.0, 255.0, 0.0],
    ];
    match result.root {
        Some(root) => shade_rgb(HUES[root % HUES.len()], 4.0 * result.smooth_depth()),
        None => BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_never_goes_below_black() {
        assert_eq!(shade(30.0, 6.0 * 12.5), 0);
        assert_eq!(shade(220.0, 0.0), 220);
        assert_eq!(shade(220.0, 10.4), 209);
        assert_eq!(shade(300.0, 0.0), 255);
    }

    #[test]
    fn escapes_are_black() {
        assert_eq!(by_root(&PixelResult::ESCAPED, &FrameState::default()), BLACK);
    }

    #[test]
    fn roots_cycle_through_hues() {
        let result = PixelResult {
            root: Some(5),
            depth: 2,
            smooth: 0.5,
        };
        assert_eq!(by_root(&result, &FrameState::default()), [0, 245, 0]);
    }
}
