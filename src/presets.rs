// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A few fractals worth looking at, each a function, a palette, a
//! viewport that frames it well, and for the animated ones a state
//! hook and a frame count.

use std::f64::consts::{E, PI};

use animation::UpdateFn;
use classify::PixelResult;
use color::{by_root, shade_rgb, Colorizer, Rgb, BLACK};
use config::{Config, Settings};
use function::{ComplexFunction, EvalFn, FrameState};
use num::complex::Complex64;

/// A named fractal definition.
#[derive(Copy, Clone)]
pub struct Preset {
    /// What to call it on the command line.
    pub name: &'static str,
    /// One line of description.
    pub about: &'static str,
    /// The function whose roots we're after.
    pub function: EvalFn,
    /// Its palette.
    pub colorizer: Colorizer,
    /// Default real range.
    pub x_range: (f64, f64),
    /// Default imaginary range.
    pub y_range: (f64, f64),
    /// Frame-state hook and default frame count, for animations.
    pub animation: Option<(UpdateFn, usize)>,
}

impl Preset {
    /// Whether this preset is an animation.
    pub fn is_animated(&self) -> bool {
        self.animation.is_some()
    }

    /// Default settings adjusted to this preset's viewport and frame count.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings {
            x_range: self.x_range,
            y_range: self.y_range,
            ..Settings::default()
        };
        if let Some((_, frames)) = self.animation {
            settings.frames = frames;
        }
        settings
    }

    /// The function record, derivative estimated numerically.
    pub fn function(&self) -> ComplexFunction {
        ComplexFunction::new(self.function)
    }
}

/// All the presets, in the order `--list` shows them.
pub fn all() -> Vec<Preset> {
    vec![
        Preset {
            name: "cubic",
            about: "z^3 - 1, one hue per root",
            function: classic,
            colorizer: by_root,
            x_range: (-2.0, 2.0),
            y_range: (-1.125, 1.125),
            animation: None,
        },
        Preset {
            name: "chessboard",
            about: "log base e*pi*i of pi*z^4, in two shades of grey",
            function: chessboard,
            colorizer: chessboard_colors,
            x_range: (-10.666, 10.666),
            y_range: (-6.0, 6.0),
            animation: None,
        },
        Preset {
            name: "umbrella",
            about: "log base e*pi*i of pi*z^8, red and white",
            function: umbrella,
            colorizer: umbrella_colors,
            x_range: (-12.444, 12.444),
            y_range: (-7.0, 7.0),
            animation: None,
        },
        Preset {
            name: "waves",
            about: "z^3 - z^i, in blues",
            function: waves,
            colorizer: waves_colors,
            x_range: (-0.637, 4.422),
            y_range: (0.555, 3.4),
            animation: None,
        },
        Preset {
            name: "classic",
            about: "z^3 - 1 with a palette that cycles over the animation",
            function: classic,
            colorizer: classic_colors,
            x_range: (-10.666, 10.666),
            y_range: (-6.0, 6.0),
            animation: Some((classic_update, 180)),
        },
        Preset {
            name: "spiral",
            about: "ln(z^4 - factor*i*z), factor sweeping from 1 to the golden ratio",
            function: spiral,
            colorizer: spiral_colors,
            x_range: (-0.8, 0.8),
            y_range: (-1.1776, -0.2776),
            animation: Some((spiral_update, 30)),
        },
    ]
}

/// Looks a preset up by name.
pub fn find(name: &str) -> Option<Preset> {
    all().into_iter().find(|p| p.name == name)
}

fn log_base(z: Complex64, base: Complex64) -> Complex64 {
    z.ln() / base.ln()
}

fn fourth(z: Complex64) -> Complex64 {
    let z2 = z * z;
    z2 * z2
}

fn chessboard(z: Complex64, _: &FrameState) -> Complex64 {
    log_base(fourth(z) * PI, Complex64::new(0.0, E * PI))
}

fn chessboard_colors(result: &PixelResult, _: &FrameState) -> Rgb {
    match result.root {
        None => BLACK,
        Some(root) if root % 4 == 1 || root % 4 == 2 => {
            shade_rgb([30.0; 3], 6.0 * result.smooth_depth())
        }
        Some(_) => shade_rgb([220.0; 3], 6.0 * result.smooth_depth()),
    }
}

fn umbrella(z: Complex64, _: &FrameState) -> Complex64 {
    let z4 = fourth(z);
    log_base(z4 * z4 * PI, Complex64::new(0.0, E * PI))
}

fn umbrella_colors(result: &PixelResult, _: &FrameState) -> Rgb {
    match result.root {
        None => BLACK,
        Some(root) if root % 4 == 0 || root % 4 == 3 => {
            shade_rgb([180.0, 0.0, 0.0], 6.0 * result.smooth_depth())
        }
        Some(_) => shade_rgb([220.0; 3], 6.0 * result.smooth_depth()),
    }
}

fn waves(z: Complex64, _: &FrameState) -> Complex64 {
    z * z * z - z.powc(Complex64::i())
}

fn waves_colors(result: &PixelResult, _: &FrameState) -> Rgb {
    let base = match result.root {
        Some(0) => [235.0, 235.0, 252.0],
        Some(1) => [52.0, 201.0, 235.0],
        Some(2) => [52.0, 52.0, 235.0],
        _ => return BLACK,
    };
    shade_rgb(base, 8.0 * result.smooth_depth())
}

fn classic(z: Complex64, _: &FrameState) -> Complex64 {
    z * z * z - 1.0
}

fn classic_update(frame: usize, config: &Config) -> FrameState {
    let half = (config.frames().max(2) / 2) as f64 / PI;
    let third = (config.frames().max(3) / 3) as f64;
    let t = frame as f64;
    FrameState::new(frame)
        .with("factor", 1.0 + t / 10.0)
        .with("f", 127.0 * ((t / half).sin() + 1.0))
        .with("g", 127.0 * (((t - third) / half).sin() + 1.0))
        .with("h", 127.0 * (((t + third) / half).sin() + 1.0))
}

fn classic_colors(result: &PixelResult, state: &FrameState) -> Rgb {
    let (f, g, h) = (state.get_or("f", 0.0), state.get_or("g", 0.0), state.get_or("h", 0.0));
    let base = match result.root {
        Some(0) => [f, g, h],
        Some(1) => [h, f, g],
        Some(2) => [g, h, f],
        Some(3) => [220.0; 3],
        _ => return BLACK,
    };
    shade_rgb(base, 4.0 * result.smooth_depth())
}

const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

fn spiral(z: Complex64, state: &FrameState) -> Complex64 {
    let factor = state.get_or("factor", 1.0);
    (fourth(z) - z * Complex64::new(0.0, factor)).ln()
}

// The sweep stops one step short of the golden ratio; frame `frames` is never rendered.
fn spiral_update(frame: usize, config: &Config) -> FrameState {
    let t = frame as f64 / config.frames() as f64;
    FrameState::new(frame).with("factor", 1.0 + t * (GOLDEN_RATIO - 1.0))
}

fn spiral_colors(result: &PixelResult, _: &FrameState) -> Rgb {
    let base = match result.root {
        Some(0) => [255.0, 0.0, 0.0],
        Some(1) => [0.0, 255.0, 0.0],
        Some(2) => [0.0, 0.0, 255.0],
        Some(3) => [255.0, 255.0, 0.0],
        _ => return BLACK,
    };
    shade_rgb(base, result.smooth_depth())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roots::find_roots;

    fn config(frames: usize) -> Config {
        Config::new(Settings {
            width: 8,
            height: 8,
            workers: 1,
            frames,
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn names_are_unique_and_findable() {
        let presets = all();
        for preset in &presets {
            assert_eq!(find(preset.name).unwrap().name, preset.name);
            assert!(Config::new(Settings {
                width: 16,
                height: 16,
                workers: 4,
                ..preset.settings()
            })
            .is_ok());
        }
        assert!(find("mandelbrot").is_none());
    }

    #[test]
    fn classic_has_the_cube_roots_of_unity() {
        let preset = find("classic").unwrap();
        assert!(preset.is_animated());
        let state = classic_update(0, &config(180));
        let roots = find_roots(&preset.function(), &state, 0.000_001);
        assert_eq!(roots.len(), 3);
    }

    #[test]
    fn classic_palette_cycles() {
        let c = config(180);
        let first = classic_update(0, &c);
        let later = classic_update(45, &c);
        assert!((first.get("f").unwrap() - 127.0).abs() < 1e-9);
        assert!(later.get("f").unwrap() > 250.0);
        let result = PixelResult {
            root: Some(0),
            depth: 0,
            smooth: 0.0,
        };
        assert_ne!(classic_colors(&result, &first), classic_colors(&result, &later));
    }

    #[test]
    fn single_frame_classic_still_has_a_palette() {
        let state = classic_update(0, &config(1));
        for name in &["f", "g", "h"] {
            assert!(state.get(name).unwrap().is_finite(), "{} is not finite", name);
        }
        let result = PixelResult {
            root: Some(0),
            depth: 0,
            smooth: 0.0,
        };
        assert_ne!(classic_colors(&result, &state), BLACK);
    }

    #[test]
    fn spiral_factor_sweeps_toward_the_golden_ratio() {
        let c = config(30);
        assert_eq!(spiral_update(0, &c).get("factor"), Some(1.0));
        let last = spiral_update(29, &c).get("factor").unwrap();
        let want = 1.0 + 29.0 / 30.0 * (GOLDEN_RATIO - 1.0);
        assert!((last - want).abs() < 1e-12);
        assert!(last < GOLDEN_RATIO);
    }

    #[test]
    fn palettes_paint_escapes_black() {
        let state = FrameState::default();
        for preset in all() {
            assert_eq!((preset.colorizer)(&PixelResult::ESCAPED, &state), BLACK);
        }
    }

    #[test]
    fn waves_palette_darkens_with_depth() {
        let shallow = PixelResult {
            root: Some(1),
            depth: 1,
            smooth: 0.0,
        };
        let deep = PixelResult {
            root: Some(1),
            depth: 10,
            smooth: 0.5,
        };
        let state = FrameState::default();
        assert_eq!(waves_colors(&shallow, &state), [44, 193, 227]);
        assert_eq!(waves_colors(&deep, &state), [0, 117, 151]);
    }
}
