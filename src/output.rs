// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing rasters to disk.  Still images go out in whatever format
//! the file extension asks for; animations are always GIFs.

use failure::Error;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use errors::ConfigError;
use render::Raster;

fn to_image(raster: Raster) -> Result<RgbImage, Error> {
    let (width, height) = (raster.width as u32, raster.height as u32);
    RgbImage::from_raw(width, height, raster.pixels)
        .ok_or_else(|| format_err!("Raster of {}x{} has the wrong number of bytes", width, height))
}

/// Fails unless `path` names a `.gif` file.  Call it before
/// rendering: discovering the problem after an hour of frames helps
/// nobody.
pub fn check_animation_path(path: &Path) -> Result<(), ConfigError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_string();
    if extension.eq_ignore_ascii_case("gif") {
        Ok(())
    } else {
        Err(ConfigError::NotAGif(extension))
    }
}

/// Writes a still image, its format chosen by the extension of `path`.
pub fn write_image(path: &Path, raster: Raster) -> Result<(), Error> {
    to_image(raster)?.save(path)?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Writes an endlessly looping GIF, `delay_ms` milliseconds per frame.
pub fn write_animation(path: &Path, frames: Vec<Raster>, delay_ms: u32) -> Result<(), Error> {
    check_animation_path(path)?;
    let output = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new(output);
    encoder.set_repeat(Repeat::Infinite)?;
    let count = frames.len();
    for raster in frames {
        let rgba = DynamicImage::ImageRgb8(to_image(raster)?).to_rgba8();
        encoder.encode_frame(Frame::from_parts(
            rgba,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        ))?;
    }
    info!("wrote {} frames to {}", count, path.display());
    Ok(())
}
