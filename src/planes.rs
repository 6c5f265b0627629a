// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0 in
//! the upper-left corner, and a rectangle on the complex plane
//! described by its real and imaginary ranges.
//!
//! Image rows grow downward while the imaginary axis grows upward, so
//! row zero maps to the *maximum* imaginary value.
use num::complex::Complex64;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the (min, max) range of the real axis and the (min, max)
/// range of the imaginary axis of the viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub (f64, f64), pub (f64, f64));

/// Describes the column, row of a pixel in the raster.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex, real cartesian plane.  Maps points from one to the
/// other.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneMapper {
    /// The size of the integral cartesian plane.
    pub integral_plane: IntegralPlane,
    /// The real and imaginary ranges of the complex plane.
    pub complex_plane: ComplexPlane,
    // Plane units per pixel, horizontally and vertically.
    grid_factors: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane, and the
    /// real and imaginary ranges of the complex plane.
    pub fn new(
        width: usize,
        height: usize,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Result<PlaneMapper, String> {
        if width == 0 || height == 0 {
            return Err(format!("The image {}x{} has no pixels.", width, height));
        }

        let bounds = [x_range.0, x_range.1, y_range.0, y_range.1];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err("The viewport bounds must be finite numbers.".to_string());
        }

        if x_range.1 <= x_range.0 {
            return Err(format!(
                "The real range ({}, {}) does not increase from left to right.",
                x_range.0, x_range.1
            ));
        }

        if y_range.1 <= y_range.0 {
            return Err(format!(
                "The imaginary range ({}, {}) does not increase from bottom to top.",
                y_range.0, y_range.1
            ));
        }

        let grid_factors = (
            (x_range.1 - x_range.0) / (width as f64),
            (y_range.1 - y_range.0) / (height as f64),
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(x_range, y_range),
            grid_factors,
        })
    }

    /// Given a pixel on the integral cartesian plane, map it onto the
    /// complex plane.  Each axis is an independent linear
    /// interpolation; the vertical one runs from the top of the
    /// viewport downward.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex64 {
        let (x_range, y_range) = (self.complex_plane.0, self.complex_plane.1);
        Complex64::new(
            x_range.0 + (pixel.0 as f64) * self.grid_factors.0,
            y_range.1 - (pixel.1 as f64) * self.grid_factors.1,
        )
    }

    /// Given a complex number, find the pixel whose plane coordinate
    /// is nearest to it, or None if it lies outside the raster.
    pub fn point_to_pixel(&self, point: &Complex64) -> Option<Pixel> {
        let (x_range, y_range) = (self.complex_plane.0, self.complex_plane.1);
        let left = ((point.re - x_range.0) / self.grid_factors.0).round();
        let top = ((y_range.1 - point.im) / self.grid_factors.1).round();
        if !(left >= 0.0 && top >= 0.0) {
            return None;
        }
        let pixel = Pixel(left as usize, top as usize);
        if pixel.0 >= self.integral_plane.0 || pixel.1 >= self.integral_plane.1 {
            return None;
        }
        Some(pixel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(4, 4, (1.0, -1.0), (-1.0, 1.0));
        assert!(pm.is_err());
        let pm = PlaneMapper::new(4, 4, (-1.0, 1.0), (1.0, -1.0));
        assert!(pm.is_err());
        let pm = PlaneMapper::new(4, 0, (-1.0, 1.0), (-1.0, 1.0));
        assert!(pm.is_err());
        let pm = PlaneMapper::new(4, 4, (-1.0, std::f64::INFINITY), (-1.0, 1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, (-1.0, 1.0), (-1.0, 1.0));
        assert!(pm.is_ok());
    }

    #[test]
    fn pixel_to_point_puts_row_zero_at_the_top() {
        let pm = PlaneMapper::new(4, 4, (-2.0, 2.0), (-2.0, 2.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex64::new(-2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex64::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 3)), Complex64::new(1.0, -1.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 2)), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, (0.0, 5.0), (0.0, 5.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex64::new(0.0, 5.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex64::new(2.0, 3.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex64::new(4.0, 1.0));
    }

    #[test]
    fn point_to_pixel_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, (-2.0, 2.0), (-2.0, 2.0)).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex64::new(0.0, 0.0)), Some(Pixel(2, 2)));
        assert_eq!(pm.point_to_pixel(&Complex64::new(-2.0, 2.0)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex64::new(1.0, 0.0)), Some(Pixel(3, 2)));
        assert_eq!(pm.point_to_pixel(&Complex64::new(1.1, 0.1)), Some(Pixel(3, 2)));
        assert_eq!(pm.point_to_pixel(&Complex64::new(2.0, -2.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex64::new(-3.0, 0.0)), None);
    }

    #[test]
    fn point_to_pixel_maps_on_large_mixed_planes() {
        let pm = PlaneMapper::new(640, 640, (-2.0, 2.0), (-2.0, 2.0)).unwrap();
        assert_eq!(pm.point_to_pixel(&Complex64::new(0.0, 0.0)), Some(Pixel(320, 320)));
        assert_eq!(pm.point_to_pixel(&Complex64::new(-2.0, 2.0)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex64::new(1.0, 1.0)), Some(Pixel(480, 160)));
    }
}
