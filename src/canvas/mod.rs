//! The [`Canvas`] discretizes a rectangular region of the continuous plane
//! into a fixed `width x height` grid of [`RgbColor`] pixels.
//!
//! Pixels are not allocated until [`Canvas::allocate_pixels`] is called,
//! which lets a turtle first walk its whole path with drawing disabled so the
//! canvas can discover how much of the plane it needs to cover.
use std::io::Write;

use image::{Rgb, RgbImage};
use tracing::debug;

use crate::errors::CanvasError;
use crate::geometry::{move_from_point, Bounds2d, Pixel, Point2d, RgbColor, Spacing2d};

/// # Canvas
///
/// A 2D raster over a region of the plane. Lines are drawn in plane units and
/// rasterized with Bresenham's algorithm in the canvas draw color.
///
/// # Example
///
/// ```rust
/// use lsys_render::canvas::Canvas;
/// use lsys_render::geometry::{Bounds2d, Point2d};
///
/// let mut canvas = Canvas::new(Bounds2d::new(0.0, 0.0, 10.0, 10.0), 10, 10).unwrap();
/// canvas.allocate_pixels();
/// let end = canvas.draw_line(Point2d::new(0.0, 0.0), 5.0, 0).unwrap();
/// assert!((end.x() - 5.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Canvas {
    bounds: Bounds2d,
    spacing: Spacing2d,
    width: u32,
    height: u32,
    pixels: Option<Vec<RgbColor>>,
    color: RgbColor,
    pen_down: bool,
    allow_drawing: bool,
}

impl Canvas {
    /// Construct a canvas over `bounds` of the plane, discretized into
    /// `width x height` pixels. Pen starts down and drawing allowed.
    pub fn new(bounds: Bounds2d, width: u32, height: u32) -> Result<Canvas, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::ZeroSize);
        }
        let bounds = bounds.normalized();
        Ok(Canvas {
            bounds,
            spacing: Spacing2d::for_bounds(&bounds, width, height),
            width,
            height,
            pixels: None,
            color: RgbColor::WHITE,
            pen_down: true,
            allow_drawing: true,
        })
    }

    /// Draw a line of `length` at `angle` degrees starting from `start`, and
    /// return the end point of the line.
    ///
    /// Both endpoints are always added to the bounds, whatever the pen state.
    /// Pixels are only written when the pen is down and drawing is allowed.
    pub fn draw_line(
        &mut self,
        start: Point2d,
        length: f64,
        angle: i32,
    ) -> Result<Point2d, CanvasError> {
        let end = move_from_point(start, length, angle);
        self.update_bounds(start);
        self.update_bounds(end);

        if self.allow_drawing && self.pen_down {
            let start_pixel = self.pixel_from_point(start);
            let end_pixel = self.pixel_from_point(end);
            self.rasterize_line(start_pixel, end_pixel)?;
        }
        Ok(end)
    }

    /// Grow the plane bounds so they include `reference`.
    pub fn update_bounds(&mut self, reference: Point2d) {
        if !self.bounds.contains(reference) {
            self.bounds.include(reference);
            self.spacing = Spacing2d::for_bounds(&self.bounds, self.width, self.height);
        }
    }

    /// Closest pixel to a point of the plane. Points outside the bounds are
    /// clamped onto the border pixels.
    pub fn pixel_from_point(&self, point: Point2d) -> Pixel {
        let x = axis_index(point.x() - self.bounds.min_x, self.spacing.x, self.width);
        let y = axis_index(point.y() - self.bounds.min_y, self.spacing.y, self.height);
        // Plane Y grows upward, raster rows grow downward.
        Pixel::new(x, (self.height - 1) - y)
    }

    /// Bresenham's line algorithm, inclusive of both end pixels. Both ends
    /// must lie on the grid.
    pub fn rasterize_line(&mut self, start: Pixel, end: Pixel) -> Result<(), CanvasError> {
        for pixel in [start, end] {
            if pixel.x >= self.width || pixel.y >= self.height {
                return Err(CanvasError::PixelOutOfRange {
                    x: pixel.x,
                    y: pixel.y,
                });
            }
        }
        let width = self.width as usize;
        let color = self.color;
        let pixels = self
            .pixels
            .as_mut()
            .ok_or(CanvasError::PixelsNotAllocated)?;

        let (mut x, mut y) = (i64::from(start.x), i64::from(start.y));
        let (x1, y1) = (i64::from(end.x), i64::from(end.y));

        let dx = (x1 - x).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let dy = (y1 - y).abs();
        let sy = if y < y1 { 1 } else { -1 };

        let mut err = (if dx > dy { dx } else { -dy }) / 2;

        loop {
            pixels[y as usize * width + x as usize] = color;
            if x == x1 && y == y1 {
                break;
            }
            let e2 = err;
            if e2 > -dx {
                err -= dy;
                x += sx;
            }
            if e2 < dy {
                err += dx;
                y += sy;
            }
        }
        Ok(())
    }

    /// Recompute the spacing from the final bounds and allocate a fresh,
    /// all-black pixel grid. Call once the bounds are known and before any
    /// line is rasterized.
    pub fn allocate_pixels(&mut self) {
        self.spacing = Spacing2d::for_bounds(&self.bounds, self.width, self.height);
        debug!(
            width = self.width,
            height = self.height,
            bounds = ?self.bounds,
            "allocating canvas pixels"
        );
        self.pixels = Some(vec![
            RgbColor::BLACK;
            self.width as usize * self.height as usize
        ]);
    }

    pub fn pen_up(&mut self) {
        self.pen_down = false;
    }

    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn set_pen_down(&mut self, pen_down: bool) {
        self.pen_down = pen_down;
    }

    /// Print the canvas in ASCII: `*` for a painted pixel, `.` otherwise.
    pub fn write_ascii<W: Write>(&self, out: &mut W) -> Result<(), CanvasError> {
        for row in self.rows()? {
            for pixel in row {
                let c = if *pixel == RgbColor::BLACK { '.' } else { '*' };
                write!(out, "{} ", c)?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Copy the pixel buffer into an [`image::RgbImage`], e.g. to save it as PNG.
    pub fn to_rgb_image(&self) -> Result<RgbImage, CanvasError> {
        let pixels = self.pixels()?;
        let width = self.width;
        Ok(RgbImage::from_fn(self.width, self.height, |x, y| {
            let p = pixels[(y * width + x) as usize];
            Rgb([p.r, p.g, p.b])
        }))
    }

    pub fn bounds(&self) -> &Bounds2d {
        &self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds2d) {
        self.bounds = bounds.normalized();
        self.spacing = Spacing2d::for_bounds(&self.bounds, self.width, self.height);
    }

    pub fn spacing(&self) -> &Spacing2d {
        &self.spacing
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel buffer, row 0 at the top.
    pub fn pixels(&self) -> Result<&[RgbColor], CanvasError> {
        self.pixels
            .as_deref()
            .ok_or(CanvasError::PixelsNotAllocated)
    }

    pub fn rows(&self) -> Result<std::slice::ChunksExact<'_, RgbColor>, CanvasError> {
        Ok(self.pixels()?.chunks_exact(self.width as usize))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Result<Option<RgbColor>, CanvasError> {
        let pixels = self.pixels()?;
        if x >= self.width || y >= self.height {
            return Ok(None);
        }
        Ok(Some(pixels[(y * self.width + x) as usize]))
    }

    pub fn is_allocated(&self) -> bool {
        self.pixels.is_some()
    }

    pub fn allow_drawing(&self) -> bool {
        self.allow_drawing
    }

    pub fn set_allow_drawing(&mut self, allow_drawing: bool) {
        self.allow_drawing = allow_drawing;
    }

    pub fn color(&self) -> RgbColor {
        self.color
    }

    pub fn set_color(&mut self, color: RgbColor) {
        self.color = color;
    }
}

/// Scale a plane offset onto `[0, cells - 1]`. Degenerate spacing maps to 0.
fn axis_index(offset: f64, spacing: f64, cells: u32) -> u32 {
    if !(spacing > 0.0) || !spacing.is_finite() {
        return 0;
    }
    let scaled = (offset / spacing).floor();
    scaled.max(0.0).min(f64::from(cells - 1)) as u32
}
