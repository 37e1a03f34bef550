//! Plain value types shared by the canvas, turtle and bitmap encoder.
use geo_types::{coord, Point, Rect};
use serde::{Deserialize, Serialize};

/// A location in the continuous drawing plane.
pub type Point2d = Point<f64>;

/// Helper function to convert degrees to radians
pub fn degrees(deg: f64) -> f64 {
    std::f64::consts::PI * (deg / 180.0)
}

/// Given a point, return the point `distance` away from it along `angle`
/// (in degrees, counter-clockwise from +X).
pub fn move_from_point(point: Point2d, distance: f64, angle: i32) -> Point2d {
    let radians = degrees(f64::from(angle));
    point + Point::new(radians.cos() * distance, radians.sin() * distance)
}

/// Trait that implements a distance function between two [`Point2d`]s.
/// Also includes a length function which returns the length of a point
/// as if it were a vector.
pub trait PointDistance {
    /// Return the scalar distance between two points.
    fn distance(&self, other: &Point2d) -> f64;

    /// Treat a point as a vector and return its scalar length.
    fn length(&self) -> f64;
}

impl PointDistance for Point2d {
    fn distance(&self, other: &Point2d) -> f64 {
        let p = *self - *other;
        p.length()
    }

    fn length(&self) -> f64 {
        (self.x().powi(2) + self.y().powi(2)).sqrt()
    }
}

/// # Bounds2d
///
/// Axis-aligned extent of the plane in use. Starts out however the caller
/// builds it (usually a single point) and only ever grows through
/// [`Bounds2d::include`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds2d {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2d {
    /// Build bounds from two corners, ordering each axis so min <= max.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bounds2d {
        Bounds2d {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// The same region with each axis ordered so min <= max. Bounds built
    /// field by field (or deserialized) may have them swapped.
    pub fn normalized(&self) -> Bounds2d {
        Bounds2d::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    /// Zero-area bounds sitting on a single point.
    pub fn from_point(point: Point2d) -> Bounds2d {
        Bounds2d::new(point.x(), point.y(), point.x(), point.y())
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grow the bounds so that they contain `point`. Never shrinks.
    pub fn include(&mut self, point: Point2d) {
        self.min_x = self.min_x.min(point.x());
        self.min_y = self.min_y.min(point.y());
        self.max_x = self.max_x.max(point.x());
        self.max_y = self.max_y.max(point.y());
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Point2d) -> bool {
        point.x() >= self.min_x
            && point.x() <= self.max_x
            && point.y() >= self.min_y
            && point.y() <= self.max_y
    }

    /// True if `other` lies entirely within these bounds.
    pub fn contains_bounds(&self, other: &Bounds2d) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}

impl From<Rect<f64>> for Bounds2d {
    fn from(rect: Rect<f64>) -> Self {
        Bounds2d::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}

impl From<Bounds2d> for Rect<f64> {
    fn from(bounds: Bounds2d) -> Self {
        Rect::new(
            coord! {x: bounds.min_x, y: bounds.min_y},
            coord! {x: bounds.max_x, y: bounds.max_y},
        )
    }
}

/// Plane units covered by a single pixel, per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spacing2d {
    pub x: f64,
    pub y: f64,
}

impl Spacing2d {
    pub fn for_bounds(bounds: &Bounds2d, width: u32, height: u32) -> Spacing2d {
        Spacing2d {
            x: bounds.width() / f64::from(width),
            y: bounds.height() / f64::from(height),
        }
    }
}

/// Discrete raster address. Row 0 is the top row of the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
}

impl Pixel {
    pub fn new(x: u32, y: u32) -> Pixel {
        Pixel { x, y }
    }
}

/// One RGB cell of a pixel buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor { r: 0, g: 0, b: 0 };
    pub const WHITE: RgbColor = RgbColor {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> RgbColor {
        RgbColor { r, g, b }
    }

    /// Channels in the order BMP stores them.
    pub fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

impl From<csscolorparser::Color> for RgbColor {
    fn from(color: csscolorparser::Color) -> Self {
        let [r, g, b, _a] = color.to_rgba8();
        RgbColor { r, g, b }
    }
}
