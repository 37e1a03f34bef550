//! L-system and turtle-graphics rendering to bitmap files.
//!
//! An [`l_system::LSystem`] rewrites an axiom into a string of symbols, each
//! symbol maps onto a [`turtle::TurtleCommand`], and a [`turtle::Turtle`]
//! walks those commands over a [`canvas::Canvas`]. The turtle makes two passes:
//! a dry run that only grows the canvas bounds, then a raster pass into a
//! pixel buffer sized for the whole path. The finished buffer is written out
//! with [`bmp::BmpImage`].
//!
//! ```rust
//! use lsys_render::prelude::*;
//!
//! let mut koch = LSystem::new("F");
//! koch.add_rule('F', "F+F-F-F+F");
//! koch.add_symbol('F', Some(TurtleCommand::MoveForward(1.0)));
//! koch.add_symbol('+', Some(TurtleCommand::Turn(90)));
//! koch.add_symbol('-', Some(TurtleCommand::Turn(-90)));
//! koch.evaluate(3);
//!
//! let mut canvas = Canvas::new(Bounds2d::default(), 200, 80).unwrap();
//! let mut turtle = Turtle::new(Transform2d::default(), &mut canvas);
//! koch.draw(&mut turtle).unwrap();
//!
//! let mut bytes = Vec::new();
//! BmpImage::from_canvas(&canvas).unwrap().write_to(&mut bytes).unwrap();
//! assert_eq!(bytes.len(), 54 + 200 * 3 * 80);
//! ```

/// Point, bounds, pixel and color value types.
pub mod geometry;

/// Pixel grid over a region of the plane, with Bresenham line rasterization.
pub mod canvas;

/// Turtle graphics: command queue, transform stack and two-pass rendering.
pub mod turtle;

/// L-system implementation, with expansion and turtle drawing.
pub mod l_system;

/// 24-bit uncompressed BMP encoder.
pub mod bmp;

/// RON-described render jobs.
pub mod scene;

pub mod errors;

/// Make your life easy! Just import prelude::* and get drawing.
pub mod prelude {
    pub use crate::bmp::BmpImage;
    pub use crate::canvas::Canvas;
    pub use crate::errors::{BmpError, CanvasError, SceneError};
    pub use crate::geometry::{Bounds2d, Point2d, PointDistance, RgbColor};
    pub use crate::l_system::LSystem;
    pub use crate::scene::{Program, Scene};
    pub use crate::turtle::{Transform2d, Turtle, TurtleCommand};
}
