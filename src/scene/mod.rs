//! Declarative render jobs.
//!
//! A [`Scene`] describes everything needed to produce an image: canvas size,
//! where the turtle starts, the draw color, and either a literal command list
//! or an L-system. Scenes are usually written in RON:
//!
//! ```ron
//! Scene(
//!     width: 256,
//!     height: 256,
//!     heading: 90,
//!     color: "lime",
//!     program: LSystem(
//!         axiom: "0",
//!         rules: {'1': "11", '0': "1[+0]-0"},
//!         symbols: {
//!             '0': Some(MoveForward(1.0)),
//!             '1': Some(MoveForward(2.0)),
//!             '[': Some(PushState),
//!             ']': Some(PopState),
//!             '+': Some(Turn(45)),
//!             '-': Some(Turn(-45)),
//!         },
//!         iterations: 6,
//!     ),
//! )
//! ```
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bmp::BmpImage;
use crate::canvas::Canvas;
use crate::errors::SceneError;
use crate::geometry::{Bounds2d, Point2d, RgbColor};
use crate::l_system::LSystem;
use crate::turtle::{Transform2d, Turtle, TurtleCommand};

fn default_color() -> String {
    "white".to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Program {
    Commands(Vec<TurtleCommand>),
    LSystem {
        axiom: String,
        #[serde(default)]
        rules: HashMap<char, String>,
        #[serde(default)]
        symbols: HashMap<char, Option<TurtleCommand>>,
        #[serde(default)]
        iterations: u32,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    /// Initial plane bounds. Defaults to the single point the turtle starts on.
    #[serde(default)]
    pub bounds: Option<Bounds2d>,
    #[serde(default)]
    pub start: (f64, f64),
    #[serde(default)]
    pub heading: i32,
    /// Any CSS color.
    #[serde(default = "default_color")]
    pub color: String,
    pub program: Program,
}

impl Scene {
    pub fn from_ron_str(source: &str) -> Result<Scene, SceneError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
        let source = std::fs::read_to_string(path)?;
        Scene::from_ron_str(&source)
    }

    pub fn draw_color(&self) -> Result<RgbColor, SceneError> {
        Ok(csscolorparser::parse(&self.color)?.into())
    }

    /// Build the L-system this scene describes, if any. Duplicate keys cannot
    /// occur here, since the maps already hold one entry per character.
    pub fn l_system(&self) -> Option<LSystem> {
        match &self.program {
            Program::LSystem {
                axiom,
                rules,
                symbols,
                ..
            } => {
                let mut system = LSystem::new(axiom);
                system.set_rules(rules.clone());
                system.set_symbols(symbols.clone());
                Some(system)
            }
            Program::Commands(_) => None,
        }
    }

    /// Run the scene and hand back the painted canvas.
    pub fn render(&self) -> Result<Canvas, SceneError> {
        let start = Point2d::new(self.start.0, self.start.1);
        let bounds = self.bounds.unwrap_or_else(|| Bounds2d::from_point(start));
        let mut canvas = Canvas::new(bounds, self.width, self.height)?;
        canvas.set_color(self.draw_color()?);

        {
            let mut turtle = Turtle::new(Transform2d::new(start, self.heading), &mut canvas);
            match &self.program {
                Program::Commands(commands) => {
                    debug!(commands = commands.len(), "rendering command scene");
                    for command in commands {
                        turtle.add_command(*command);
                    }
                    turtle.run()?;
                }
                Program::LSystem { iterations, .. } => {
                    debug!(iterations, "rendering l-system scene");
                    if let Some(mut system) = self.l_system() {
                        system.evaluate(*iterations);
                        system.draw(&mut turtle)?;
                    }
                }
            }
        }
        Ok(canvas)
    }

    /// Render and write the result as a BMP file.
    pub fn render_to_file<P: AsRef<Path>>(&self, path: P) -> Result<Canvas, SceneError> {
        let canvas = self.render()?;
        BmpImage::from_canvas(&canvas)?.write_to_file(path)?;
        Ok(canvas)
    }
}
