use tracing::{debug, trace};

use crate::canvas::Canvas;
use crate::errors::CanvasError;
use crate::geometry::Point2d;

pub mod command;
pub use command::TurtleCommand;

/// Position and heading (integer degrees, kept in `[0, 360)`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2d {
    pub position: Point2d,
    pub rotation: i32,
}

impl Transform2d {
    pub fn new(position: Point2d, rotation: i32) -> Transform2d {
        Transform2d {
            position,
            rotation: normalize_heading(rotation),
        }
    }
}

impl Default for Transform2d {
    fn default() -> Self {
        Transform2d::new(Point2d::new(0.0, 0.0), 0)
    }
}

/// Wrap any heading into `[0, 360)`, including negative ones.
pub fn normalize_heading(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// # Turtle
///
/// A logo-style turtle bound to a [`Canvas`]. Commands are queued first and
/// then executed by [`Turtle::run`], which walks the queue twice: once with
/// drawing disabled so the canvas can find the extent of the path, and once
/// more to paint it.
///
/// # Example
///
/// ```rust
/// use lsys_render::canvas::Canvas;
/// use lsys_render::geometry::{Bounds2d, Point2d};
/// use lsys_render::turtle::{Transform2d, Turtle};
///
/// let mut canvas = Canvas::new(Bounds2d::default(), 64, 64).unwrap();
/// let mut turtle = Turtle::new(Transform2d::default(), &mut canvas);
/// turtle
///     .move_forward(10.0)
///     .turn(90)
///     .move_forward(10.0)
///     .turn(90)
///     .move_forward(10.0)
///     .turn(90)
///     .move_forward(10.0);
/// turtle.run().unwrap();
/// assert!(canvas.is_allocated());
/// ```
pub struct Turtle<'a> {
    transform: Transform2d,
    initial_transform: Transform2d,
    commands: Vec<TurtleCommand>,
    stack: Vec<Transform2d>,
    canvas: &'a mut Canvas,
}

impl<'a> Turtle<'a> {
    /// Put a new turtle on `canvas`. The transform given here is the one both
    /// render passes start from.
    pub fn new(transform: Transform2d, canvas: &'a mut Canvas) -> Turtle<'a> {
        let transform = Transform2d::new(transform.position, transform.rotation);
        Turtle {
            transform,
            initial_transform: transform,
            commands: vec![],
            stack: vec![],
            canvas,
        }
    }

    /// Execute a full cycle of the queued program: a dry run to find the
    /// plane bounds, then a second run that rasterizes the result.
    pub fn run(&mut self) -> Result<(), CanvasError> {
        let pen_down = self.canvas.is_pen_down();

        debug!(commands = self.commands.len(), "turtle bounds pass");
        self.canvas.set_allow_drawing(false);
        let dry_run = self.execute_commands();
        self.canvas.set_allow_drawing(true);
        dry_run?;

        self.reset_transform();
        self.canvas.set_pen_down(pen_down);

        self.canvas.allocate_pixels();
        debug!(commands = self.commands.len(), "turtle raster pass");
        self.execute_commands()
    }

    fn execute_commands(&mut self) -> Result<(), CanvasError> {
        // Commands are Copy; take the queue out so each one can borrow the turtle.
        let commands = std::mem::take(&mut self.commands);
        let mut result = Ok(());
        for command in commands.iter() {
            trace!(?command, transform = ?self.transform, "execute");
            if let Err(err) = command.execute(self) {
                result = Err(err);
                break;
            }
        }
        self.commands = commands;
        result
    }

    pub fn add_command(&mut self, command: TurtleCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn move_forward(&mut self, distance: f64) -> &mut Self {
        self.add_command(TurtleCommand::MoveForward(distance))
    }

    pub fn turn(&mut self, degrees: i32) -> &mut Self {
        self.add_command(TurtleCommand::Turn(degrees))
    }

    pub fn push_state(&mut self) -> &mut Self {
        self.add_command(TurtleCommand::PushState)
    }

    pub fn pop_state(&mut self) -> &mut Self {
        self.add_command(TurtleCommand::PopState)
    }

    pub fn pen_up(&mut self) -> &mut Self {
        self.add_command(TurtleCommand::PenUp)
    }

    pub fn pen_down(&mut self) -> &mut Self {
        self.add_command(TurtleCommand::PenDown)
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[TurtleCommand] {
        &self.commands
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Return to the transform the turtle was created with, dropping any
    /// saved states.
    pub fn reset_transform(&mut self) {
        self.transform = self.initial_transform;
        self.stack.clear();
    }

    pub fn transform(&self) -> &Transform2d {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform2d) {
        self.transform = Transform2d::new(transform.position, transform.rotation);
    }

    pub fn initial_transform(&self) -> &Transform2d {
        &self.initial_transform
    }

    pub fn position(&self) -> Point2d {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Point2d) {
        self.transform.position = position;
    }

    pub fn heading(&self) -> i32 {
        self.transform.rotation
    }

    pub fn set_heading(&mut self, degrees: i32) {
        self.transform.rotation = normalize_heading(degrees);
    }

    pub fn push_transform(&mut self) {
        self.stack.push(self.transform);
    }

    /// Restore the last pushed transform. Returns false if there was none.
    pub fn pop_transform(&mut self) -> bool {
        match self.stack.pop() {
            Some(transform) => {
                self.transform = transform;
                true
            }
            None => false,
        }
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn canvas(&self) -> &Canvas {
        &*self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut *self.canvas
    }
}
