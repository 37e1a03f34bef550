use serde::{Deserialize, Serialize};

use super::{normalize_heading, Turtle};
use crate::errors::CanvasError;

/// The closed set of things a turtle knows how to do.
///
/// Commands are plain values; the same command can be queued on any number
/// of turtles, or bound to several L-system symbols.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleCommand {
    /// Walk forward by a distance in plane units, drawing if the pen is down.
    MoveForward(f64),
    /// Turn counter-clockwise by a number of degrees (negative turns clockwise).
    Turn(i32),
    PushState,
    PopState,
    PenUp,
    PenDown,
}

impl TurtleCommand {
    /// Apply this command to a turtle, and through it to its canvas.
    pub fn execute(&self, turtle: &mut Turtle<'_>) -> Result<(), CanvasError> {
        match *self {
            TurtleCommand::MoveForward(distance) => {
                let position = turtle.position();
                let heading = turtle.heading();
                let end = turtle.canvas_mut().draw_line(position, distance, heading)?;
                turtle.set_position(end);
            }
            TurtleCommand::Turn(degrees) => {
                // Both terms are in [0, 360), so the sum cannot overflow.
                let heading = turtle.heading();
                turtle.set_heading(heading + normalize_heading(degrees));
            }
            TurtleCommand::PushState => turtle.push_transform(),
            TurtleCommand::PopState => {
                // Popping an empty stack leaves the turtle where it is.
                turtle.pop_transform();
            }
            TurtleCommand::PenUp => turtle.canvas_mut().pen_up(),
            TurtleCommand::PenDown => turtle.canvas_mut().pen_down(),
        }
        Ok(())
    }
}
