use lsys_render::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Start with a zero-area plane; the turtle's dry run grows it to fit.
    let mut canvas = Canvas::new(Bounds2d::default(), 400, 400)?;
    {
        let mut turtle = Turtle::new(Transform2d::new(Point2d::new(201.0, 0.0), 0), &mut canvas);

        // Draw a simple Y, leaving a gap under the trunk.
        turtle
            .turn(90)
            .pen_up()
            .move_forward(100.0)
            .pen_down()
            .move_forward(80.0)
            .push_state()
            .turn(30)
            .move_forward(50.0)
            .pop_state()
            .turn(-30)
            .move_forward(50.0);

        turtle.run()?;
    }

    BmpImage::from_canvas(&canvas)?.write_to_file("output.bmp")?;
    Ok(())
}
