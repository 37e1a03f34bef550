use lsys_render::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let order: u32 = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(4);

    // Quadratic Koch curve.
    let mut koch = LSystem::new("F");
    koch.add_rule('F', "F+F-F-F+F");
    koch.add_symbol('F', Some(TurtleCommand::MoveForward(4.0)));
    koch.add_symbol('+', Some(TurtleCommand::Turn(90)));
    koch.add_symbol('-', Some(TurtleCommand::Turn(-90)));
    koch.evaluate(order);
    println!("Koch order {} has {} symbols", order, koch.evaluated_axiom().len());

    let mut canvas = Canvas::new(Bounds2d::default(), 810, 270)?;
    canvas.set_color(RgbColor::new(255, 200, 0));
    {
        let mut turtle = Turtle::new(Transform2d::default(), &mut canvas);
        koch.draw(&mut turtle)?;
    }

    BmpImage::from_canvas(&canvas)?.write_to_file("koch.bmp")?;
    canvas.to_rgb_image()?.save("koch.png")?;
    Ok(())
}
