use archerfish::{
    degree,
    error::ArcherResult,
    geometry::{Point, Side},
    Controller, OpticalSystem, Renderer, SimulationConfig,
};
use log::info;
use strum::IntoEnumIterator;
use uom::si::angle::degree;

/// Prints the reconciled state instead of drawing it.
struct ConsoleRenderer;
impl Renderer for ConsoleRenderer {
    fn redraw(&mut self, system: &OpticalSystem) {
        println!("n = {:.2}", system.refractive_index());
        match system.critical_angle() {
            Some(critical) => println!("critical angle: {:.2}°", critical.get::<degree>()),
            None => println!("critical angle: none"),
        }
        for side in Side::iter() {
            let point = system.refraction_point(side).position();
            print!(
                "{side:>5}: x = {:6.1}, angle = {:5.2}°",
                point.x,
                system.angle(side).get::<degree>()
            );
            match system.refracted_angle(side) {
                Some(air) => println!(", refracted = {:5.2}°", air.get::<degree>()),
                None => println!(", total internal reflection"),
            }
        }
        print_point("apparent", system.apparent_position());
        print_point("real", system.real_position());
        println!();
    }
}
fn print_point(name: &str, point: Option<Point>) {
    match point {
        Some(p) => println!("{name:>8}: ({:.1}, {:.1})", p.x, p.y),
        None => println!("{name:>8}: unavailable"),
    }
}

fn main() -> ArcherResult<()> {
    env_logger::init();
    let config = SimulationConfig::default();
    let mut controller = Controller::with_renderer(OpticalSystem::new(&config)?, ConsoleRenderer);
    info!("initial setup");
    controller.set_angle(Side::Left, degree!(30.0))?;
    info!("left angle beyond the critical angle");
    controller.set_angle(Side::Left, degree!(50.0))?;
    controller.set_angle(Side::Left, degree!(30.0))?;
    info!("locking the real position and moving it");
    controller.toggle_coupling()?;
    controller.move_real(Point::new(450.0, 250.0))?;
    controller.set_refractive_index(1.5)?;
    Ok(())
}
