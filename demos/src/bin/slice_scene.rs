//! Drive a small scene through the pointer controller: draw shapes, slice across them and delete
//! a region. The final bodies are printed as JSON.
//!
//! Run with `RUST_LOG=debug` to follow the controller.
use polyslice::{
    controller::{Controller, ControllerAction, PointerButton, PointerEvent, Tool},
    core::math::Vector2,
    world::{BodyHandle, World},
};

fn drag(
    controller: &mut Controller<f64>,
    world: &mut World<f64>,
    button: PointerButton,
    from: (f64, f64),
    to: (f64, f64),
) -> ControllerAction<BodyHandle, f64> {
    controller.handle_event(
        world,
        PointerEvent::Pressed {
            button,
            position: Vector2::new(from.0, from.1),
        },
    );
    controller.handle_event(
        world,
        PointerEvent::Released {
            button,
            position: Vector2::new(to.0, to.1),
        },
    )
}

fn main() -> Result<(), serde_json::Error> {
    env_logger::init();

    let mut world = World::new();
    let mut controller = Controller::new();
    let primary = PointerButton::Primary;

    controller.tools_mut().select(Tool::DrawRectangle);
    drag(&mut controller, &mut world, primary, (0.0, 0.0), (200.0, 120.0));
    drag(&mut controller, &mut world, primary, (260.0, -40.0), (380.0, 160.0));

    controller.tools_mut().select(Tool::DrawCircle);
    drag(&mut controller, &mut world, primary, (440.0, 0.0), (560.0, 120.0));

    controller.tools_mut().select(Tool::Slice);
    match drag(&mut controller, &mut world, primary, (-50.0, 20.0), (620.0, 90.0)) {
        ControllerAction::Sliced(report) => log::info!(
            "sliced {} bodies into {} pieces ({} discarded)",
            report.destroyed.len(),
            report.spawned.len(),
            report.discarded_pieces
        ),
        other => log::warn!("slice did nothing: {other:?}"),
    }

    // clear whatever is left of the circle
    if let ControllerAction::Deleted(handles) = drag(
        &mut controller,
        &mut world,
        PointerButton::Secondary,
        (430.0, -10.0),
        (570.0, 130.0),
    ) {
        log::info!("deleted {} bodies", handles.len());
    }

    let bodies: Vec<_> = world.iter().map(|(_, body)| body).collect();
    println!("{}", serde_json::to_string_pretty(&bodies)?);
    Ok(())
}
