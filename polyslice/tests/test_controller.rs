use polyslice::{
    assert_fuzzy_eq,
    controller::{Controller, ControllerAction, InputState, PointerButton, PointerEvent, Tool},
    core::{math::Vector2, traits::FuzzyEq},
    polygon::rectangle_points,
    world::{BodyDesc, BodyHandle, BodyKind, BodyLifecycle, Sliceable, World},
};

type Action = ControllerAction<BodyHandle, f64>;

fn press(button: PointerButton, x: f64, y: f64) -> PointerEvent<f64> {
    PointerEvent::Pressed {
        button,
        position: Vector2::new(x, y),
    }
}

fn release(button: PointerButton, x: f64, y: f64) -> PointerEvent<f64> {
    PointerEvent::Released {
        button,
        position: Vector2::new(x, y),
    }
}

/// Press at `from` and release at `to`, returning the release action.
fn drag(
    controller: &mut Controller<f64>,
    world: &mut World<f64>,
    button: PointerButton,
    from: (f64, f64),
    to: (f64, f64),
) -> Action {
    let started = controller.handle_event(world, press(button, from.0, from.1));
    assert_ne!(started, ControllerAction::None);
    controller.handle_event(world, release(button, to.0, to.1))
}

fn expect_spawned(action: Action) -> BodyHandle {
    match action {
        ControllerAction::Spawned(h) => h,
        other => panic!("expected a spawn, got {:?}", other),
    }
}

#[test]
fn rectangle_drag_spawns_body() {
    let mut world = World::new();
    let mut controller = Controller::new();
    assert_eq!(controller.state(), InputState::Idle);
    assert_eq!(controller.tools().selected(), Tool::DrawRectangle);

    let action = controller.handle_event(&mut world, press(PointerButton::Primary, 0.0, 0.0));
    assert_eq!(action, ControllerAction::ToolStarted(Tool::DrawRectangle));
    assert_eq!(
        controller.state(),
        InputState::UsingTool {
            start: Vector2::new(0.0, 0.0)
        }
    );
    assert!(controller.tools().is_locked());

    let moved = controller.handle_event(
        &mut world,
        PointerEvent::Moved {
            position: Vector2::new(40.0, 10.0),
        },
    );
    assert_eq!(moved, ControllerAction::None);

    let action = controller.handle_event(&mut world, release(PointerButton::Primary, 100.0, 50.0));
    let h = expect_spawned(action);
    assert_eq!(controller.state(), InputState::Idle);
    assert!(!controller.tools().is_locked());

    let body = world.get(h).unwrap();
    assert_eq!(body.kind, BodyKind::Rectangle);
    assert_fuzzy_eq!(body.position, Vector2::new(50.0, 25.0));
    assert_fuzzy_eq!(body.mass(), 5000.0);
    assert_fuzzy_eq!(body.polygon().bounding_box(), Vector2::new(100.0, 50.0));
}

#[test]
fn rectangle_drag_in_any_direction() {
    let mut world = World::new();
    let mut controller = Controller::new();
    let h = expect_spawned(drag(
        &mut controller,
        &mut world,
        PointerButton::Primary,
        (100.0, 50.0),
        (0.0, 0.0),
    ));
    let body = world.get(h).unwrap();
    assert_fuzzy_eq!(body.position, Vector2::new(50.0, 25.0));
    assert_fuzzy_eq!(body.mass(), 5000.0);
}

#[test]
fn rectangle_rejected_when_small_or_overlapping() {
    let mut world = World::new();
    let mut controller = Controller::new();
    let primary = PointerButton::Primary;
    expect_spawned(drag(&mut controller, &mut world, primary, (0.0, 0.0), (100.0, 50.0)));

    let overlapping = drag(&mut controller, &mut world, primary, (80.0, 40.0), (150.0, 90.0));
    assert_eq!(overlapping, ControllerAction::Rejected(Tool::DrawRectangle));

    // 5 x 20 = 100 is not above the minimum area
    let small = drag(&mut controller, &mut world, primary, (200.0, 200.0), (205.0, 220.0));
    assert_eq!(small, ControllerAction::Rejected(Tool::DrawRectangle));

    assert_eq!(world.len(), 1);
    assert_eq!(controller.state(), InputState::Idle);
}

#[test]
fn circle_drag_spawns_inscribed_circle() {
    let mut world = World::new();
    let mut controller = Controller::new();
    assert!(controller.tools_mut().select(Tool::DrawCircle));

    let h = expect_spawned(drag(
        &mut controller,
        &mut world,
        PointerButton::Primary,
        (0.0, 0.0),
        (40.0, 20.0),
    ));
    let body = world.get(h).unwrap();
    assert_eq!(body.kind, BodyKind::Circle);
    assert_fuzzy_eq!(body.position, Vector2::new(20.0, 10.0));
    // radius is half the larger drag extent
    assert_eq!(body.polygon().vertex_count(), 16);
    for v in body.polygon().vertexes() {
        assert_fuzzy_eq!(v.length(), 20.0, 1e-9);
    }

    // circle reach overlaps the first one even though the drag box does not
    let action = drag(
        &mut controller,
        &mut world,
        PointerButton::Primary,
        (42.0, 0.0),
        (52.0, 30.0),
    );
    assert_eq!(action, ControllerAction::Rejected(Tool::DrawCircle));

    // radius 5 gives 78.5 area
    let action = drag(
        &mut controller,
        &mut world,
        PointerButton::Primary,
        (200.0, 0.0),
        (210.0, 2.0),
    );
    assert_eq!(action, ControllerAction::Rejected(Tool::DrawCircle));
    assert_eq!(world.len(), 1);
}

#[test]
fn circle_next_to_bounding_corner_spawns() {
    let mut world = World::new();
    let mut controller = Controller::new();
    controller.tools_mut().select(Tool::DrawCircle);
    let primary = PointerButton::Primary;

    expect_spawned(drag(&mut controller, &mut world, primary, (0.0, 0.0), (40.0, 20.0)));
    // center (47.5, 40) radius 20, bounding squares overlap but the circles are 40.7 apart
    let second = expect_spawned(drag(
        &mut controller,
        &mut world,
        primary,
        (45.0, 20.0),
        (50.0, 60.0),
    ));
    assert_fuzzy_eq!(world.get(second).unwrap().position, Vector2::new(47.5, 40.0));
    assert_eq!(world.len(), 2);
}

#[test]
fn delete_region_near_rotated_body_keeps_it() {
    let mut world = World::new();
    let mut controller = Controller::new();
    let h = world.spawn(
        BodyDesc::new(BodyKind::Rectangle, rectangle_points(Vector2::new(10.0, 10.0)))
            .with_rotation(std::f64::consts::FRAC_PI_4),
    );

    // drag rectangle covers the rotated extents corner only
    let secondary = PointerButton::Secondary;
    let action = drag(&mut controller, &mut world, secondary, (11.0, 11.0), (30.0, 30.0));
    assert_eq!(action, ControllerAction::Deleted(Vec::new()));
    assert!(world.contains(h));

    let action = drag(&mut controller, &mut world, secondary, (5.0, 5.0), (30.0, 30.0));
    assert_eq!(action, ControllerAction::Deleted(vec![h]));
    assert!(world.is_empty());
}

#[test]
fn slice_drag_cuts_bodies() {
    let mut world = World::new();
    let mut controller = Controller::new();
    let original = expect_spawned(drag(
        &mut controller,
        &mut world,
        PointerButton::Primary,
        (-100.0, -100.0),
        (100.0, 100.0),
    ));

    assert!(controller.tools_mut().select(Tool::Slice));
    let action = drag(
        &mut controller,
        &mut world,
        PointerButton::Primary,
        (-150.0, 0.0),
        (150.0, 0.0),
    );
    let report = match action {
        ControllerAction::Sliced(report) => report,
        other => panic!("expected a slice, got {:?}", other),
    };
    assert_eq!(report.destroyed, vec![original]);
    assert_eq!(report.spawned.len(), 2);
    for h in report.spawned.iter() {
        assert_fuzzy_eq!(world.get(*h).unwrap().mass(), 200.0 * 97.5, 1e-6);
    }
    assert_eq!(world.len(), 2);
}

#[test]
fn slice_drag_missing_everything_is_rejected() {
    let mut world = World::new();
    let mut controller = Controller::new();
    expect_spawned(drag(
        &mut controller,
        &mut world,
        PointerButton::Primary,
        (0.0, 0.0),
        (100.0, 100.0),
    ));

    controller.tools_mut().select(Tool::Slice);
    let action = drag(
        &mut controller,
        &mut world,
        PointerButton::Primary,
        (-50.0, 500.0),
        (500.0, 500.0),
    );
    assert_eq!(action, ControllerAction::Rejected(Tool::Slice));
    assert_eq!(world.len(), 1);
}

#[test]
fn secondary_drag_deletes_bodies_in_region() {
    let mut world = World::new();
    let mut controller = Controller::new();
    let primary = PointerButton::Primary;
    let left = expect_spawned(drag(&mut controller, &mut world, primary, (0.0, 0.0), (50.0, 50.0)));
    let right = expect_spawned(drag(
        &mut controller,
        &mut world,
        primary,
        (200.0, 0.0),
        (250.0, 50.0),
    ));

    let action = controller.handle_event(&mut world, press(PointerButton::Secondary, -10.0, -10.0));
    assert_eq!(action, ControllerAction::DeleteStarted);
    assert_eq!(
        controller.state(),
        InputState::Deleting {
            start: Vector2::new(-10.0, -10.0)
        }
    );

    let action = controller.handle_event(&mut world, release(PointerButton::Secondary, 25.0, 25.0));
    assert_eq!(action, ControllerAction::Deleted(vec![left]));
    assert!(!world.contains(left));
    assert!(world.contains(right));
    assert_eq!(controller.state(), InputState::Idle);
}

#[test]
fn unrelated_events_are_ignored() {
    let mut world = World::new();
    let mut controller = Controller::new();

    // release without a press
    let action = controller.handle_event(&mut world, release(PointerButton::Primary, 10.0, 10.0));
    assert_eq!(action, ControllerAction::None);
    assert_eq!(controller.state(), InputState::Idle);

    // other button during a drag does not end it
    controller.handle_event(&mut world, press(PointerButton::Primary, 0.0, 0.0));
    let action = controller.handle_event(&mut world, release(PointerButton::Secondary, 5.0, 5.0));
    assert_eq!(action, ControllerAction::None);
    let action = controller.handle_event(&mut world, press(PointerButton::Secondary, 5.0, 5.0));
    assert_eq!(action, ControllerAction::None);
    assert_eq!(
        controller.state(),
        InputState::UsingTool {
            start: Vector2::new(0.0, 0.0)
        }
    );
    assert!(world.is_empty());
}

#[test]
fn tool_selection_locked_during_drag() {
    let mut world = World::new();
    let mut controller = Controller::new();

    controller.handle_event(&mut world, press(PointerButton::Primary, 0.0, 0.0));
    assert!(!controller.tools_mut().select(Tool::Slice));
    assert!(!controller.tools_mut().select_next());

    // drag finishes with the tool it started with
    let action = controller.handle_event(&mut world, release(PointerButton::Primary, 30.0, 30.0));
    let h = expect_spawned(action);
    assert_eq!(world.get(h).unwrap().kind, BodyKind::Rectangle);

    assert!(controller.tools_mut().select(Tool::Slice));
    assert_eq!(controller.tools().selected(), Tool::Slice);
}
