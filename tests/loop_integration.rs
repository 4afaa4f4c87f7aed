use glam::Vec2;

use parallax_swarm::assets::{AssetManifest, AssetTable};
use parallax_swarm::platform::ManualScheduler;
use parallax_swarm::renderer::{DrawCommand, DrawList};
use parallax_swarm::sim::SimulationState;
use parallax_swarm::{App, InputEvent, LoopEvent, LoopState, QualityPreset, Settings};

fn app(preset: QualityPreset) -> App<ManualScheduler> {
    let settings = Settings::from_preset(preset);
    let assets = AssetTable::from_urls(AssetManifest::from_settings(&settings).urls());
    let state = SimulationState::new(&settings, &assets, 2024).expect("valid setup");
    App::new(state, ManualScheduler::new())
}

/// Fire the pending frame callback, if the scheduler has one.
fn fire(app: &mut App<ManualScheduler>, now: f64, sink: &mut DrawList) -> bool {
    if app.scheduler_mut().take_pending().is_some() {
        app.on_frame(now, sink);
        true
    } else {
        false
    }
}

#[test]
fn pointer_on_object_gives_no_steering() {
    let mut app = app(QualityPreset::Low);
    let mut sink = DrawList::default();

    app.handle_input(InputEvent::Start);
    assert!(fire(&mut app, 0.0, &mut sink));

    let target = app.state().swarm[0].position;
    let other_before = app.state().swarm[1].position;
    app.handle_input(InputEvent::PointerMoved(target));
    assert!(fire(&mut app, 100.0, &mut sink));

    let state = app.state();
    assert_eq!(state.swarm[0].velocity, Vec2::ZERO);
    assert_eq!(state.swarm[0].position, target);
    if other_before != target {
        assert_ne!(state.swarm[1].velocity, Vec2::ZERO);
    }
    assert!((state.time - 0.1).abs() < 1e-6);
}

#[test]
fn frame_is_cleared_then_fully_drawn() {
    let mut app = app(QualityPreset::Medium);
    let mut sink = DrawList::default();

    app.handle_input(InputEvent::Toggle);
    fire(&mut app, 0.0, &mut sink);
    assert!(sink.is_empty());

    fire(&mut app, 16.0, &mut sink);
    let cmds = sink.commands();
    assert_eq!(cmds[0], DrawCommand::Clear);
    assert_eq!(cmds.iter().filter(|c| **c == DrawCommand::Clear).count(), 1);

    // 3 layers x 2 strips, 100 swarm objects, 1 particle, 1 player
    assert_eq!(cmds.len(), 1 + 6 + 100 + 1 + 1);
}

#[test]
fn particles_cycle_over_a_long_run() {
    let mut app = app(QualityPreset::Low);
    let mut sink = DrawList::default();
    app.handle_input(InputEvent::Start);

    for i in 0..=200 {
        fire(&mut app, i as f64 * 16.0, &mut sink);
    }

    let particles = &app.state().particles;
    // Expiry frees one slot at a time, refilled on the next tick
    assert!(!particles.is_empty());
    assert!(particles.len() <= particles.config.max_particles);
    // Expired particles never survive a tick
    for p in particles.particles() {
        assert!(p.body.age <= p.body.max_age.unwrap_or(f32::INFINITY));
        assert!(p.alpha() >= 0.0 && p.alpha() <= 1.0);
    }
}

#[test]
fn layers_keep_cycling_while_running() {
    let mut app = app(QualityPreset::Low);
    let mut sink = DrawList::default();
    app.handle_input(InputEvent::Start);

    // 10s at 100ms steps; the front layer covers 2000px
    for i in 0..=100 {
        fire(&mut app, i as f64 * 100.0, &mut sink);
    }

    for layer in app.state().background.layers() {
        let x = layer.body.position.x;
        assert!(x + layer.body.width >= 0.0, "layer stuck off-screen at {x}");
        assert!(x <= 0.0);
    }
}

#[test]
fn toggle_stop_cancels_and_notifies() {
    let mut app = app(QualityPreset::Low);
    let mut sink = DrawList::default();

    app.handle_input(InputEvent::Toggle);
    fire(&mut app, 0.0, &mut sink);
    fire(&mut app, 16.0, &mut sink);
    app.handle_input(InputEvent::Toggle);

    assert_eq!(app.run_state(), LoopState::Stopped);
    assert_eq!(app.scheduler().cancelled.len(), 1);
    assert!(!fire(&mut app, 32.0, &mut sink));
    assert_eq!(app.drain_events(), vec![LoopEvent::Started, LoopEvent::Stopped]);

    app.handle_input(InputEvent::Stop);
    assert_eq!(app.scheduler().cancelled.len(), 1);
}
